//! "All variants" enumeration over a search-results page.

use cardprice_core::CardQuery;

use crate::page::AnchorCandidate;

/// One variant listing: a label derived from the anchor text plus its href.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantMatch {
    pub label: String,
    pub link: String,
}

/// Collects every anchor that names both the card and its id.
///
/// An anchor qualifies when its lowercased final path segment contains the
/// slug as a hyphen-delimited token run and the id as a substring, and its lowercased
/// text contains the card name and the id. Results keep page order and are
/// not deduplicated.
#[must_use]
pub fn enumerate_all(query: &CardQuery, anchors: &[AnchorCandidate]) -> Vec<VariantMatch> {
    let slug = query.slug();
    let name = query.name();
    let id = query.id();
    let slug_tokens: Vec<&str> = slug.split('-').collect();

    anchors
        .iter()
        .filter_map(|anchor| {
            let href = anchor.href.as_deref()?;
            if anchor.display_text.is_empty() {
                return None;
            }
            let segment = anchor.final_segment()?.to_lowercase();
            if !contains_token_run(&segment, &slug_tokens) || !segment.contains(id) {
                return None;
            }

            let text = anchor.display_text.to_lowercase();
            let names_card = text.contains(slug.as_str()) || text.contains(name);
            if !names_card || !text.contains(id) {
                return None;
            }

            let label = strip_card_and_id(&text, &slug, name, id);
            tracing::debug!(card = name, id, href, label = %label, "variant listed");
            Some(VariantMatch {
                label,
                link: href.to_string(),
            })
        })
        .collect()
}

/// True when `needle` occurs as consecutive hyphen-separated tokens of `segment`.
fn contains_token_run(segment: &str, needle: &[&str]) -> bool {
    if needle.is_empty() {
        return false;
    }
    let tokens: Vec<&str> = segment.split('-').collect();
    tokens.windows(needle.len()).any(|window| window == needle)
}

/// Removes the card name (slug or spaced form) and `#{id}` from `text`, then trims.
fn strip_card_and_id(text: &str, slug: &str, name: &str, id: &str) -> String {
    let mut label = text.replace(slug, "");
    if name != slug && !name.is_empty() {
        label = label.replace(name, "");
    }
    label.replace(&format!("#{id}"), "").trim().to_string()
}
