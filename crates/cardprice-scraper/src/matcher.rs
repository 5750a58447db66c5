//! Single-variant link resolution.
//!
//! Search-result pages carry no stable product key, only hrefs such as
//! `/game/pokemon-base-set/charizard-holo-4`. A query is turned into an
//! ordered list of [`SearchToken`]s, most specific first, and the first token
//! that appears in some anchor's final path segment decides the link.

use cardprice_core::CardQuery;

use crate::page::AnchorCandidate;

/// One candidate href fragment. Variant order is precedence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchToken {
    /// `{slug}-{variant_type}-{id}`
    Explicit { variant_type: String },
    /// `{slug}-holo-{id}`
    Holo,
    /// `{slug}-foil`, the alternate wording some listings use for holo.
    Foil,
    /// `{slug}-1st-edition-{id}`
    FirstEdition,
    /// `{slug}-reverse-holo-{id}`
    ReverseHolo,
    /// `{slug}-{id}`
    SlugAndId,
    /// `{slug}`
    SlugOnly,
}

impl SearchToken {
    /// Tokens that apply to `query`, in the order they are tried.
    #[must_use]
    pub fn policy(query: &CardQuery) -> Vec<SearchToken> {
        let mut tokens = Vec::with_capacity(7);
        if let Some(variant_type) = query.variant_type() {
            tokens.push(Self::Explicit {
                variant_type: variant_type.to_string(),
            });
        }
        if query.holo() {
            tokens.push(Self::Holo);
            tokens.push(Self::Foil);
        }
        if query.first_edition() {
            tokens.push(Self::FirstEdition);
        }
        if query.reverse_holo() {
            tokens.push(Self::ReverseHolo);
        }
        tokens.push(Self::SlugAndId);
        tokens.push(Self::SlugOnly);
        tokens
    }

    /// Lowercased substring to look for in an href's final segment.
    #[must_use]
    pub fn render(&self, slug: &str, id: &str) -> String {
        let token = match self {
            Self::Explicit { variant_type } => {
                format!("{slug}-{}-{id}", variant_type.replace(' ', "-"))
            }
            Self::Holo => format!("{slug}-holo-{id}"),
            Self::Foil => format!("{slug}-foil"),
            Self::FirstEdition => format!("{slug}-1st-edition-{id}"),
            Self::ReverseHolo => format!("{slug}-reverse-holo-{id}"),
            Self::SlugAndId => format!("{slug}-{id}"),
            Self::SlugOnly => slug.to_string(),
        };
        token.to_lowercase()
    }
}

/// A resolved link and the token that found it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMatch {
    pub href: String,
    pub token: SearchToken,
}

/// Returns the href picked by the first satisfiable token, or `None`.
///
/// Tokens are tried in [`SearchToken::policy`] order; for each token every
/// anchor is scanned in page order. A later, more generic token is only
/// consulted when no anchor matches any earlier one.
#[must_use]
pub fn match_link(query: &CardQuery, anchors: &[AnchorCandidate]) -> Option<LinkMatch> {
    let slug = query.slug();
    let segments: Vec<Option<(String, &str)>> = anchors
        .iter()
        .map(|anchor| {
            let href = anchor.href.as_deref()?;
            Some((anchor.final_segment()?.to_lowercase(), href))
        })
        .collect();

    for token in SearchToken::policy(query) {
        let needle = token.render(&slug, query.id());
        if needle.is_empty() {
            continue;
        }
        let hit = segments
            .iter()
            .flatten()
            .find(|(segment, _)| segment.contains(&needle))
            .map(|(_, href)| *href);
        if let Some(href) = hit {
            tracing::debug!(
                card = query.name(),
                id = query.id(),
                token = %needle,
                href,
                "token matched"
            );
            return Some(LinkMatch {
                href: href.to_string(),
                token,
            });
        }
    }

    None
}

#[cfg(test)]
#[path = "matcher_test.rs"]
mod tests;
