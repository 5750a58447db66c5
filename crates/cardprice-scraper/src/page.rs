//! Read-only views over fetched HTML documents.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

/// Element id of the grade/price table on a product page.
pub const PRICE_TABLE_ID: &str = "full-prices";

static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("static selector is valid"));
static PRICE_TABLE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(&format!("#{PRICE_TABLE_ID}")).expect("static selector is valid")
});
static TABLE_ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("static selector is valid"));
static TABLE_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("static selector is valid"));
static PRODUCT_IMAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"img[itemprop="image"]"#).expect("static selector is valid"));

/// One hyperlink on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorCandidate {
    /// `None` when the `<a>` has no `href` attribute.
    pub href: Option<String>,
    /// Concatenated text content, whitespace-trimmed.
    pub display_text: String,
}

impl AnchorCandidate {
    #[must_use]
    pub fn new(href: Option<&str>, display_text: &str) -> Self {
        Self {
            href: href.map(str::to_owned),
            display_text: display_text.trim().to_owned(),
        }
    }

    /// Last `/`-separated segment of the href, ignoring a trailing slash.
    #[must_use]
    pub fn final_segment(&self) -> Option<&str> {
        self.href.as_deref().map(final_path_segment)
    }
}

/// Last `/`-separated segment of `href`, ignoring a trailing slash.
#[must_use]
pub fn final_path_segment(href: &str) -> &str {
    href.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
}

/// A parsed HTML document.
pub struct Page {
    document: Html,
}

impl Page {
    #[must_use]
    pub fn parse(body: &str) -> Self {
        Self {
            document: Html::parse_document(body),
        }
    }

    /// Every `<a>` element in document order.
    #[must_use]
    pub fn anchors(&self) -> Vec<AnchorCandidate> {
        self.document
            .select(&ANCHOR)
            .map(|a| AnchorCandidate::new(a.value().attr("href"), &element_text(a)))
            .collect()
    }

    /// Two-cell rows of the price table as `(label, value)` text pairs.
    ///
    /// Returns `None` when the document has no price table. Rows with any
    /// other number of `<td>` cells are skipped.
    #[must_use]
    pub fn price_rows(&self) -> Option<Vec<(String, String)>> {
        let table = self.document.select(&PRICE_TABLE).next()?;
        let rows = table
            .select(&TABLE_ROW)
            .filter_map(|row| {
                let cells: Vec<ElementRef<'_>> = row.select(&TABLE_CELL).collect();
                match cells.as_slice() {
                    [label, value] => Some((element_text(*label), element_text(*value))),
                    _ => None,
                }
            })
            .collect();
        Some(rows)
    }

    /// `src` of the first product image (`<img itemprop="image">`).
    #[must_use]
    pub fn product_image_src(&self) -> Option<String> {
        self.document
            .select(&PRODUCT_IMAGE)
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(str::to_owned)
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_capture_href_and_trimmed_text() {
        let page = Page::parse(
            r#"<html><body>
                <a href="/game/base/charizard-4">  Charizard <b>#4</b> </a>
                <a name="top">Top</a>
            </body></html>"#,
        );
        let anchors = page.anchors();
        assert_eq!(anchors.len(), 2);
        assert_eq!(anchors[0].href.as_deref(), Some("/game/base/charizard-4"));
        assert_eq!(anchors[0].display_text, "Charizard #4");
        assert_eq!(anchors[1].href, None);
    }

    #[test]
    fn final_path_segment_handles_trailing_slash_and_bare_names() {
        assert_eq!(final_path_segment("https://x.com/game/base/charizard-4"), "charizard-4");
        assert_eq!(final_path_segment("/game/base/charizard-4/"), "charizard-4");
        assert_eq!(final_path_segment("charizard-4"), "charizard-4");
        assert_eq!(final_path_segment(""), "");
    }

    #[test]
    fn price_rows_reads_two_cell_rows_only() {
        let page = Page::parse(
            r#"<table id="full-prices">
                <tr><th>Grade</th><th>Price</th></tr>
                <tr><td>Ungraded</td><td> $310.00 </td></tr>
                <tr><td>PSA 10</td><td>$9,250.00</td></tr>
                <tr><td>Volume</td><td>3</td><td>extra</td></tr>
            </table>"#,
        );
        let rows = page.price_rows().expect("table present");
        assert_eq!(
            rows,
            vec![
                ("Ungraded".to_string(), "$310.00".to_string()),
                ("PSA 10".to_string(), "$9,250.00".to_string()),
            ]
        );
    }

    #[test]
    fn price_rows_none_without_table() {
        let page = Page::parse("<table id=\"other\"><tr><td>a</td><td>b</td></tr></table>");
        assert!(page.price_rows().is_none());
    }

    #[test]
    fn product_image_src_uses_first_itemprop_image() {
        let page = Page::parse(
            r#"<img src="/logo.png">
               <img itemprop="image" src="https://img.example.com/charizard.jpg">
               <img itemprop="image" src="https://img.example.com/other.jpg">"#,
        );
        assert_eq!(
            page.product_image_src().as_deref(),
            Some("https://img.example.com/charizard.jpg")
        );
    }

    #[test]
    fn product_image_src_none_when_missing() {
        let page = Page::parse(r#"<img src="/logo.png">"#);
        assert!(page.product_image_src().is_none());
    }
}
