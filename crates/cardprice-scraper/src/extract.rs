//! Product-page extraction into a [`PriceRecord`].

use cardprice_core::{CardIdentity, PriceRecord};

use crate::client::PriceClient;
use crate::error::ScraperError;
use crate::page::Page;

/// Parses a product page body into a record.
///
/// A missing price table is tolerated and leaves every price `not_available`.
/// A missing product image is an error.
///
/// # Errors
///
/// Returns [`ScraperError::MissingProductImage`] if the page has no
/// `<img itemprop="image">` with a `src`.
pub fn parse_price_page(
    body: &str,
    final_link: &str,
    identity: CardIdentity,
) -> Result<PriceRecord, ScraperError> {
    let page = Page::parse(body);

    let rows = page.price_rows().unwrap_or_else(|| {
        tracing::warn!(url = final_link, "price table not found; prices left not_available");
        Vec::new()
    });

    let img_link = page
        .product_image_src()
        .ok_or_else(|| ScraperError::MissingProductImage {
            url: final_link.to_owned(),
        })?;

    Ok(PriceRecord::from_price_rows(
        identity, final_link, rows, &img_link,
    ))
}

/// Like [`parse_price_page`], but folds any error into an extraction-failure record.
#[must_use]
pub fn record_from_body(body: &str, final_link: &str, identity: CardIdentity) -> PriceRecord {
    match parse_price_page(body, final_link, identity.clone()) {
        Ok(record) => record,
        Err(e) => extraction_failure(identity, final_link, &e),
    }
}

/// Fetches `final_link` and extracts its record. Never fails: network and
/// parse errors produce a `not_available` record that keeps `identity`.
pub async fn extract_record(
    client: &PriceClient,
    final_link: &str,
    identity: CardIdentity,
) -> PriceRecord {
    match client.fetch_page(final_link).await {
        Ok(page) => record_from_body(&page.body, final_link, identity),
        Err(e) => extraction_failure(identity, final_link, &e),
    }
}

fn extraction_failure(identity: CardIdentity, final_link: &str, err: &ScraperError) -> PriceRecord {
    tracing::warn!(
        card = %identity.card,
        id = %identity.id,
        url = final_link,
        error = %err,
        "extraction failed; prices set to not_available"
    );
    PriceRecord::extraction_failed(identity, Some(final_link))
}
