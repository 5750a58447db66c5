pub mod client;
pub mod error;
pub mod extract;
pub mod matcher;
pub mod page;
pub mod resolve;
mod retry;
pub mod variants;

pub use client::{FetchedPage, PriceClient};
pub use error::ScraperError;
pub use extract::{extract_record, parse_price_page};
pub use matcher::{match_link, LinkMatch, SearchToken};
pub use page::{AnchorCandidate, Page};
pub use resolve::BatchResolver;
pub use variants::{enumerate_all, VariantMatch};
