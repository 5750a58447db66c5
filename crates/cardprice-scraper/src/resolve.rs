//! Batch driver: one search per query, then match, extract, and collect.
//!
//! Queries are independent, so up to `concurrency` of them run at once.
//! Output keeps input order. A query expands to one record, or to one record
//! per variant when it asks for all variants. Failures never abort the
//! batch; they become sentinel records.

use cardprice_core::{CardQuery, PriceRecord};
use futures::stream::{self, StreamExt};
use tokio::sync::watch;

use crate::client::{absolute_link, FetchedPage, PriceClient};
use crate::extract::{extract_record, record_from_body};
use crate::matcher::match_link;
use crate::page::Page;
use crate::variants::enumerate_all;

pub struct BatchResolver {
    client: PriceClient,
    concurrency: usize,
}

impl BatchResolver {
    /// `concurrency` is clamped to at least 1.
    #[must_use]
    pub fn new(client: PriceClient, concurrency: usize) -> Self {
        Self {
            client,
            concurrency: concurrency.max(1),
        }
    }

    /// Resolves every query; see [`BatchResolver::resolve_until`].
    pub async fn resolve(&self, queries: &[CardQuery]) -> Vec<PriceRecord> {
        let (_keep_open, cancel) = watch::channel(false);
        self.resolve_until(queries, cancel).await
    }

    /// Resolves every query until `cancel` becomes `true`.
    ///
    /// After cancellation each query still in flight, or not yet started,
    /// contributes one `not_available` record with its identity, so the
    /// output always has at least one well-formed row per query.
    pub async fn resolve_until(
        &self,
        queries: &[CardQuery],
        cancel: watch::Receiver<bool>,
    ) -> Vec<PriceRecord> {
        let per_query: Vec<Vec<PriceRecord>> = stream::iter(queries)
            .map(|query| {
                let mut cancel = cancel.clone();
                async move {
                    if *cancel.borrow() {
                        return cancelled(query);
                    }
                    tokio::select! {
                        records = self.resolve_one(query) => records,
                        () = wait_for_cancel(&mut cancel) => cancelled(query),
                    }
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let records: Vec<PriceRecord> = per_query.into_iter().flatten().collect();
        let unresolved = records.iter().filter(|r| r.is_unresolved()).count();
        let failed = records.iter().filter(|r| r.is_extraction_failure()).count();
        tracing::info!(
            queries = queries.len(),
            records = records.len(),
            unresolved,
            failed,
            "batch resolved"
        );
        records
    }

    /// Resolves a single query into one or more records.
    pub async fn resolve_one(&self, query: &CardQuery) -> Vec<PriceRecord> {
        let identity = query.identity();

        let search = match self.client.search(query).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(
                    card = query.name(),
                    id = query.id(),
                    error = %e,
                    "search request failed"
                );
                return vec![PriceRecord::extraction_failed(identity, None)];
            }
        };

        if search.is_product_page() {
            let link = search.final_url.to_string();
            tracing::info!(
                card = query.name(),
                id = query.id(),
                url = %link,
                "search redirected to product page"
            );
            return vec![record_from_body(&search.body, &link, identity)];
        }

        let anchors = Page::parse(&search.body).anchors();

        if !query.wants_all_variants() {
            let Some(hit) = match_link(query, &anchors) else {
                tracing::warn!(card = query.name(), id = query.id(), "no matching product link");
                return vec![PriceRecord::unresolved(identity)];
            };
            let Some(link) = resolved_link(&search, &hit.href) else {
                return vec![PriceRecord::extraction_failed(identity, Some(&hit.href))];
            };
            tracing::info!(
                card = query.name(),
                id = query.id(),
                url = %link,
                token = ?hit.token,
                "resolved product link"
            );
            return vec![extract_record(&self.client, &link, identity).await];
        }

        let variants = enumerate_all(query, &anchors);
        if variants.is_empty() {
            tracing::warn!(card = query.name(), id = query.id(), "no variant listings found");
            return vec![PriceRecord::unresolved(identity)];
        }
        tracing::info!(
            card = query.name(),
            id = query.id(),
            variants = variants.len(),
            "resolved variant listings"
        );

        let mut records = Vec::with_capacity(variants.len());
        for variant in variants {
            let variant_identity = identity.with_variant_type(variant.label);
            let record = match resolved_link(&search, &variant.link) {
                Some(link) => extract_record(&self.client, &link, variant_identity).await,
                None => PriceRecord::extraction_failed(variant_identity, Some(&variant.link)),
            };
            records.push(record);
        }
        records
    }
}

fn resolved_link(search: &FetchedPage, href: &str) -> Option<String> {
    match absolute_link(&search.final_url, href) {
        Ok(link) => Some(link),
        Err(e) => {
            tracing::warn!(href, error = %e, "could not resolve product href");
            None
        }
    }
}

fn cancelled(query: &CardQuery) -> Vec<PriceRecord> {
    tracing::warn!(card = query.name(), id = query.id(), "query cancelled");
    vec![PriceRecord::extraction_failed(query.identity(), None)]
}

/// Completes once the flag is `true`. Never completes if the sender is gone.
async fn wait_for_cancel(cancel: &mut watch::Receiver<bool>) {
    if cancel.wait_for(|flag| *flag).await.is_err() {
        std::future::pending::<()>().await;
    }
}
