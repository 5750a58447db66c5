/// Runtime settings for a resolution run, sourced from `CARDPRICE_*` env vars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub log_level: String,
    /// Origin of the pricing site, without a trailing path.
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_concurrent_queries: usize,
    /// Extra attempts after the first failed fetch. `0` disables retries.
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
}
