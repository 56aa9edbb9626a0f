use crate::marketplace::MarketplaceConfig;

#[derive(Clone)]
pub struct AppConfig {
    pub taxonomy_base_url: String,
    pub taxonomy_client_id: String,
    pub taxonomy_client_secret: String,
    pub provider_base_url: String,
    pub provider_api_key: String,
    pub marketplace: MarketplaceConfig,
    pub notification_webhook: Option<String>,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub category_page_size: u32,
    pub append_chunk_size: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("taxonomy_base_url", &self.taxonomy_base_url)
            .field("taxonomy_client_id", &self.taxonomy_client_id)
            .field("taxonomy_client_secret", &"[redacted]")
            .field("provider_base_url", &self.provider_base_url)
            .field("provider_api_key", &"[redacted]")
            .field("marketplace", &self.marketplace)
            .field("notification_webhook", &self.notification_webhook)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("category_page_size", &self.category_page_size)
            .field("append_chunk_size", &self.append_chunk_size)
            .finish()
    }
}
