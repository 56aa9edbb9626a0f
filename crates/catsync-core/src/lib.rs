pub mod app_config;
pub mod category;
pub mod config;
pub mod error;
pub mod marketplace;

pub use app_config::AppConfig;
pub use category::{
    Category, CustomFields, COLLECTION_ID_KEY, MANAGED_FLAG_KEY, SEARCH_TERM_KEY,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use marketplace::MarketplaceConfig;
