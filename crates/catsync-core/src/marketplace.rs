//! Marketplace request settings shared by search and membership appends.

/// Locale and delivery settings attached to every marketplace request.
///
/// Loaded once at startup and threaded into the provider client and engine;
/// nothing reads these values from the environment after boot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketplaceConfig {
    /// Marketplace domain, e.g. `amazon.de`.
    pub domain: String,
    /// Result language, e.g. `de_DE`.
    pub language: String,
    /// Price currency, e.g. `eur`.
    pub currency: String,
    /// Postal code used for delivery-dependent offers.
    pub customer_zipcode: String,
}
