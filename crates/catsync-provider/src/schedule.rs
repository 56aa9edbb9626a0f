//! Creation-time settings for new collections.

use rand::Rng;

use crate::types::NewCollection;

/// Settings applied to every collection the sync job creates.
///
/// Only consulted at creation; existing collections are never updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSettings {
    pub notification_webhook: Option<String>,
    pub priority: String,
}

impl Default for CollectionSettings {
    fn default() -> Self {
        Self {
            notification_webhook: None,
            priority: "normal".to_owned(),
        }
    }
}

impl CollectionSettings {
    #[must_use]
    pub fn with_webhook(notification_webhook: Option<String>) -> Self {
        Self {
            notification_webhook,
            ..Self::default()
        }
    }

    /// Builds the create body for a weekly, enabled, product-type collection.
    ///
    /// Day-of-week and hour are drawn from `0..=5` so the collections created
    /// in one pass do not all run in the same slot.
    #[must_use]
    pub fn new_collection(&self, name: &str) -> NewCollection {
        let mut rng = rand::rng();
        let day: u8 = rng.random_range(0..=5);
        let hour: u8 = rng.random_range(0..=5);
        NewCollection {
            name: name.to_owned(),
            enabled: true,
            schedule_type: "weekly".to_owned(),
            schedule_days_of_week: day.to_string(),
            schedule_hours: hour.to_string(),
            priority: self.priority.clone(),
            notification_webhook: self.notification_webhook.clone(),
            requests_type: "product".to_owned(),
            notification_as_json: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_collection_uses_fixed_weekly_product_settings() {
        let settings = CollectionSettings::with_webhook(Some("https://hooks.example.com".into()));
        let body = settings.new_collection("garden hose");
        assert_eq!(body.name, "garden hose");
        assert!(body.enabled);
        assert_eq!(body.schedule_type, "weekly");
        assert_eq!(body.priority, "normal");
        assert_eq!(body.requests_type, "product");
        assert!(body.notification_as_json);
        assert_eq!(
            body.notification_webhook.as_deref(),
            Some("https://hooks.example.com")
        );
    }

    #[test]
    fn schedule_slots_stay_within_range() {
        let settings = CollectionSettings::default();
        for _ in 0..100 {
            let body = settings.new_collection("x");
            let day: u8 = body.schedule_days_of_week.parse().unwrap();
            let hour: u8 = body.schedule_hours.parse().unwrap();
            assert!(day <= 5, "day out of range: {day}");
            assert!(hour <= 5, "hour out of range: {hour}");
        }
    }

    #[test]
    fn webhook_is_omitted_from_body_when_unset() {
        let body = CollectionSettings::default().new_collection("x");
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("notification_webhook").is_none());
        assert_eq!(json["notification_as_json"], serde_json::json!(true));
    }
}
