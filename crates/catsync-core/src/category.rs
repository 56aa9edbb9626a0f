//! Taxonomy categories and the custom-field keys the sync job recognizes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Custom-field mapping stored on a category by the taxonomy backend.
pub type CustomFields = serde_json::Map<String, Value>;

/// Boolean flag marking a category as collection-managed.
pub const MANAGED_FLAG_KEY: &str = "is_collection_managed";
/// Provider collection id resolved for the category on a previous run.
pub const COLLECTION_ID_KEY: &str = "collection_id";
/// Optional search term overriding the category name.
pub const SEARCH_TERM_KEY: &str = "collection_search_term";

/// A taxonomy node as returned by the category listing endpoint.
///
/// Only the fields the sync job reads are modeled. The backend may send
/// `customFields` as `null` or, when nothing was ever stored, as an empty
/// array `[]`; both deserialize to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(
        default,
        rename = "customFields",
        deserialize_with = "deserialize_custom_fields"
    )]
    pub custom_fields: Option<CustomFields>,
}

fn deserialize_custom_fields<'de, D>(deserializer: D) -> Result<Option<CustomFields>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(fields)) => Ok(Some(fields)),
        Some(Value::Array(items)) if items.is_empty() => Ok(None),
        Some(other) => Err(serde::de::Error::custom(format!(
            "customFields must be an object, got {other}"
        ))),
    }
}

impl Category {
    fn field(&self, key: &str) -> Option<&Value> {
        self.custom_fields.as_ref()?.get(key)
    }

    fn non_empty_str_field(&self, key: &str) -> Option<&str> {
        self.field(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Returns `true` when the managed flag is present and truthy.
    ///
    /// Besides JSON booleans, the backend's admin UI can store the flag as
    /// `1`/`0` or `"1"`/`"0"`; those are accepted too.
    #[must_use]
    pub fn is_collection_managed(&self) -> bool {
        match self.field(MANAGED_FLAG_KEY) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            Some(Value::String(s)) => !s.is_empty() && s != "0" && s != "false",
            _ => false,
        }
    }

    /// The collection id cached on a previous run, if any.
    #[must_use]
    pub fn cached_collection_id(&self) -> Option<&str> {
        self.non_empty_str_field(COLLECTION_ID_KEY)
    }

    /// The explicit search term, if set and non-empty.
    #[must_use]
    pub fn explicit_search_term(&self) -> Option<&str> {
        self.non_empty_str_field(SEARCH_TERM_KEY)
    }

    /// The term used both as collection name and marketplace query:
    /// the explicit search term, falling back to the display name.
    ///
    /// Returns `None` when neither is a non-empty string.
    #[must_use]
    pub fn effective_search_term(&self) -> Option<&str> {
        self.explicit_search_term()
            .or_else(|| self.name.as_deref().filter(|n| !n.is_empty()))
    }

    /// Copy of the custom fields with the collection id set to `collection_id`.
    ///
    /// All other keys are preserved so the patch does not clobber fields
    /// owned by other integrations.
    #[must_use]
    pub fn custom_fields_with_collection_id(&self, collection_id: &str) -> CustomFields {
        let mut fields = self.custom_fields.clone().unwrap_or_default();
        fields.insert(
            COLLECTION_ID_KEY.to_owned(),
            Value::String(collection_id.to_owned()),
        );
        fields
    }
}
