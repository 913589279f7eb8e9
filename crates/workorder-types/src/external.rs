//! Client-side work order schema.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ValidationError;
use crate::validate::check_required_fields;

/// A work order as exchanged with the client system.
///
/// Field order is the order in which outbound files are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalWorkOrder {
    pub order_no: i64,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_canceled: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_deleted: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_done: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_on_hold: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_pending: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_synced: bool,
    pub summary: String,
    pub creation_date: String,
    pub last_update_date: String,
    #[serde(default)]
    pub deleted_date: Option<String>,
}

impl ExternalWorkOrder {
    /// Gate a raw client document and parse it into the typed schema.
    ///
    /// Fails closed: a record missing any required field never reaches the
    /// typed parse, and a record whose fields have the wrong JSON types is
    /// rejected as [`ValidationError::InvalidShape`].
    pub fn from_json(value: Value) -> Result<Self, ValidationError> {
        check_required_fields(&value)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Number of status flags set. Only records with at most one are
    /// guaranteed to survive a round trip through TracOS.
    pub fn status_flag_count(&self) -> usize {
        [self.is_canceled, self.is_done, self.is_on_hold, self.is_pending]
            .iter()
            .filter(|flag| **flag)
            .count()
    }
}

fn null_as_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}
