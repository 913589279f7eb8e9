//! TracOS work order schema.

use bson::Document;
use serde::{Deserialize, Serialize};

use crate::error::TranslationError;
use crate::status::WorkOrderStatus;
use crate::timestamp::Timestamp;

/// Storage-only key MongoDB assigns to every document.
pub const STORAGE_ID_FIELD: &str = "_id";

/// A work order in the canonical TracOS schema.
///
/// `number` is the join key with the client's `orderNo` and is unique in the
/// store. `is_synced` is only ever set by the outbound stage, after the
/// client file has been written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalWorkOrder {
    pub number: i64,
    #[serde(default)]
    pub status: WorkOrderStatus,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub deleted_at: Option<Timestamp>,
    #[serde(default)]
    pub is_synced: bool,
    #[serde(default)]
    pub synced_at: Option<Timestamp>,
}

impl InternalWorkOrder {
    /// Decode a document read from the store, dropping its storage id first.
    pub fn from_stored(mut doc: Document) -> Result<Self, TranslationError> {
        doc.remove(STORAGE_ID_FIELD);
        Ok(bson::from_document(doc)?)
    }

    /// Encode as a full replacement document (no storage id).
    pub fn to_document(&self) -> Result<Document, bson::ser::Error> {
        bson::to_document(self)
    }
}
