//! Reverse translation: TracOS work order → client work order.

use chrono::SecondsFormat;

use crate::external::ExternalWorkOrder;
use crate::internal::InternalWorkOrder;
use crate::status::WorkOrderStatus;
use crate::timestamp::Timestamp;

/// Translate a TracOS record into the payload published to the client.
///
/// `isSynced` is always `true` here: it describes the state being published.
/// The store's own flag is updated separately, after the write succeeds.
pub fn to_external(internal: &InternalWorkOrder) -> ExternalWorkOrder {
    let status = internal.status;

    ExternalWorkOrder {
        order_no: internal.number,
        is_active: true,
        is_canceled: status == WorkOrderStatus::Cancelled,
        is_deleted: internal.deleted,
        is_done: status == WorkOrderStatus::Completed,
        is_on_hold: status == WorkOrderStatus::OnHold,
        is_pending: status == WorkOrderStatus::Pending,
        is_synced: true,
        summary: internal.title.clone(),
        creation_date: format_client_date(&internal.created_at),
        last_update_date: format_client_date(&internal.updated_at),
        deleted_date: internal.deleted_at.as_ref().map(format_client_date),
    }
}

/// Format a timestamp as ISO-8601 with a literal `Z`.
///
/// Text timestamps are passed through untouched, so translating an
/// already-translated value is a no-op.
pub fn format_client_date(timestamp: &Timestamp) -> String {
    match timestamp {
        Timestamp::At(dt) => dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        Timestamp::Text(s) => s.clone(),
    }
}
