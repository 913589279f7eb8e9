//! Forward translation: client work order → TracOS work order.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::TranslationError;
use crate::external::ExternalWorkOrder;
use crate::internal::InternalWorkOrder;
use crate::status::WorkOrderStatus;
use crate::timestamp::Timestamp;

/// Translate a validated client work order into a fresh TracOS record.
///
/// The result is always unsynced, so every ingested record is picked up by
/// the next outbound pass.
pub fn to_internal(external: &ExternalWorkOrder) -> Result<InternalWorkOrder, TranslationError> {
    let deleted_at: Option<Timestamp> = match external.deleted_date.as_deref() {
        Some(value) if !value.is_empty() => Some(parse_client_date("deletedDate", value)?.into()),
        _ => None,
    };

    Ok(InternalWorkOrder {
        number: external.order_no,
        status: derive_status(external),
        title: external.summary.clone(),
        description: external.summary.clone(),
        created_at: parse_client_date("creationDate", &external.creation_date)?.into(),
        updated_at: parse_client_date("lastUpdateDate", &external.last_update_date)?.into(),
        deleted: external.is_deleted,
        deleted_at,
        is_synced: false,
        synced_at: None,
    })
}

/// Collapse the client's status flags into one status.
///
/// The client does not keep the flags mutually exclusive; the first set flag
/// in the order canceled, done, on hold, pending wins.
pub fn derive_status(external: &ExternalWorkOrder) -> WorkOrderStatus {
    if external.is_canceled {
        WorkOrderStatus::Cancelled
    } else if external.is_done {
        WorkOrderStatus::Completed
    } else if external.is_on_hold {
        WorkOrderStatus::OnHold
    } else if external.is_pending {
        WorkOrderStatus::Pending
    } else {
        WorkOrderStatus::InProgress
    }
}

/// Parse a client date string into a UTC instant.
///
/// Accepts RFC 3339 (`Z` or a numeric offset), a naive date-time taken as
/// UTC, or a bare date at midnight UTC. An empty string yields the current
/// time.
pub fn parse_client_date(field: &'static str, value: &str) -> Result<DateTime<Utc>, TranslationError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(Utc::now());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Some(midnight) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }

    tracing::debug!("Unparseable date in {field}: {value:?}");
    Err(TranslationError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn external() -> ExternalWorkOrder {
        ExternalWorkOrder {
            order_no: 1,
            is_active: true,
            is_canceled: false,
            is_deleted: false,
            is_done: false,
            is_on_hold: false,
            is_pending: false,
            is_synced: false,
            summary: "Pump check".to_string(),
            creation_date: "2024-01-01T00:00:00Z".to_string(),
            last_update_date: "2024-01-02T00:00:00Z".to_string(),
            deleted_date: None,
        }
    }

    #[test]
    fn test_basic_mapping() {
        let internal = to_internal(&external()).unwrap();
        assert_eq!(internal.number, 1);
        assert_eq!(internal.title, "Pump check");
        assert_eq!(internal.description, "Pump check");
        assert_eq!(
            internal.created_at,
            Timestamp::At(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            internal.updated_at,
            Timestamp::At(Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap())
        );
        assert!(!internal.deleted);
        assert_eq!(internal.deleted_at, None);
    }

    #[test]
    fn test_no_flags_is_in_progress() {
        assert_eq!(derive_status(&external()), WorkOrderStatus::InProgress);
    }

    #[test]
    fn test_each_single_flag() {
        let mut wo = external();
        wo.is_pending = true;
        assert_eq!(derive_status(&wo), WorkOrderStatus::Pending);

        let mut wo = external();
        wo.is_on_hold = true;
        assert_eq!(derive_status(&wo), WorkOrderStatus::OnHold);

        let mut wo = external();
        wo.is_done = true;
        assert_eq!(derive_status(&wo), WorkOrderStatus::Completed);

        let mut wo = external();
        wo.is_canceled = true;
        assert_eq!(derive_status(&wo), WorkOrderStatus::Cancelled);
    }

    #[test]
    fn test_flag_precedence() {
        let mut wo = external();
        wo.is_pending = true;
        wo.is_on_hold = true;
        assert_eq!(derive_status(&wo), WorkOrderStatus::OnHold);

        wo.is_done = true;
        assert_eq!(derive_status(&wo), WorkOrderStatus::Completed);

        wo.is_canceled = true;
        assert_eq!(derive_status(&wo), WorkOrderStatus::Cancelled);
    }

    #[test]
    fn test_always_unsynced() {
        let mut wo = external();
        wo.is_synced = true;
        let internal = to_internal(&wo).unwrap();
        assert!(!internal.is_synced);
        assert_eq!(internal.synced_at, None);
    }

    #[test]
    fn test_deleted_fields() {
        let mut wo = external();
        wo.is_deleted = true;
        wo.deleted_date = Some("2024-03-01T12:30:00Z".to_string());
        let internal = to_internal(&wo).unwrap();
        assert!(internal.deleted);
        assert_eq!(
            internal.deleted_at,
            Some(Timestamp::At(Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap()))
        );

        wo.deleted_date = Some(String::new());
        assert_eq!(to_internal(&wo).unwrap().deleted_at, None);
    }

    #[test]
    fn test_parse_offsets_are_normalized_to_utc() {
        let dt = parse_client_date("creationDate", "2024-01-01T03:00:00+03:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_forms() {
        assert_eq!(
            parse_client_date("creationDate", "2024-01-01T08:15:00").unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 8, 15, 0).unwrap()
        );
        assert_eq!(
            parse_client_date("creationDate", "2024-01-01").unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_empty_falls_back_to_now() {
        let before = Utc::now();
        let dt = parse_client_date("creationDate", "").unwrap();
        assert!(dt >= before);
    }

    #[test]
    fn test_parse_garbage_is_a_translation_error() {
        let mut wo = external();
        wo.last_update_date = "yesterday".to_string();
        let err = to_internal(&wo).unwrap_err();
        assert!(matches!(
            err,
            TranslationError::InvalidDate { field: "lastUpdateDate", .. }
        ));
    }
}
