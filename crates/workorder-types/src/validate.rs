//! Required-field gate for raw client records.

use serde_json::Value;

use crate::error::ValidationError;

/// Fields every client work order must carry with a non-empty value.
pub const REQUIRED_FIELDS: [&str; 4] = ["orderNo", "summary", "creationDate", "lastUpdateDate"];

/// Returns `true` when every required field is present, non-null and not `""`.
///
/// Optional fields are never inspected.
pub fn validate(record: &Value) -> bool {
    check_required_fields(record).is_ok()
}

/// Like [`validate`], but reports the first offending field.
pub fn check_required_fields(record: &Value) -> Result<(), ValidationError> {
    let object = record.as_object().ok_or(ValidationError::NotAnObject)?;

    for field in REQUIRED_FIELDS {
        match object.get(field) {
            None => return Err(ValidationError::MissingField(field)),
            Some(Value::Null) => return Err(ValidationError::EmptyField(field)),
            Some(Value::String(s)) if s.is_empty() => {
                return Err(ValidationError::EmptyField(field))
            }
            Some(_) => {}
        }
    }

    Ok(())
}
