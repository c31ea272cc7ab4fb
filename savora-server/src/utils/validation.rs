//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits are chosen as reasonable UX limits for names, notes and
//! descriptions; the document store enforces no length limits itself.

use validator::Validate;

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: food, recipe title, user name, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions, instructions, comments
pub const MAX_TEXT_LEN: usize = 2000;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Run derive-based validation on a payload and flatten the result into a
/// single field-listing validation error.
///
/// Each offending field is reported as `field: message`, joined with `; `,
/// so the caller sees every problem in one round trip.
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(|errors| {
        let mut parts: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let detail = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    format!("{field}: {detail}")
                })
            })
            .collect();
        parts.sort();
        AppError::validation(parts.join("; "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Payload {
        #[validate(length(min = 1, message = "must not be empty"))]
        name: String,
        #[validate(range(min = 0, message = "must not be negative"))]
        count: i64,
    }

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("pasta", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("  ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(300), "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_payload_reports_every_field() {
        let bad = Payload {
            name: String::new(),
            count: -1,
        };
        let err = validate_payload(&bad).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("name: must not be empty"));
        assert!(msg.contains("count: must not be negative"));
    }

    #[test]
    fn test_payload_ok() {
        let good = Payload {
            name: "rice".into(),
            count: 3,
        };
        assert!(validate_payload(&good).is_ok());
    }
}
