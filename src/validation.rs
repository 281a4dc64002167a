//! Form coercion and field-level validation helpers.
//!
//! Submitted forms arrive as untyped strings. The `parse_*` helpers apply the
//! best-effort substitution rules shared by every workflow; the typed input
//! structs in `crate::models` then run their `validator` rules.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use validator::{ValidationError, ValidationErrors};

/// Field name -> list of user-facing messages.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Digits with optional leading `+`, spaces, dots, dashes and parentheses.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[0-9\s().\-]{6,24}$").expect("valid phone regex")
});

/// Custom `validator` rule backing every phone field.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if PHONE_RE.is_match(phone) && digits >= 6 {
        Ok(())
    } else {
        Err(ValidationError::new("phone").with_message(Cow::from("Invalid phone number")))
    }
}

/// Flatten `validator` output into per-field message lists.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{field} is invalid"))
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

/// Add a single message to an error map.
pub fn push_error(errors: &mut FieldErrors, field: &str, message: impl Into<String>) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(message.into());
}

/// Trimmed text; blank counts as absent.
pub fn parse_text(raw: &Option<String>) -> Option<String> {
    raw.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Foreign-key or path id. Anything unparsable is `0`, i.e. "no selection".
pub fn parse_id(raw: &Option<String>) -> i32 {
    raw.as_deref()
        .and_then(|s| s.trim().parse::<i32>().ok())
        .unwrap_or(0)
}

/// Optional reference: `0`, negative or unparsable means none.
pub fn parse_optional_id(raw: &Option<String>) -> Option<i32> {
    Some(parse_id(raw)).filter(|id| *id > 0)
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM[:SS]` and plain `YYYY-MM-DD` (midnight UTC).
pub fn parse_date(raw: &Option<String>) -> Option<DateTime<Utc>> {
    let s = raw.as_deref()?.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Numeric field; `None` when blank or unparsable.
pub fn parse_number<T: std::str::FromStr>(raw: &Option<String>) -> Option<T> {
    raw.as_deref().and_then(|s| s.trim().parse::<T>().ok())
}

/// Active-flag semantics: `on`/`true` (also the `true,false` pair sent by a
/// checkbox with a hidden fallback input) is true, any other submitted value
/// is false, and an absent field keeps the entity default of true.
pub fn parse_flag(raw: &Option<String>) -> bool {
    match raw.as_deref().map(str::trim) {
        Some(v) => v.eq_ignore_ascii_case("on") || v.to_ascii_lowercase().contains("true"),
        None => true,
    }
}

/// Date rendering used when echoing stored values back into a form.
pub fn format_date(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn ids_fall_back_to_zero() {
        assert_eq!(parse_id(&some("42")), 42);
        assert_eq!(parse_id(&some(" 7 ")), 7);
        assert_eq!(parse_id(&some("abc")), 0);
        assert_eq!(parse_id(&some("")), 0);
        assert_eq!(parse_id(&None), 0);
        assert_eq!(parse_optional_id(&some("0")), None);
        assert_eq!(parse_optional_id(&some("-3")), None);
        assert_eq!(parse_optional_id(&some("3")), Some(3));
    }

    #[test]
    fn dates_accept_common_shapes() {
        let d = parse_date(&some("2024-03-15")).unwrap();
        assert_eq!((d.year(), d.month(), d.day(), d.hour()), (2024, 3, 15, 0));

        let d = parse_date(&some("2024-03-15T10:30")).unwrap();
        assert_eq!((d.hour(), d.minute()), (10, 30));

        let d = parse_date(&some("2024-03-15T10:30:00+02:00")).unwrap();
        assert_eq!(d.hour(), 8);

        assert!(parse_date(&some("15/03/2024")).is_none());
        assert!(parse_date(&some("   ")).is_none());
        assert!(parse_date(&None).is_none());
    }

    #[test]
    fn flag_values() {
        assert!(parse_flag(&some("on")));
        assert!(parse_flag(&some("true")));
        assert!(parse_flag(&some("true,false")));
        assert!(!parse_flag(&some("false")));
        assert!(!parse_flag(&some("")));
        assert!(parse_flag(&None));
    }

    #[test]
    fn text_is_trimmed_and_blank_is_absent() {
        assert_eq!(parse_text(&some("  Acme  ")), Some("Acme".to_string()));
        assert_eq!(parse_text(&some("   ")), None);
        assert_eq!(parse_text(&None), None);
    }

    #[test]
    fn phone_rule() {
        assert!(validate_phone("+1 (555) 123-4567").is_ok());
        assert!(validate_phone("0771234567").is_ok());
        assert!(validate_phone("555.123.4567").is_ok());
        assert!(validate_phone("call me").is_err());
        assert!(validate_phone("12").is_err());
        let err = validate_phone("abc").unwrap_err();
        assert_eq!(err.message.as_deref(), Some("Invalid phone number"));
    }

    #[test]
    fn numbers_are_permissive() {
        assert_eq!(parse_number::<f64>(&some("12.50")), Some(12.5));
        assert_eq!(parse_number::<i32>(&some("x")), None);
        assert_eq!(parse_number::<i32>(&None), None);
    }
}
