//! Raw JSON form fields.
//!
//! Request bodies are read as loose JSON values so that a field of the wrong
//! type becomes a field error (`"Expected string, received number"`) instead
//! of a body parse failure.

use serde_json::Value;

use harborview_core::ValidationErrors;

/// JSON type name as shown in validation messages.
pub const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn type_error(errors: &mut ValidationErrors, field: &str, expected: &str, value: &Value) {
    errors.add(
        field,
        format!("Expected {expected}, received {}", json_type_name(value)),
    );
}

/// Optional string. Absent or `null` is `None`.
pub fn optional_string(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<Value>,
) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => {
            type_error(errors, field, "string", &other);
            None
        }
    }
}

/// Optional boolean. Absent or `null` is `None`.
pub fn optional_bool(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<Value>,
) -> Option<bool> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::Bool(b)) => Some(b),
        Some(other) => {
            type_error(errors, field, "boolean", &other);
            None
        }
    }
}

/// Trim an optional string, mapping blank values to `None`.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Trim a required string and check its minimum length.
pub fn required_text(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<Value>,
    min: usize,
) -> String {
    match value {
        None | Some(Value::Null) => {
            errors.add(field, "Required");
            String::new()
        }
        Some(value) => match optional_string(errors, field, Some(value)) {
            Some(text) => {
                let text = text.trim().to_owned();
                errors.check_min_chars(field, &text, min);
                text
            }
            None => String::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_required_text_reports_missing_once() {
        let mut errors = ValidationErrors::new();
        required_text(&mut errors, "name", Some(Value::Null), 2);
        assert_eq!(errors.field("name"), Some(&["Required".to_string()][..]));
    }

    #[test]
    fn test_required_text_reports_wrong_type() {
        let mut errors = ValidationErrors::new();
        required_text(&mut errors, "name", Some(json!(123)), 2);
        assert_eq!(
            errors.field("name"),
            Some(&["Expected string, received number".to_string()][..])
        );
    }

    #[test]
    fn test_required_text_trims_before_length_check() {
        let mut errors = ValidationErrors::new();
        let text = required_text(&mut errors, "name", Some(json!("  Al  ")), 2);
        assert_eq!(text, "Al");
        assert!(errors.is_empty());

        required_text(&mut errors, "name", Some(json!("  A ")), 2);
        assert!(errors.field("name").is_some());
    }

    #[test]
    fn test_optional_bool() {
        let mut errors = ValidationErrors::new();
        assert_eq!(optional_bool(&mut errors, "isRead", Some(json!(true))), Some(true));
        assert_eq!(optional_bool(&mut errors, "isRead", None), None);
        assert!(errors.is_empty());

        assert_eq!(optional_bool(&mut errors, "isRead", Some(json!("yes"))), None);
        assert_eq!(
            errors.field("isRead"),
            Some(&["Expected boolean, received string".to_string()][..])
        );
    }
}
