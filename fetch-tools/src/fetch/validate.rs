//! Local parameter checks run before any network call.

use fetch_tools_types::ToolFailure;
use serde_json::Value;

/// `params[field]` as a positive integer. Strings, floats, booleans and
/// missing values are all rejected, even when they look numeric. Any
/// positive integer JSON can carry is accepted, including those past `i64::MAX`.
pub fn positive_integer(params: &Value, field: &str) -> Result<u64, ToolFailure> {
    match params.get(field).and_then(Value::as_u64) {
        Some(id) if id > 0 => Ok(id),
        _ => Err(invalid_positive_integer(field)),
    }
}

pub fn invalid_positive_integer(field: &str) -> ToolFailure {
    ToolFailure::invalid_input(format!("Invalid {}. Must be a positive integer.", field))
}

/// `params[field]` as a string with surrounding whitespace removed; empty
/// and non-string values are rejected.
pub fn non_empty_string(params: &Value, field: &str) -> Result<String, ToolFailure> {
    match params.get(field).and_then(Value::as_str).map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(invalid_non_empty_string(field)),
    }
}

pub fn invalid_non_empty_string(field: &str) -> ToolFailure {
    ToolFailure::invalid_input(format!("Invalid {}. Must be a non-empty string.", field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_positive_integer_accepts_positive_ids() {
        assert_eq!(positive_integer(&json!({"todo_id": 1}), "todo_id").unwrap(), 1);
        assert_eq!(positive_integer(&json!({"todo_id": 99999}), "todo_id").unwrap(), 99999);
        assert_eq!(
            positive_integer(&json!({"todo_id": 9223372036854775808u64}), "todo_id").unwrap(),
            9223372036854775808
        );
        assert_eq!(positive_integer(&json!({"todo_id": u64::MAX}), "todo_id").unwrap(), u64::MAX);
    }

    #[test]
    fn test_positive_integer_rejects_everything_else() {
        let rejected = [
            json!({"todo_id": 0}),
            json!({"todo_id": -5}),
            json!({"todo_id": 1.5}),
            json!({"todo_id": 1.0}),
            json!({"todo_id": "abc"}),
            json!({"todo_id": "3"}),
            json!({"todo_id": true}),
            json!({"todo_id": null}),
            json!({}),
            json!([1]),
        ];

        for params in rejected {
            let failure = positive_integer(&params, "todo_id").unwrap_err();
            assert_eq!(failure.kind(), "InvalidInput", "params {}", params);
            assert_eq!(failure.message(), "Invalid todo_id. Must be a positive integer.");
        }
    }

    #[test]
    fn test_non_empty_string() {
        assert_eq!(non_empty_string(&json!({"city": " Oslo "}), "city").unwrap(), "Oslo");

        for params in [json!({"city": ""}), json!({"city": "   "}), json!({"city": 7}), json!({})] {
            let failure = non_empty_string(&params, "city").unwrap_err();
            assert_eq!(failure.kind(), "InvalidInput", "params {}", params);
        }
    }
}
