//! Structural validation of inbound item data.
//!
//! Every check runs before the store is touched. Failures are collected per
//! field so a client sees all of its mistakes in one response.

use serde_json::{Map, Value};
use std::fmt;

use crate::models::{FieldError, ItemCreate};

/// Column width of `items.name`.
pub const NAME_MAX_LENGTH: usize = 100;

const MSG_FIELD_REQUIRED: &str = "field required";
const TYPE_MISSING: &str = "value_error.missing";
const MSG_NONE_NOT_ALLOWED: &str = "none is not an allowed value";
const TYPE_NONE_NOT_ALLOWED: &str = "type_error.none.not_allowed";
const MSG_NUL_CHARACTER: &str = "string contains a NUL character";
const TYPE_NUL_CHARACTER: &str = "value_error.str.nul";

/// One or more input locations failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    fn single(loc: &[&str], msg: impl Into<String>, kind: &str) -> Self {
        Self {
            errors: vec![field_error(loc, msg, kind)],
        }
    }

    /// Names of the failing fields, e.g. `["price", "tax"]`.
    pub fn fields(&self) -> Vec<&str> {
        self.errors
            .iter()
            .filter_map(|e| e.loc.last().map(String::as_str))
            .collect()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.loc.join("."), e.msg))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationError {}

fn field_error(loc: &[&str], msg: impl Into<String>, kind: &str) -> FieldError {
    FieldError {
        loc: loc.iter().map(|s| s.to_string()).collect(),
        msg: msg.into(),
        kind: kind.to_string(),
    }
}

/// Decode a raw request body into an untyped JSON value.
pub fn parse_body(bytes: &[u8]) -> Result<Value, ValidationError> {
    serde_json::from_slice(bytes).map_err(|e| {
        ValidationError::single(&["body"], format!("invalid JSON: {}", e), "value_error.jsondecode")
    })
}

/// Parse the `{id}` path segment.
pub fn parse_item_id(raw: &str) -> Result<i64, ValidationError> {
    raw.parse::<i64>().map_err(|_| {
        ValidationError::single(
            &["path", "item_id"],
            "value is not a valid integer",
            "type_error.integer",
        )
    })
}

/// Validate an untyped creation request.
///
/// `name` must be a non-empty string of at most [`NAME_MAX_LENGTH`]
/// characters, `description` a string or null, and `price`/`tax` numbers
/// (numeric strings are coerced). Strings may not contain NUL, which
/// PostgreSQL text columns refuse. Unknown fields are ignored.
pub fn validate_create(raw: &Value) -> Result<ItemCreate, ValidationError> {
    let obj = match raw.as_object() {
        Some(obj) => obj,
        None => {
            return Err(ValidationError::single(
                &["body"],
                "value is not a valid dict",
                "type_error.dict",
            ))
        }
    };

    let mut errors = Vec::new();

    let name = check_name(obj, &mut errors);
    let description = check_description(obj, &mut errors);
    let price = check_number(obj, "price", &mut errors);
    let tax = check_number(obj, "tax", &mut errors);

    match (name, description, price, tax) {
        (Some(name), Some(description), Some(price), Some(tax)) if errors.is_empty() => {
            Ok(ItemCreate {
                name,
                description,
                price,
                tax,
            })
        }
        _ => Err(ValidationError { errors }),
    }
}

fn check_name(obj: &Map<String, Value>, errors: &mut Vec<FieldError>) -> Option<String> {
    let loc = ["body", "name"];
    match obj.get("name") {
        None => {
            errors.push(field_error(&loc, MSG_FIELD_REQUIRED, TYPE_MISSING));
            None
        }
        Some(Value::Null) => {
            errors.push(field_error(&loc, MSG_NONE_NOT_ALLOWED, TYPE_NONE_NOT_ALLOWED));
            None
        }
        Some(Value::String(s)) if s.is_empty() => {
            errors.push(field_error(
                &loc,
                "ensure this value has at least 1 characters",
                "value_error.any_str.min_length",
            ));
            None
        }
        Some(Value::String(s)) if s.chars().count() > NAME_MAX_LENGTH => {
            errors.push(field_error(
                &loc,
                format!("ensure this value has at most {} characters", NAME_MAX_LENGTH),
                "value_error.any_str.max_length",
            ));
            None
        }
        Some(Value::String(s)) if s.contains('\0') => {
            errors.push(field_error(&loc, MSG_NUL_CHARACTER, TYPE_NUL_CHARACTER));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(field_error(&loc, "str type expected", "type_error.str"));
            None
        }
    }
}

// Outer Option is validity, inner Option is the nullable value.
fn check_description(
    obj: &Map<String, Value>,
    errors: &mut Vec<FieldError>,
) -> Option<Option<String>> {
    match obj.get("description") {
        None | Some(Value::Null) => Some(None),
        Some(Value::String(s)) if s.contains('\0') => {
            errors.push(field_error(
                &["body", "description"],
                MSG_NUL_CHARACTER,
                TYPE_NUL_CHARACTER,
            ));
            None
        }
        Some(Value::String(s)) => Some(Some(s.clone())),
        Some(_) => {
            errors.push(field_error(
                &["body", "description"],
                "str type expected",
                "type_error.str",
            ));
            None
        }
    }
}

fn check_number(obj: &Map<String, Value>, field: &str, errors: &mut Vec<FieldError>) -> Option<f64> {
    let loc = ["body", field];
    let value = match obj.get(field) {
        None => {
            errors.push(field_error(&loc, MSG_FIELD_REQUIRED, TYPE_MISSING));
            return None;
        }
        Some(Value::Null) => {
            errors.push(field_error(&loc, MSG_NONE_NOT_ALLOWED, TYPE_NONE_NOT_ALLOWED));
            return None;
        }
        Some(v) => v,
    };

    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(n) if n.is_finite() => Some(n),
        _ => {
            errors.push(field_error(&loc, "value is not a valid float", "type_error.float"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_full_payload() {
        let item = validate_create(&json!({
            "name": "Foo",
            "description": "A very nice Item",
            "price": 35.4,
            "tax": 3.2
        }))
        .unwrap();

        assert_eq!(item.name, "Foo");
        assert_eq!(item.description.as_deref(), Some("A very nice Item"));
        assert_eq!(item.price, 35.4);
        assert_eq!(item.tax, 3.2);
    }

    #[test]
    fn description_may_be_absent_or_null() {
        let absent = validate_create(&json!({"name": "Foo", "price": 50.2, "tax": 10.5})).unwrap();
        let null = validate_create(&json!({"name": "Foo", "description": null, "price": 50.2, "tax": 10.5}))
            .unwrap();

        assert_eq!(absent.description, None);
        assert_eq!(absent, null);
    }

    #[test]
    fn integer_and_numeric_string_prices_are_coerced() {
        let item = validate_create(&json!({"name": "Bar", "price": 62, "tax": "1.5"})).unwrap();
        assert_eq!(item.price, 62.0);
        assert_eq!(item.tax, 1.5);
    }

    #[test]
    fn explicit_null_is_not_reported_as_missing() {
        let err = validate_create(&json!({"name": null, "price": null, "tax": 1})).unwrap_err();

        assert_eq!(err.fields(), vec!["name", "price"]);
        assert!(err.errors.iter().all(|e| e.kind == "type_error.none.not_allowed"));
        assert!(err.errors.iter().all(|e| e.msg == "none is not an allowed value"));
    }

    #[test]
    fn nul_characters_are_rejected() {
        let err = validate_create(&json!({
            "name": "Fo\u{0}o",
            "description": "bad\u{0}desc",
            "price": 1,
            "tax": 1
        }))
        .unwrap_err();

        assert_eq!(err.fields(), vec!["name", "description"]);
        assert!(err.errors.iter().all(|e| e.kind == "value_error.str.nul"));
    }

    #[test]
    fn reports_every_missing_field() {
        let err = validate_create(&json!({"name": "Bar"})).unwrap_err();

        assert_eq!(err.fields(), vec!["price", "tax"]);
        assert!(err.errors.iter().all(|e| e.kind == "value_error.missing"));
        assert!(err.errors.iter().all(|e| e.msg == "field required"));
    }

    #[test]
    fn empty_object_reports_required_fields_in_order() {
        let err = validate_create(&json!({})).unwrap_err();
        assert_eq!(err.fields(), vec!["name", "price", "tax"]);
    }

    #[test]
    fn rejects_wrong_types() {
        let err = validate_create(&json!({
            "name": 12,
            "description": ["x"],
            "price": "cheap",
            "tax": true
        }))
        .unwrap_err();

        assert_eq!(err.fields(), vec!["name", "description", "price", "tax"]);
        assert_eq!(err.errors[0].kind, "type_error.str");
        assert_eq!(err.errors[2].kind, "type_error.float");
        assert_eq!(err.errors[3].kind, "type_error.float");
    }

    #[test]
    fn rejects_non_finite_strings() {
        let err = validate_create(&json!({"name": "Foo", "price": "NaN", "tax": "inf"})).unwrap_err();
        assert_eq!(err.fields(), vec!["price", "tax"]);
    }

    #[test]
    fn name_length_is_bounded() {
        let err = validate_create(&json!({"name": "", "price": 1, "tax": 1})).unwrap_err();
        assert_eq!(err.errors[0].kind, "value_error.any_str.min_length");

        let long = "x".repeat(NAME_MAX_LENGTH + 1);
        let err = validate_create(&json!({"name": long, "price": 1, "tax": 1})).unwrap_err();
        assert_eq!(err.errors[0].kind, "value_error.any_str.max_length");

        let max = "x".repeat(NAME_MAX_LENGTH);
        assert!(validate_create(&json!({"name": max, "price": 1, "tax": 1})).is_ok());
    }

    #[test]
    fn negative_prices_are_allowed() {
        let item = validate_create(&json!({"name": "Refund", "price": -5.0, "tax": 0})).unwrap();
        assert_eq!(item.price, -5.0);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let item = validate_create(&json!({"name": "Foo", "price": 1, "tax": 2, "id": 99})).unwrap();
        assert_eq!(item.name, "Foo");
    }

    #[test]
    fn non_object_body_is_rejected() {
        let err = validate_create(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.errors[0].loc, vec!["body"]);
        assert_eq!(err.errors[0].kind, "type_error.dict");
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = parse_body(b"{\"name\": ").unwrap_err();
        assert_eq!(err.errors[0].kind, "value_error.jsondecode");
        assert!(parse_body(b"").is_err());
    }

    #[test]
    fn item_id_must_be_integer() {
        assert_eq!(parse_item_id("42").unwrap(), 42);
        let err = parse_item_id("abc").unwrap_err();
        assert_eq!(err.errors[0].loc, vec!["path", "item_id"]);
        assert!(parse_item_id("1.5").is_err());
    }
}
