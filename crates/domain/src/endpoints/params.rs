//! Request parameter bags and their URL/form encoding.

use serde_json::Value;

/// Ordered mapping of parameter names to scalar or nested values.
///
/// `serde_json` is built with `preserve_order`, so iteration follows
/// insertion order.
pub type Parameters = serde_json::Map<String, Value>;

/// Turn a `json!({...})` literal into a parameter bag.
pub(crate) fn bag(value: Value) -> Option<Parameters> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// Flatten parameters into ordered key/value pairs.
///
/// Nested objects use bracket notation (`location[postal_code]`), arrays use
/// `key[]`, booleans render as `true`/`false`.
#[must_use]
pub fn encode_parameters(parameters: &Parameters) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(parameters.len());
    for (key, value) in parameters {
        flatten(key, value, &mut pairs);
    }
    pairs
}

/// Percent-encode parameters as `application/x-www-form-urlencoded`.
#[must_use]
pub fn form_encode(parameters: &Parameters) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in encode_parameters(parameters) {
        serializer.append_pair(&key, &value);
    }
    serializer.finish()
}

fn flatten(key: &str, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (child, nested) in map {
                flatten(&format!("{key}[{child}]"), nested, pairs);
            }
        }
        Value::Array(items) => {
            let array_key = format!("{key}[]");
            for item in items {
                flatten(&array_key, item, pairs);
            }
        }
        Value::Null => pairs.push((key.to_string(), String::new())),
        Value::Bool(flag) => pairs.push((key.to_string(), flag.to_string())),
        Value::Number(number) => pairs.push((key.to_string(), number.to_string())),
        Value::String(text) => pairs.push((key.to_string(), text.clone())),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_nested_objects_use_brackets_in_order() {
        let params = bag(json!({
            "email": "a@b.c",
            "location": { "postal_code": "10001" },
            "live": true,
            "size": 10
        }))
        .unwrap();

        assert_eq!(
            encode_parameters(&params),
            vec![
                ("email".to_string(), "a@b.c".to_string()),
                ("location[postal_code]".to_string(), "10001".to_string()),
                ("live".to_string(), "true".to_string()),
                ("size".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_arrays_repeat_key() {
        let params = bag(json!({ "ids": ["a", "b"] })).unwrap();
        assert_eq!(
            encode_parameters(&params),
            vec![("ids[]".to_string(), "a".to_string()), ("ids[]".to_string(), "b".to_string())]
        );
    }

    #[test]
    fn test_form_encode_escapes() {
        let params = bag(json!({ "email": "a+b@c.d", "location": { "postal_code": "N1 9GU" } }))
            .unwrap();
        assert_eq!(form_encode(&params), "email=a%2Bb%40c.d&location%5Bpostal_code%5D=N1+9GU");
    }

    #[test]
    fn test_bag_rejects_non_objects() {
        assert!(bag(json!("nope")).is_none());
    }
}
