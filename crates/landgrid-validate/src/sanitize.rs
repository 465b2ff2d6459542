//! Recursive payload sanitization.
//!
//! Applied independently of validation: every string leaf in a payload is
//! trimmed and HTML-escaped, numeric leaves can be clamped, and arrays and
//! nested objects are walked recursively with structure preserved.

use serde_json::{Map, Number, Value};

/// Clamping policy for one numeric field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericPolicy {
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Used when the value is absent or not numeric.
    pub default: f64,
}

impl NumericPolicy {
    pub const fn new(default: f64) -> Self {
        Self {
            min: None,
            max: None,
            default,
        }
    }

    #[must_use]
    pub const fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use]
    pub const fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }
}

/// Escapes the five HTML-significant characters.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Sanitizes one string leaf: trim, then escape.
pub fn sanitize_string(raw: &str) -> String {
    escape_html(raw.trim())
}

/// Resolves a numeric leaf under a clamping policy.
///
/// Absent or non-numeric values become the policy default; numeric values
/// are clamped into `[min, max]` where bounds are present.
pub fn sanitize_number(raw: Option<&Value>, policy: &NumericPolicy) -> f64 {
    let mut value = raw.and_then(Value::as_f64).unwrap_or(policy.default);
    if let Some(min) = policy.min {
        value = value.max(min);
    }
    if let Some(max) = policy.max {
        value = value.min(max);
    }
    value
}

/// Recursively sanitizes a whole payload.
///
/// Strings are trimmed and escaped; arrays and objects are walked with keys,
/// ordering and lengths preserved; numbers, booleans and nulls pass through
/// untouched (numeric clamping is per-field, via [`sanitize_number`]).
pub fn sanitize_payload(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(sanitize_string(&s)),
        Value::Array(items) => Value::Array(items.into_iter().map(sanitize_payload).collect()),
        Value::Object(fields) => {
            let mut out = Map::with_capacity(fields.len());
            for (key, field) in fields {
                out.insert(key, sanitize_payload(field));
            }
            Value::Object(out)
        }
        other => other,
    }
}

/// Counts leaves and containers to compare payload shapes.
#[cfg(test)]
fn shape(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(shape).collect()),
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), shape(v)))
                .collect(),
        ),
        Value::String(_) => Value::String(String::new()),
        Value::Number(_) => Value::Number(Number::from(0)),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<img src="x" onerror='y'> & more"#),
            "&lt;img src=&quot;x&quot; onerror=&#x27;y&#x27;&gt; &amp; more"
        );
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn test_sanitize_string_trims_then_escapes() {
        assert_eq!(sanitize_string("  <b>hi</b>  "), "&lt;b&gt;hi&lt;/b&gt;");
    }

    #[test]
    fn test_sanitize_number_clamps_and_defaults() {
        let policy = NumericPolicy::new(0.0).min(0.0).max(200.0);
        assert_eq!(sanitize_number(Some(&json!(30)), &policy), 30.0);
        assert_eq!(sanitize_number(Some(&json!(-5)), &policy), 0.0);
        assert_eq!(sanitize_number(Some(&json!(999)), &policy), 200.0);
        assert_eq!(sanitize_number(Some(&json!("abc")), &policy), 0.0);
        assert_eq!(sanitize_number(None, &policy), 0.0);
    }

    #[test]
    fn test_payload_walk_preserves_structure() {
        let payload = json!({
            "name": "  Green <Meadows>  ",
            "sellers": [
                { "name": " A & Sons ", "sharePercent": 50 },
                { "name": "B", "notes": null }
            ],
            "isActive": true,
        });
        let clean = sanitize_payload(payload.clone());
        assert_eq!(clean["name"], "Green &lt;Meadows&gt;");
        assert_eq!(clean["sellers"][0]["name"], "A &amp; Sons");
        assert_eq!(clean["sellers"][0]["sharePercent"], 50);
        assert_eq!(clean["sellers"][1]["notes"], Value::Null);
        assert_eq!(clean["isActive"], true);
        assert_eq!(shape(&clean), shape(&payload));
    }

    fn arb_payload() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| json!(n)),
            "[ -~]{0,30}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 32, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,8}", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        /// Sanitization preserves payload shape: same keys, same array
        /// lengths, same non-string leaves.
        #[test]
        fn prop_sanitize_preserves_shape(payload in arb_payload()) {
            let clean = sanitize_payload(payload.clone());
            prop_assert_eq!(shape(&clean), shape(&payload));
        }

        /// Sanitization is idempotent on already-clean output.
        #[test]
        fn prop_sanitize_idempotent_when_no_escapables(s in "[a-zA-Z0-9 ]{0,40}") {
            let once = sanitize_payload(json!(s.clone()));
            let twice = sanitize_payload(once.clone());
            prop_assert_eq!(once, twice);
        }
    }
}
