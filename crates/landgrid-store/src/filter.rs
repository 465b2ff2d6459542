//! Filter conditions evaluated against serialized documents.

use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

/// Comparison operator for one condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    /// Case-insensitive substring match on string fields (search).
    Contains,
}

/// One condition: a dotted field path compared against a literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub path: String,
    pub op: Op,
    pub value: Value,
}

/// Conjunction of conditions. An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    /// A filter that matches everything.
    pub fn all() -> Self {
        Self::default()
    }

    fn push(mut self, path: impl Into<String>, op: Op, value: impl Into<Value>) -> Self {
        self.conditions.push(Condition {
            path: path.into(),
            op,
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn eq(self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(path, Op::Eq, value)
    }

    #[must_use]
    pub fn ne(self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(path, Op::Ne, value)
    }

    #[must_use]
    pub fn gt(self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(path, Op::Gt, value)
    }

    #[must_use]
    pub fn gte(self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(path, Op::Gte, value)
    }

    #[must_use]
    pub fn lt(self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(path, Op::Lt, value)
    }

    #[must_use]
    pub fn lte(self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(path, Op::Lte, value)
    }

    /// Case-insensitive substring match, for search boxes.
    #[must_use]
    pub fn contains(self, path: impl Into<String>, needle: impl Into<String>) -> Self {
        self.push(path, Op::Contains, Value::String(needle.into()))
    }

    /// Evaluates the filter against one serialized document.
    pub fn matches(&self, doc: &Value) -> bool {
        self.conditions.iter().all(|cond| {
            let field = lookup(doc, &cond.path);
            eval(cond.op, field, &cond.value)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// Resolves a dotted path (`"dimensions.length"`) inside a document.
fn lookup<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = doc;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    Some(current)
}

fn eval(op: Op, field: Option<&Value>, literal: &Value) -> bool {
    let Some(field) = field else {
        // Absent fields only satisfy inequality against a present literal.
        return op == Op::Ne && !literal.is_null();
    };
    match op {
        Op::Eq => compare(field, literal) == Some(Ordering::Equal),
        Op::Ne => compare(field, literal) != Some(Ordering::Equal),
        Op::Gt => compare(field, literal) == Some(Ordering::Greater),
        Op::Gte => matches!(
            compare(field, literal),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        Op::Lt => compare(field, literal) == Some(Ordering::Less),
        Op::Lte => matches!(
            compare(field, literal),
            Some(Ordering::Less | Ordering::Equal)
        ),
        Op::Contains => match (field, literal) {
            (Value::String(haystack), Value::String(needle)) => haystack
                .to_lowercase()
                .contains(needle.to_lowercase().as_str()),
            _ => false,
        },
    }
}

/// Compares two JSON values.
///
/// Numbers compare numerically. Strings that both parse as decimals compare
/// numerically as well: decimal-typed fields (prices, areas) serialize as
/// strings on the wire, and range filters on them must still behave as
/// numeric comparisons. Everything else falls back to strict equality.
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => {
            match (Decimal::from_str(x), Decimal::from_str(y)) {
                (Ok(dx), Ok(dy)) => Some(dx.cmp(&dy)),
                _ => Some(x.cmp(y)),
            }
        }
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        _ => {
            if a == b {
                Some(Ordering::Equal)
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    fn doc() -> Value {
        json!({
            "plotNumber": "A-12",
            "status": "available",
            "area": "1200.00",
            "roadWidth": 30,
            "dimensions": { "length": "40" },
            "colony": "507f1f77bcf86cd799439011",
        })
    }

    #[test]
    fn test_empty_filter_matches_all() {
        assert!(Filter::all().matches(&doc()));
    }

    #[test]
    fn test_eq_on_string_field() {
        assert!(Filter::all().eq("status", "available").matches(&doc()));
        assert!(!Filter::all().eq("status", "sold").matches(&doc()));
    }

    #[test]
    fn test_decimal_strings_compare_numerically() {
        // "1200.00" == "1200" as decimals, > "999" numerically even though
        // "999" > "1200.00" lexicographically.
        assert!(Filter::all().eq("area", "1200").matches(&doc()));
        assert!(Filter::all().gt("area", "999").matches(&doc()));
        assert!(Filter::all().lte("area", "1200.0").matches(&doc()));
    }

    #[test_case(Op::Gt, 20, true)]
    #[test_case(Op::Gt, 30, false)]
    #[test_case(Op::Gte, 30, true)]
    #[test_case(Op::Lt, 31, true)]
    fn test_numeric_comparison(op: Op, bound: i64, expected: bool) {
        let filter = Filter {
            conditions: vec![Condition {
                path: "roadWidth".to_string(),
                op,
                value: json!(bound),
            }],
        };
        assert_eq!(filter.matches(&doc()), expected);
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        assert!(Filter::all().contains("plotNumber", "a-1").matches(&doc()));
        assert!(!Filter::all().contains("plotNumber", "b-").matches(&doc()));
    }

    #[test]
    fn test_dotted_path_lookup() {
        assert!(
            Filter::all()
                .gte("dimensions.length", "40")
                .matches(&doc())
        );
    }

    #[test]
    fn test_absent_field() {
        assert!(!Filter::all().eq("soldDate", "2024-01-01").matches(&doc()));
        assert!(Filter::all().ne("soldDate", "2024-01-01").matches(&doc()));
    }

    #[test]
    fn test_conditions_are_conjunctive() {
        let filter = Filter::all()
            .eq("status", "available")
            .eq("colony", "507f1f77bcf86cd799439011");
        assert!(filter.matches(&doc()));
        let filter = Filter::all().eq("status", "available").eq("colony", "x");
        assert!(!filter.matches(&doc()));
    }
}
