//! Selected-item records.
//!
//! This module provides [`Item`], the opaque key/value record describing one
//! selected entry in the host application's list or grid. Items are supplied
//! and owned entirely by the host; the widget never rewrites their contents.
//!
//! Two notions of equality are used throughout the crate:
//!
//! - **Structural equality** (`==` on [`Item`]): deep value equality over all
//!   fields. This is what deduplication and removal in the selection store
//!   use. Two separately constructed items with the same fields are equal.
//! - **Loose equality** ([`loose_eq`]): the per-value comparison used by
//!   lookups and button predicates. It accepts the usual host-data
//!   sloppiness, e.g. the numeric string `"42"` matches the number `42`.
//!
//! # Example
//!
//! ```
//! use quickbar::Item;
//!
//! let row = Item::new()
//!     .with("id", 7)
//!     .with("type", "invoice")
//!     .with("archived", false);
//!
//! assert_eq!(row.get("type"), Some(&"invoice".into()));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An opaque key/value record for one selected entry.
///
/// Field values are [`serde_json::Value`], so anything the host can serialize
/// can ride along. Equality is structural (deep value equality), never
/// reference-based.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(flatten)]
    fields: BTreeMap<String, Value>,
}

impl Item {
    /// Create an empty item.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion.
    ///
    /// ```
    /// use quickbar::Item;
    ///
    /// let item = Item::new().with("type", "a").with("weight", 3);
    /// assert_eq!(item.len(), 2);
    /// ```
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Insert or replace a field.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Get a field value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Check whether a field is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check whether the item has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over all fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<BTreeMap<String, Value>> for Item {
    fn from(fields: BTreeMap<String, Value>) -> Self {
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Item {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Loose value comparison for lookups and predicates.
///
/// Rules, in order:
///
/// - `null` equals only `null` (and, at the predicate seam, a missing field
///   is compared as `null`).
/// - Same-kind scalars compare by value; numbers compare numerically across
///   integer/float representations.
/// - A number and a string are equal when the string parses to the same
///   numeric value (`"42"` matches `42`).
/// - A boolean coerces to `1`/`0` before comparing against numbers or
///   strings.
/// - Arrays and objects compare deeply against the same kind, never against
///   other kinds.
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Bool(x), other) | (other, Value::Bool(x)) => {
            let as_number = if *x { 1.0 } else { 0.0 };
            numeric_value(other) == Some(as_number)
        }
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
            s.trim().parse::<f64>().ok().is_some_and(|parsed| {
                n.as_f64().is_some_and(|numeric| parsed == numeric)
            })
        }
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => x == y,
        (Value::Object(x), Value::Object(y)) => x == y,
        _ => false,
    }
}

/// Numeric view of a scalar, if it has one.
fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Check whether a value counts as "empty" for the defensive lookup rules.
///
/// Empty values never participate in lookups: searching for them yields no
/// results, and stored empty values never match a search.
pub(crate) fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structural_equality() {
        let a = Item::new().with("type", "a").with("id", 1);
        let b = Item::new().with("id", 1).with("type", "a");
        let c = Item::new().with("id", 2).with("type", "a");

        assert_eq!(a, b); // Field order does not matter
        assert_ne!(a, c);
    }

    #[test]
    fn test_nested_structural_equality() {
        let a = Item::new().with("meta", json!({"tags": ["x", "y"]}));
        let b = Item::new().with("meta", json!({"tags": ["x", "y"]}));
        let c = Item::new().with("meta", json!({"tags": ["x"]}));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_loose_eq_same_kind() {
        assert!(loose_eq(&json!("a"), &json!("a")));
        assert!(!loose_eq(&json!("a"), &json!("b")));
        assert!(loose_eq(&json!(42), &json!(42.0)));
        assert!(loose_eq(&json!(true), &json!(true)));
        assert!(loose_eq(&Value::Null, &Value::Null));
    }

    #[test]
    fn test_loose_eq_numeric_string_coercion() {
        assert!(loose_eq(&json!(42), &json!("42")));
        assert!(loose_eq(&json!("3.5"), &json!(3.5)));
        assert!(loose_eq(&json!(" 7 "), &json!(7)));
        assert!(!loose_eq(&json!(42), &json!("42a")));
        assert!(!loose_eq(&json!(42), &json!("43")));
    }

    #[test]
    fn test_loose_eq_bool_coercion() {
        assert!(loose_eq(&json!(true), &json!(1)));
        assert!(loose_eq(&json!(false), &json!(0)));
        assert!(loose_eq(&json!(true), &json!("1")));
        assert!(!loose_eq(&json!(true), &json!(2)));
        assert!(!loose_eq(&json!(true), &json!("true")));
    }

    #[test]
    fn test_loose_eq_null_mismatch() {
        assert!(!loose_eq(&Value::Null, &json!(0)));
        assert!(!loose_eq(&Value::Null, &json!("")));
        assert!(!loose_eq(&json!([]), &json!(0)));
    }

    #[test]
    fn test_empty_values() {
        assert!(is_empty_value(&Value::Null));
        assert!(is_empty_value(&json!("")));
        assert!(is_empty_value(&json!([])));
        assert!(is_empty_value(&json!({})));
        assert!(!is_empty_value(&json!(0)));
        assert!(!is_empty_value(&json!(false)));
        assert!(!is_empty_value(&json!("x")));
    }
}
