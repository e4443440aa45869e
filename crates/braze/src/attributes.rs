//! Custom attributes: dynamically-keyed values merged into a user profile.
//!
//! Braze accepts arbitrary attribute names alongside the fixed profile
//! schema. [`CustomAttributes`] collects those entries in insertion order;
//! [`UserAttributes`](crate::UserAttributes) overlays them onto its typed
//! fields when the request body is encoded.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

/// Action applied to a string-array custom attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AttributeAction {
    Add,
    Remove,
}

impl AttributeAction {
    /// Wire name of the action.
    pub fn as_str(self) -> &'static str {
        match self {
            AttributeAction::Add => "add",
            AttributeAction::Remove => "remove",
        }
    }
}

/// The value kinds Braze accepts for a custom attribute.
///
/// The union is closed: anything not representable here cannot be attached
/// to a profile, which keeps attribute encoding infallible.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    StringList(Vec<String>),
    /// Incremental edit of a string-array attribute, keyed by action.
    Modify(BTreeMap<AttributeAction, Vec<String>>),
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Int(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(value: Vec<String>) -> Self {
        AttributeValue::StringList(value)
    }
}

impl From<BTreeMap<AttributeAction, Vec<String>>> for AttributeValue {
    fn from(value: BTreeMap<AttributeAction, Vec<String>>) -> Self {
        AttributeValue::Modify(value)
    }
}

impl From<AttributeValue> for Value {
    /// Total conversion to a JSON value. Non-finite floats have no JSON
    /// representation and become `null`.
    fn from(value: AttributeValue) -> Value {
        match value {
            AttributeValue::Bool(b) => Value::Bool(b),
            AttributeValue::Int(i) => Value::from(i),
            AttributeValue::Float(f) => Value::from(f),
            AttributeValue::String(s) => Value::String(s),
            AttributeValue::StringList(items) => Value::from(items),
            AttributeValue::Modify(actions) => {
                let mut doc = Map::new();
                for (action, names) in actions {
                    doc.insert(action.as_str().to_string(), Value::from(names));
                }
                Value::Object(doc)
            }
        }
    }
}

/// A single named custom attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomAttribute {
    key: String,
    value: AttributeValue,
}

impl CustomAttribute {
    /// Create an attribute from any supported value kind.
    pub fn new(key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Boolean attribute.
    pub fn boolean(key: impl Into<String>, value: bool) -> Self {
        Self::new(key, value)
    }

    /// Integer attribute.
    pub fn integer(key: impl Into<String>, value: i64) -> Self {
        Self::new(key, value)
    }

    /// Floating-point attribute.
    pub fn float(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, value)
    }

    /// String attribute.
    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, AttributeValue::String(value.into()))
    }

    /// Date attribute, encoded as an RFC 3339 timestamp.
    pub fn date(key: impl Into<String>, value: DateTime<Utc>) -> Self {
        Self::new(
            key,
            AttributeValue::String(value.to_rfc3339_opts(SecondsFormat::Secs, true)),
        )
    }

    /// String-array attribute, replacing any existing array.
    pub fn string_list(key: impl Into<String>, value: Vec<String>) -> Self {
        Self::new(key, AttributeValue::StringList(value))
    }

    /// Incremental string-array edit, adding and removing named entries.
    pub fn modify_string_list(
        key: impl Into<String>,
        value: BTreeMap<AttributeAction, Vec<String>>,
    ) -> Self {
        Self::new(key, AttributeValue::Modify(value))
    }

    /// Attribute name as it appears on the wire.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Attribute value.
    pub fn value(&self) -> &AttributeValue {
        &self.value
    }
}

/// An insertion-ordered set of custom attributes, safe to fill from
/// multiple threads.
///
/// Re-adding a key replaces its value but keeps the key's original
/// position. Entries are only written through [`CustomAttributes::add`];
/// reads take an independent snapshot.
#[derive(Debug, Default)]
pub struct CustomAttributes {
    entries: Mutex<Map<String, Value>>,
}

impl CustomAttributes {
    /// Append attributes, replacing values for keys already present.
    pub fn add(&self, attributes: impl IntoIterator<Item = CustomAttribute>) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        for attribute in attributes {
            entries.insert(attribute.key, Value::from(attribute.value));
        }
    }

    /// Copy of the current entries, in insertion order.
    pub fn snapshot(&self) -> Map<String, Value> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no entries have been added.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Clone for CustomAttributes {
    fn clone(&self) -> Self {
        Self {
            entries: Mutex::new(self.snapshot()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn add_preserves_insertion_order() {
        let attrs = CustomAttributes::default();
        attrs.add([
            CustomAttribute::string("third", "c"),
            CustomAttribute::string("first", "a"),
        ]);
        attrs.add([CustomAttribute::string("second", "b")]);

        let snapshot = attrs.snapshot();
        let keys: Vec<&String> = snapshot.keys().collect();
        assert_eq!(keys, ["third", "first", "second"]);
    }

    #[test]
    fn re_adding_a_key_replaces_in_place() {
        let attrs = CustomAttributes::default();
        attrs.add([
            CustomAttribute::integer("level", 1),
            CustomAttribute::boolean("beta", true),
        ]);
        attrs.add([CustomAttribute::integer("level", 2)]);

        let snapshot = attrs.snapshot();
        let keys: Vec<&String> = snapshot.keys().collect();
        assert_eq!(keys, ["level", "beta"]);
        assert_eq!(snapshot["level"], json!(2));
    }

    #[test]
    fn disjoint_keys_build_the_same_map_in_any_order() {
        let forward = CustomAttributes::default();
        forward.add([
            CustomAttribute::integer("alpha", 1),
            CustomAttribute::string("beta", "b"),
            CustomAttribute::boolean("gamma", true),
        ]);

        let reversed = CustomAttributes::default();
        reversed.add([
            CustomAttribute::boolean("gamma", true),
            CustomAttribute::string("beta", "b"),
            CustomAttribute::integer("alpha", 1),
        ]);

        // Key order differs, the entries do not.
        assert_ne!(
            serde_json::to_string(&forward.snapshot()).unwrap(),
            serde_json::to_string(&reversed.snapshot()).unwrap()
        );
        assert_eq!(
            Value::Object(forward.snapshot()),
            Value::Object(reversed.snapshot())
        );
    }

    #[test]
    fn snapshot_is_independent() {
        let attrs = CustomAttributes::default();
        attrs.add([CustomAttribute::string("plan", "free")]);
        let before = attrs.snapshot();
        attrs.add([CustomAttribute::string("plan", "paid")]);

        assert_eq!(before["plan"], json!("free"));
        assert_eq!(attrs.snapshot()["plan"], json!("paid"));
    }

    #[test]
    fn date_uses_rfc3339_utc() {
        let date = Utc.with_ymd_and_hms(2020, 7, 20, 10, 30, 0).unwrap();
        let attr = CustomAttribute::date("signed_up_at", date);
        assert_eq!(
            attr.value(),
            &AttributeValue::String("2020-07-20T10:30:00Z".to_string())
        );
    }

    #[test]
    fn modify_value_orders_add_before_remove() {
        let value = AttributeValue::Modify(BTreeMap::from([
            (AttributeAction::Remove, vec!["foo".to_string()]),
            (AttributeAction::Add, vec!["user".to_string()]),
        ]));
        assert_eq!(
            Value::from(value),
            json!({"add": ["user"], "remove": ["foo"]})
        );
    }

    #[test]
    fn value_kinds_serialize_to_their_json_counterparts() {
        let attrs = CustomAttributes::default();
        attrs.add([
            CustomAttribute::boolean("subscribed", true),
            CustomAttribute::integer("visits", 7),
            CustomAttribute::float("score", 2.5),
            CustomAttribute::string("plan", "pro"),
            CustomAttribute::string_list("tags", vec!["a".to_string(), "b".to_string()]),
        ]);

        let snapshot = attrs.snapshot();
        assert_eq!(snapshot["subscribed"], json!(true));
        assert_eq!(snapshot["visits"], json!(7));
        assert_eq!(snapshot["score"], json!(2.5));
        assert_eq!(snapshot["plan"], json!("pro"));
        assert_eq!(snapshot["tags"], json!(["a", "b"]));
    }

    #[test]
    fn non_finite_float_becomes_null() {
        assert_eq!(Value::from(AttributeValue::Float(f64::NAN)), Value::Null);
    }
}
