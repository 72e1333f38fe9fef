use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A single parsed ratlog line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub tags: Vec<Tag>,
    pub message: String,
    pub fields: Fields,
}

impl Record {
    /// Returns true if any tag equals `name`.
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.as_str() == name)
    }
}

/// A label from the leading `[...]` section of a line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(pub String);

impl Tag {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Tag {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Tag {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A field value that can render itself as text.
///
/// The parser only ever produces [`BasicField`]; callers building records by
/// hand may store richer types as long as they render to a string.
pub trait FieldValue: fmt::Debug + Send + Sync {
    fn render(&self) -> String;
}

/// Plain text field value, rendered verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BasicField(pub String);

impl FieldValue for BasicField {
    fn render(&self) -> String {
        self.0.clone()
    }
}

impl fmt::Display for BasicField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BasicField {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Key/value fields of a [`Record`].
///
/// Keys are unique; inserting an existing key replaces its value. Values are
/// shared behind `Arc` so cloning a record stays cheap.
#[derive(Clone, Default)]
pub struct Fields(BTreeMap<String, Arc<dyn FieldValue>>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the value stored under `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl FieldValue + 'static) {
        self.0.insert(key.into(), Arc::new(value));
    }

    /// Finds the value stored under `key`.
    pub fn find(&self, key: &str) -> Option<&dyn FieldValue> {
        self.0.get(key).map(|v| v.as_ref())
    }

    /// Finds the value stored under `key` and renders it.
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.find(key).map(|v| v.render())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }
}

impl fmt::Debug for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.0.iter().map(|(k, v)| (k, v.render())))
            .finish()
    }
}

// Values compare by their rendered text, so a hand-built value equals the
// BasicField the parser would produce for the same string.
impl PartialEq for Fields {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self
                .0
                .iter()
                .zip(other.0.iter())
                .all(|((ka, va), (kb, vb))| ka == kb && va.render() == vb.render())
    }
}

impl<K: Into<String>, V: FieldValue + 'static> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (k, v) in iter {
            fields.insert(k, v);
        }
        fields
    }
}

impl Serialize for Fields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, &v.render())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Fields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldsVisitor;

        impl<'de> Visitor<'de> for FieldsVisitor {
            type Value = Fields;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Fields, A::Error> {
                let mut fields = Fields::new();
                while let Some((k, v)) = access.next_entry::<String, String>()? {
                    fields.insert(k, BasicField(v));
                }
                Ok(fields)
            }
        }

        deserializer.deserialize_map(FieldsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Millis(u64);

    impl FieldValue for Millis {
        fn render(&self) -> String {
            format!("{}ms", self.0)
        }
    }

    #[test]
    fn test_custom_value_renders() {
        let mut fields = Fields::new();
        fields.insert("duration", Millis(27));
        assert_eq!(fields.get_str("duration").as_deref(), Some("27ms"));
        assert!(fields.find("missing").is_none());
    }

    #[test]
    fn test_equality_uses_rendered_text() {
        let mut a = Fields::new();
        a.insert("duration", Millis(5));
        let mut b = Fields::new();
        b.insert("duration", BasicField::from("5ms"));
        assert_eq!(a, b);

        b.insert("extra", BasicField::from(""));
        assert_ne!(a, b);
    }

    #[test]
    fn test_insert_replaces() {
        let mut fields = Fields::new();
        fields.insert("k", BasicField::from("first"));
        fields.insert("k", BasicField::from("second"));
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get_str("k").as_deref(), Some("second"));
    }
}
