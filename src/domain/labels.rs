// Ordered label sets used for query matchers
use super::error::DashboardError;
use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use std::fmt;

/// Keys set by the layout itself; configured or per-experiment labels may not
/// override them
pub const RESERVED_KEYS: [&str; 3] = ["library", "mode", "exported_job"];

/// Ordered key/value labels. Insertion order is the order in which the
/// matcher clause of a query is rendered.
#[derive(Debug, Clone, Default)]
pub struct LabelSet {
    entries: IndexMap<String, String>,
}

// Equality is order sensitive, unlike IndexMap's own
impl PartialEq for LabelSet {
    fn eq(&self, other: &Self) -> bool {
        self.entries.iter().eq(other.entries.iter())
    }
}

impl Eq for LabelSet {}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`LabelSet::insert`]
    pub fn with(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, DashboardError> {
        self.insert(key, value)?;
        Ok(self)
    }

    /// Insert a label, replacing the value of an existing key in place.
    /// Keys and values are validated so the rendered matcher stays well formed.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), DashboardError> {
        let key = key.into();
        let value = value.into();
        validate(&key, &value)?;

        self.entries.insert(key, value);
        Ok(())
    }

    /// Union with another set; entries of `other` win on key collisions.
    pub fn merge(&mut self, other: &LabelSet) {
        self.entries.extend(
            other
                .entries
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
    }

    /// Fails on the first key the layout assigns itself
    pub fn reject_reserved(&self) -> Result<(), DashboardError> {
        match self
            .entries
            .iter()
            .find(|(k, _)| RESERVED_KEYS.contains(&k.as_str()))
        {
            Some((key, value)) => Err(DashboardError::InvalidLabel {
                key: key.clone(),
                value: value.clone(),
                reason: "key is reserved for the dashboard layout",
            }),
            None => Ok(()),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as `key='value', key2='value2'`. An empty set renders as "".
    pub fn format(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{}='{}'", k, v))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for LabelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

fn validate(key: &str, value: &str) -> Result<(), DashboardError> {
    let invalid = |reason| DashboardError::InvalidLabel {
        key: key.to_string(),
        value: value.to_string(),
        reason,
    };

    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return Err(invalid("key must start with a letter or underscore")),
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(invalid("key may only contain letters, digits and underscores"));
    }

    if value.contains(['\'', '"', '\\', '{', '}']) {
        return Err(invalid("value must not contain quotes, backslashes or braces"));
    }

    Ok(())
}

// Deserialized through a map visitor so document order is kept
impl<'de> Deserialize<'de> for LabelSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct LabelSetVisitor;

        impl<'de> Visitor<'de> for LabelSetVisitor {
            type Value = LabelSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a table of string labels")
            }

            fn visit_map<A>(self, mut map: A) -> Result<LabelSet, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut labels = LabelSet::new();
                while let Some((key, value)) = map.next_entry::<String, String>()? {
                    labels.insert(key, value).map_err(de::Error::custom)?;
                }
                Ok(labels)
            }
        }

        deserializer.deserialize_map(LabelSetVisitor)
    }
}
