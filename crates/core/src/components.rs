//! Component lookup table used to remap string tags.

use crate::error::TransformError;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// Read-only mapping from string tags to component identifiers.
///
/// Keys are matched exactly and case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ComponentTable<C = String> {
    entries: HashMap<String, C>,
}

impl<C> ComponentTable<C> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Adds or replaces an entry.
    pub fn insert(&mut self, name: impl Into<String>, component: C) -> Option<C> {
        self.entries.insert(name.into(), component)
    }

    /// Returns the component registered for `name`.
    pub fn get(&self, name: &str) -> Option<&C> {
        self.entries.get(name)
    }

    /// Whether `name` is a key of the table.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C: DeserializeOwned> ComponentTable<C> {
    /// Parses a table from a JSON object.
    pub fn from_json_str(input: &str) -> Result<Self, TransformError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Parses a table from a YAML mapping.
    pub fn from_yaml_str(input: &str) -> Result<Self, TransformError> {
        Ok(serde_yaml::from_str(input)?)
    }
}

impl<C> Default for ComponentTable<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, K: Into<String>> FromIterator<(K, C)> for ComponentTable<C> {
    fn from_iter<I: IntoIterator<Item = (K, C)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, component)| (name.into(), component))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_sensitive() {
        let table: ComponentTable = [("Aside", "aside-component".to_string())]
            .into_iter()
            .collect();
        assert!(table.contains("Aside"));
        assert!(!table.contains("aside"));
        assert!(!table.contains("Asid"));
        assert_eq!(table.get("Aside").map(String::as_str), Some("aside-component"));
    }

    #[test]
    fn parses_json_and_yaml() {
        let json: ComponentTable =
            ComponentTable::from_json_str(r#"{"Tabs": "TabsImpl"}"#).unwrap();
        let yaml: ComponentTable = ComponentTable::from_yaml_str("Tabs: TabsImpl\n").unwrap();
        assert_eq!(json, yaml);
        assert_eq!(json.len(), 1);
    }

    #[test]
    fn rejects_non_mapping() {
        let err = ComponentTable::<String>::from_json_str("[1, 2]").unwrap_err();
        assert!(matches!(err, TransformError::Json(_)));
    }

    #[test]
    fn insert_replaces() {
        let mut table = ComponentTable::new();
        assert!(table.is_empty());
        assert_eq!(table.insert("Card", 1), None);
        assert_eq!(table.insert("Card", 2), Some(1));
        assert_eq!(table.get("Card"), Some(&2));
    }
}
