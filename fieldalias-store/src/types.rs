//! Shared data model for records, fields, and the alias configuration.
//!
//! All types serialize to/from YAML via serde. The alias configuration is one
//! flat document with no schema versioning; missing keys take defaults so older
//! documents keep loading.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of an externally-owned record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A record document: title plus the named fields attached to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordDoc {
    pub id: RecordId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl RecordDoc {
    pub fn new(id: RecordId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            fields: BTreeMap::new(),
        }
    }
}

/// Enumeration item for the record-selection control.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordSummary {
    pub id: RecordId,
    pub title: String,
}

fn default_prefix_enabled() -> bool {
    true
}

/// The alias configuration: which record is selected, the field-name → alias
/// mapping, and the prefix flag.
///
/// The host loads and persists this through a [`SettingsStore`]; nothing is
/// process-global.
///
/// [`SettingsStore`]: crate::SettingsStore
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AliasConfig {
    /// The record whose fields are currently eligible for aliasing.
    #[serde(default)]
    pub selected_record: Option<RecordId>,
    /// Field name → alias. Alias values are unique across the mapping.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
    /// When true, newly created aliases are prefixed at creation time.
    #[serde(default = "default_prefix_enabled")]
    pub prefix_enabled: bool,
}

impl Default for AliasConfig {
    fn default() -> Self {
        Self {
            selected_record: None,
            aliases: BTreeMap::new(),
            prefix_enabled: true,
        }
    }
}

impl AliasConfig {
    /// Whether any field already maps to `alias`.
    pub fn alias_in_use(&self, alias: &str) -> bool {
        self.aliases.values().any(|a| a == alias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_serializes_transparent() {
        let yaml = serde_yaml::to_string(&RecordId(42)).unwrap();
        assert_eq!(yaml.trim(), "42");
        let parsed: RecordId = serde_yaml::from_str("42").unwrap();
        assert_eq!(parsed, RecordId(42));
    }

    #[test]
    fn alias_config_defaults() {
        let config = AliasConfig::default();
        assert!(config.selected_record.is_none());
        assert!(config.aliases.is_empty());
        assert!(config.prefix_enabled);
    }

    #[test]
    fn alias_config_yaml_round_trip() {
        let mut config = AliasConfig::default();
        config.selected_record = Some(RecordId(7));
        config
            .aliases
            .insert("price".into(), "ds_price".into());
        config.prefix_enabled = false;

        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: AliasConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn alias_config_tolerates_missing_keys() {
        let parsed: AliasConfig = serde_yaml::from_str("selected_record: 3").unwrap();
        assert_eq!(parsed.selected_record, Some(RecordId(3)));
        assert!(parsed.aliases.is_empty());
        // absent flag falls back to enabled
        assert!(parsed.prefix_enabled);
    }

    #[test]
    fn alias_in_use_checks_values_not_keys() {
        let mut config = AliasConfig::default();
        config.aliases.insert("price".into(), "ds_p".into());
        assert!(config.alias_in_use("ds_p"));
        assert!(!config.alias_in_use("price"));
        assert!(!config.alias_in_use("ds_q"));
    }

    #[test]
    fn record_doc_yaml_round_trip() {
        let mut doc = RecordDoc::new(RecordId(5), "Pricing");
        doc.fields.insert("price".into(), "19.99".into());
        doc.fields.insert("_internal".into(), "1".into());

        let yaml = serde_yaml::to_string(&doc).unwrap();
        let parsed: RecordDoc = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(doc, parsed);
    }
}
