//! AliasTable — immutable alias lookup table and generic resolution.

use std::collections::{BTreeMap, HashMap};

use fieldalias_store::{AliasConfig, FieldStore, RecordId, Result};
use tracing::debug;

/// Strip stray brackets and spaces an author may have typed around an alias.
pub fn trim_alias(raw: &str) -> &str {
    raw.trim_matches(|c| c == '[' || c == ']' || c == ' ')
}

/// What a bound alias points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasBinding {
    pub record: RecordId,
    pub field: String,
}

/// Immutable table of bound aliases.
///
/// Built by [`AliasTable::bind`]; lookups and resolution are read-only
/// thereafter. Rebinding means building a new table.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    bindings: HashMap<String, AliasBinding>,
}

impl AliasTable {
    /// Bind every usable mapping entry against the selected record.
    ///
    /// Aliases are trimmed over `[`, `]`, and space; entries that trim to
    /// empty are skipped. A later entry under the same trimmed alias silently
    /// replaces the earlier one — redefinition is idempotent, not an error.
    pub fn bind(record: RecordId, aliases: &BTreeMap<String, String>) -> Self {
        let mut bindings = HashMap::new();
        for (field, raw) in aliases {
            let alias = trim_alias(raw);
            if alias.is_empty() {
                continue;
            }
            bindings.insert(
                alias.to_string(),
                AliasBinding {
                    record,
                    field: field.clone(),
                },
            );
        }
        debug!(%record, bound = bindings.len(), "alias table bound");
        Self { bindings }
    }

    /// Bind from a configuration document, or `None` when no record is
    /// selected.
    pub fn from_config(config: &AliasConfig) -> Option<Self> {
        config
            .selected_record
            .map(|record| Self::bind(record, &config.aliases))
    }

    /// The binding registered under an exact alias string.
    pub fn get(&self, alias: &str) -> Option<&AliasBinding> {
        self.bindings.get(alias)
    }

    /// Whether an alias is bound.
    pub fn contains(&self, alias: &str) -> bool {
        self.bindings.contains_key(alias)
    }

    /// All bound alias strings, in no particular order.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    /// Number of bound aliases.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no alias is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// The `[alias]` token form for a bound alias, as shown by the admin
    /// copy control. `None` when the alias is not bound.
    pub fn token(&self, alias: &str) -> Option<String> {
        self.contains(alias).then(|| format!("[{alias}]"))
    }

    /// Resolve an alias to the field's current value.
    ///
    /// Performs one fresh store read per call. `None` for an unbound alias;
    /// an absent field resolves to `Some("")`.
    pub async fn resolve<F>(&self, store: &F, alias: &str) -> Result<Option<String>>
    where
        F: FieldStore + ?Sized,
    {
        let Some(binding) = self.bindings.get(alias) else {
            return Ok(None);
        };
        let value = store.field(binding.record, &binding.field).await?;
        Ok(Some(value.unwrap_or_default()))
    }
}
