//! AliasRegistry — administrative API surface.
//!
//! Construction takes the stores and the authorizer explicitly; all
//! configuration lives in the [`AliasConfig`] document behind the settings
//! store, nothing is process-global.

use fieldalias_store::{
    AliasConfig, FieldStore, RecordId, RecordSource, RecordSummary, SettingsStore,
};
use tracing::debug;

use crate::auth::Authorizer;
use crate::error::Result;
use crate::sanitize::{normalize_key, sanitize_text};

/// Literal prepended to new aliases while the prefix flag is enabled.
pub const ALIAS_PREFIX: &str = "ds_";

/// Leading character marking host-internal bookkeeping fields.
/// Such fields are hidden from listings but still count for duplicate checks.
pub const INTERNAL_FIELD_PREFIX: char = '_';

/// Outcome of [`AliasRegistry::add_field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Field value written and mapping entry inserted.
    Added,
    /// Field name already on the record, or alias already mapped.
    Duplicate,
    /// Unauthorized actor or empty normalized input; nothing written.
    Ignored,
}

impl AddOutcome {
    /// Banner slug conveyed to the admin surface, if any.
    pub fn banner(&self) -> Option<&'static str> {
        match self {
            AddOutcome::Added => Some("added"),
            AddOutcome::Duplicate => Some("duplicate"),
            AddOutcome::Ignored => None,
        }
    }
}

/// Outcome of [`AliasRegistry::set_alias`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetAliasOutcome {
    /// Mapping entry written.
    Set,
    /// Alias already held by a different field; mapping untouched.
    Duplicate,
    /// Unauthorized actor; nothing written.
    Ignored,
}

impl SetAliasOutcome {
    /// Banner slug conveyed to the admin surface, if any.
    pub fn banner(&self) -> Option<&'static str> {
        match self {
            SetAliasOutcome::Duplicate => Some("duplicate"),
            _ => None,
        }
    }
}

/// Outcome of [`AliasRegistry::delete_field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Field value and mapping entry removed (whether or not they existed).
    Deleted,
    /// Unauthorized actor or empty normalized name; nothing written.
    Ignored,
}

impl DeleteOutcome {
    /// Banner slug conveyed to the admin surface, if any.
    pub fn banner(&self) -> Option<&'static str> {
        match self {
            DeleteOutcome::Deleted => Some("deleted"),
            DeleteOutcome::Ignored => None,
        }
    }
}

/// Registry over a field store, a settings store, and a host authorizer.
pub struct AliasRegistry<F, S, A> {
    fields: F,
    settings: S,
    auth: A,
}

impl<F, S, A> AliasRegistry<F, S, A>
where
    F: FieldStore,
    S: SettingsStore,
    A: Authorizer,
{
    /// Create a registry over the given stores and authorizer.
    pub fn new(fields: F, settings: S, auth: A) -> Self {
        Self {
            fields,
            settings,
            auth,
        }
    }

    /// The underlying field store.
    pub fn field_store(&self) -> &F {
        &self.fields
    }

    /// The current configuration document.
    pub async fn config(&self) -> Result<AliasConfig> {
        Ok(self.settings.load().await?)
    }

    /// The currently selected record, if any.
    pub async fn selected_record(&self) -> Result<Option<RecordId>> {
        Ok(self.settings.load().await?.selected_record)
    }

    /// Point the registry at a record. No validation that the record exists;
    /// reads of a missing record simply come back empty.
    pub async fn select_record(&self, record: RecordId) -> Result<()> {
        if !self.auth.can_administer() {
            debug!(%record, "select_record ignored: not authorized");
            return Ok(());
        }
        let mut config = self.settings.load().await?;
        config.selected_record = Some(record);
        self.settings.save(&config).await?;
        debug!(%record, "record selected");
        Ok(())
    }

    /// Toggle the prefix flag. Existing mapping entries are untouched.
    pub async fn set_prefix_enabled(&self, enabled: bool) -> Result<()> {
        if !self.auth.can_administer() {
            debug!(enabled, "set_prefix_enabled ignored: not authorized");
            return Ok(());
        }
        let mut config = self.settings.load().await?;
        config.prefix_enabled = enabled;
        self.settings.save(&config).await?;
        debug!(enabled, "prefix flag updated");
        Ok(())
    }

    /// The record's fields as ordered `(name, value)` pairs, hiding
    /// host-internal names (leading underscore). Order is stable across
    /// repeated calls with no intervening writes.
    pub async fn list_fields(&self, record: RecordId) -> Result<Vec<(String, String)>> {
        Ok(self
            .fields
            .fields(record)
            .await?
            .into_iter()
            .filter(|(name, _)| !name.starts_with(INTERNAL_FIELD_PREFIX))
            .collect())
    }

    /// Overwrite a field's stored value with a sanitized copy of `raw`.
    pub async fn upsert_field_value(
        &self,
        record: RecordId,
        name: &str,
        raw: &str,
    ) -> Result<()> {
        if !self.auth.can_administer() {
            debug!(%record, field = %name, "upsert ignored: not authorized");
            return Ok(());
        }
        self.fields
            .set_field(record, name, &sanitize_text(raw))
            .await?;
        Ok(())
    }

    /// Create or overwrite the mapping entry for an existing field.
    ///
    /// The alias value is sanitized as text; an empty result is stored as an
    /// inert entry that the resolver never binds. A non-empty alias already
    /// held by a different field is rejected as [`SetAliasOutcome::Duplicate`].
    pub async fn set_alias(&self, field: &str, alias: &str) -> Result<SetAliasOutcome> {
        if !self.auth.can_administer() {
            debug!(field, "set_alias ignored: not authorized");
            return Ok(SetAliasOutcome::Ignored);
        }
        let alias = sanitize_text(alias);
        let mut config = self.settings.load().await?;
        if !alias.is_empty()
            && config
                .aliases
                .iter()
                .any(|(f, a)| f != field && *a == alias)
        {
            debug!(field, alias = %alias, "set_alias rejected: alias in use");
            return Ok(SetAliasOutcome::Duplicate);
        }
        config.aliases.insert(field.to_string(), alias);
        self.settings.save(&config).await?;
        Ok(SetAliasOutcome::Set)
    }

    /// Add a new field with its alias in one administrative step.
    ///
    /// Both names are normalized to the key charset; an empty result is
    /// treated as missing input and ignored. While the prefix flag is enabled
    /// the alias gets the [`ALIAS_PREFIX`] literal at creation time. Duplicate
    /// iff the field name is already on the record (internal fields included)
    /// or the prefixed alias is already mapped.
    ///
    /// The field value and the mapping entry are two independent writes with
    /// no atomicity across the stores; a failure between them leaves the value
    /// written and the mapping absent.
    pub async fn add_field(
        &self,
        record: RecordId,
        name: &str,
        value: &str,
        alias: &str,
    ) -> Result<AddOutcome> {
        if !self.auth.can_administer() {
            debug!(%record, "add_field ignored: not authorized");
            return Ok(AddOutcome::Ignored);
        }

        let name = normalize_key(name);
        let alias = normalize_key(alias);
        if name.is_empty() || alias.is_empty() {
            debug!(%record, "add_field ignored: empty normalized input");
            return Ok(AddOutcome::Ignored);
        }

        let mut config = self.settings.load().await?;
        let alias = if config.prefix_enabled {
            format!("{ALIAS_PREFIX}{alias}")
        } else {
            alias
        };

        let existing = self.fields.fields(record).await?;
        if existing.contains_key(&name) || config.alias_in_use(&alias) {
            debug!(%record, field = %name, alias = %alias, "add_field rejected: duplicate");
            return Ok(AddOutcome::Duplicate);
        }

        self.fields
            .set_field(record, &name, &sanitize_text(value))
            .await?;
        config.aliases.insert(name.clone(), alias.clone());
        self.settings.save(&config).await?;

        debug!(%record, field = %name, alias = %alias, "field and alias added");
        Ok(AddOutcome::Added)
    }

    /// Remove a field's stored value and its mapping entry.
    ///
    /// Two independent writes, no atomicity. Reports `Deleted` even when the
    /// field was already absent.
    pub async fn delete_field(&self, record: RecordId, name: &str) -> Result<DeleteOutcome> {
        if !self.auth.can_administer() {
            debug!(%record, field = %name, "delete_field ignored: not authorized");
            return Ok(DeleteOutcome::Ignored);
        }

        let name = normalize_key(name);
        if name.is_empty() {
            return Ok(DeleteOutcome::Ignored);
        }

        self.fields.delete_field(record, &name).await?;

        let mut config = self.settings.load().await?;
        if config.aliases.remove(&name).is_some() {
            self.settings.save(&config).await?;
        }

        debug!(%record, field = %name, "field and alias deleted");
        Ok(DeleteOutcome::Deleted)
    }
}

impl<F, S, A> AliasRegistry<F, S, A>
where
    F: FieldStore + RecordSource,
    S: SettingsStore,
    A: Authorizer,
{
    /// All known records, for the selection control.
    pub async fn list_records(&self) -> Result<Vec<RecordSummary>> {
        Ok(self.fields.list_records().await?)
    }
}
