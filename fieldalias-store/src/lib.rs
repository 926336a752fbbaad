//! Storage contracts for the fieldalias workspace
//!
//! This crate owns the data model shared by the registry and the resolver and
//! the collaborator contracts they consume: a field store (named string values
//! attached to a record), a settings store (the single alias configuration
//! document), and a record source (enumeration for the selection control).
//!
//! Two backends are provided for each contract:
//!
//! - **YAML on disk**: one `.yaml` document per record under a directory, and a
//!   single `settings.yaml`, written atomically (temp file then rename)
//! - **In-memory**: mutex-guarded maps for tests and embedding hosts
//!
//! Records are externally owned. Backends read and write individual fields but
//! never delete a record document.

mod error;
mod fields;
mod fsutil;
mod settings;
mod types;

pub use error::{Result, StoreError};
pub use fields::{FieldStore, MemoryFieldStore, RecordSource, YamlFieldStore};
pub use settings::{MemorySettingsStore, SettingsStore, YamlSettingsStore};
pub use types::{AliasConfig, RecordDoc, RecordId, RecordSummary};
