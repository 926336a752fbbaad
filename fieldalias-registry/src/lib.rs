//! Administrative registry mapping record fields to public aliases
//!
//! The registry is a thin validation/normalization layer over the stores in
//! `fieldalias-store`. An administrator selects a source record, exposes some
//! of its fields under short aliases, and toggles the prefix flag; consumers
//! resolve aliases through `fieldalias-resolver` without knowing the record.
//!
//! Mutations happen only on administrative submission. Domain outcomes —
//! duplicate names, ignored unauthorized or empty input — are reported as enum
//! values, never as errors; `Err` is reserved for storage failures, which
//! propagate to the host.
//!
//! ## Basic Usage
//!
//! ```rust
//! use fieldalias_registry::{AddOutcome, AliasRegistry, AllowAll};
//! use fieldalias_store::{MemoryFieldStore, MemorySettingsStore, RecordId};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = AliasRegistry::new(
//!     MemoryFieldStore::new(),
//!     MemorySettingsStore::new(),
//!     AllowAll,
//! );
//!
//! registry.select_record(RecordId(42)).await?;
//! let outcome = registry.add_field(RecordId(42), "price", "19.99", "p").await?;
//! assert_eq!(outcome, AddOutcome::Added);
//! # Ok(())
//! # }
//! ```

mod auth;
mod error;
mod registry;
mod sanitize;

pub use auth::{AllowAll, Authorizer};
pub use error::{RegistryError, Result};
pub use registry::{
    AddOutcome, AliasRegistry, DeleteOutcome, SetAliasOutcome, ALIAS_PREFIX,
    INTERNAL_FIELD_PREFIX,
};
pub use sanitize::{normalize_key, sanitize_text};
