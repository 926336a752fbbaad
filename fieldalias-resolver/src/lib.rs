//! Render-time alias resolution
//!
//! Binding is a pure data transformation: the alias mapping becomes an
//! immutable [`AliasTable`] of alias → `(record, field)` pairs, built once per
//! application lifecycle (and rebuilt whenever the host signals a registry
//! reload). Each resolution then performs one fresh field-store read, so value
//! edits are visible immediately without rebinding.
//!
//! The host is expected to bind synchronously before accepting resolution
//! calls; the table has no other states.

mod table;

pub use table::{trim_alias, AliasBinding, AliasTable};
