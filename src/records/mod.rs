//! # Structured Records
//!
//! This module provides the schema-driven record container. A `RecordSchema`
//! declares which fields one record shape holds, in what order, and under
//! what conditions; a `StructuredRecord` owns the field values that are
//! actually present and exposes typed accessors, presence toggling, the
//! canonical binary encoding and a JSON projection.
//!
//! ## Presence Model
//!
//! A schema entry is either always present (`Required`, `IsFlags`) or gated
//! on a bit of the record's single in-band flags field
//! (`PresentIfFlagSet` / `PresentIfFlagClear`). Presence is evaluated once,
//! at construction or decode time, and thereafter tracked by membership in
//! the owned sequence; `make_field_present` / `make_field_absent` adjust it
//! explicitly.
//!
//! ## Module Structure
//!
//! - `schema`: presence rules, schema entries, schema validation
//! - `record`: the `StructuredRecord` container

pub mod record;
pub mod schema;


pub use record::StructuredRecord;
pub use schema::{PresenceRule, RecordSchema, SchemaEntry};
