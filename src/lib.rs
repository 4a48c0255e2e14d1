//! # recwire - Schema-Driven Structured Records
//!
//! recwire assembles heterogeneous typed fields into one record whose shape
//! (which fields exist, in what order, under what conditions) is declared by
//! an external per-record-type schema instead of being hard-coded per type.
//! The same record supports three views:
//!
//! - a **bit-exact canonical binary encoding** suitable for hashing, signing
//!   and wire/storage compatibility
//! - a **JSON projection** keyed by schema field names
//! - **typed accessors** that read and write individual fields by id without
//!   knowing the full schema at the call site
//!
//! ## Quick Start
//!
//! ```ignore
//! use recwire::{
//!     FieldId, PresenceRule, RecordSchema, SchemaEntry, StructuredRecord, TypeTag,
//! };
//!
//! let schema = RecordSchema::new(vec![
//!     SchemaEntry::new(FieldId::Flags, "Flags", TypeTag::U32, PresenceRule::IsFlags),
//!     SchemaEntry::new(FieldId::Amount, "Amount", TypeTag::Amount, PresenceRule::Required),
//!     SchemaEntry::new(
//!         FieldId::Destination,
//!         "Destination",
//!         TypeTag::Account,
//!         PresenceRule::PresentIfFlagSet(0x1),
//!     ),
//! ])?;
//!
//! let mut record = StructuredRecord::from_schema(&schema)?;
//! record.set_amount(FieldId::Amount, Amount(250))?;
//! record.set_flag(0x1);
//! record.make_field_present(FieldId::Destination)?;
//! let bytes = record.encode()?;
//! ```
//!
//! ## Presence Model
//!
//! One in-band bitmask field (`IsFlags`) gates the conditional fields that
//! follow it in schema order. Presence is evaluated at construction and
//! decode time; afterwards it is tracked by membership and toggled explicitly
//! with `make_field_present` / `make_field_absent`. Toggling does not flip
//! the governing flag bit; callers keep flags and field set in sync.
//!
//! ## Module Overview
//!
//! - [`encoding`]: byte cursors and the variable-length prefix format
//! - [`fields`]: field identities and the self-encoding `FieldValue` union
//! - [`records`]: schemas, presence rules and the `StructuredRecord` container
//! - [`error`]: the `RecordError` kinds carried inside every failure

pub mod encoding;
pub mod error;
pub mod fields;
pub mod records;

pub use encoding::cursor::{ReadCursor, WriteCursor, MAX_VL_LEN};
pub use error::RecordError;
pub use fields::{AccountId, Amount, FieldId, FieldValue, TaggedItem, TypeTag};
pub use records::{PresenceRule, RecordSchema, SchemaEntry, StructuredRecord};
