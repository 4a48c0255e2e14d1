//! # Typed Field Values
//!
//! This module provides the polymorphic values that occupy record slots. Each
//! value knows its own canonical binary encoding, its own JSON projection and
//! its own diagnostic text form; the record layer orchestrates them without
//! caring which variant sits in which slot.
//!
//! ## Module Structure
//!
//! - `id`: stable field identities (`FieldId`)
//! - `value`: the `FieldValue` tagged union, `TypeTag`, and the `Amount`,
//!   `AccountId` and `TaggedItem` carriers
//!
//! ## Ownership
//!
//! A `FieldValue` is always the sole owner of its payload. Cloning a value
//! deep-copies it; no two records ever share a payload.

pub mod id;
pub mod value;

#[cfg(test)]
mod tests;

pub use id::FieldId;
pub use value::{AccountId, Amount, FieldValue, TaggedItem, TypeTag};
