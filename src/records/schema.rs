//! # Record Schemas
//!
//! A `RecordSchema` is an ordered list of `SchemaEntry` declarations defining
//! one record shape. The order is significant: it is both the canonical
//! encoding order and the evaluation order for presence rules, so the flags
//! entry (if any) must precede every entry that gates on it. Schemas that
//! break that ordering are rejected at construction rather than producing
//! undefined presence results.
//!
//! ## Validation Rules
//!
//! `RecordSchema::new` rejects, with `SchemaViolation`:
//!
//! - duplicate field ids, or use of the reserved `Invalid` id
//! - entries declared with the `NotPresent` type tag
//! - more than one `IsFlags` entry, or an `IsFlags` entry that is not `U32`
//! - a conditional entry with no `IsFlags` entry anywhere in the schema
//! - a conditional entry preceding the `IsFlags` entry

use eyre::Result;

use crate::error::RecordError;
use crate::fields::{FieldId, TypeTag};

/// Policy determining whether a field exists in a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceRule {
    /// Always present.
    Required,
    /// The record's single in-band flags field; always present.
    IsFlags,
    /// Present iff `(flags & mask) != 0`.
    PresentIfFlagSet(u32),
    /// Present iff `(flags & mask) == 0`.
    PresentIfFlagClear(u32),
}

impl PresenceRule {
    /// Pure presence evaluation against a flags value.
    pub fn applies(&self, flags: u32) -> bool {
        match self {
            PresenceRule::Required | PresenceRule::IsFlags => true,
            PresenceRule::PresentIfFlagSet(mask) => flags & mask != 0,
            PresenceRule::PresentIfFlagClear(mask) => flags & mask == 0,
        }
    }

    /// Whether a field with this rule may never be removed from a record.
    pub fn is_required(&self) -> bool {
        matches!(self, PresenceRule::Required | PresenceRule::IsFlags)
    }

    fn is_conditional(&self) -> bool {
        matches!(
            self,
            PresenceRule::PresentIfFlagSet(_) | PresenceRule::PresentIfFlagClear(_)
        )
    }
}

/// One field declaration: id, diagnostic name, wire type, presence rule.
/// The name labels JSON and text output only; it never affects encoding.
#[derive(Debug, Clone)]
pub struct SchemaEntry {
    pub field_id: FieldId,
    pub name: &'static str,
    pub type_tag: TypeTag,
    pub presence_rule: PresenceRule,
}

impl SchemaEntry {
    pub fn new(
        field_id: FieldId,
        name: &'static str,
        type_tag: TypeTag,
        presence_rule: PresenceRule,
    ) -> Self {
        Self {
            field_id,
            name,
            type_tag,
            presence_rule,
        }
    }
}

/// Ordered, validated list of field declarations defining one record shape.
#[derive(Debug, Clone)]
pub struct RecordSchema {
    entries: Vec<SchemaEntry>,
    flags_entry: Option<usize>,
}

impl RecordSchema {
    pub fn new(entries: Vec<SchemaEntry>) -> Result<Self> {
        let mut flags_entry = None;

        for (idx, entry) in entries.iter().enumerate() {
            if entry.field_id == FieldId::Invalid {
                return Err(violation(format!(
                    "entry {} uses the reserved Invalid field id",
                    idx
                )));
            }
            if entry.type_tag == TypeTag::NotPresent {
                return Err(violation(format!(
                    "field {} declared with the NotPresent type tag",
                    entry.field_id
                )));
            }
            if entries[..idx].iter().any(|e| e.field_id == entry.field_id) {
                return Err(violation(format!("duplicate field id {}", entry.field_id)));
            }
            match entry.presence_rule {
                PresenceRule::IsFlags => {
                    if flags_entry.is_some() {
                        return Err(violation(format!(
                            "second IsFlags entry at field {}",
                            entry.field_id
                        )));
                    }
                    if entry.type_tag != TypeTag::U32 {
                        return Err(violation(format!(
                            "IsFlags field {} must be U32, not {}",
                            entry.field_id, entry.type_tag
                        )));
                    }
                    flags_entry = Some(idx);
                }
                rule if rule.is_conditional() => {
                    if flags_entry.is_none() {
                        return Err(violation(format!(
                            "conditional field {} is not preceded by an IsFlags entry",
                            entry.field_id
                        )));
                    }
                }
                _ => {}
            }
        }

        Ok(Self {
            entries,
            flags_entry,
        })
    }

    pub fn entries(&self) -> &[SchemaEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of the field in schema order, present or not.
    pub fn entry_index(&self, field: FieldId) -> Option<usize> {
        self.entries.iter().position(|e| e.field_id == field)
    }

    pub fn entry(&self, field: FieldId) -> Option<&SchemaEntry> {
        self.entry_index(field).map(|idx| &self.entries[idx])
    }

    /// Position of the `IsFlags` entry in schema order, if the schema has one.
    pub fn flags_entry_index(&self) -> Option<usize> {
        self.flags_entry
    }

    pub fn flags_field_id(&self) -> Option<FieldId> {
        self.flags_entry.map(|idx| self.entries[idx].field_id)
    }
}

fn violation(message: String) -> eyre::Report {
    RecordError::SchemaViolation(message).into()
}
