//! # StructuredRecord - Schema-Consistent Field Container
//!
//! A `StructuredRecord` owns an ordered sequence of field values. Built from
//! a schema (defaulted or decoded), the sequence holds exactly the schema
//! entries whose presence rule held at construction time, in schema order;
//! built empty ("generic" mode), it holds whatever the caller pushes, with no
//! presence logic at all.
//!
//! ## Accessor Contract
//!
//! Typed getters are total over absent optional fields: they return the
//! variant's zero/empty default instead of failing. A getter on an absent
//! `Required` field is a schema-consistency defect (`SchemaViolation`); a
//! getter whose type disagrees with the stored variant fails with
//! `FieldTypeMismatch`. Setters never create fields: setting an absent field
//! fails with `FieldNotPresent` and presence must be granted explicitly via
//! `make_field_present`. All accessor failures leave the record untouched.
//!
//! ## Flags Coupling
//!
//! `make_field_present` and `make_field_absent` do not touch the governing
//! flag bit. Callers flip it themselves (`set_flag` / `clear_flag`);
//! otherwise an encode/decode round trip, which re-evaluates presence from
//! the flags value, will disagree with the in-memory field set.
//!
//! ## Encoding
//!
//! Encoding folds the owned sequence in position order and lets each value
//! write itself; the record adds no tags, padding or length prefix. Two
//! records with equal value sequences therefore encode to identical bytes.

use eyre::Result;
use smallvec::SmallVec;

use crate::encoding::cursor::{ReadCursor, WriteCursor};
use crate::error::RecordError;
use crate::fields::{AccountId, Amount, FieldId, FieldValue, TaggedItem, TypeTag};
use crate::records::schema::{PresenceRule, RecordSchema};

#[derive(Debug, Clone)]
struct Slot {
    field_id: FieldId,
    name: &'static str,
    value: FieldValue,
}

/// The core container: a schema-consistent, exclusively owned set of field
/// values. See the module docs for the accessor and flags contracts.
#[derive(Debug, Clone)]
pub struct StructuredRecord<'a> {
    schema: Option<&'a RecordSchema>,
    slots: SmallVec<[Slot; 8]>,
}

impl<'a> StructuredRecord<'a> {
    /// Generic-mode record: no schema, no presence logic, every pushed field
    /// is simply present.
    pub fn empty() -> Self {
        Self {
            schema: None,
            slots: SmallVec::new(),
        }
    }

    /// Builds a record from a schema with every present field defaulted.
    ///
    /// Entries are evaluated in schema order against the flags value seen so
    /// far; since defaults are zero, `PresentIfFlagClear` fields materialize
    /// and `PresentIfFlagSet` fields do not.
    pub fn from_schema(schema: &'a RecordSchema) -> Result<Self> {
        let mut slots = SmallVec::new();
        let flags = 0u32;
        for entry in schema.entries() {
            if !entry.presence_rule.applies(flags) {
                continue;
            }
            slots.push(Slot {
                field_id: entry.field_id,
                name: entry.name,
                value: FieldValue::default_for(entry.type_tag)?,
            });
        }
        Ok(Self {
            schema: Some(schema),
            slots,
        })
    }

    /// Decodes a record from bytes, replaying the encode-side presence
    /// evaluation: each entry present under the flags value decoded so far
    /// consumes exactly one value of its declared type.
    ///
    /// Fails with `MalformedRecord` if the cursor runs dry or a value rejects
    /// its bytes; on failure no partial record is observable.
    pub fn decode(schema: &'a RecordSchema, cursor: &mut ReadCursor<'_>) -> Result<Self> {
        let mut slots: SmallVec<[Slot; 8]> = SmallVec::new();
        let mut flags = 0u32;
        for entry in schema.entries() {
            if !entry.presence_rule.applies(flags) {
                continue;
            }
            let value = FieldValue::decode(cursor, entry.type_tag)?;
            if entry.presence_rule == PresenceRule::IsFlags {
                if let FieldValue::U32(v) = value {
                    flags = v;
                }
            }
            slots.push(Slot {
                field_id: entry.field_id,
                name: entry.name,
                value,
            });
        }
        Ok(Self {
            schema: Some(schema),
            slots,
        })
    }

    pub fn schema(&self) -> Option<&'a RecordSchema> {
        self.schema
    }

    pub fn field_count(&self) -> usize {
        self.slots.len()
    }

    pub fn value_at(&self, index: usize) -> Option<&FieldValue> {
        self.slots.get(index).map(|slot| &slot.value)
    }

    pub fn field_id_at(&self, index: usize) -> Option<FieldId> {
        self.slots.get(index).map(|slot| slot.field_id)
    }

    /// Appends a field to a generic-mode record and returns its position.
    ///
    /// Pushing a field the schema does not declare onto a schema-built
    /// record leaves the slot order outside the schema's control;
    /// `make_field_present` rejects such records when the stray slot sits
    /// before the insertion point.
    pub fn push_field(&mut self, field_id: FieldId, value: FieldValue) -> usize {
        self.slots.push(Slot {
            field_id,
            name: field_id.name(),
            value,
        });
        self.slots.len() - 1
    }

    /// Position of the field in the owned sequence, or `None` when the field
    /// is currently absent or unknown.
    pub fn field_index(&self, field: FieldId) -> Option<usize> {
        self.slots.iter().position(|slot| slot.field_id == field)
    }

    pub fn is_field_present(&self, field: FieldId) -> bool {
        self.field_index(field).is_some()
    }

    // ------------------------------------------------------------------
    // Flags
    // ------------------------------------------------------------------

    /// Position of the flags field in the owned sequence, if any.
    pub fn flags_index(&self) -> Option<usize> {
        let flags_id = self.schema?.flags_field_id()?;
        self.field_index(flags_id)
    }

    /// Current flags value; 0 when the schema has no flags field.
    pub fn flags(&self) -> u32 {
        match self.flags_index() {
            Some(idx) => match self.slots[idx].value {
                FieldValue::U32(v) => v,
                _ => 0,
            },
            None => 0,
        }
    }

    /// ORs `mask` into the flags field. Returns false when the record has no
    /// flags field.
    pub fn set_flag(&mut self, mask: u32) -> bool {
        match self.flags_index() {
            Some(idx) => {
                if let FieldValue::U32(v) = &mut self.slots[idx].value {
                    *v |= mask;
                    true
                } else {
                    false
                }
            }
            None => false,
        }
    }

    /// Clears `mask` from the flags field. Returns false when the record has
    /// no flags field.
    pub fn clear_flag(&mut self, mask: u32) -> bool {
        match self.flags_index() {
            Some(idx) => {
                if let FieldValue::U32(v) = &mut self.slots[idx].value {
                    *v &= !mask;
                    true
                } else {
                    false
                }
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Presence toggling
    // ------------------------------------------------------------------

    /// Materializes the field with its default value at the schema-ordered
    /// position and returns it. Idempotent: an already-present field is
    /// returned as is. Does not flip the governing flag bit.
    pub fn make_field_present(&mut self, field: FieldId) -> Result<&mut FieldValue> {
        let schema = self
            .schema
            .ok_or_else(|| violation("record has no schema".to_string()))?;
        let entry_idx = schema
            .entry_index(field)
            .ok_or_else(|| violation(format!("field {} is not in the schema", field)))?;
        if let Some(idx) = self.field_index(field) {
            return Ok(&mut self.slots[idx].value);
        }
        let entry = &schema.entries()[entry_idx];
        let value = FieldValue::default_for(entry.type_tag)?;
        // Owned slots are in schema order, so the insertion point is the
        // count of slots whose schema position precedes this entry. A slot
        // the schema does not know (a generic push onto a schema-built
        // record) has no schema position, so no insertion point exists.
        let mut pos = 0;
        for slot in &self.slots {
            match schema.entry_index(slot.field_id) {
                Some(idx) if idx < entry_idx => pos += 1,
                Some(_) => break,
                None => {
                    return Err(violation(format!(
                        "field {} was pushed outside the schema; presence toggling is undefined",
                        slot.field_id
                    )))
                }
            }
        }
        self.slots.insert(
            pos,
            Slot {
                field_id: entry.field_id,
                name: entry.name,
                value,
            },
        );
        Ok(&mut self.slots[pos].value)
    }

    /// Removes the field's owned value. No-op when already absent; removing a
    /// `Required` or `IsFlags` field is a `SchemaViolation`.
    pub fn make_field_absent(&mut self, field: FieldId) -> Result<()> {
        let schema = self
            .schema
            .ok_or_else(|| violation("record has no schema".to_string()))?;
        let entry = schema
            .entry(field)
            .ok_or_else(|| violation(format!("field {} is not in the schema", field)))?;
        if entry.presence_rule.is_required() {
            return Err(violation(format!(
                "field {} is required and cannot be made absent",
                field
            )));
        }
        if let Some(idx) = self.field_index(field) {
            self.slots.remove(idx);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Typed getters
    // ------------------------------------------------------------------

    pub fn get_u8(&self, field: FieldId) -> Result<u8> {
        match self.peek_field(field)? {
            Some(FieldValue::U8(v)) => Ok(*v),
            Some(other) => Err(mismatch(field, TypeTag::U8, other)),
            None => Ok(0),
        }
    }

    pub fn get_u16(&self, field: FieldId) -> Result<u16> {
        match self.peek_field(field)? {
            Some(FieldValue::U16(v)) => Ok(*v),
            Some(other) => Err(mismatch(field, TypeTag::U16, other)),
            None => Ok(0),
        }
    }

    pub fn get_u32(&self, field: FieldId) -> Result<u32> {
        match self.peek_field(field)? {
            Some(FieldValue::U32(v)) => Ok(*v),
            Some(other) => Err(mismatch(field, TypeTag::U32, other)),
            None => Ok(0),
        }
    }

    pub fn get_u64(&self, field: FieldId) -> Result<u64> {
        match self.peek_field(field)? {
            Some(FieldValue::U64(v)) => Ok(*v),
            Some(other) => Err(mismatch(field, TypeTag::U64, other)),
            None => Ok(0),
        }
    }

    pub fn get_hash160(&self, field: FieldId) -> Result<[u8; 20]> {
        match self.peek_field(field)? {
            Some(FieldValue::Hash160(h)) => Ok(*h),
            Some(other) => Err(mismatch(field, TypeTag::Hash160, other)),
            None => Ok([0; 20]),
        }
    }

    pub fn get_hash256(&self, field: FieldId) -> Result<[u8; 32]> {
        match self.peek_field(field)? {
            Some(FieldValue::Hash256(h)) => Ok(*h),
            Some(other) => Err(mismatch(field, TypeTag::Hash256, other)),
            None => Ok([0; 32]),
        }
    }

    pub fn get_variable_length(&self, field: FieldId) -> Result<Vec<u8>> {
        match self.peek_field(field)? {
            Some(FieldValue::VariableLength(data)) => Ok(data.clone()),
            Some(other) => Err(mismatch(field, TypeTag::VariableLength, other)),
            None => Ok(Vec::new()),
        }
    }

    pub fn get_account(&self, field: FieldId) -> Result<AccountId> {
        match self.peek_field(field)? {
            Some(FieldValue::Account(account)) => Ok(*account),
            Some(other) => Err(mismatch(field, TypeTag::Account, other)),
            None => Ok(AccountId::default()),
        }
    }

    pub fn get_amount(&self, field: FieldId) -> Result<Amount> {
        match self.peek_field(field)? {
            Some(FieldValue::Amount(amount)) => Ok(*amount),
            Some(other) => Err(mismatch(field, TypeTag::Amount, other)),
            None => Ok(Amount::default()),
        }
    }

    pub fn get_tagged_list(&self, field: FieldId) -> Result<Vec<TaggedItem>> {
        match self.peek_field(field)? {
            Some(FieldValue::TaggedList(items)) => Ok(items.clone()),
            Some(other) => Err(mismatch(field, TypeTag::TaggedList, other)),
            None => Ok(Vec::new()),
        }
    }

    /// Diagnostic text form of whatever variant the field holds; empty when
    /// the field is an absent optional.
    pub fn get_string(&self, field: FieldId) -> Result<String> {
        match self.peek_field(field)? {
            Some(value) => Ok(value.text()),
            None => Ok(String::new()),
        }
    }

    // ------------------------------------------------------------------
    // Typed setters
    // ------------------------------------------------------------------

    pub fn set_u8(&mut self, field: FieldId, value: u8) -> Result<()> {
        self.replace(field, FieldValue::U8(value))
    }

    pub fn set_u16(&mut self, field: FieldId, value: u16) -> Result<()> {
        self.replace(field, FieldValue::U16(value))
    }

    pub fn set_u32(&mut self, field: FieldId, value: u32) -> Result<()> {
        self.replace(field, FieldValue::U32(value))
    }

    pub fn set_u64(&mut self, field: FieldId, value: u64) -> Result<()> {
        self.replace(field, FieldValue::U64(value))
    }

    pub fn set_hash160(&mut self, field: FieldId, hash: [u8; 20]) -> Result<()> {
        self.replace(field, FieldValue::Hash160(hash))
    }

    pub fn set_hash256(&mut self, field: FieldId, hash: [u8; 32]) -> Result<()> {
        self.replace(field, FieldValue::Hash256(hash))
    }

    pub fn set_variable_length(&mut self, field: FieldId, data: impl Into<Vec<u8>>) -> Result<()> {
        self.replace(field, FieldValue::VariableLength(data.into()))
    }

    pub fn set_account(&mut self, field: FieldId, account: AccountId) -> Result<()> {
        self.replace(field, FieldValue::Account(account))
    }

    pub fn set_amount(&mut self, field: FieldId, amount: Amount) -> Result<()> {
        self.replace(field, FieldValue::Amount(amount))
    }

    pub fn set_tagged_list(&mut self, field: FieldId, items: Vec<TaggedItem>) -> Result<()> {
        self.replace(field, FieldValue::TaggedList(items))
    }

    // ------------------------------------------------------------------
    // Encoding, projection, equivalence
    // ------------------------------------------------------------------

    /// Writes the canonical encoding: each owned value in position order,
    /// nothing else.
    pub fn encode_into(&self, cursor: &mut WriteCursor) -> Result<()> {
        for slot in &self.slots {
            slot.value.encode_into(cursor)?;
        }
        Ok(())
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut cursor = WriteCursor::new();
        self.encode_into(&mut cursor)?;
        Ok(cursor.into_bytes())
    }

    /// JSON object mapping field name to value projection for every present
    /// field, in schema order. Absent fields are omitted, never null.
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::with_capacity(self.slots.len());
        for slot in &self.slots {
            map.insert(slot.name.to_string(), slot.value.to_json());
        }
        serde_json::Value::Object(map)
    }

    /// Full diagnostic rendering: `{name = value, ...}` over present fields.
    pub fn full_text(&self) -> String {
        let body: Vec<String> = self
            .slots
            .iter()
            .map(|slot| format!("{} = {}", slot.name, slot.value.text()))
            .collect();
        format!("{{{}}}", body.join(", "))
    }

    /// Short diagnostic rendering: present field values only.
    pub fn text(&self) -> String {
        let body: Vec<String> = self.slots.iter().map(|slot| slot.value.text()).collect();
        body.join(" ")
    }

    /// Value-level equality: same owned-field count, pairwise-equal values by
    /// position, same flags slot. Field names and schema identity are not
    /// part of the relation.
    pub fn is_equivalent(&self, other: &StructuredRecord<'_>) -> bool {
        self.slots.len() == other.slots.len()
            && self.flags_index() == other.flags_index()
            && self
                .slots
                .iter()
                .zip(other.slots.iter())
                .all(|(a, b)| a.value == b.value)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Present field -> `Some(value)`; absent optional -> `None`; anything
    /// else is a schema-consistency defect.
    fn peek_field(&self, field: FieldId) -> Result<Option<&FieldValue>> {
        if let Some(idx) = self.field_index(field) {
            return Ok(Some(&self.slots[idx].value));
        }
        match self.schema.and_then(|s| s.entry(field)) {
            Some(entry) if !entry.presence_rule.is_required() => Ok(None),
            Some(_) => Err(violation(format!(
                "required field {} is missing from the record",
                field
            ))),
            None => Err(violation(format!("field {} is not in the schema", field))),
        }
    }

    fn replace(&mut self, field: FieldId, value: FieldValue) -> Result<()> {
        let idx = self
            .field_index(field)
            .ok_or(RecordError::FieldNotPresent(field.name()))?;
        let slot = &mut self.slots[idx];
        if slot.value.type_tag() != value.type_tag() {
            return Err(mismatch(field, value.type_tag(), &slot.value));
        }
        slot.value = value;
        Ok(())
    }
}

fn mismatch(field: FieldId, expected: TypeTag, found: &FieldValue) -> eyre::Report {
    RecordError::FieldTypeMismatch {
        field: field.name(),
        expected,
        found: found.type_tag(),
    }
    .into()
}

fn violation(message: String) -> eyre::Report {
    RecordError::SchemaViolation(message).into()
}
