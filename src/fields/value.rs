//! # FieldValue - Self-Encoding Slot Values
//!
//! This module provides the `FieldValue` tagged union: one variant per wire
//! type a record slot can hold. Each variant carries its payload inline and
//! owns it outright.
//!
//! ## Wire Encodings
//!
//! | Variant | Encoding |
//! |---------|----------|
//! | `U8`/`U16`/`U32`/`U64` | fixed-width big-endian |
//! | `Hash160` | 20 raw bytes |
//! | `Hash256` | 32 raw bytes |
//! | `VariableLength` | length prefix + bytes |
//! | `Account` | length prefix + exactly 20 bytes |
//! | `Amount` | 64-bit big-endian value |
//! | `TaggedList` | u8 item count, then per item: u8 tag + length prefix + bytes |
//!
//! A tagged list holds at most 255 items; longer lists cannot be encoded.
//!
//! ## JSON Projections
//!
//! Small integers project as JSON numbers. 64-bit integers, hashes, byte
//! runs and account identifiers project as lowercase hex strings so no
//! precision is lost in JSON number space. Amounts project as decimal
//! strings. Tagged lists project as arrays of `{tag, data}` objects.

use eyre::Result;

use crate::encoding::cursor::{ReadCursor, WriteCursor};
use crate::error::RecordError;

/// Identifies which variant occupies a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    NotPresent,
    U8,
    U16,
    U32,
    U64,
    Hash160,
    Hash256,
    VariableLength,
    Account,
    Amount,
    TaggedList,
}

impl TypeTag {
    pub fn name(&self) -> &'static str {
        match self {
            TypeTag::NotPresent => "NotPresent",
            TypeTag::U8 => "U8",
            TypeTag::U16 => "U16",
            TypeTag::U32 => "U32",
            TypeTag::U64 => "U64",
            TypeTag::Hash160 => "Hash160",
            TypeTag::Hash256 => "Hash256",
            TypeTag::VariableLength => "VariableLength",
            TypeTag::Account => "Account",
            TypeTag::Amount => "Amount",
            TypeTag::TaggedList => "TaggedList",
        }
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 160-bit account identifier. Address parsing lives outside this crate;
/// here it is a plain 20-byte carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AccountId(pub [u8; 20]);

/// Amount value. A plain 64-bit carrier; currency semantics live outside
/// this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Amount(pub u64);

/// One entry of a tagged list: a one-byte tag and an opaque payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaggedItem {
    pub tag: u8,
    pub data: Vec<u8>,
}

impl TaggedItem {
    pub fn new(tag: u8, data: impl Into<Vec<u8>>) -> Self {
        Self {
            tag,
            data: data.into(),
        }
    }
}

/// A polymorphic, self-encoding value occupying one record slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Hash160([u8; 20]),
    Hash256([u8; 32]),
    VariableLength(Vec<u8>),
    Account(AccountId),
    Amount(Amount),
    TaggedList(Vec<TaggedItem>),
}

impl FieldValue {
    pub fn type_tag(&self) -> TypeTag {
        match self {
            FieldValue::U8(_) => TypeTag::U8,
            FieldValue::U16(_) => TypeTag::U16,
            FieldValue::U32(_) => TypeTag::U32,
            FieldValue::U64(_) => TypeTag::U64,
            FieldValue::Hash160(_) => TypeTag::Hash160,
            FieldValue::Hash256(_) => TypeTag::Hash256,
            FieldValue::VariableLength(_) => TypeTag::VariableLength,
            FieldValue::Account(_) => TypeTag::Account,
            FieldValue::Amount(_) => TypeTag::Amount,
            FieldValue::TaggedList(_) => TypeTag::TaggedList,
        }
    }

    /// Zero/empty value for a type tag.
    pub fn default_for(tag: TypeTag) -> Result<FieldValue> {
        Ok(match tag {
            TypeTag::NotPresent => {
                return Err(RecordError::SchemaViolation(
                    "NotPresent has no default value".to_string(),
                )
                .into())
            }
            TypeTag::U8 => FieldValue::U8(0),
            TypeTag::U16 => FieldValue::U16(0),
            TypeTag::U32 => FieldValue::U32(0),
            TypeTag::U64 => FieldValue::U64(0),
            TypeTag::Hash160 => FieldValue::Hash160([0; 20]),
            TypeTag::Hash256 => FieldValue::Hash256([0; 32]),
            TypeTag::VariableLength => FieldValue::VariableLength(Vec::new()),
            TypeTag::Account => FieldValue::Account(AccountId::default()),
            TypeTag::Amount => FieldValue::Amount(Amount::default()),
            TypeTag::TaggedList => FieldValue::TaggedList(Vec::new()),
        })
    }

    /// Writes the canonical encoding of this value.
    pub fn encode_into(&self, cursor: &mut WriteCursor) -> Result<()> {
        match self {
            FieldValue::U8(v) => cursor.put_u8(*v),
            FieldValue::U16(v) => cursor.put_u16(*v),
            FieldValue::U32(v) => cursor.put_u32(*v),
            FieldValue::U64(v) => cursor.put_u64(*v),
            FieldValue::Hash160(h) => cursor.put_slice(h),
            FieldValue::Hash256(h) => cursor.put_slice(h),
            FieldValue::VariableLength(data) => cursor.put_vl(data)?,
            FieldValue::Account(account) => cursor.put_vl(&account.0)?,
            FieldValue::Amount(amount) => cursor.put_u64(amount.0),
            FieldValue::TaggedList(items) => {
                if items.len() > u8::MAX as usize {
                    return Err(RecordError::MalformedRecord(format!(
                        "tagged list of {} items exceeds the 255 item limit",
                        items.len()
                    ))
                    .into());
                }
                cursor.put_u8(items.len() as u8);
                for item in items {
                    cursor.put_u8(item.tag);
                    cursor.put_vl(&item.data)?;
                }
            }
        }
        Ok(())
    }

    /// Decodes exactly one value of the given type from the cursor.
    pub fn decode(cursor: &mut ReadCursor<'_>, tag: TypeTag) -> Result<FieldValue> {
        Ok(match tag {
            TypeTag::NotPresent => {
                return Err(RecordError::MalformedRecord(
                    "cannot decode a NotPresent field".to_string(),
                )
                .into())
            }
            TypeTag::U8 => FieldValue::U8(cursor.get_u8()?),
            TypeTag::U16 => FieldValue::U16(cursor.get_u16()?),
            TypeTag::U32 => FieldValue::U32(cursor.get_u32()?),
            TypeTag::U64 => FieldValue::U64(cursor.get_u64()?),
            TypeTag::Hash160 => {
                let bytes: [u8; 20] = cursor.get_slice(20)?.try_into().unwrap();
                FieldValue::Hash160(bytes)
            }
            TypeTag::Hash256 => {
                let bytes: [u8; 32] = cursor.get_slice(32)?.try_into().unwrap();
                FieldValue::Hash256(bytes)
            }
            TypeTag::VariableLength => FieldValue::VariableLength(cursor.get_vl()?.to_vec()),
            TypeTag::Account => {
                let payload = cursor.get_vl()?;
                let bytes: [u8; 20] = payload.try_into().map_err(|_| {
                    RecordError::MalformedRecord(format!(
                        "account payload is {} bytes, expected 20",
                        payload.len()
                    ))
                })?;
                FieldValue::Account(AccountId(bytes))
            }
            TypeTag::Amount => FieldValue::Amount(Amount(cursor.get_u64()?)),
            TypeTag::TaggedList => {
                let count = cursor.get_u8()?;
                let mut items = Vec::with_capacity(count as usize);
                for _ in 0..count {
                    let tag = cursor.get_u8()?;
                    let data = cursor.get_vl()?.to_vec();
                    items.push(TaggedItem { tag, data });
                }
                FieldValue::TaggedList(items)
            }
        })
    }

    /// JSON projection of this value alone; the record layer supplies the key.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FieldValue::U8(v) => serde_json::Value::from(*v),
            FieldValue::U16(v) => serde_json::Value::from(*v),
            FieldValue::U32(v) => serde_json::Value::from(*v),
            FieldValue::U64(v) => serde_json::Value::from(format!("{:016x}", v)),
            FieldValue::Hash160(h) => serde_json::Value::from(hex(h)),
            FieldValue::Hash256(h) => serde_json::Value::from(hex(h)),
            FieldValue::VariableLength(data) => serde_json::Value::from(hex(data)),
            FieldValue::Account(account) => serde_json::Value::from(hex(&account.0)),
            FieldValue::Amount(amount) => serde_json::Value::from(amount.0.to_string()),
            FieldValue::TaggedList(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(|item| {
                        let mut map = serde_json::Map::new();
                        map.insert("tag".to_string(), serde_json::Value::from(item.tag));
                        map.insert("data".to_string(), serde_json::Value::from(hex(&item.data)));
                        serde_json::Value::Object(map)
                    })
                    .collect(),
            ),
        }
    }

    /// Human-readable form for diagnostics. Never used for hashing or wire
    /// compatibility.
    pub fn text(&self) -> String {
        match self {
            FieldValue::U8(v) => v.to_string(),
            FieldValue::U16(v) => v.to_string(),
            FieldValue::U32(v) => v.to_string(),
            FieldValue::U64(v) => format!("{:016x}", v),
            FieldValue::Hash160(h) => hex(h),
            FieldValue::Hash256(h) => hex(h),
            FieldValue::VariableLength(data) => hex(data),
            FieldValue::Account(account) => hex(&account.0),
            FieldValue::Amount(amount) => amount.0.to_string(),
            FieldValue::TaggedList(items) => {
                let body: Vec<String> = items
                    .iter()
                    .map(|item| format!("{}:{}", item.tag, hex(&item.data)))
                    .collect();
                format!("[{}]", body.join(", "))
            }
        }
    }
}

fn hex(bytes: &[u8]) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{:02x}", b);
    }
    out
}
