//! Tests for field values and the byte cursors

use super::*;
use crate::encoding::cursor::{ReadCursor, WriteCursor};
use crate::error::RecordError;

#[test]
fn write_cursor_packs_integers_big_endian() {
    let mut cursor = WriteCursor::new();
    cursor.put_u8(0xAB);
    cursor.put_u16(0x1234);
    cursor.put_u32(0xDEAD_BEEF);
    cursor.put_u64(0x0102_0304_0506_0708);

    assert_eq!(
        cursor.as_bytes(),
        &[
            0xAB, 0x12, 0x34, 0xDE, 0xAD, 0xBE, 0xEF, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07,
            0x08
        ]
    );
}

#[test]
fn read_cursor_reads_back_what_was_written() {
    let mut cursor = WriteCursor::new();
    cursor.put_u16(40000);
    cursor.put_u64(u64::MAX);
    let bytes = cursor.into_bytes();

    let mut reader = ReadCursor::new(&bytes);
    assert_eq!(reader.get_u16().unwrap(), 40000);
    assert_eq!(reader.get_u64().unwrap(), u64::MAX);
    assert!(reader.is_empty());
}

#[test]
fn read_cursor_fails_on_exhausted_input() {
    let bytes = [0x00, 0x01];
    let mut reader = ReadCursor::new(&bytes);

    let err = reader.get_u32().unwrap_err();
    assert!(err.to_string().contains("end of input"));
    assert!(matches!(
        err.downcast_ref::<RecordError>(),
        Some(RecordError::MalformedRecord(_))
    ));
    // The failed read must not consume anything.
    assert_eq!(reader.remaining(), 2);
}

#[test]
fn vl_prefix_single_byte_boundary() {
    let payload = vec![0x55u8; 192];
    let mut cursor = WriteCursor::new();
    cursor.put_vl(&payload).unwrap();
    assert_eq!(cursor.len(), 1 + 192);
    assert_eq!(cursor.as_bytes()[0], 192);

    let bytes = cursor.into_bytes();
    let mut reader = ReadCursor::new(&bytes);
    assert_eq!(reader.get_vl().unwrap(), payload.as_slice());
}

#[test]
fn vl_prefix_two_byte_boundaries() {
    for len in [193usize, 12480] {
        let payload = vec![0xA1u8; len];
        let mut cursor = WriteCursor::new();
        cursor.put_vl(&payload).unwrap();
        assert_eq!(cursor.len(), 2 + len);

        let bytes = cursor.into_bytes();
        let mut reader = ReadCursor::new(&bytes);
        assert_eq!(reader.get_vl().unwrap(), payload.as_slice());
        assert!(reader.is_empty());
    }
}

#[test]
fn vl_prefix_three_byte_boundary() {
    let payload = vec![0x07u8; 12481];
    let mut cursor = WriteCursor::new();
    cursor.put_vl(&payload).unwrap();
    assert_eq!(cursor.len(), 3 + 12481);

    let bytes = cursor.into_bytes();
    let mut reader = ReadCursor::new(&bytes);
    assert_eq!(reader.get_vl().unwrap(), payload.as_slice());
}

#[test]
fn vl_prefix_rejects_oversized_payload() {
    let payload = vec![0u8; crate::encoding::MAX_VL_LEN + 1];
    let mut cursor = WriteCursor::new();
    let err = cursor.put_vl(&payload).unwrap_err();
    assert!(err.to_string().contains("limit"));
}

#[test]
fn vl_prefix_decode_enforces_the_length_limit() {
    // 254, 255, 255 describes 929984 bytes, above the encodable maximum;
    // the prefix alone must be rejected, whatever payload follows.
    let bytes = [0xFEu8, 0xFF, 0xFF];
    let mut reader = ReadCursor::new(&bytes);
    let err = reader.get_vl().unwrap_err();
    assert!(err.to_string().contains("limit"));
    assert!(matches!(
        err.downcast_ref::<RecordError>(),
        Some(RecordError::MalformedRecord(_))
    ));

    // The maximum itself still round trips.
    let payload = vec![0x3Cu8; crate::encoding::MAX_VL_LEN];
    let mut cursor = WriteCursor::new();
    cursor.put_vl(&payload).unwrap();
    let bytes = cursor.into_bytes();
    let mut reader = ReadCursor::new(&bytes);
    assert_eq!(reader.get_vl().unwrap(), payload.as_slice());
    assert!(reader.is_empty());
}

#[test]
fn vl_prefix_rejects_invalid_marker() {
    let bytes = [0xFFu8, 0x00, 0x00];
    let mut reader = ReadCursor::new(&bytes);
    let err = reader.get_vl().unwrap_err();
    assert!(err.to_string().contains("prefix"));
}

#[test]
fn vl_prefix_rejects_truncated_payload() {
    // Prefix promises 10 bytes, only 3 follow.
    let bytes = [10u8, 0x01, 0x02, 0x03];
    let mut reader = ReadCursor::new(&bytes);
    assert!(reader.get_vl().is_err());
}

#[test]
fn fixed_width_values_encode_exact_bytes() {
    let cases: Vec<(FieldValue, Vec<u8>)> = vec![
        (FieldValue::U8(0x7F), vec![0x7F]),
        (FieldValue::U16(0x0102), vec![0x01, 0x02]),
        (FieldValue::U32(0x01020304), vec![0x01, 0x02, 0x03, 0x04]),
        (
            FieldValue::U64(0x0102030405060708),
            vec![0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08],
        ),
        (
            FieldValue::Amount(Amount(512)),
            vec![0, 0, 0, 0, 0, 0, 0x02, 0x00],
        ),
    ];

    for (value, expected) in cases {
        let mut cursor = WriteCursor::new();
        value.encode_into(&mut cursor).unwrap();
        assert_eq!(cursor.as_bytes(), expected.as_slice(), "{:?}", value);
    }
}

#[test]
fn hash_values_encode_raw_bytes() {
    let h160 = [0x11u8; 20];
    let h256 = [0x22u8; 32];

    let mut cursor = WriteCursor::new();
    FieldValue::Hash160(h160).encode_into(&mut cursor).unwrap();
    FieldValue::Hash256(h256).encode_into(&mut cursor).unwrap();
    assert_eq!(cursor.len(), 52);
    assert_eq!(&cursor.as_bytes()[..20], &h160);
    assert_eq!(&cursor.as_bytes()[20..], &h256);
}

#[test]
fn account_encodes_as_prefixed_twenty_bytes() {
    let account = AccountId([0xCD; 20]);
    let mut cursor = WriteCursor::new();
    FieldValue::Account(account)
        .encode_into(&mut cursor)
        .unwrap();

    assert_eq!(cursor.len(), 21);
    assert_eq!(cursor.as_bytes()[0], 20);

    let bytes = cursor.into_bytes();
    let mut reader = ReadCursor::new(&bytes);
    let decoded = FieldValue::decode(&mut reader, TypeTag::Account).unwrap();
    assert_eq!(decoded, FieldValue::Account(account));
}

#[test]
fn account_decode_rejects_wrong_payload_length() {
    // VL run of 19 bytes where an account is expected.
    let mut cursor = WriteCursor::new();
    cursor.put_vl(&[0xAA; 19]).unwrap();
    let bytes = cursor.into_bytes();

    let mut reader = ReadCursor::new(&bytes);
    let err = FieldValue::decode(&mut reader, TypeTag::Account).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<RecordError>(),
        Some(RecordError::MalformedRecord(_))
    ));
    assert!(err.to_string().contains("expected 20"));
}

#[test]
fn tagged_list_round_trips() {
    let items = vec![
        TaggedItem::new(1, vec![0xAA, 0xBB]),
        TaggedItem::new(2, Vec::new()),
        TaggedItem::new(255, vec![0x01; 300]),
    ];
    let value = FieldValue::TaggedList(items.clone());

    let mut cursor = WriteCursor::new();
    value.encode_into(&mut cursor).unwrap();
    assert_eq!(cursor.as_bytes()[0], 3);

    let bytes = cursor.into_bytes();
    let mut reader = ReadCursor::new(&bytes);
    let decoded = FieldValue::decode(&mut reader, TypeTag::TaggedList).unwrap();
    assert_eq!(decoded, FieldValue::TaggedList(items));
    assert!(reader.is_empty());
}

#[test]
fn tagged_list_rejects_more_than_255_items() {
    let items = vec![TaggedItem::new(0, Vec::new()); 256];
    let mut cursor = WriteCursor::new();
    let err = FieldValue::TaggedList(items)
        .encode_into(&mut cursor)
        .unwrap_err();
    assert!(err.to_string().contains("255"));
}

#[test]
fn decode_rejects_not_present_tag() {
    let bytes = [0u8; 8];
    let mut reader = ReadCursor::new(&bytes);
    assert!(FieldValue::decode(&mut reader, TypeTag::NotPresent).is_err());
}

#[test]
fn default_for_yields_zero_and_empty_values() {
    assert_eq!(
        FieldValue::default_for(TypeTag::U32).unwrap(),
        FieldValue::U32(0)
    );
    assert_eq!(
        FieldValue::default_for(TypeTag::Hash256).unwrap(),
        FieldValue::Hash256([0; 32])
    );
    assert_eq!(
        FieldValue::default_for(TypeTag::VariableLength).unwrap(),
        FieldValue::VariableLength(Vec::new())
    );
    assert_eq!(
        FieldValue::default_for(TypeTag::TaggedList).unwrap(),
        FieldValue::TaggedList(Vec::new())
    );
    assert!(FieldValue::default_for(TypeTag::NotPresent).is_err());
}

#[test]
fn json_projection_uses_numbers_for_small_integers() {
    assert_eq!(FieldValue::U8(7).to_json(), serde_json::json!(7));
    assert_eq!(FieldValue::U16(300).to_json(), serde_json::json!(300));
    assert_eq!(FieldValue::U32(70000).to_json(), serde_json::json!(70000));
}

#[test]
fn json_projection_uses_hex_strings_for_wide_values() {
    assert_eq!(
        FieldValue::U64(255).to_json(),
        serde_json::json!("00000000000000ff")
    );
    assert_eq!(
        FieldValue::Hash160([0xAB; 20]).to_json(),
        serde_json::json!("ab".repeat(20))
    );
    assert_eq!(
        FieldValue::VariableLength(vec![0xDE, 0xAD]).to_json(),
        serde_json::json!("dead")
    );
}

#[test]
fn json_projection_renders_amounts_as_decimal_strings() {
    assert_eq!(
        FieldValue::Amount(Amount(123456789)).to_json(),
        serde_json::json!("123456789")
    );
}

#[test]
fn json_projection_renders_tagged_lists_as_arrays() {
    let value = FieldValue::TaggedList(vec![TaggedItem::new(3, vec![0x01, 0x02])]);
    assert_eq!(
        value.to_json(),
        serde_json::json!([{"tag": 3, "data": "0102"}])
    );
}

#[test]
fn clone_deep_copies_owned_payloads() {
    let original = FieldValue::VariableLength(vec![1, 2, 3]);
    let mut copy = original.clone();
    if let FieldValue::VariableLength(data) = &mut copy {
        data.push(4);
    }
    assert_eq!(original, FieldValue::VariableLength(vec![1, 2, 3]));
}

#[test]
fn field_id_names_are_stable_labels() {
    assert_eq!(FieldId::Destination.name(), "Destination");
    assert_eq!(FieldId::WalletLocator.name(), "WalletLocator");
    assert_eq!(FieldId::Flags.to_string(), "Flags");
}
