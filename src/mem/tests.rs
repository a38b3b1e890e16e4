use crate::mem::{CellOverride, DataType, MemoryMap, RelationKind};
use std::str::FromStr;

#[test]
fn data_type_tags_round_trip() {
    for dt in [
        DataType::HexByte,
        DataType::DecimalByte,
        DataType::BinaryByte,
        DataType::CharByte,
        DataType::Word,
        DataType::WordSwapped,
        DataType::Tribyte,
        DataType::Long,
        DataType::Address,
        DataType::StackWord,
        DataType::Text,
        DataType::TextZero,
        DataType::TextHighBit,
        DataType::TextShifted,
        DataType::TextScreenCode,
    ]
    .iter()
    {
        assert_eq!(DataType::from_str(&dt.to_string()), Ok(*dt));
    }

    assert!(DataType::from_str("Q").is_err());
    assert!(DataType::from_str("BB").is_err());
}

#[test]
fn load_snapshots_bytes_and_marks_range() {
    let mut map = MemoryMap::new();
    map.load(&[0xA9, 0x05, 0x60], 0xC000);

    assert_eq!(map.cell(0xC000).address, 0xC000);
    assert_eq!(map.cell(0xC000).snapshot_byte, 0xA9);
    assert_eq!(map.cell(0xC002).snapshot_byte, 0x60);
    assert!(map.cell(0xC002).is_inside);
    assert!(!map.cell(0xC003).is_inside);
}

#[test]
fn user_label_wins_over_decoded() {
    let mut map = MemoryMap::new();
    map.load(&[0u8; 16], 0xC000);

    map.cell_mut(0xC000).decoded_label = Some("WC000".to_string());
    assert_eq!(map.address_text(0xC000, false), "WC000");

    map.cell_mut(0xC000).user_label = Some("FOO".to_string());
    assert_eq!(map.address_text(0xC000, false), "FOO");
}

#[test]
fn label_created_only_inside_image() {
    let mut map = MemoryMap::new();
    map.load(&[0u8; 4], 0xC000);

    assert_eq!(map.address_text(0xC002, true), "WC002");
    assert_eq!(map.cell(0xC002).label(), Some("WC002"));

    // outside the image: literal hex, no label side effect
    assert_eq!(map.address_text(0x1234, true), "$1234");
    assert!(map.cell(0x1234).label().is_none());
}

#[test]
fn garbage_suppresses_label_creation() {
    let mut map = MemoryMap::new();
    map.load(&[0u8; 4], 0xC000);
    map.cell_mut(0xC001).is_garbage = true;

    assert_eq!(map.address_text(0xC001, true), "$C001");
    assert!(map.cell(0xC001).label().is_none());
}

#[test]
fn offset_relation_renders_against_anchor() {
    let mut map = MemoryMap::new();
    map.load(&[0u8; 32], 0xC000);

    {
        let cell = map.cell_mut(0xC005);
        cell.related = 0xC000;
        cell.relation_kind = RelationKind::PlusOffset;
    }

    assert_eq!(map.address_text(0xC005, true), "WC000+5");
    // the label side effect lands on the anchor, not the entry
    assert_eq!(map.cell(0xC000).label(), Some("WC000"));
    assert!(map.cell(0xC005).label().is_none());

    {
        let cell = map.cell_mut(0xC00A);
        cell.related = 0xC010;
        cell.relation_kind = RelationKind::MinusOffset;
    }

    assert_eq!(map.address_text(0xC00A, false), "$C010-6");
}

#[test]
fn pointer_half_relations_render_lo_hi() {
    let mut map = MemoryMap::new();
    map.load(&[0u8; 16], 0xC000);
    map.cell_mut(0xC000).user_label = Some("PLAY".to_string());

    {
        let cell = map.cell_mut(0xC008);
        cell.related = 0xC000;
        cell.relation_kind = RelationKind::LowByteOf;
    }

    assert_eq!(map.address_text(0xC008, false), "<PLAY");
    assert_eq!(map.immediate_text(0xC008, 0x00, false), "<PLAY");

    {
        let cell = map.cell_mut(0xC009);
        cell.related = 0xC000;
        cell.relation_kind = RelationKind::HighByteOf;
    }

    assert_eq!(map.immediate_text(0xC009, 0xC0, false), ">PLAY");
}

#[test]
fn plain_immediate_is_literal() {
    let mut map = MemoryMap::new();
    map.load(&[0u8; 4], 0xC000);

    assert_eq!(map.immediate_text(0xC001, 0x05, true), "$05");
}

#[test]
fn zero_page_literal_keeps_two_digits() {
    let mut map = MemoryMap::new();

    assert_eq!(map.zero_page_text(0xFB, false), "$FB");
}

#[test]
fn overrides_apply_sparsely() {
    let mut map = MemoryMap::new();
    map.load(&[0u8; 8], 0x1000);

    let ovs = vec![
        CellOverride {
            address: 0x1000,
            user_label: Some("ENTRY".to_string()),
            is_code: Some(true),
            ..Default::default()
        },
        CellOverride {
            address: 0x1004,
            is_data: Some(true),
            data_type: Some(DataType::Word),
            ..Default::default()
        },
    ];

    map.apply_overrides(&ovs);

    assert_eq!(map.cell(0x1000).label(), Some("ENTRY"));
    assert!(map.cell(0x1000).is_code);
    assert!(map.cell(0x1004).is_data);
    assert_eq!(map.cell(0x1004).data_type, DataType::Word);
}

#[test]
fn state_file_round_trips_through_json() {
    let ov = CellOverride {
        address: 0xC000,
        user_label: Some("INIT".to_string()),
        relation_kind: Some(RelationKind::LowByteOf),
        related: Some(0xC0DE),
        ..Default::default()
    };

    let text = serde_json::to_string(&vec![ov]).unwrap();
    let back: Vec<CellOverride> = serde_json::from_str(&text).unwrap();

    assert_eq!(back.len(), 1);
    assert_eq!(back[0].address, 0xC000);
    assert_eq!(back[0].user_label.as_deref(), Some("INIT"));
    assert_eq!(back[0].relation_kind, Some(RelationKind::LowByteOf));
}
