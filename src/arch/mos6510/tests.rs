//! 6502/6510 decoder test suite

use crate::arch::mos6510::tables::OPCODES;
use crate::arch::mos6510::Mos6510;
use crate::arch::{Cpu, DecodeOptions};
use crate::mem::MemoryMap;

fn decoder() -> Mos6510 {
    Mos6510::new(DecodeOptions::default())
}

macro_rules! assert_6510 {
    ($data: expr, $text: expr) => {{
        let mut cpu = decoder();
        let mut map = MemoryMap::new();
        let d = cpu.decode(&$data, 0, 0x1000, &mut map);
        assert_eq!(d.text, $text);
        assert_eq!(d.length, $data.len());
    }};
}

#[test]
fn implied_and_accumulator() {
    assert_6510!([0xEA], "nop");
    assert_6510!([0x00], "brk");
    assert_6510!([0x0A], "asl a");
    assert_6510!([0x60], "rts");
    assert_6510!([0x40], "rti");
}

#[test]
fn immediate_and_zero_page() {
    assert_6510!([0xA9, 0x05], "lda #$05");
    assert_6510!([0xA2, 0xFF], "ldx #$FF");
    assert_6510!([0x65, 0xFB], "adc $FB");
    assert_6510!([0xB5, 0x10], "lda $10,x");
    assert_6510!([0xB6, 0x10], "ldx $10,y");
}

#[test]
fn indexed_and_indirect() {
    assert_6510!([0xA1, 0x20], "lda ($20,x)");
    assert_6510!([0xB1, 0x20], "lda ($20),y");
    assert_6510!([0x6C, 0x00, 0x30], "jmp ($3000)");
}

#[test]
fn absolute_outside_image_stays_literal() {
    assert_6510!([0xAD, 0x00, 0xD4], "lda $D400");
    assert_6510!([0xBD, 0x00, 0xD4], "lda $D400,x");
    assert_6510!([0xB9, 0x00, 0xD4], "lda $D400,y");
}

#[test]
fn branch_target_resolves_from_post_fetch_pc() {
    let mut cpu = decoder();
    let mut map = MemoryMap::new();

    // beq +2 from $1000: target $1004
    let d = cpu.decode(&[0xF0, 0x02], 0, 0x1000, &mut map);
    assert_eq!(d.text, "beq $1004");

    // bne -2 lands back on the branch itself
    let d = cpu.decode(&[0xD0, 0xFE], 0, 0x1000, &mut map);
    assert_eq!(d.text, "bne $1000");
}

#[test]
fn branch_overflow_renders_sentinel() {
    let mut cpu = decoder();
    let mut map = MemoryMap::new();

    let d = cpu.decode(&[0xF0, 0x7F], 0, 0xFFFE, &mut map);
    assert_eq!(d.text, "beq $????");

    let d = cpu.decode(&[0xF0, 0x80], 0, 0x0000, &mut map);
    assert_eq!(d.text, "beq $????");
}

#[test]
fn truncated_operands_render_placeholders() {
    // every multi-byte opcode decoded as the very last byte of the
    // buffer must produce placeholder text, never panic
    for (byte, op) in OPCODES.iter().enumerate() {
        if op.len == 1 {
            continue;
        }

        let mut cpu = decoder();
        let mut map = MemoryMap::new();
        let d = cpu.decode(&[byte as u8], 0, 0x1000, &mut map);

        assert!(
            d.text.contains("??"),
            "opcode {:02X} rendered {:?} without placeholder",
            byte,
            d.text
        );
        assert_eq!(d.next_pos, op.len as usize);
    }
}

#[test]
fn length_consistency_over_full_table() {
    let mut buf = [0u8; 3];

    for byte in 0..=255u8 {
        buf[0] = byte;

        let mut cpu = decoder();
        let mut map = MemoryMap::new();
        let d = cpu.decode(&buf, 0, 0x4000, &mut map);

        let len = OPCODES[byte as usize].len as usize;
        assert_eq!(d.length, len, "opcode {:02X}", byte);
        assert_eq!(d.next_pos, len, "opcode {:02X}", byte);
        assert_eq!(d.next_pc - 0x4000, len as u32, "opcode {:02X}", byte);
    }
}

#[test]
fn decode_is_deterministic() {
    let buf = [0xAD, 0x34, 0x12, 0x4C, 0x00, 0x10];

    let render = || {
        let mut cpu = decoder();
        let mut map = MemoryMap::new();
        map.load(&[0u8; 0x100], 0x1000);

        let a = cpu.decode(&buf, 0, 0x1000, &mut map);
        let b = cpu.decode(&buf, 3, 0x1003, &mut map);
        (a.text, a.next_pc, b.text, b.next_pc)
    };

    assert_eq!(render(), render());
}

#[test]
fn label_created_for_in_image_target() {
    let mut cpu = decoder();
    let mut map = MemoryMap::new();

    // image spans $C000..$C004
    map.load(&[0xA9, 0x05, 0x4C, 0x00, 0xC0], 0xC000);

    let buf = [0x00, 0xC0, 0xA9, 0x05, 0x4C, 0x00, 0xC0];

    let d = cpu.decode(&buf, 2, 0xC000, &mut map);
    assert!(d.text.ends_with("#$05"));
    assert_eq!(d.next_pc, 0xC002);

    let d = cpu.decode(&buf, 4, 0xC002, &mut map);
    assert!(d.text.contains("WC000"), "got {:?}", d.text);
    assert_eq!(map.cell(0xC000).label(), Some("WC000"));
}

#[test]
fn user_label_round_trip() {
    let mut cpu = decoder();
    let mut map = MemoryMap::new();
    map.load(&[0u8; 0x10], 0xC000);

    map.cell_mut(0xC000).user_label = Some("FOO".to_string());
    map.cell_mut(0xC000).decoded_label = Some("WC000".to_string());

    let d = cpu.decode(&[0x4C, 0x00, 0xC0], 0, 0xC000, &mut map);
    assert_eq!(d.text, "jmp FOO");
}

#[test]
fn resolved_operand_values_are_reported() {
    let mut cpu = decoder();
    let mut map = MemoryMap::new();

    let d = cpu.decode(&[0xA9, 0x05], 0, 0x1000, &mut map);
    assert_eq!(d.value, Some(0x05));
    assert_eq!(d.addr, None);
    assert_eq!(cpu.last_mode(), crate::arch::mos6510::Mode::Immediate);

    let d = cpu.decode(&[0xAD, 0x00, 0xD4], 0, 0x1000, &mut map);
    assert_eq!(d.addr, Some(0xD400));
    assert_eq!(d.value, None);
}

#[test]
fn undocumented_classification() {
    let mut cpu = decoder();
    let mut map = MemoryMap::new();

    cpu.decode(&[0xA7, 0x10], 0, 0x1000, &mut map);
    assert_eq!(cpu.last_comment().as_deref(), Some("Undocument command"));
    assert_eq!(cpu.last_kind(), crate::arch::mos6510::Kind::Undoc);

    cpu.decode(&[0x02], 0, 0x1000, &mut map);
    assert_eq!(cpu.last_comment().as_deref(), Some("Illegal instruction"));

    cpu.decode(&[0x8B, 0x10], 0, 0x1000, &mut map);
    assert_eq!(cpu.last_comment().as_deref(), Some("Unusual operation"));

    cpu.decode(&[0xEA], 0, 0x1000, &mut map);
    assert_eq!(cpu.last_comment(), None);
}

#[test]
fn upper_case_flag() {
    let mut cpu = Mos6510::new(DecodeOptions {
        upper_case: true,
        create_labels: true,
    });
    let mut map = MemoryMap::new();

    let d = cpu.decode(&[0xB5, 0x10], 0, 0x1000, &mut map);
    assert_eq!(d.text, "LDA $10,X");
}
