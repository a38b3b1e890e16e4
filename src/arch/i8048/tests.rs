//! MCS-48 decoder test suite

use crate::arch::i8048::tables::OPCODES;
use crate::arch::i8048::I8048;
use crate::arch::{Cpu, DecodeOptions, Flow};
use crate::mem::MemoryMap;

fn decoder() -> I8048 {
    I8048::new(DecodeOptions::default())
}

macro_rules! assert_8048 {
    ($data: expr, $text: expr) => {{
        let mut cpu = decoder();
        let mut map = MemoryMap::new();
        let d = cpu.decode(&$data, 0, 0x0100, &mut map);
        assert_eq!(d.text, $text);
        assert_eq!(d.length, $data.len());
    }};
}

#[test]
fn register_and_accumulator_ops() {
    assert_8048!([0x00], "nop");
    assert_8048!([0x17], "inc a");
    assert_8048!([0x1B], "inc r3");
    assert_8048!([0x27], "clr a");
    assert_8048!([0x2C], "xch a,r4");
    assert_8048!([0x47], "swap a");
    assert_8048!([0x57], "da a");
    assert_8048!([0x60], "add a,@r0");
    assert_8048!([0x6F], "add a,r7");
    assert_8048!([0x97], "clr c");
    assert_8048!([0xA3], "movp a,@a");
    assert_8048!([0xC7], "mov a,psw");
    assert_8048!([0xE7], "rl a");
    assert_8048!([0xF8], "mov a,r0");
}

#[test]
fn immediates() {
    assert_8048!([0x03, 0x12], "add a,#$12");
    assert_8048!([0x23, 0xFF], "mov a,#$FF");
    assert_8048!([0xB0, 0x55], "mov @r0,#$55");
    assert_8048!([0xB8, 0x07], "mov r0,#$07");
    assert_8048!([0x89, 0x80], "orl p1,#$80");
}

#[test]
fn eleven_bit_jump_takes_page_bits_from_opcode() {
    let mut cpu = decoder();
    let mut map = MemoryMap::new();

    // page 0
    let d = cpu.decode(&[0x04, 0x34], 0, 0x0100, &mut map);
    assert_eq!(d.text, "jmp $0034");
    assert_eq!(d.flow, Flow::Branching(false));

    // page 3
    let d = cpu.decode(&[0x64, 0x34], 0, 0x0100, &mut map);
    assert_eq!(d.text, "jmp $0334");

    // page 7
    let d = cpu.decode(&[0xE4, 0xFF], 0, 0x0100, &mut map);
    assert_eq!(d.text, "jmp $07FF");

    let d = cpu.decode(&[0xD4, 0x10], 0, 0x0100, &mut map);
    assert_eq!(d.text, "call $0610");
    assert_eq!(d.flow, Flow::Normal);
}

#[test]
fn conditional_jumps_stay_in_the_next_instruction_page() {
    let mut cpu = decoder();
    let mut map = MemoryMap::new();

    let d = cpu.decode(&[0xC6, 0x20], 0, 0x0150, &mut map);
    assert_eq!(d.text, "jz $0120");
    assert_eq!(d.flow, Flow::Branching(true));

    // the decrement-and-jump family behaves the same way
    let d = cpu.decode(&[0xE8, 0x80], 0, 0x02FE, &mut map);
    assert_eq!(d.text, "djnz r0,$0380");

    let d = cpu.decode(&[0x96, 0x00], 0, 0x07F0, &mut map);
    assert_eq!(d.text, "jnz $0700");
}

#[test]
fn returns_and_dynamic_jump() {
    let mut cpu = decoder();
    let mut map = MemoryMap::new();

    let d = cpu.decode(&[0x83], 0, 0x0100, &mut map);
    assert_eq!(d.text, "ret");
    assert_eq!(d.flow, Flow::Returning);

    let d = cpu.decode(&[0x93], 0, 0x0100, &mut map);
    assert_eq!(d.text, "retr");
    assert_eq!(d.flow, Flow::Returning);

    let d = cpu.decode(&[0xB3], 0, 0x0100, &mut map);
    assert_eq!(d.text, "jmpp @a");
    assert_eq!(d.flow, Flow::Branching(false));
}

#[test]
fn holes_classify_as_illegal() {
    let mut cpu = decoder();
    let mut map = MemoryMap::new();

    let d = cpu.decode(&[0xC0], 0, 0x0100, &mut map);
    assert_eq!(d.text, "ill");
    assert_eq!(cpu.last_comment().as_deref(), Some("Illegal instruction"));
    assert_eq!(cpu.last_kind(), crate::arch::i8048::Kind::Illegal);

    cpu.decode(&[0x00], 0, 0x0100, &mut map);
    assert_eq!(cpu.last_comment(), None);
}

#[test]
fn truncated_operand_renders_placeholder() {
    let mut cpu = decoder();
    let mut map = MemoryMap::new();

    let d = cpu.decode(&[0x23], 0, 0x0100, &mut map);
    assert_eq!(d.text, "mov a,#??");
    assert_eq!(d.next_pos, 2);

    let d = cpu.decode(&[0x04], 0, 0x0100, &mut map);
    assert_eq!(d.text, "jmp ??");
}

#[test]
fn length_consistency_over_full_table() {
    let mut buf = [0u8; 2];

    for byte in 0..=255u8 {
        buf[0] = byte;

        let mut cpu = decoder();
        let mut map = MemoryMap::new();
        let d = cpu.decode(&buf, 0, 0x0200, &mut map);

        let len = OPCODES[byte as usize].len as usize;
        assert_eq!(d.length, len, "opcode {:02X}", byte);
        assert_eq!(d.next_pos, len, "opcode {:02X}", byte);
        assert_eq!(d.next_pc - 0x0200, len as u32, "opcode {:02X}", byte);
    }
}

#[test]
fn labels_resolve_for_in_image_targets() {
    let mut cpu = decoder();
    let mut map = MemoryMap::new();
    map.load(&[0u8; 0x800], 0x0000);

    let d = cpu.decode(&[0x04, 0x34], 0, 0x0100, &mut map);
    assert_eq!(d.text, "jmp W0034");
    assert_eq!(map.cell(0x0034).label(), Some("W0034"));
}
