//! Z80 decoder test suite

use crate::arch::z80::Z80;
use crate::arch::{Cpu, DecodeOptions, Flow};
use crate::mem::MemoryMap;

fn decoder() -> Z80 {
    Z80::new(DecodeOptions::default())
}

macro_rules! assert_z80 {
    ($data: expr, $text: expr) => {{
        let mut cpu = decoder();
        let mut map = MemoryMap::new();
        let d = cpu.decode(&$data, 0, 0x8000, &mut map);
        assert_eq!(d.text, $text);
        assert_eq!(d.length, $data.len());
        assert_eq!(d.next_pos, $data.len());
    }};
}

#[test]
fn unprefixed_basics() {
    assert_z80!([0x00], "nop");
    assert_z80!([0x08], "ex af,af'");
    assert_z80!([0x01, 0x34, 0x12], "ld bc,$1234");
    assert_z80!([0x31, 0xFF, 0x7F], "ld sp,$7FFF");
    assert_z80!([0x09], "add hl,bc");
    assert_z80!([0x02], "ld (bc),a");
    assert_z80!([0x0A], "ld a,(bc)");
    assert_z80!([0x22, 0x00, 0x90], "ld ($9000),hl");
    assert_z80!([0x32, 0x00, 0x90], "ld ($9000),a");
    assert_z80!([0x3A, 0x00, 0x90], "ld a,($9000)");
    assert_z80!([0x03], "inc bc");
    assert_z80!([0x3B], "dec sp");
    assert_z80!([0x34], "inc (hl)");
    assert_z80!([0x3E, 0x42], "ld a,$42");
    assert_z80!([0x36, 0x42], "ld (hl),$42");
    assert_z80!([0x27], "daa");
    assert_z80!([0x76], "halt");
    assert_z80!([0x41], "ld b,c");
    assert_z80!([0x66], "ld h,(hl)");
    assert_z80!([0x80], "add a,b");
    assert_z80!([0x96], "sub (hl)");
    assert_z80!([0xBF], "cp a");
    assert_z80!([0xC1], "pop bc");
    assert_z80!([0xF5], "push af");
    assert_z80!([0xC9], "ret");
    assert_z80!([0xD8], "ret c");
    assert_z80!([0xE9], "jp (hl)");
    assert_z80!([0xF9], "ld sp,hl");
    assert_z80!([0xD3, 0x7F], "out ($7F),a");
    assert_z80!([0xDB, 0x7F], "in a,($7F)");
    assert_z80!([0xE3], "ex (sp),hl");
    assert_z80!([0xEB], "ex de,hl");
    assert_z80!([0xF3], "di");
    assert_z80!([0xFB], "ei");
    assert_z80!([0xC6, 0x01], "add a,$01");
    assert_z80!([0xFE, 0x20], "cp $20");
    assert_z80!([0xC7], "rst $00");
    assert_z80!([0xFF], "rst $38");
}

#[test]
fn relative_jumps_resolve_from_post_fetch_pc() {
    let mut cpu = decoder();
    let mut map = MemoryMap::new();

    let d = cpu.decode(&[0x18, 0x02], 0, 0x8000, &mut map);
    assert_eq!(d.text, "jr $8004");
    assert_eq!(d.flow, Flow::Branching(false));

    let d = cpu.decode(&[0x20, 0xFE], 0, 0x8000, &mut map);
    assert_eq!(d.text, "jr nz,$8000");
    assert_eq!(d.flow, Flow::Branching(true));

    let d = cpu.decode(&[0x10, 0xFE], 0, 0x8000, &mut map);
    assert_eq!(d.text, "djnz $8000");
}

#[test]
fn jumps_and_calls() {
    let mut cpu = decoder();
    let mut map = MemoryMap::new();

    let d = cpu.decode(&[0xC3, 0x00, 0x90], 0, 0x8000, &mut map);
    assert_eq!(d.text, "jp $9000");
    assert_eq!(d.flow, Flow::Branching(false));

    let d = cpu.decode(&[0xCA, 0x00, 0x90], 0, 0x8000, &mut map);
    assert_eq!(d.text, "jp z,$9000");
    assert_eq!(d.flow, Flow::Branching(true));

    let d = cpu.decode(&[0xCD, 0x00, 0x90], 0, 0x8000, &mut map);
    assert_eq!(d.text, "call $9000");
    assert_eq!(d.flow, Flow::Normal);

    let d = cpu.decode(&[0xDC, 0x00, 0x90], 0, 0x8000, &mut map);
    assert_eq!(d.text, "call c,$9000");
}

#[test]
fn cb_quadrant() {
    assert_z80!([0xCB, 0x00], "rlc b");
    assert_z80!([0xCB, 0x26], "sla (hl)");
    assert_z80!([0xCB, 0x36], "sll (hl)");
    assert_z80!([0xCB, 0x47], "bit 0,a");
    assert_z80!([0xCB, 0x9E], "res 3,(hl)");
    assert_z80!([0xCB, 0xFF], "set 7,a");
}

#[test]
fn ed_quadrant() {
    assert_z80!([0xED, 0x40], "in b,(c)");
    assert_z80!([0xED, 0x70], "in (c)");
    assert_z80!([0xED, 0x41], "out (c),b");
    assert_z80!([0xED, 0x71], "out (c),0");
    assert_z80!([0xED, 0x42], "sbc hl,bc");
    assert_z80!([0xED, 0x4A], "adc hl,bc");
    assert_z80!([0xED, 0x43, 0x00, 0x90], "ld ($9000),bc");
    assert_z80!([0xED, 0x5B, 0x00, 0x90], "ld de,($9000)");
    assert_z80!([0xED, 0x44], "neg");
    assert_z80!([0xED, 0x4D], "reti");
    assert_z80!([0xED, 0x45], "retn");
    assert_z80!([0xED, 0x46], "im 0");
    assert_z80!([0xED, 0x56], "im 1");
    assert_z80!([0xED, 0x5E], "im 2");
    assert_z80!([0xED, 0x47], "ld i,a");
    assert_z80!([0xED, 0x57], "ld a,i");
    assert_z80!([0xED, 0x67], "rrd");
    assert_z80!([0xED, 0xA0], "ldi");
    assert_z80!([0xED, 0xB0], "ldir");
    assert_z80!([0xED, 0xB8], "lddr");
    assert_z80!([0xED, 0xBB], "otdr");
    assert_z80!([0xED, 0x00], "noni");
}

#[test]
fn index_prefixes() {
    assert_z80!([0xDD, 0x21, 0x34, 0x12], "ld ix,$1234");
    assert_z80!([0xFD, 0x21, 0x34, 0x12], "ld iy,$1234");
    assert_z80!([0xDD, 0x09], "add ix,bc");
    assert_z80!([0xDD, 0x29], "add ix,ix");
    assert_z80!([0xDD, 0x22, 0x00, 0x90], "ld ($9000),ix");
    assert_z80!([0xDD, 0xE9], "jp (ix)");
    assert_z80!([0xDD, 0xF9], "ld sp,ix");
    assert_z80!([0xDD, 0xE3], "ex (sp),ix");
    assert_z80!([0xDD, 0x34, 0x05], "inc (ix+$05)");
    assert_z80!([0xDD, 0x35, 0xFB], "dec (ix-$05)");
    assert_z80!([0xDD, 0x36, 0x05, 0x42], "ld (ix+$05),$42");
    assert_z80!([0xDD, 0x7E, 0x0A], "ld a,(ix+$0A)");
    assert_z80!([0xDD, 0x77, 0x0A], "ld (ix+$0A),a");
    assert_z80!([0xDD, 0x86, 0x10], "add a,(ix+$10)");
    assert_z80!([0xFD, 0x96, 0x10], "sub (iy+$10)");
}

#[test]
fn index_half_registers_are_undocumented() {
    let mut cpu = decoder();
    let mut map = MemoryMap::new();

    let d = cpu.decode(&[0xDD, 0x26, 0x12], 0, 0x8000, &mut map);
    assert_eq!(d.text, "ld ixh,$12");
    assert_eq!(d.value, Some(0x12));
    assert_eq!(cpu.last_comment().as_deref(), Some("Undocument command"));
    assert_eq!(cpu.last_kind(), crate::arch::z80::Kind::Undoc);

    let d = cpu.decode(&[0xDD, 0x7C], 0, 0x8000, &mut map);
    assert_eq!(d.text, "ld a,ixh");
    assert_eq!(cpu.last_comment().as_deref(), Some("Undocument command"));

    let d = cpu.decode(&[0xFD, 0x85], 0, 0x8000, &mut map);
    assert_eq!(d.text, "add a,iyl");
}

#[test]
fn wasted_prefix_keeps_plain_rendering() {
    let mut cpu = decoder();
    let mut map = MemoryMap::new();

    let d = cpu.decode(&[0xDD, 0x00], 0, 0x8000, &mut map);
    assert_eq!(d.text, "nop");
    assert_eq!(d.length, 2);
    assert_eq!(cpu.last_comment().as_deref(), Some("Undocument command"));

    let d = cpu.decode(&[0xDD, 0x41], 0, 0x8000, &mut map);
    assert_eq!(d.text, "ld b,c");
    assert_eq!(d.length, 2);
}

#[test]
fn doubled_prefix_quadrant() {
    assert_z80!([0xDD, 0xCB, 0x05, 0x06], "rlc (ix+$05)");
    assert_z80!([0xDD, 0xCB, 0x05, 0x00], "rlc (ix+$05),b");
    assert_z80!([0xDD, 0xCB, 0x10, 0x46], "bit 0,(ix+$10)");
    assert_z80!([0xDD, 0xCB, 0x10, 0x96], "res 2,(ix+$10)");
    assert_z80!([0xFD, 0xCB, 0xFE, 0xC6], "set 0,(iy-$02)");
}

#[test]
fn prefix_before_prefix_is_noni() {
    let mut cpu = decoder();
    let mut map = MemoryMap::new();

    let d = cpu.decode(&[0xDD, 0xDD, 0x21], 0, 0x8000, &mut map);
    assert_eq!(d.text, "noni");
    assert_eq!(d.length, 1);

    let d = cpu.decode(&[0xDD, 0xED, 0x44], 0, 0x8000, &mut map);
    assert_eq!(d.text, "noni");
    assert_eq!(d.length, 1);
}

#[test]
fn truncated_operands_render_placeholders() {
    let mut cpu = decoder();
    let mut map = MemoryMap::new();

    let d = cpu.decode(&[0x21], 0, 0x8000, &mut map);
    assert_eq!(d.text, "ld hl,????");
    assert_eq!(d.length, 3);

    let d = cpu.decode(&[0x3E], 0, 0x8000, &mut map);
    assert_eq!(d.text, "ld a,??");

    let d = cpu.decode(&[0x18], 0, 0x8000, &mut map);
    assert_eq!(d.text, "jr ??");

    let d = cpu.decode(&[0xCB], 0, 0x8000, &mut map);
    assert_eq!(d.text, "noni");
    assert_eq!(d.length, 2);

    let d = cpu.decode(&[0xDD, 0x36, 0x05], 0, 0x8000, &mut map);
    assert_eq!(d.text, "ld (ix+$05),??");
    assert_eq!(d.length, 4);
}

#[test]
fn label_creation_through_jump() {
    let mut cpu = decoder();
    let mut map = MemoryMap::new();
    map.load(&[0u8; 0x100], 0x9000);

    let d = cpu.decode(&[0xC3, 0x20, 0x90], 0, 0x8000, &mut map);
    assert_eq!(d.text, "jp W9020");
    assert_eq!(map.cell(0x9020).label(), Some("W9020"));
}

#[test]
fn upper_case_flag() {
    let mut cpu = Z80::new(DecodeOptions {
        upper_case: true,
        create_labels: false,
    });
    let mut map = MemoryMap::new();

    let d = cpu.decode(&[0xDD, 0x7E, 0x0A], 0, 0x8000, &mut map);
    assert_eq!(d.text, "LD A,(IX+$0A)");

    let d = cpu.decode(&[0x01, 0x34, 0x12], 0, 0x8000, &mut map);
    assert_eq!(d.text, "LD BC,$1234");
}

#[test]
fn length_consistency_over_main_table() {
    use crate::arch::z80::MAIN;

    let buf = [0u8; 4];

    for byte in 0..=255u8 {
        if matches!(byte, 0xCB | 0xED | 0xDD | 0xFD) {
            continue;
        }

        let mut data = buf;
        data[0] = byte;

        let mut cpu = decoder();
        let mut map = MemoryMap::new();
        let d = cpu.decode(&data, 0, 0x4000, &mut map);

        let len = MAIN[byte as usize].len as usize;
        assert_eq!(d.length, len, "opcode {:02X}", byte);
        assert_eq!(d.next_pc - 0x4000, len as u32, "opcode {:02X}", byte);
    }
}
