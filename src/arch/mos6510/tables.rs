//! Opcode tables for the 6502/6510.
//!
//! One entry per opcode byte; mechanical transcription of the NMOS
//! matrix. No computation happens here and every index is defined, so
//! lookups cannot fail.

use crate::arch::mos6510::Kind::{self, Jam, Legal, Undoc, Unusual};
use crate::arch::mos6510::Mode::{self, *};

#[derive(Copy, Clone, Debug)]
pub struct Op {
    pub mnemonic: &'static str,
    pub mode: Mode,
    pub len: u8,
    pub kind: Kind,
}

const fn op(mnemonic: &'static str, mode: Mode, len: u8, kind: Kind) -> Op {
    Op {
        mnemonic,
        mode,
        len,
        kind,
    }
}

pub fn opcode(byte: u8) -> &'static Op {
    &OPCODES[byte as usize]
}

#[rustfmt::skip]
pub static OPCODES: [Op; 256] = [
    // 0x00
    op("brk", Implied,     1, Legal),
    op("ora", IndirectX,   2, Legal),
    op("jam", Implied,     1, Jam),
    op("slo", IndirectX,   2, Undoc),
    op("nop", ZeroPage,    2, Undoc),
    op("ora", ZeroPage,    2, Legal),
    op("asl", ZeroPage,    2, Legal),
    op("slo", ZeroPage,    2, Undoc),
    op("php", Implied,     1, Legal),
    op("ora", Immediate,   2, Legal),
    op("asl", Accumulator, 1, Legal),
    op("anc", Immediate,   2, Undoc),
    op("nop", Absolute,    3, Undoc),
    op("ora", Absolute,    3, Legal),
    op("asl", Absolute,    3, Legal),
    op("slo", Absolute,    3, Undoc),
    // 0x10
    op("bpl", Relative,    2, Legal),
    op("ora", IndirectY,   2, Legal),
    op("jam", Implied,     1, Jam),
    op("slo", IndirectY,   2, Undoc),
    op("nop", ZeroPageX,   2, Undoc),
    op("ora", ZeroPageX,   2, Legal),
    op("asl", ZeroPageX,   2, Legal),
    op("slo", ZeroPageX,   2, Undoc),
    op("clc", Implied,     1, Legal),
    op("ora", AbsoluteY,   3, Legal),
    op("nop", Implied,     1, Undoc),
    op("slo", AbsoluteY,   3, Undoc),
    op("nop", AbsoluteX,   3, Undoc),
    op("ora", AbsoluteX,   3, Legal),
    op("asl", AbsoluteX,   3, Legal),
    op("slo", AbsoluteX,   3, Undoc),
    // 0x20
    op("jsr", Absolute,    3, Legal),
    op("and", IndirectX,   2, Legal),
    op("jam", Implied,     1, Jam),
    op("rla", IndirectX,   2, Undoc),
    op("bit", ZeroPage,    2, Legal),
    op("and", ZeroPage,    2, Legal),
    op("rol", ZeroPage,    2, Legal),
    op("rla", ZeroPage,    2, Undoc),
    op("plp", Implied,     1, Legal),
    op("and", Immediate,   2, Legal),
    op("rol", Accumulator, 1, Legal),
    op("anc", Immediate,   2, Undoc),
    op("bit", Absolute,    3, Legal),
    op("and", Absolute,    3, Legal),
    op("rol", Absolute,    3, Legal),
    op("rla", Absolute,    3, Undoc),
    // 0x30
    op("bmi", Relative,    2, Legal),
    op("and", IndirectY,   2, Legal),
    op("jam", Implied,     1, Jam),
    op("rla", IndirectY,   2, Undoc),
    op("nop", ZeroPageX,   2, Undoc),
    op("and", ZeroPageX,   2, Legal),
    op("rol", ZeroPageX,   2, Legal),
    op("rla", ZeroPageX,   2, Undoc),
    op("sec", Implied,     1, Legal),
    op("and", AbsoluteY,   3, Legal),
    op("nop", Implied,     1, Undoc),
    op("rla", AbsoluteY,   3, Undoc),
    op("nop", AbsoluteX,   3, Undoc),
    op("and", AbsoluteX,   3, Legal),
    op("rol", AbsoluteX,   3, Legal),
    op("rla", AbsoluteX,   3, Undoc),
    // 0x40
    op("rti", Implied,     1, Legal),
    op("eor", IndirectX,   2, Legal),
    op("jam", Implied,     1, Jam),
    op("sre", IndirectX,   2, Undoc),
    op("nop", ZeroPage,    2, Undoc),
    op("eor", ZeroPage,    2, Legal),
    op("lsr", ZeroPage,    2, Legal),
    op("sre", ZeroPage,    2, Undoc),
    op("pha", Implied,     1, Legal),
    op("eor", Immediate,   2, Legal),
    op("lsr", Accumulator, 1, Legal),
    op("alr", Immediate,   2, Undoc),
    op("jmp", Absolute,    3, Legal),
    op("eor", Absolute,    3, Legal),
    op("lsr", Absolute,    3, Legal),
    op("sre", Absolute,    3, Undoc),
    // 0x50
    op("bvc", Relative,    2, Legal),
    op("eor", IndirectY,   2, Legal),
    op("jam", Implied,     1, Jam),
    op("sre", IndirectY,   2, Undoc),
    op("nop", ZeroPageX,   2, Undoc),
    op("eor", ZeroPageX,   2, Legal),
    op("lsr", ZeroPageX,   2, Legal),
    op("sre", ZeroPageX,   2, Undoc),
    op("cli", Implied,     1, Legal),
    op("eor", AbsoluteY,   3, Legal),
    op("nop", Implied,     1, Undoc),
    op("sre", AbsoluteY,   3, Undoc),
    op("nop", AbsoluteX,   3, Undoc),
    op("eor", AbsoluteX,   3, Legal),
    op("lsr", AbsoluteX,   3, Legal),
    op("sre", AbsoluteX,   3, Undoc),
    // 0x60
    op("rts", Implied,     1, Legal),
    op("adc", IndirectX,   2, Legal),
    op("jam", Implied,     1, Jam),
    op("rra", IndirectX,   2, Undoc),
    op("nop", ZeroPage,    2, Undoc),
    op("adc", ZeroPage,    2, Legal),
    op("ror", ZeroPage,    2, Legal),
    op("rra", ZeroPage,    2, Undoc),
    op("pla", Implied,     1, Legal),
    op("adc", Immediate,   2, Legal),
    op("ror", Accumulator, 1, Legal),
    op("arr", Immediate,   2, Undoc),
    op("jmp", Indirect,    3, Legal),
    op("adc", Absolute,    3, Legal),
    op("ror", Absolute,    3, Legal),
    op("rra", Absolute,    3, Undoc),
    // 0x70
    op("bvs", Relative,    2, Legal),
    op("adc", IndirectY,   2, Legal),
    op("jam", Implied,     1, Jam),
    op("rra", IndirectY,   2, Undoc),
    op("nop", ZeroPageX,   2, Undoc),
    op("adc", ZeroPageX,   2, Legal),
    op("ror", ZeroPageX,   2, Legal),
    op("rra", ZeroPageX,   2, Undoc),
    op("sei", Implied,     1, Legal),
    op("adc", AbsoluteY,   3, Legal),
    op("nop", Implied,     1, Undoc),
    op("rra", AbsoluteY,   3, Undoc),
    op("nop", AbsoluteX,   3, Undoc),
    op("adc", AbsoluteX,   3, Legal),
    op("ror", AbsoluteX,   3, Legal),
    op("rra", AbsoluteX,   3, Undoc),
    // 0x80
    op("nop", Immediate,   2, Undoc),
    op("sta", IndirectX,   2, Legal),
    op("nop", Immediate,   2, Undoc),
    op("sax", IndirectX,   2, Undoc),
    op("sty", ZeroPage,    2, Legal),
    op("sta", ZeroPage,    2, Legal),
    op("stx", ZeroPage,    2, Legal),
    op("sax", ZeroPage,    2, Undoc),
    op("dey", Implied,     1, Legal),
    op("nop", Immediate,   2, Undoc),
    op("txa", Implied,     1, Legal),
    op("xaa", Immediate,   2, Unusual),
    op("sty", Absolute,    3, Legal),
    op("sta", Absolute,    3, Legal),
    op("stx", Absolute,    3, Legal),
    op("sax", Absolute,    3, Undoc),
    // 0x90
    op("bcc", Relative,    2, Legal),
    op("sta", IndirectY,   2, Legal),
    op("jam", Implied,     1, Jam),
    op("ahx", IndirectY,   2, Unusual),
    op("sty", ZeroPageX,   2, Legal),
    op("sta", ZeroPageX,   2, Legal),
    op("stx", ZeroPageY,   2, Legal),
    op("sax", ZeroPageY,   2, Undoc),
    op("tya", Implied,     1, Legal),
    op("sta", AbsoluteY,   3, Legal),
    op("txs", Implied,     1, Legal),
    op("tas", AbsoluteY,   3, Unusual),
    op("shy", AbsoluteX,   3, Unusual),
    op("sta", AbsoluteX,   3, Legal),
    op("shx", AbsoluteY,   3, Unusual),
    op("ahx", AbsoluteY,   3, Unusual),
    // 0xA0
    op("ldy", Immediate,   2, Legal),
    op("lda", IndirectX,   2, Legal),
    op("ldx", Immediate,   2, Legal),
    op("lax", IndirectX,   2, Undoc),
    op("ldy", ZeroPage,    2, Legal),
    op("lda", ZeroPage,    2, Legal),
    op("ldx", ZeroPage,    2, Legal),
    op("lax", ZeroPage,    2, Undoc),
    op("tay", Implied,     1, Legal),
    op("lda", Immediate,   2, Legal),
    op("tax", Implied,     1, Legal),
    op("lax", Immediate,   2, Unusual),
    op("ldy", Absolute,    3, Legal),
    op("lda", Absolute,    3, Legal),
    op("ldx", Absolute,    3, Legal),
    op("lax", Absolute,    3, Undoc),
    // 0xB0
    op("bcs", Relative,    2, Legal),
    op("lda", IndirectY,   2, Legal),
    op("jam", Implied,     1, Jam),
    op("lax", IndirectY,   2, Undoc),
    op("ldy", ZeroPageX,   2, Legal),
    op("lda", ZeroPageX,   2, Legal),
    op("ldx", ZeroPageY,   2, Legal),
    op("lax", ZeroPageY,   2, Undoc),
    op("clv", Implied,     1, Legal),
    op("lda", AbsoluteY,   3, Legal),
    op("tsx", Implied,     1, Legal),
    op("las", AbsoluteY,   3, Unusual),
    op("ldy", AbsoluteX,   3, Legal),
    op("lda", AbsoluteX,   3, Legal),
    op("ldx", AbsoluteY,   3, Legal),
    op("lax", AbsoluteY,   3, Undoc),
    // 0xC0
    op("cpy", Immediate,   2, Legal),
    op("cmp", IndirectX,   2, Legal),
    op("nop", Immediate,   2, Undoc),
    op("dcp", IndirectX,   2, Undoc),
    op("cpy", ZeroPage,    2, Legal),
    op("cmp", ZeroPage,    2, Legal),
    op("dec", ZeroPage,    2, Legal),
    op("dcp", ZeroPage,    2, Undoc),
    op("iny", Implied,     1, Legal),
    op("cmp", Immediate,   2, Legal),
    op("dex", Implied,     1, Legal),
    op("axs", Immediate,   2, Undoc),
    op("cpy", Absolute,    3, Legal),
    op("cmp", Absolute,    3, Legal),
    op("dec", Absolute,    3, Legal),
    op("dcp", Absolute,    3, Undoc),
    // 0xD0
    op("bne", Relative,    2, Legal),
    op("cmp", IndirectY,   2, Legal),
    op("jam", Implied,     1, Jam),
    op("dcp", IndirectY,   2, Undoc),
    op("nop", ZeroPageX,   2, Undoc),
    op("cmp", ZeroPageX,   2, Legal),
    op("dec", ZeroPageX,   2, Legal),
    op("dcp", ZeroPageX,   2, Undoc),
    op("cld", Implied,     1, Legal),
    op("cmp", AbsoluteY,   3, Legal),
    op("nop", Implied,     1, Undoc),
    op("dcp", AbsoluteY,   3, Undoc),
    op("nop", AbsoluteX,   3, Undoc),
    op("cmp", AbsoluteX,   3, Legal),
    op("dec", AbsoluteX,   3, Legal),
    op("dcp", AbsoluteX,   3, Undoc),
    // 0xE0
    op("cpx", Immediate,   2, Legal),
    op("sbc", IndirectX,   2, Legal),
    op("nop", Immediate,   2, Undoc),
    op("isc", IndirectX,   2, Undoc),
    op("cpx", ZeroPage,    2, Legal),
    op("sbc", ZeroPage,    2, Legal),
    op("inc", ZeroPage,    2, Legal),
    op("isc", ZeroPage,    2, Undoc),
    op("inx", Implied,     1, Legal),
    op("sbc", Immediate,   2, Legal),
    op("nop", Implied,     1, Legal),
    op("sbc", Immediate,   2, Undoc),
    op("cpx", Absolute,    3, Legal),
    op("sbc", Absolute,    3, Legal),
    op("inc", Absolute,    3, Legal),
    op("isc", Absolute,    3, Undoc),
    // 0xF0
    op("beq", Relative,    2, Legal),
    op("sbc", IndirectY,   2, Legal),
    op("jam", Implied,     1, Jam),
    op("isc", IndirectY,   2, Undoc),
    op("nop", ZeroPageX,   2, Undoc),
    op("sbc", ZeroPageX,   2, Legal),
    op("inc", ZeroPageX,   2, Legal),
    op("isc", ZeroPageX,   2, Undoc),
    op("sed", Implied,     1, Legal),
    op("sbc", AbsoluteY,   3, Legal),
    op("nop", Implied,     1, Undoc),
    op("isc", AbsoluteY,   3, Undoc),
    op("nop", AbsoluteX,   3, Undoc),
    op("sbc", AbsoluteX,   3, Legal),
    op("inc", AbsoluteX,   3, Legal),
    op("isc", AbsoluteX,   3, Undoc),
];
