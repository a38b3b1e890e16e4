//! MOS 6502/6510 family decoder.
//!
//! Covers the full 256-opcode matrix including the undocumented
//! instructions the C64 scene leans on (lax, sax, dcp, isc and friends)
//! and the jam opcodes that halt the part. Addressing modes follow the
//! NMOS data sheet; the decoder renders one fixed template per mode.

mod dis;
mod tables;

pub use dis::Mos6510;
pub use tables::{opcode, Op};

/// NMOS 6502 addressing modes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
    Relative,
}

/// Documentation status of an opcode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Kind {
    /// In the data sheet.
    Legal,
    /// Off the data sheet but stable on NMOS parts.
    Undoc,
    /// Off the data sheet and unstable (bus-dependent results).
    Unusual,
    /// Halts the processor.
    Jam,
}

#[cfg(test)]
mod tests;
