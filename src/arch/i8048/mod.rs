//! Intel MCS-48 (8048) family decoder.
//!
//! Sound hardware on several cartridge systems runs an 8048 core, so
//! ripped players occasionally carry MCS-48 code. The encoding is flat
//! (no prefixes): one 256-entry table covers everything. Control
//! transfers are the interesting part: `jmp`/`call` carry an 11-bit
//! address with the page bits in the opcode, and the conditional jumps
//! only replace the low byte of the program counter, so their targets
//! stay inside the page of the *next* instruction.

mod dis;
mod tables;

pub use dis::I8048;
pub use tables::{opcode, Op};

/// Operand shape of one MCS-48 opcode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    /// No operand byte (registers are encoded in the opcode).
    Plain,
    /// 8-bit immediate.
    Imm8,
    /// 11-bit target: three page bits in the opcode, low byte follows.
    Addr11,
    /// In-page target: low byte follows, page taken from the
    /// post-fetch program counter.
    PageRel,
}

/// Documentation status of an opcode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Kind {
    Legal,
    /// A hole in the MCS-48 map.
    Illegal,
}

#[cfg(test)]
mod tests;
