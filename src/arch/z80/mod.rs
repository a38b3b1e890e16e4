//! Zilog Z80 family decoder.
//!
//! The Z80 extends the 8080 matrix with four prefix bytes (`CB`, `ED`,
//! `DD`, `FD`, plus the doubled `DD CB`/`FD CB` forms), which makes the
//! full addressing-mode space run to several hundred shapes. Rather
//! than transcribe them all, the secondary tables are generated from
//! compact per-shape templates at first use; see `tables.rs`.

mod dis;
mod tables;

pub use dis::Z80;
pub use tables::{Entry, CB, ED, IX, IXCB, IY, IYCB, MAIN};

/// Operand fetch/render shape of one table entry.
///
/// The `u8` carries the operand's byte offset from the start of the
/// instruction (prefix bytes included). Rendering is one match on this
/// enum; the mnemonic text lives in the entry template.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    /// No operand bytes.
    Plain,
    /// 8-bit immediate.
    Imm8(u8),
    /// 16-bit immediate (almost always a pointer; resolved as one).
    Imm16(u8),
    /// 16-bit memory operand, `(nn)`.
    MemAddr(u8),
    /// 16-bit jump/call target.
    JumpAddr(u8),
    /// Signed 8-bit displacement from the post-fetch program counter.
    Rel(u8),
    /// 8-bit I/O port.
    Io(u8),
    /// Index displacement, `(ix+d)`/`(iy+d)`.
    Idx,
    /// Index displacement plus trailing 8-bit immediate.
    IdxImm8,
    /// Dispatch marker for a prefix byte; never rendered.
    Prefix,
}

/// Documentation status of an opcode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Kind {
    Legal,
    /// Off the data sheet but well-behaved (sll, ixh/ixl forms,
    /// wasted-prefix encodings, the ED duplicates).
    Undoc,
    /// The ED holes that decode to no operation at all.
    Illegal,
}

#[cfg(test)]
mod tests;
