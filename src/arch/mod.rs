//! Implementations of the CPU families chipdasm can disassemble.
//!
//! Each family is a child module providing three parallel 256-entry
//! opcode tables (mnemonic, addressing mode, byte length; prefix
//! families add secondary tables keyed by the byte after the prefix)
//! and a decoder type implementing the `Cpu` trait. Every index 0-255
//! is defined; holes in the official opcode map carry an illegal/jam
//! marker so decoding never fails, it only classifies.

pub mod i8048;
pub mod mos6510;
pub mod z80;

mod traits;

pub use traits::{Cpu, Decoded, DecodeOptions, Flow};

use serde::Serialize;
use std::str;

/// Enumeration of all CPU families that ship with chipdasm.
#[derive(Copy, Clone, Serialize, Debug, PartialEq, Eq)]
pub enum CpuName {
    Mos6510,
    Z80,
    I8048,
}

impl CpuName {
    pub fn friendly_name(self) -> &'static str {
        match self {
            CpuName::Mos6510 => "MOS 6502/6510",
            CpuName::Z80 => "Zilog Z80",
            CpuName::I8048 => "Intel 8048",
        }
    }

    /// Construct a fresh decoder instance for this family.
    pub fn decoder(self, opt: DecodeOptions) -> Box<dyn Cpu> {
        match self {
            CpuName::Mos6510 => Box::new(mos6510::Mos6510::new(opt)),
            CpuName::Z80 => Box::new(z80::Z80::new(opt)),
            CpuName::I8048 => Box::new(i8048::I8048::new(opt)),
        }
    }
}

impl str::FromStr for CpuName {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "6502" => Ok(CpuName::Mos6510),
            "6510" => Ok(CpuName::Mos6510),
            "mos6510" => Ok(CpuName::Mos6510),
            "z80" => Ok(CpuName::Z80),
            "8048" => Ok(CpuName::I8048),
            "i8048" => Ok(CpuName::I8048),
            "mcs48" => Ok(CpuName::I8048),
            _ => Err(()),
        }
    }
}

derive_deserialize_from_str!(CpuName, "valid CPU family name");
