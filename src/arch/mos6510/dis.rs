//! Single-instruction decoder for the 6502/6510

use crate::arch::mos6510::tables::opcode;
use crate::arch::mos6510::{Kind, Mode};
use crate::arch::{Cpu, Decoded, DecodeOptions, Flow};
use crate::mem::MemoryMap;

/// Stateful 6502/6510 decoder cursor.
///
/// `decode` resets every `last_*` field from its own inputs, so two
/// interleaved passes must each own an instance.
pub struct Mos6510 {
    opt: DecodeOptions,
    last_kind: Kind,
    last_mode: Mode,
    last_flow: Flow,
    last_addr: Option<u32>,
    last_value: Option<u32>,
}

impl Mos6510 {
    pub fn new(opt: DecodeOptions) -> Self {
        Mos6510 {
            opt,
            last_kind: Kind::Legal,
            last_mode: Mode::Implied,
            last_flow: Flow::Normal,
            last_addr: None,
            last_value: None,
        }
    }

    /// Addressing mode of the last decoded instruction.
    pub fn last_mode(&self) -> Mode {
        self.last_mode
    }

    /// Documentation status of the last decoded instruction.
    pub fn last_kind(&self) -> Kind {
        self.last_kind
    }

    fn case(&self, s: &str) -> String {
        if self.opt.upper_case {
            s.to_uppercase()
        } else {
            s.to_string()
        }
    }

    fn flow_of(mnemonic: &str, mode: Mode) -> Flow {
        if mode == Mode::Relative {
            return Flow::Branching(true);
        }

        match mnemonic {
            "jmp" => Flow::Branching(false),
            "rts" | "rti" => Flow::Returning,
            _ => Flow::Normal,
        }
    }
}

fn fetch8(buf: &[u8], pos: usize) -> Option<u8> {
    buf.get(pos).copied()
}

fn fetch16(buf: &[u8], pos: usize) -> Option<u16> {
    match (buf.get(pos), buf.get(pos + 1)) {
        (Some(lo), Some(hi)) => Some(u16::from_le_bytes([*lo, *hi])),
        _ => None,
    }
}

impl Cpu for Mos6510 {
    fn name(&self) -> &'static str {
        "mos6510"
    }

    fn decode(&mut self, buf: &[u8], pos: usize, pc: u32, map: &mut MemoryMap) -> Decoded {
        let op = opcode(buf[pos]);
        let create = self.opt.create_labels;

        self.last_kind = op.kind;
        self.last_mode = op.mode;
        self.last_flow = Self::flow_of(op.mnemonic, op.mode);
        self.last_addr = None;
        self.last_value = None;

        let x = self.case("x");
        let y = self.case("y");

        let operand = match op.mode {
            Mode::Implied => String::new(),
            Mode::Accumulator => self.case("a"),
            Mode::Immediate => match fetch8(buf, pos + 1) {
                Some(v) => {
                    self.last_value = Some(v as u32);
                    format!("#{}", map.immediate_text(pc.wrapping_add(1) as u16, v, create))
                }
                None => "#??".to_string(),
            },
            Mode::ZeroPage => match fetch8(buf, pos + 1) {
                Some(v) => {
                    self.last_addr = Some(v as u32);
                    map.zero_page_text(v, create)
                }
                None => "??".to_string(),
            },
            Mode::ZeroPageX => match fetch8(buf, pos + 1) {
                Some(v) => {
                    self.last_addr = Some(v as u32);
                    format!("{},{}", map.zero_page_text(v, create), x)
                }
                None => format!("??,{}", x),
            },
            Mode::ZeroPageY => match fetch8(buf, pos + 1) {
                Some(v) => {
                    self.last_addr = Some(v as u32);
                    format!("{},{}", map.zero_page_text(v, create), y)
                }
                None => format!("??,{}", y),
            },
            Mode::Absolute => match fetch16(buf, pos + 1) {
                Some(a) => {
                    self.last_addr = Some(a as u32);
                    map.address_text(a, create)
                }
                None => "????".to_string(),
            },
            Mode::AbsoluteX => match fetch16(buf, pos + 1) {
                Some(a) => {
                    self.last_addr = Some(a as u32);
                    format!("{},{}", map.address_text(a, create), x)
                }
                None => format!("????,{}", x),
            },
            Mode::AbsoluteY => match fetch16(buf, pos + 1) {
                Some(a) => {
                    self.last_addr = Some(a as u32);
                    format!("{},{}", map.address_text(a, create), y)
                }
                None => format!("????,{}", y),
            },
            Mode::Indirect => match fetch16(buf, pos + 1) {
                Some(a) => {
                    self.last_addr = Some(a as u32);
                    format!("({})", map.address_text(a, create))
                }
                None => "(????)".to_string(),
            },
            Mode::IndirectX => match fetch8(buf, pos + 1) {
                Some(v) => {
                    self.last_addr = Some(v as u32);
                    format!("({},{})", map.zero_page_text(v, create), x)
                }
                None => format!("(??,{})", x),
            },
            Mode::IndirectY => match fetch8(buf, pos + 1) {
                Some(v) => {
                    self.last_addr = Some(v as u32);
                    format!("({}),{}", map.zero_page_text(v, create), y)
                }
                None => format!("(??),{}", y),
            },
            Mode::Relative => match fetch8(buf, pos + 1) {
                Some(v) => {
                    let target = pc as i64 + op.len as i64 + (v as i8) as i64;

                    if (0..=0xFFFF).contains(&target) {
                        self.last_addr = Some(target as u32);
                        map.address_text(target as u16, create)
                    } else {
                        "$????".to_string()
                    }
                }
                None => "??".to_string(),
            },
        };

        let mnemonic = self.case(op.mnemonic);
        let text = if operand.is_empty() {
            mnemonic
        } else {
            format!("{} {}", mnemonic, operand)
        };

        Decoded {
            text,
            length: op.len as usize,
            next_pos: pos + op.len as usize,
            next_pc: pc.wrapping_add(op.len as u32),
            flow: self.last_flow,
            addr: self.last_addr,
            value: self.last_value,
        }
    }

    fn last_comment(&self) -> Option<String> {
        match self.last_kind {
            Kind::Legal => None,
            Kind::Undoc => Some("Undocument command".to_string()),
            Kind::Unusual => Some("Unusual operation".to_string()),
            Kind::Jam => Some("Illegal instruction".to_string()),
        }
    }

    fn last_flow(&self) -> Flow {
        self.last_flow
    }
}
