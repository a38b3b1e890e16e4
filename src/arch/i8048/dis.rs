//! Single-instruction decoder for the MCS-48

use crate::arch::i8048::tables::opcode;
use crate::arch::i8048::{Kind, Shape};
use crate::arch::{Cpu, Decoded, DecodeOptions, Flow};
use crate::mem::MemoryMap;

/// Stateful MCS-48 decoder cursor.
pub struct I8048 {
    opt: DecodeOptions,
    last_kind: Kind,
    last_flow: Flow,
    last_addr: Option<u32>,
    last_value: Option<u32>,
}

impl I8048 {
    pub fn new(opt: DecodeOptions) -> Self {
        I8048 {
            opt,
            last_kind: Kind::Legal,
            last_flow: Flow::Normal,
            last_addr: None,
            last_value: None,
        }
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
}

impl Cpu for I8048 {
    fn name(&self) -> &'static str {
        "i8048"
    }

    fn decode(&mut self, buf: &[u8], pos: usize, pc: u32, map: &mut MemoryMap) -> Decoded {
        let op = opcode(buf[pos]);
        let create = self.opt.create_labels;

        self.last_kind = op.kind;
        self.last_flow = op.flow;
        self.last_addr = None;
        self.last_value = None;

        let mut text = self.case(op.text);

        match op.shape {
            Shape::Plain => {}
            Shape::Imm8 => {
                let rep = match buf.get(pos + 1) {
                    Some(v) => {
                        self.last_value = Some(*v as u32);
                        map.immediate_text(pc.wrapping_add(1) as u16, *v, create)
                    }
                    None => "??".to_string(),
                };
                text = text.replace("{0}", &rep);
            }
            Shape::Addr11 => {
                let rep = match buf.get(pos + 1) {
                    Some(v) => {
                        // three page bits ride in the opcode byte
                        let target = ((buf[pos] as u16 & 0xE0) << 3) | *v as u16;
                        self.last_addr = Some(target as u32);
                        map.address_text(target, create)
                    }
                    None => "??".to_string(),
                };
                text = text.replace("{0}", &rep);
            }
            Shape::PageRel => {
                let rep = match buf.get(pos + 1) {
                    Some(v) => {
                        // only the low byte of the counter is replaced,
                        // so the page is the one the next instruction
                        // lives in
                        let next = pc.wrapping_add(op.len as u32);

                        if next <= 0xFFFF {
                            let target = (next as u16 & 0xFF00) | *v as u16;
                            self.last_addr = Some(target as u32);
                            map.address_text(target, create)
                        } else {
                            "$????".to_string()
                        }
                    }
                    None => "??".to_string(),
                };
                text = text.replace("{0}", &rep);
            }
        }

        Decoded {
            text,
            length: op.len as usize,
            next_pos: pos + op.len as usize,
            next_pc: pc.wrapping_add(op.len as u32),
            flow: op.flow,
            addr: self.last_addr,
            value: self.last_value,
        }
    }

    fn last_comment(&self) -> Option<String> {
        match self.last_kind {
            Kind::Legal => None,
            Kind::Illegal => Some("Illegal instruction".to_string()),
        }
    }

    fn last_flow(&self) -> Flow {
        self.last_flow
    }
}
