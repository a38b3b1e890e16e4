//! Single-instruction decoder for the Z80

use crate::arch::z80::tables::Entry;
use crate::arch::z80::{Kind, Shape, CB, ED, IX, IXCB, IY, IYCB, MAIN};
use crate::arch::{Cpu, Decoded, DecodeOptions, Flow};
use crate::mem::MemoryMap;

/// Stateful Z80 decoder cursor.
pub struct Z80 {
    opt: DecodeOptions,
    last_kind: Kind,
    last_flow: Flow,
    last_addr: Option<u32>,
    last_value: Option<u32>,
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

fn disp_text(v: u8) -> String {
    let d = v as i8;

    if d < 0 {
        format!("-${:02X}", -(d as i16))
    } else {
        format!("+${:02X}", d)
    }
}

impl Z80 {
    pub fn new(opt: DecodeOptions) -> Self {
        Z80 {
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

    /// Render one table entry at `buf[pos]`.
    ///
    /// Operand offsets inside the entry's shape are relative to the
    /// instruction start, prefix bytes included; missing bytes render
    /// as `??`/`????` and the cursor still advances by the full
    /// table length.
    fn render(
        &mut self,
        e: &Entry,
        buf: &[u8],
        pos: usize,
        pc: u32,
        map: &mut MemoryMap,
    ) -> Decoded {
        let create = self.opt.create_labels;

        self.last_kind = e.kind;
        self.last_flow = e.flow;
        self.last_addr = None;
        self.last_value = None;

        let mut text = self.case(&e.text);

        match e.shape {
            Shape::Plain | Shape::Prefix => {}
            Shape::Imm8(at) => {
                let rep = match fetch8(buf, pos + at as usize) {
                    Some(v) => {
                        self.last_value = Some(v as u32);
                        map.immediate_text(pc.wrapping_add(at as u32) as u16, v, create)
                    }
                    None => "??".to_string(),
                };
                text = text.replace("{0}", &rep);
            }
            Shape::Imm16(at) | Shape::MemAddr(at) | Shape::JumpAddr(at) => {
                let rep = match fetch16(buf, pos + at as usize) {
                    Some(a) => {
                        self.last_addr = Some(a as u32);
                        map.address_text(a, create)
                    }
                    None => "????".to_string(),
                };
                text = text.replace("{1}", &rep);
            }
            Shape::Rel(at) => {
                let rep = match fetch8(buf, pos + at as usize) {
                    Some(v) => {
                        let target = pc as i64 + e.len as i64 + (v as i8) as i64;

                        if (0..=0xFFFF).contains(&target) {
                            self.last_addr = Some(target as u32);
                            map.address_text(target as u16, create)
                        } else {
                            "$????".to_string()
                        }
                    }
                    None => "??".to_string(),
                };
                text = text.replace("{2}", &rep);
            }
            Shape::Io(at) => {
                let rep = match fetch8(buf, pos + at as usize) {
                    Some(v) => {
                        self.last_value = Some(v as u32);
                        format!("${:02X}", v)
                    }
                    None => "??".to_string(),
                };
                text = text.replace("{3}", &rep);
            }
            Shape::Idx => {
                let rep = match fetch8(buf, pos + 2) {
                    Some(v) => disp_text(v),
                    None => "+??".to_string(),
                };
                text = text.replace("{4}", &rep);
            }
            Shape::IdxImm8 => {
                let drep = match fetch8(buf, pos + 2) {
                    Some(v) => disp_text(v),
                    None => "+??".to_string(),
                };
                let irep = match fetch8(buf, pos + 3) {
                    Some(v) => {
                        self.last_value = Some(v as u32);
                        map.immediate_text(pc.wrapping_add(3) as u16, v, create)
                    }
                    None => "??".to_string(),
                };
                text = text.replace("{4}", &drep).replace("{0}", &irep);
            }
        }

        Decoded {
            text,
            length: e.len as usize,
            next_pos: pos + e.len as usize,
            next_pc: pc.wrapping_add(e.len as u32),
            flow: e.flow,
            addr: self.last_addr,
            value: self.last_value,
        }
    }

    /// A prefix byte with nothing decodable after it.
    fn dangling(&mut self, pos: usize, pc: u32, len: usize) -> Decoded {
        self.last_kind = Kind::Undoc;
        self.last_flow = Flow::Normal;
        self.last_addr = None;
        self.last_value = None;

        Decoded {
            text: self.case("noni"),
            length: len,
            next_pos: pos + len,
            next_pc: pc.wrapping_add(len as u32),
            flow: Flow::Normal,
            addr: None,
            value: None,
        }
    }

    fn indexed(
        &mut self,
        buf: &[u8],
        pos: usize,
        pc: u32,
        map: &mut MemoryMap,
        table: &[Entry],
        cb_table: &[Entry],
    ) -> Decoded {
        match fetch8(buf, pos + 1) {
            // the doubled prefix: displacement byte, then the sub-opcode
            Some(0xCB) => match fetch8(buf, pos + 3) {
                Some(sub) => self.render(&cb_table[sub as usize], buf, pos, pc, map),
                None => self.dangling(pos, pc, 4),
            },
            // a prefix in front of another prefix has no effect
            Some(0xDD) | Some(0xFD) | Some(0xED) => self.dangling(pos, pc, 1),
            Some(sub) => self.render(&table[sub as usize], buf, pos, pc, map),
            None => self.dangling(pos, pc, 1),
        }
    }
}

impl Cpu for Z80 {
    fn name(&self) -> &'static str {
        "z80"
    }

    fn decode(&mut self, buf: &[u8], pos: usize, pc: u32, map: &mut MemoryMap) -> Decoded {
        match buf[pos] {
            0xCB => match fetch8(buf, pos + 1) {
                Some(sub) => self.render(&CB[sub as usize], buf, pos, pc, map),
                None => self.dangling(pos, pc, 2),
            },
            0xED => match fetch8(buf, pos + 1) {
                Some(sub) => self.render(&ED[sub as usize], buf, pos, pc, map),
                None => self.dangling(pos, pc, 2),
            },
            0xDD => self.indexed(buf, pos, pc, map, &IX, &IXCB),
            0xFD => self.indexed(buf, pos, pc, map, &IY, &IYCB),
            b => self.render(&MAIN[b as usize], buf, pos, pc, map),
        }
    }

    fn last_comment(&self) -> Option<String> {
        match self.last_kind {
            Kind::Legal => None,
            Kind::Undoc => Some("Undocument command".to_string()),
            Kind::Illegal => Some("Illegal instruction".to_string()),
        }
    }

    fn last_flow(&self) -> Flow {
        self.last_flow
    }
}
