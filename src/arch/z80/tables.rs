//! Opcode tables for the Z80.
//!
//! The encoding is semiperiodic: whole quadrants repeat one template
//! with a three-bit register field substituted, and the `DD`/`FD`
//! tables are the unprefixed table with `hl` rewritten to `ix`/`iy`.
//! The tables are therefore built from the bit-field decomposition
//! (`x = op>>6`, `y = op>>3 & 7`, `z = op & 7`, `p = y>>1`, `q = y&1`)
//! instead of being transcribed entry by entry. Every index 0-255 of
//! every table is defined.

use crate::arch::z80::Kind::{self, Illegal, Legal, Undoc};
use crate::arch::z80::Shape;
use crate::arch::Flow;

/// One opcode worth of table data.
///
/// `text` is a render template: `{0}` 8-bit immediate, `{1}` 16-bit
/// address, `{2}` relative target, `{3}` I/O port, `{4}` index
/// displacement. `len` is the full instruction length in bytes,
/// prefixes and displacement included.
pub struct Entry {
    pub text: String,
    pub len: u8,
    pub shape: Shape,
    pub flow: Flow,
    pub kind: Kind,
}

impl Entry {
    fn new(text: &str, len: u8, shape: Shape, flow: Flow, kind: Kind) -> Self {
        Entry {
            text: text.to_string(),
            len,
            shape,
            flow,
            kind,
        }
    }
}

static R: [&str; 8] = ["b", "c", "d", "e", "h", "l", "(hl)", "a"];
static RP: [&str; 4] = ["bc", "de", "hl", "sp"];
static RP2: [&str; 4] = ["bc", "de", "hl", "af"];
static CC: [&str; 8] = ["nz", "z", "nc", "c", "po", "pe", "p", "m"];
static ALU: [&str; 8] = [
    "add a,", "adc a,", "sub ", "sbc a,", "and ", "xor ", "or ", "cp ",
];
static ROT: [&str; 8] = ["rlc", "rrc", "rl", "rr", "sla", "sra", "sll", "srl"];
static ACCUM_OPS: [&str; 8] = ["rlca", "rrca", "rla", "rra", "daa", "cpl", "scf", "ccf"];
static IM_MODES: [&str; 4] = ["0", "0", "1", "2"];

lazy_static! {
    pub static ref MAIN: Vec<Entry> = build_main(None);
    pub static ref IX: Vec<Entry> = build_main(Some("ix"));
    pub static ref IY: Vec<Entry> = build_main(Some("iy"));
    pub static ref CB: Vec<Entry> = build_cb();
    pub static ref ED: Vec<Entry> = build_ed();
    pub static ref IXCB: Vec<Entry> = build_idx_cb("ix");
    pub static ref IYCB: Vec<Entry> = build_idx_cb("iy");
}

struct Build {
    text: String,
    len: u8,
    shape: Shape,
    flow: Flow,
    kind: Kind,
    uses_disp: bool,
    substituted: bool,
}

impl Build {
    fn plain(text: String, len: u8) -> Self {
        Build {
            text,
            len,
            shape: Shape::Plain,
            flow: Flow::Normal,
            kind: Legal,
            uses_disp: false,
            substituted: false,
        }
    }

    fn shaped(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    fn flowing(mut self, flow: Flow) -> Self {
        self.flow = flow;
        self
    }
}

/// Build the unprefixed table, or the `DD`/`FD` variant of it when an
/// index register name is given. Substitution follows the hardware
/// rule: a memory operand becomes `(ix+d)`, `hl` becomes `ix`, and the
/// halves `h`/`l` become `ixh`/`ixl` only when no memory operand is in
/// play. Entries the prefix does not touch keep their plain rendering
/// but are flagged undocumented (the prefix byte is wasted).
fn build_main(idx: Option<&'static str>) -> Vec<Entry> {
    let mut table = Vec::with_capacity(256);

    for op in 0..=255u8 {
        table.push(finalize(base_entry(op, idx), idx));
    }

    table
}

fn finalize(b: Build, idx: Option<&'static str>) -> Entry {
    let mut len = b.len;
    let mut shape = b.shape;
    let mut kind = b.kind;

    if idx.is_some() && shape != Shape::Prefix {
        len += 1;

        if b.uses_disp {
            len += 1;
        }

        // operand bytes slide one position right, behind the prefix
        shape = match shape {
            Shape::Imm8(at) => {
                if b.uses_disp {
                    Shape::IdxImm8
                } else {
                    Shape::Imm8(at + 1)
                }
            }
            Shape::Imm16(at) => Shape::Imm16(at + 1),
            Shape::MemAddr(at) => Shape::MemAddr(at + 1),
            Shape::JumpAddr(at) => Shape::JumpAddr(at + 1),
            Shape::Rel(at) => Shape::Rel(at + 1),
            Shape::Io(at) => Shape::Io(at + 1),
            Shape::Plain if b.uses_disp => Shape::Idx,
            other => other,
        };

        if !b.substituted && kind == Legal {
            kind = Undoc;
        }
    }

    Entry {
        text: b.text,
        len,
        shape,
        flow: b.flow,
        kind,
    }
}

fn base_entry(op: u8, idx: Option<&'static str>) -> Build {
    let x = op >> 6;
    let y = (op >> 3) & 7;
    let z = op & 7;
    let p = y >> 1;
    let q = y & 1;

    let hl = idx.unwrap_or("hl");
    let subst = idx.is_some();

    // single 8-bit target, index halves allowed
    let reg1 = |i: u8| -> (String, bool, bool) {
        match (i, idx) {
            (6, Some(ix)) => (format!("({}{{4}})", ix), true, true),
            (6, None) => ("(hl)".to_string(), false, false),
            (4, Some(ix)) => (format!("{}h", ix), false, true),
            (5, Some(ix)) => (format!("{}l", ix), false, true),
            _ => (R[i as usize].to_string(), false, false),
        }
    };

    // 8-bit operand next to a memory operand: halves stay plain
    let reg_mem = |i: u8| -> (String, bool, bool) {
        match (i, idx) {
            (6, Some(ix)) => (format!("({}{{4}})", ix), true, true),
            _ => (R[i as usize].to_string(), false, false),
        }
    };

    let rp_name = |i: u8| -> (&'static str, bool) {
        if i == 2 {
            (hl, subst)
        } else {
            (RP[i as usize], false)
        }
    };

    let rp2_name = |i: u8| -> (&'static str, bool) {
        if i == 2 {
            (hl, subst)
        } else {
            (RP2[i as usize], false)
        }
    };

    let mut b = match (x, y, z) {
        // x=0, z=0: relative jumps and oddballs
        (0, 0, 0) => Build::plain("nop".to_string(), 1),
        (0, 1, 0) => Build::plain("ex af,af'".to_string(), 1),
        (0, 2, 0) => Build::plain("djnz {2}".to_string(), 2)
            .shaped(Shape::Rel(1))
            .flowing(Flow::Branching(true)),
        (0, 3, 0) => Build::plain("jr {2}".to_string(), 2)
            .shaped(Shape::Rel(1))
            .flowing(Flow::Branching(false)),
        (0, cy, 0) => Build::plain(format!("jr {},{{2}}", CC[(cy - 4) as usize]), 2)
            .shaped(Shape::Rel(1))
            .flowing(Flow::Branching(true)),

        // x=0, z=1: 16-bit load immediate / add
        (0, _, 1) if q == 0 => {
            let (rp, s) = rp_name(p);
            let mut b =
                Build::plain(format!("ld {},{{1}}", rp), 3).shaped(Shape::Imm16(1));
            b.substituted = s;
            b
        }
        (0, _, 1) => {
            let (rp, s) = rp_name(p);
            let mut b = Build::plain(format!("add {},{}", hl, rp), 1);
            b.substituted = subst || s;
            b
        }

        // x=0, z=2: accumulator/hl loads through pointers
        (0, _, 2) => match (q, p) {
            (0, 0) => Build::plain("ld (bc),a".to_string(), 1),
            (0, 1) => Build::plain("ld (de),a".to_string(), 1),
            (0, 2) => {
                let mut b = Build::plain(format!("ld ({{1}}),{}", hl), 3)
                    .shaped(Shape::MemAddr(1));
                b.substituted = subst;
                b
            }
            (0, _) => Build::plain("ld ({1}),a".to_string(), 3).shaped(Shape::MemAddr(1)),
            (1, 0) => Build::plain("ld a,(bc)".to_string(), 1),
            (1, 1) => Build::plain("ld a,(de)".to_string(), 1),
            (1, 2) => {
                let mut b = Build::plain(format!("ld {},({{1}})", hl), 3)
                    .shaped(Shape::MemAddr(1));
                b.substituted = subst;
                b
            }
            _ => Build::plain("ld a,({1})".to_string(), 3).shaped(Shape::MemAddr(1)),
        },

        // x=0, z=3: 16-bit inc/dec
        (0, _, 3) => {
            let (rp, s) = rp_name(p);
            let verb = if q == 0 { "inc" } else { "dec" };
            let mut b = Build::plain(format!("{} {}", verb, rp), 1);
            b.substituted = s;
            b
        }

        // x=0, z=4..6: 8-bit inc/dec/load immediate
        (0, _, 4) | (0, _, 5) => {
            let (r, disp, s) = reg1(y);
            let verb = if z == 4 { "inc" } else { "dec" };
            let mut b = Build::plain(format!("{} {}", verb, r), 1);
            b.uses_disp = disp;
            b.substituted = s;
            b
        }
        (0, _, 6) => {
            let (r, disp, s) = reg1(y);
            let mut b = Build::plain(format!("ld {},{{0}}", r), 2).shaped(Shape::Imm8(1));
            b.uses_disp = disp;
            b.substituted = s;
            b
        }

        // x=0, z=7: accumulator/flag one-byte ops
        (0, _, 7) => Build::plain(ACCUM_OPS[y as usize].to_string(), 1),

        // x=1: the register-to-register load quadrant
        (1, 6, 6) => Build::plain("halt".to_string(), 1),
        (1, _, _) => {
            let mem = y == 6 || z == 6;
            let (dst, ddisp, ds) = if mem { reg_mem(y) } else { reg1(y) };
            let (src, sdisp, ss) = if mem { reg_mem(z) } else { reg1(z) };
            let mut b = Build::plain(format!("ld {},{}", dst, src), 1);
            b.uses_disp = ddisp || sdisp;
            b.substituted = ds || ss;
            if idx.is_some() && !mem && (y == 4 || y == 5 || z == 4 || z == 5) {
                b.kind = Undoc;
            }
            b
        }

        // x=2: the ALU quadrant
        (2, _, _) => {
            let (src, disp, s) = reg1(z);
            let mut b = Build::plain(format!("{}{}", ALU[y as usize], src), 1);
            b.uses_disp = disp;
            b.substituted = s;
            if idx.is_some() && !disp && (z == 4 || z == 5) {
                b.kind = Undoc;
            }
            b
        }

        // x=3, z=0: conditional returns
        (3, _, 0) => Build::plain(format!("ret {}", CC[y as usize]), 1)
            .flowing(Flow::Branching(true)),

        // x=3, z=1: pop and the q=1 specials
        (3, _, 1) if q == 0 => {
            let (rp, s) = rp2_name(p);
            let mut b = Build::plain(format!("pop {}", rp), 1);
            b.substituted = s;
            b
        }
        (3, _, 1) => match p {
            0 => Build::plain("ret".to_string(), 1).flowing(Flow::Returning),
            1 => Build::plain("exx".to_string(), 1),
            2 => {
                let mut b = Build::plain(format!("jp ({})", hl), 1)
                    .flowing(Flow::Branching(false));
                b.substituted = subst;
                b
            }
            _ => {
                let mut b = Build::plain(format!("ld sp,{}", hl), 1);
                b.substituted = subst;
                b
            }
        },

        // x=3, z=2: conditional jumps
        (3, _, 2) => Build::plain(format!("jp {},{{1}}", CC[y as usize]), 3)
            .shaped(Shape::JumpAddr(1))
            .flowing(Flow::Branching(true)),

        // x=3, z=3: jp, prefixes, I/O, exchanges
        (3, 0, 3) => Build::plain("jp {1}".to_string(), 3)
            .shaped(Shape::JumpAddr(1))
            .flowing(Flow::Branching(false)),
        (3, 1, 3) => Build::plain(String::new(), 1).shaped(Shape::Prefix),
        (3, 2, 3) => Build::plain("out ({3}),a".to_string(), 2).shaped(Shape::Io(1)),
        (3, 3, 3) => Build::plain("in a,({3})".to_string(), 2).shaped(Shape::Io(1)),
        (3, 4, 3) => {
            let mut b = Build::plain(format!("ex (sp),{}", hl), 1);
            b.substituted = subst;
            b
        }
        (3, 5, 3) => Build::plain("ex de,hl".to_string(), 1),
        (3, 6, 3) => Build::plain("di".to_string(), 1),
        (3, _, 3) => Build::plain("ei".to_string(), 1),

        // x=3, z=4: conditional calls
        (3, _, 4) => Build::plain(format!("call {},{{1}}", CC[y as usize]), 3)
            .shaped(Shape::JumpAddr(1)),

        // x=3, z=5: push, call, prefixes
        (3, _, 5) if q == 0 => {
            let (rp, s) = rp2_name(p);
            let mut b = Build::plain(format!("push {}", rp), 1);
            b.substituted = s;
            b
        }
        (3, _, 5) => match p {
            0 => Build::plain("call {1}".to_string(), 3).shaped(Shape::JumpAddr(1)),
            _ => Build::plain(String::new(), 1).shaped(Shape::Prefix),
        },

        // x=3, z=6: ALU with immediate
        (3, _, 6) => Build::plain(format!("{}{{0}}", ALU[y as usize]), 2)
            .shaped(Shape::Imm8(1)),

        // x=3, z=7: restarts
        (3, _, 7) => Build::plain(format!("rst ${:02X}", y * 8), 1),

        _ => Build::plain("noni".to_string(), 1),
    };

    if b.kind == Legal && b.text == "noni" {
        b.kind = Illegal;
    }

    b
}

/// The `CB` quadrant: rotates, shifts and bit operations.
fn build_cb() -> Vec<Entry> {
    let mut table = Vec::with_capacity(256);

    for sub in 0..=255u8 {
        let x = sub >> 6;
        let y = (sub >> 3) & 7;
        let z = sub & 7;
        let r = R[z as usize];

        let (text, kind) = match x {
            0 => (
                format!("{} {}", ROT[y as usize], r),
                if y == 6 { Undoc } else { Legal },
            ),
            1 => (format!("bit {},{}", y, r), Legal),
            2 => (format!("res {},{}", y, r), Legal),
            _ => (format!("set {},{}", y, r), Legal),
        };

        table.push(Entry::new(&text, 2, Shape::Plain, Flow::Normal, kind));
    }

    table
}

/// The `ED` quadrant: block transfers, 16-bit carry arithmetic and the
/// interrupt plumbing. Holes decode as `noni`.
fn build_ed() -> Vec<Entry> {
    let mut table = Vec::with_capacity(256);

    for sub in 0..=255u8 {
        let x = sub >> 6;
        let y = (sub >> 3) & 7;
        let z = sub & 7;
        let p = y >> 1;
        let q = y & 1;

        let entry = if x == 1 {
            match z {
                0 if y != 6 => Entry::new(
                    &format!("in {},(c)", R[y as usize]),
                    2,
                    Shape::Plain,
                    Flow::Normal,
                    Legal,
                ),
                0 => Entry::new("in (c)", 2, Shape::Plain, Flow::Normal, Undoc),
                1 if y != 6 => Entry::new(
                    &format!("out (c),{}", R[y as usize]),
                    2,
                    Shape::Plain,
                    Flow::Normal,
                    Legal,
                ),
                1 => Entry::new("out (c),0", 2, Shape::Plain, Flow::Normal, Undoc),
                2 => {
                    let verb = if q == 0 { "sbc" } else { "adc" };
                    Entry::new(
                        &format!("{} hl,{}", verb, RP[p as usize]),
                        2,
                        Shape::Plain,
                        Flow::Normal,
                        Legal,
                    )
                }
                3 if q == 0 => Entry::new(
                    &format!("ld ({{1}}),{}", RP[p as usize]),
                    4,
                    Shape::MemAddr(2),
                    Flow::Normal,
                    Legal,
                ),
                3 => Entry::new(
                    &format!("ld {},({{1}})", RP[p as usize]),
                    4,
                    Shape::MemAddr(2),
                    Flow::Normal,
                    Legal,
                ),
                4 => Entry::new(
                    "neg",
                    2,
                    Shape::Plain,
                    Flow::Normal,
                    if y == 0 { Legal } else { Undoc },
                ),
                5 => {
                    let (text, kind) = if y == 1 {
                        ("reti", Legal)
                    } else if y == 0 {
                        ("retn", Legal)
                    } else {
                        ("retn", Undoc)
                    };
                    Entry::new(text, 2, Shape::Plain, Flow::Returning, kind)
                }
                6 => {
                    let kind = if y == 0 || y == 2 || y == 3 { Legal } else { Undoc };
                    Entry::new(
                        &format!("im {}", IM_MODES[(y & 3) as usize]),
                        2,
                        Shape::Plain,
                        Flow::Normal,
                        kind,
                    )
                }
                _ => {
                    let (text, kind) = match y {
                        0 => ("ld i,a", Legal),
                        1 => ("ld r,a", Legal),
                        2 => ("ld a,i", Legal),
                        3 => ("ld a,r", Legal),
                        4 => ("rrd", Legal),
                        5 => ("rld", Legal),
                        _ => ("noni", Illegal),
                    };
                    Entry::new(text, 2, Shape::Plain, Flow::Normal, kind)
                }
            }
        } else if x == 2 && z <= 3 && y >= 4 {
            static BLOCK: [[&str; 4]; 4] = [
                ["ldi", "cpi", "ini", "outi"],
                ["ldd", "cpd", "ind", "outd"],
                ["ldir", "cpir", "inir", "otir"],
                ["lddr", "cpdr", "indr", "otdr"],
            ];
            Entry::new(
                BLOCK[(y - 4) as usize][z as usize],
                2,
                Shape::Plain,
                Flow::Normal,
                Legal,
            )
        } else {
            Entry::new("noni", 2, Shape::Plain, Flow::Normal, Illegal)
        };

        table.push(entry);
    }

    table
}

/// The doubled `DD CB d op`/`FD CB d op` quadrant, keyed by the final
/// byte. The non-memory encodings copy the shifted value into a
/// register on the side; they render with the extra operand and are
/// flagged undocumented.
fn build_idx_cb(ix: &str) -> Vec<Entry> {
    let mut table = Vec::with_capacity(256);

    for sub in 0..=255u8 {
        let x = sub >> 6;
        let y = (sub >> 3) & 7;
        let z = sub & 7;
        let mem = format!("({}{{4}})", ix);

        let (text, kind) = match x {
            0 if z == 6 => (
                format!("{} {}", ROT[y as usize], mem),
                if y == 6 { Undoc } else { Legal },
            ),
            0 => (
                format!("{} {},{}", ROT[y as usize], mem, R[z as usize]),
                Undoc,
            ),
            1 => (
                format!("bit {},{}", y, mem),
                if z == 6 { Legal } else { Undoc },
            ),
            2 if z == 6 => (format!("res {},{}", y, mem), Legal),
            2 => (format!("res {},{},{}", y, mem, R[z as usize]), Undoc),
            _ if z == 6 => (format!("set {},{}", y, mem), Legal),
            _ => (format!("set {},{},{}", y, mem, R[z as usize]), Undoc),
        };

        table.push(Entry::new(&text, 4, Shape::Idx, Flow::Normal, kind));
    }

    table
}
