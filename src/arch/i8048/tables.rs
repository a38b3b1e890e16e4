//! Opcode table for the MCS-48.
//!
//! Mechanical transcription of the Intel map. `{0}` in a template is
//! the rendered operand; everything else (registers, ports, flag
//! names) is spelled out per entry since the encoding packs them into
//! the opcode byte.

use crate::arch::i8048::Kind::{self, Illegal, Legal};
use crate::arch::i8048::Shape::{self, *};
use crate::arch::Flow;

#[derive(Copy, Clone, Debug)]
pub struct Op {
    pub text: &'static str,
    pub shape: Shape,
    pub len: u8,
    pub flow: Flow,
    pub kind: Kind,
}

const N: Flow = Flow::Normal;
const BC: Flow = Flow::Branching(true);
const BU: Flow = Flow::Branching(false);
const RT: Flow = Flow::Returning;

const fn op(text: &'static str, shape: Shape, len: u8, flow: Flow, kind: Kind) -> Op {
    Op {
        text,
        shape,
        len,
        flow,
        kind,
    }
}

const fn one(text: &'static str) -> Op {
    op(text, Plain, 1, N, Legal)
}

const fn imm(text: &'static str) -> Op {
    op(text, Imm8, 2, N, Legal)
}

const fn jmp11() -> Op {
    op("jmp {0}", Addr11, 2, BU, Legal)
}

const fn call11() -> Op {
    op("call {0}", Addr11, 2, N, Legal)
}

const fn jcond(text: &'static str) -> Op {
    op(text, PageRel, 2, BC, Legal)
}

const fn ill() -> Op {
    op("ill", Plain, 1, N, Illegal)
}

pub fn opcode(byte: u8) -> &'static Op {
    &OPCODES[byte as usize]
}

#[rustfmt::skip]
pub static OPCODES: [Op; 256] = [
    // 0x00
    one("nop"), ill(), one("outl bus,a"), imm("add a,#{0}"),
    jmp11(), one("en i"), ill(), one("dec a"),
    one("ins a,bus"), one("in a,p1"), one("in a,p2"), ill(),
    one("movd a,p4"), one("movd a,p5"), one("movd a,p6"), one("movd a,p7"),
    // 0x10
    one("inc @r0"), one("inc @r1"), jcond("jb0 {0}"), imm("addc a,#{0}"),
    call11(), one("dis i"), jcond("jtf {0}"), one("inc a"),
    one("inc r0"), one("inc r1"), one("inc r2"), one("inc r3"),
    one("inc r4"), one("inc r5"), one("inc r6"), one("inc r7"),
    // 0x20
    one("xch a,@r0"), one("xch a,@r1"), ill(), imm("mov a,#{0}"),
    jmp11(), one("en tcnti"), jcond("jnt0 {0}"), one("clr a"),
    one("xch a,r0"), one("xch a,r1"), one("xch a,r2"), one("xch a,r3"),
    one("xch a,r4"), one("xch a,r5"), one("xch a,r6"), one("xch a,r7"),
    // 0x30
    one("xchd a,@r0"), one("xchd a,@r1"), jcond("jb1 {0}"), ill(),
    call11(), one("dis tcnti"), jcond("jt0 {0}"), one("cpl a"),
    ill(), one("outl p1,a"), one("outl p2,a"), ill(),
    one("movd p4,a"), one("movd p5,a"), one("movd p6,a"), one("movd p7,a"),
    // 0x40
    one("orl a,@r0"), one("orl a,@r1"), one("mov a,t"), imm("orl a,#{0}"),
    jmp11(), one("strt cnt"), jcond("jnt1 {0}"), one("swap a"),
    one("orl a,r0"), one("orl a,r1"), one("orl a,r2"), one("orl a,r3"),
    one("orl a,r4"), one("orl a,r5"), one("orl a,r6"), one("orl a,r7"),
    // 0x50
    one("anl a,@r0"), one("anl a,@r1"), jcond("jb2 {0}"), imm("anl a,#{0}"),
    call11(), one("strt t"), jcond("jt1 {0}"), one("da a"),
    one("anl a,r0"), one("anl a,r1"), one("anl a,r2"), one("anl a,r3"),
    one("anl a,r4"), one("anl a,r5"), one("anl a,r6"), one("anl a,r7"),
    // 0x60
    one("add a,@r0"), one("add a,@r1"), one("mov t,a"), ill(),
    jmp11(), one("stop tcnt"), ill(), one("rrc a"),
    one("add a,r0"), one("add a,r1"), one("add a,r2"), one("add a,r3"),
    one("add a,r4"), one("add a,r5"), one("add a,r6"), one("add a,r7"),
    // 0x70
    one("addc a,@r0"), one("addc a,@r1"), jcond("jb3 {0}"), ill(),
    call11(), one("ent0 clk"), jcond("jf1 {0}"), one("rr a"),
    one("addc a,r0"), one("addc a,r1"), one("addc a,r2"), one("addc a,r3"),
    one("addc a,r4"), one("addc a,r5"), one("addc a,r6"), one("addc a,r7"),
    // 0x80
    one("movx a,@r0"), one("movx a,@r1"), ill(), op("ret", Plain, 1, RT, Legal),
    jmp11(), one("clr f0"), jcond("jni {0}"), ill(),
    imm("orl bus,#{0}"), imm("orl p1,#{0}"), imm("orl p2,#{0}"), ill(),
    one("orld p4,a"), one("orld p5,a"), one("orld p6,a"), one("orld p7,a"),
    // 0x90
    one("movx @r0,a"), one("movx @r1,a"), jcond("jb4 {0}"), op("retr", Plain, 1, RT, Legal),
    call11(), one("cpl f0"), jcond("jnz {0}"), one("clr c"),
    imm("anl bus,#{0}"), imm("anl p1,#{0}"), imm("anl p2,#{0}"), ill(),
    one("anld p4,a"), one("anld p5,a"), one("anld p6,a"), one("anld p7,a"),
    // 0xA0
    one("mov @r0,a"), one("mov @r1,a"), ill(), one("movp a,@a"),
    jmp11(), one("clr f1"), ill(), one("cpl c"),
    one("mov r0,a"), one("mov r1,a"), one("mov r2,a"), one("mov r3,a"),
    one("mov r4,a"), one("mov r5,a"), one("mov r6,a"), one("mov r7,a"),
    // 0xB0
    imm("mov @r0,#{0}"), imm("mov @r1,#{0}"), jcond("jb5 {0}"), op("jmpp @a", Plain, 1, BU, Legal),
    call11(), one("cpl f1"), jcond("jf0 {0}"), ill(),
    imm("mov r0,#{0}"), imm("mov r1,#{0}"), imm("mov r2,#{0}"), imm("mov r3,#{0}"),
    imm("mov r4,#{0}"), imm("mov r5,#{0}"), imm("mov r6,#{0}"), imm("mov r7,#{0}"),
    // 0xC0
    ill(), ill(), ill(), ill(),
    jmp11(), one("sel rb0"), jcond("jz {0}"), one("mov a,psw"),
    one("dec r0"), one("dec r1"), one("dec r2"), one("dec r3"),
    one("dec r4"), one("dec r5"), one("dec r6"), one("dec r7"),
    // 0xD0
    one("xrl a,@r0"), one("xrl a,@r1"), jcond("jb6 {0}"), imm("xrl a,#{0}"),
    call11(), one("sel rb1"), ill(), one("mov psw,a"),
    one("xrl a,r0"), one("xrl a,r1"), one("xrl a,r2"), one("xrl a,r3"),
    one("xrl a,r4"), one("xrl a,r5"), one("xrl a,r6"), one("xrl a,r7"),
    // 0xE0
    ill(), ill(), ill(), one("movp3 a,@a"),
    jmp11(), one("sel mb0"), jcond("jnc {0}"), one("rl a"),
    jcond("djnz r0,{0}"), jcond("djnz r1,{0}"), jcond("djnz r2,{0}"), jcond("djnz r3,{0}"),
    jcond("djnz r4,{0}"), jcond("djnz r5,{0}"), jcond("djnz r6,{0}"), jcond("djnz r7,{0}"),
    // 0xF0
    one("mov a,@r0"), one("mov a,@r1"), jcond("jb7 {0}"), ill(),
    call11(), one("sel mb1"), jcond("jc {0}"), one("rlc a"),
    one("mov a,r0"), one("mov a,r1"), one("mov a,r2"), one("mov a,r3"),
    one("mov a,r4"), one("mov a,r5"), one("mov a,r6"), one("mov a,r7"),
];
