//! Bitfield extraction for the three V8 instruction layouts (manual chapter 5).
//!
//! ```text
//! Format 1 (op=1):  op[31:30] disp30[29:0]
//! Format 2 (op=0):  op[31:30] rd[29:25]            op2[24:22] imm22[21:0]
//!                   op[31:30] a[29] cond[28:25]    op2[24:22] disp22[21:0]
//! Format 3 (op=2/3): op[31:30] rd[29:25] op3[24:19] rs1[18:14] i[13] simm13[12:0]
//!                                                   rs1[18:14] i[13] asi[12:5] rs2[4:0]
//!                                                   rs1[18:14] opf[13:5]       rs2[4:0]
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Format {
    /// CALL
    Call,
    /// SETHI, branches and UNIMP
    SethiBranch,
    /// Arithmetic, control and memory instructions
    ArithMem,
}

#[inline]
pub fn op(word: u32) -> u8 {
    (word >> 30) as u8
}

#[inline]
pub fn op2(word: u32) -> u8 {
    ((word & 0x01C0_0000) >> 22) as u8
}

#[inline]
pub fn op3(word: u32) -> u8 {
    ((word & 0x01F8_0000) >> 19) as u8
}

#[inline]
pub fn rd(word: u32) -> u8 {
    ((word & 0x3E00_0000) >> 25) as u8
}

#[inline]
pub fn rs1(word: u32) -> u8 {
    ((word & 0x0007_C000) >> 14) as u8
}

#[inline]
pub fn rs2(word: u32) -> u8 {
    (word & 0x0000_001F) as u8
}

#[inline]
pub fn i(word: u32) -> bool {
    word & 0x0000_2000 != 0
}

#[inline]
pub fn a(word: u32) -> bool {
    word & 0x2000_0000 != 0
}

#[inline]
pub fn cond(word: u32) -> u8 {
    ((word & 0x1E00_0000) >> 25) as u8
}

#[inline]
pub fn opf(word: u32) -> u16 {
    ((word & 0x0000_3FE0) >> 5) as u16
}

#[inline]
pub fn imm22(word: u32) -> u32 {
    word & 0x003F_FFFF
}

#[inline]
pub fn disp30(word: u32) -> u32 {
    word & 0x3FFF_FFFF
}

/// Sign-extends a 22-bit displacement.
///
/// The fill is keyed on bit 17 (`0x20000`) and covers bits 31..22 only; bits
/// 21..18 are kept as encoded. This matches the reference disassembler
/// bit for bit, including for displacements where bits 21 and 17 disagree.
#[inline]
pub fn sign_ext_disp22(raw: u32) -> u32 {
    let v = raw & 0x003F_FFFF;
    if v & 0x0002_0000 != 0 {
        v | 0xFFC0_0000
    } else {
        v
    }
}

/// Sign-extends a 13-bit immediate from bit 12.
#[inline]
pub fn sign_ext_simm13(raw: u32) -> u32 {
    let v = raw & 0x1FFF;
    if v & 0x1000 != 0 {
        v | 0xFFFF_E000
    } else {
        v
    }
}

pub fn classify(word: u32) -> Format {
    match op(word) {
        1 => Format::Call,
        0 => Format::SethiBranch,
        _ => Format::ArithMem,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Format1Fields {
    pub disp30: u32,
}

/// Format 2 fields. `rd`/`imm22` and `a`/`cond`/`disp22` overlay the same bits;
/// which pair is meaningful depends on `op2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Format2Fields {
    pub op2: u8,
    pub rd: u8,
    pub imm22: u32,
    pub a: bool,
    pub cond: u8,
    /// Already sign-extended, see [`sign_ext_disp22`].
    pub disp22: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Format3Fields {
    pub op: u8,
    pub rd: u8,
    pub op3: u8,
    pub rs1: u8,
    pub i: bool,
    /// Already sign-extended, see [`sign_ext_simm13`].
    pub simm13: u32,
    pub rs2: u8,
    pub opf: u16,
}

impl Format1Fields {
    pub fn extract(word: u32) -> Self {
        Self { disp30: disp30(word) }
    }
}

impl Format2Fields {
    pub fn extract(word: u32) -> Self {
        let raw = imm22(word);
        Self {
            op2: op2(word),
            rd: rd(word),
            imm22: raw,
            a: a(word),
            cond: cond(word),
            disp22: sign_ext_disp22(raw),
        }
    }
}

impl Format3Fields {
    pub fn extract(word: u32) -> Self {
        Self {
            op: op(word),
            rd: rd(word),
            op3: op3(word),
            rs1: rs1(word),
            i: i(word),
            simm13: sign_ext_simm13(word),
            rs2: rs2(word),
            opf: opf(word),
        }
    }
}

/// Field set of one instruction word. Built fresh by every decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum Fields {
    Format1(Format1Fields),
    Format2(Format2Fields),
    Format3(Format3Fields),
}

impl Fields {
    pub fn extract(word: u32) -> Self {
        match classify(word) {
            Format::Call => Fields::Format1(Format1Fields::extract(word)),
            Format::SethiBranch => Fields::Format2(Format2Fields::extract(word)),
            Format::ArithMem => Fields::Format3(Format3Fields::extract(word)),
        }
    }

    pub fn format(&self) -> Format {
        match self {
            Fields::Format1(_) => Format::Call,
            Fields::Format2(_) => Format::SethiBranch,
            Fields::Format3(_) => Format::ArithMem,
        }
    }
}
