//! Opcode tables, one per instruction family (manual appendix B).
//!
//! Format 3 families are probed in a fixed order and the first hit wins.
//! The tables within one `op` value never claim the same `op3`.

use serde::{Deserialize, Serialize};

use crate::decoder::SpecialReg;

/// Register a load writes or a store reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataReg {
    Int,
    Float,
    Coproc,
    Special(SpecialReg),
}

/// Operand layout of an opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Form {
    /// `mn [ addr ], reg`
    Load(DataReg),
    /// `mn reg, [ addr ]`
    Store(DataReg),
    /// `mn rs1, reg_or_imm, rd`
    Arith,
    /// `mn addr, rd`
    JumpLink,
    /// `mn state, rd`
    ReadState,
    /// `mn rs1, reg_or_imm, state`
    WriteState,
    /// `mn frs1, frs2, frd`
    FpBinary,
    /// `mn frs2, frd`
    FpUnary,
    /// `mn frs1, frs2`
    FpCompare,
    /// `mn addr`
    AddressOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpDesc {
    /// `op3`, or `opf` for the FPop tables.
    pub code: u16,
    pub mnemonic: &'static str,
    pub form: Form,
}

const fn d(code: u16, mnemonic: &'static str, form: Form) -> OpDesc {
    OpDesc { code, mnemonic, form }
}

use DataReg::{Coproc, Float, Int};
use Form::*;

// B.1, B.7, B.8
pub const LOAD_INT: &[OpDesc] = &[
    d(0b001001, "ldsb", Load(Int)),
    d(0b001010, "ldsh", Load(Int)),
    d(0b000001, "ldub", Load(Int)),
    d(0b000010, "lduh", Load(Int)),
    d(0b000000, "ld", Load(Int)),
    d(0b000011, "ldd", Load(Int)),
    d(0b011001, "ldsba", Load(Int)),
    d(0b011010, "ldsha", Load(Int)),
    d(0b010001, "lduba", Load(Int)),
    d(0b010010, "lduha", Load(Int)),
    d(0b010000, "lda", Load(Int)),
    d(0b010011, "ldda", Load(Int)),
    d(0b001101, "ldstub", Load(Int)),
    d(0b011101, "ldstub", Load(Int)),
    d(0b001111, "swap", Load(Int)),
    d(0b011111, "swapa", Load(Int)),
];

// B.2
pub const LOAD_FLOAT: &[OpDesc] = &[
    d(0b100000, "ld", Load(Float)),
    d(0b100011, "ldd", Load(Float)),
    d(0b100001, "ld", Load(DataReg::Special(SpecialReg::Fsr))),
];

// B.3
pub const LOAD_COPROC: &[OpDesc] = &[
    d(0b110000, "ld", Load(Coproc)),
    d(0b110011, "ldd", Load(Coproc)),
    d(0b110001, "ld", Load(DataReg::Special(SpecialReg::Csr))),
];

// B.4
pub const STORE_INT: &[OpDesc] = &[
    d(0b000101, "stb", Store(Int)),
    d(0b000110, "sth", Store(Int)),
    d(0b000100, "st", Store(Int)),
    d(0b000111, "std", Store(Int)),
    d(0b010101, "stba", Store(Int)),
    d(0b010110, "stha", Store(Int)),
    d(0b010100, "sta", Store(Int)),
    d(0b010111, "stda", Store(Int)),
];

// B.5
pub const STORE_FLOAT: &[OpDesc] = &[
    d(0b100100, "st", Store(Float)),
    d(0b100111, "std", Store(Float)),
    d(0b100101, "st", Store(DataReg::Special(SpecialReg::Fsr))),
    d(0b100110, "std", Store(DataReg::Special(SpecialReg::Fq))),
];

// B.6
pub const STORE_COPROC: &[OpDesc] = &[
    d(0b110100, "st", Store(Coproc)),
    d(0b110111, "std", Store(Coproc)),
    d(0b110101, "st", Store(DataReg::Special(SpecialReg::Csr))),
    d(0b110110, "std", Store(DataReg::Special(SpecialReg::Cq))),
];

// B.11 - B.20
pub const ARITH: &[OpDesc] = &[
    d(0b000001, "and", Arith),
    d(0b010001, "andcc", Arith),
    d(0b000101, "andn", Arith),
    d(0b010101, "andncc", Arith),
    d(0b000010, "or", Arith),
    d(0b010010, "orcc", Arith),
    d(0b000110, "orn", Arith),
    d(0b010110, "orncc", Arith),
    d(0b000011, "xor", Arith),
    d(0b010011, "xorcc", Arith),
    d(0b000111, "xnor", Arith),
    d(0b010111, "xnorcc", Arith),
    d(0b100101, "sll", Arith),
    d(0b100110, "srl", Arith),
    d(0b100111, "sra", Arith),
    d(0b000000, "add", Arith),
    d(0b010000, "addcc", Arith),
    d(0b001000, "addx", Arith),
    d(0b011000, "addxcc", Arith),
    d(0b100000, "taddcc", Arith),
    d(0b100010, "taddcctv", Arith),
    d(0b000100, "sub", Arith),
    d(0b010100, "subcc", Arith),
    d(0b001100, "subx", Arith),
    d(0b011100, "subxcc", Arith),
    d(0b100001, "tsubcc", Arith),
    d(0b100011, "tsubcctv", Arith),
    d(0b100100, "mulscc", Arith),
    d(0b001010, "umul", Arith),
    d(0b001011, "smul", Arith),
    d(0b011010, "umulcc", Arith),
    d(0b011011, "smulcc", Arith),
    d(0b001110, "udiv", Arith),
    d(0b001111, "sdiv", Arith),
    d(0b011110, "udivcc", Arith),
    d(0b011111, "sdivcc", Arith),
    d(0b111100, "save", Arith),
    d(0b111101, "restore", Arith),
];

// B.25
pub const JUMP_LINK: &[OpDesc] = &[d(0b111000, "jmpl", JumpLink)];

// B.28
pub const READ_STATE: &[OpDesc] = &[
    d(0b101000, "rd", ReadState),
    d(0b101001, "rd", ReadState),
    d(0b101010, "rd", ReadState),
    d(0b101011, "rd", ReadState),
];

// B.29
pub const WRITE_STATE: &[OpDesc] = &[
    d(0b110000, "wr", WriteState),
    d(0b110001, "wr", WriteState),
    d(0b110010, "wr", WriteState),
    d(0b110011, "wr", WriteState),
];

pub const OP3_FPOP1: u8 = 0b110100;
pub const OP3_FPOP2: u8 = 0b110101;

// B.33, keyed by opf
pub const FPOP1: &[OpDesc] = &[
    d(0b001000001, "fadds", FpBinary),
    d(0b001000010, "faddd", FpBinary),
    d(0b001000101, "fsubs", FpBinary),
    d(0b001000110, "fsubd", FpBinary),
    d(0b001001001, "fmuls", FpBinary),
    d(0b001001010, "fmuld", FpBinary),
    d(0b001001101, "fdivs", FpBinary),
    d(0b001001110, "fdivd", FpBinary),
    d(0b000000001, "fmovs", FpUnary),
    d(0b000000101, "fnegs", FpUnary),
    d(0b000001001, "fabss", FpUnary),
    d(0b011010001, "fstoi", FpUnary),
    d(0b011010010, "fdtoi", FpUnary),
    d(0b011001001, "fstod", FpUnary),
    d(0b011000110, "fdtos", FpUnary),
    d(0b011000100, "fitos", FpUnary),
    d(0b011001000, "fitod", FpUnary),
    d(0b000101001, "fsqrts", FpUnary),
    d(0b000101010, "fsqrtd", FpUnary),
];

pub const FPOP2: &[OpDesc] = &[
    d(0b001010001, "fcmps", FpCompare),
    d(0b001010010, "fcmpd", FpCompare),
    d(0b001010101, "fcmpes", FpCompare),
    d(0b001010110, "fcmped", FpCompare),
];

// B.26, B.32
pub const TRAP_RETURN: &[OpDesc] = &[
    d(0b111001, "rett", AddressOnly),
    d(0b111011, "flush", AddressOnly),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Family {
    LoadInt,
    LoadFloat,
    LoadCoproc,
    StoreInt,
    StoreFloat,
    StoreCoproc,
    Arith,
    JumpLink,
    ReadState,
    WriteState,
    FpOperate,
    FpCompare,
    TrapReturn,
}

/// Probe order for `op=3`.
pub const MEMORY_FAMILIES: [Family; 6] = [
    Family::LoadInt,
    Family::LoadFloat,
    Family::LoadCoproc,
    Family::StoreInt,
    Family::StoreFloat,
    Family::StoreCoproc,
];

/// Probe order for `op=2`.
pub const ARITH_FAMILIES: [Family; 7] = [
    Family::Arith,
    Family::JumpLink,
    Family::ReadState,
    Family::WriteState,
    Family::FpOperate,
    Family::FpCompare,
    Family::TrapReturn,
];

fn find(table: &'static [OpDesc], code: u16) -> Option<&'static OpDesc> {
    table.iter().find(|e| e.code == code)
}

impl Family {
    pub fn table(self) -> &'static [OpDesc] {
        match self {
            Family::LoadInt => LOAD_INT,
            Family::LoadFloat => LOAD_FLOAT,
            Family::LoadCoproc => LOAD_COPROC,
            Family::StoreInt => STORE_INT,
            Family::StoreFloat => STORE_FLOAT,
            Family::StoreCoproc => STORE_COPROC,
            Family::Arith => ARITH,
            Family::JumpLink => JUMP_LINK,
            Family::ReadState => READ_STATE,
            Family::WriteState => WRITE_STATE,
            Family::FpOperate => FPOP1,
            Family::FpCompare => FPOP2,
            Family::TrapReturn => TRAP_RETURN,
        }
    }

    /// Whether this family owns `op3`, independent of any `opf` sub-opcode.
    pub fn claims(self, op3: u8) -> bool {
        match self {
            Family::FpOperate => op3 == OP3_FPOP1,
            Family::FpCompare => op3 == OP3_FPOP2,
            _ => find(self.table(), op3 as u16).is_some(),
        }
    }

    pub fn lookup(self, op3: u8, opf: u16) -> Option<&'static OpDesc> {
        match self {
            Family::FpOperate | Family::FpCompare => {
                if self.claims(op3) {
                    find(self.table(), opf)
                } else {
                    None
                }
            }
            _ => find(self.table(), op3 as u16),
        }
    }
}

/// Families probed for a format 3 word with the given `op`.
pub fn families(op: u8) -> &'static [Family] {
    match op {
        3 => &MEMORY_FAMILIES,
        2 => &ARITH_FAMILIES,
        _ => &[],
    }
}

/// Ordered guarded dispatch: the first family with a match wins.
pub fn resolve(op: u8, op3: u8, opf: u16) -> Option<(Family, &'static OpDesc)> {
    families(op)
        .iter()
        .find_map(|&fam| fam.lookup(op3, opf).map(|desc| (fam, desc)))
}

// B.21, indexed by cond
const BICC: [&str; 16] = [
    "bn", "be", "ble", "bl", "bleu", "bcs", "bneg", "bvs",
    "ba", "bne", "bg", "bge", "bgu", "bcc", "bpos", "bvc",
];

// B.22
const FBFCC: [&str; 16] = [
    "fbn", "fbne", "fblg", "fbul", "fbl", "fbug", "fbg", "fbu",
    "fba", "fbe", "fbue", "fbge", "fbuge", "fble", "fbule", "fbo",
];

// B.23
const CBCCC: [&str; 16] = [
    "cbn", "cb123", "cb12", "cb13", "cb1", "cb23", "cb2", "cb3",
    "cba", "cb0", "cb03", "cb02", "cb023", "cb01", "cb013", "cb012",
];

pub const OP2_UNIMP: u8 = 0;
pub const OP2_BICC: u8 = 2;
pub const OP2_SETHI: u8 = 4;
pub const OP2_FBFCC: u8 = 6;
pub const OP2_CBCCC: u8 = 7;

/// Branch mnemonic for `op2`/`cond`; `None` when `op2` is not a branch.
pub fn branch(op2: u8, cond: u8) -> Option<&'static str> {
    let table = match op2 {
        OP2_BICC => &BICC,
        OP2_FBFCC => &FBFCC,
        OP2_CBCCC => &CBCCC,
        _ => return None,
    };
    table.get(cond as usize).copied()
}
