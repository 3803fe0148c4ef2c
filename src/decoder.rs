use serde::{Deserialize, Serialize};

use crate::fields::Fields;
use crate::registers::RegBank;

/// Floating-point and coprocessor state registers reachable by loads and stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialReg {
    Fsr,
    Fq,
    Csr,
    Cq,
}

/// Integer unit state registers of the RD/WR instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateReg {
    Y,
    Asr(u8),
    Psr,
    Wim,
    Tbr,
}

/// `rs1 + rs2` when `i` is clear, `rs1 + simm13` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub rs1: u8,
    pub rs2: u8,
    pub i: bool,
    pub simm13: u32,
    pub bank: RegBank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operand {
    IntReg(u8),
    FloatReg(u8),
    CoprocReg(u8),
    Special(SpecialReg),
    State(StateReg),
    /// Immediate, shown as its 32-bit pattern.
    Imm(u32),
    /// Absolute branch or call target.
    Target(u32),
    /// SETHI value, already shifted into place.
    Hi(u32),
    /// Bracketed effective address of a load or store.
    Memory(Address),
    /// Unbracketed address of JMPL, RETT and FLUSH.
    Address(Address),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instruction {
    pub mnemonic: &'static str,
    /// Annul bit of a branch, rendered as a `,a` suffix.
    pub annul: bool,
    pub operands: Vec<Operand>,
}

impl Instruction {
    pub fn new(mnemonic: &'static str, operands: Vec<Operand>) -> Self {
        Self { mnemonic, annul: false, operands }
    }

    pub fn branch(mnemonic: &'static str, annul: bool, target: u32) -> Self {
        Self { mnemonic, annul, operands: vec![Operand::Target(target)] }
    }
}

/// One decoded word together with the fields it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decoded {
    pub word: u32,
    pub pc: u32,
    pub fields: Fields,
    pub insn: Instruction,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed input: expected 4 instruction bytes, got {len}")]
    MalformedInput { len: usize },
    #[error("unresolved opcode in {word:#010x} ({fields:?})")]
    UnresolvedOpcode { word: u32, fields: Fields },
}

pub trait Decoder {
    fn decode(&self, word: u32, pc: u32) -> Result<Decoded, DecodeError>;

    /// Decodes four big-endian bytes.
    fn decode_bytes(&self, bytes: &[u8], pc: u32) -> Result<Decoded, DecodeError> {
        let raw: [u8; 4] = bytes
            .try_into()
            .map_err(|_| DecodeError::MalformedInput { len: bytes.len() })?;
        self.decode(u32::from_be_bytes(raw), pc)
    }
}
