use tracing::{debug, trace};

use crate::decoder::{Address, Decoded, DecodeError, Decoder, Instruction, Operand, StateReg};
use crate::fields::{Fields, Format1Fields, Format2Fields, Format3Fields};
use crate::opcodes::{self, DataReg, Form, OP2_SETHI, OP2_UNIMP};
use crate::registers::RegBank;

/// SPARC V8 decoder.
///
/// Field layouts follow chapter 5 of the V8 manual, the opcode tables
/// appendix B. Stateless: every call extracts its own field set.
#[derive(Debug, Clone, Copy, Default)]
pub struct V8Decoder;

impl V8Decoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for V8Decoder {
    fn decode(&self, word: u32, pc: u32) -> Result<Decoded, DecodeError> {
        trace!("decode {word:#010x} at {pc:#010x}");
        let fields = Fields::extract(word);
        let insn = match &fields {
            Fields::Format1(f) => Some(call(f, pc)),
            Fields::Format2(f) => format2(f, pc),
            Fields::Format3(f) => format3(f),
        };
        match insn {
            Some(insn) => Ok(Decoded { word, pc, fields, insn }),
            None => {
                debug!("{word:#010x}: no opcode family matched ({fields:?})");
                Err(DecodeError::UnresolvedOpcode { word, fields })
            }
        }
    }
}

fn call(f: &Format1Fields, pc: u32) -> Instruction {
    let target = (f.disp30 << 2).wrapping_add(pc);
    Instruction::new("call", vec![Operand::Target(target)])
}

fn format2(f: &Format2Fields, pc: u32) -> Option<Instruction> {
    match f.op2 {
        OP2_SETHI if f.rd == 0 && f.imm22 == 0 => Some(Instruction::new("nop", vec![])),
        OP2_SETHI => Some(Instruction::new(
            "sethi",
            vec![Operand::Hi(f.imm22 << 10), Operand::IntReg(f.rd)],
        )),
        OP2_UNIMP => Some(Instruction::new("unimp", vec![Operand::Imm(f.disp22)])),
        op2 => {
            let mnemonic = opcodes::branch(op2, f.cond)?;
            let target = (f.disp22 << 2).wrapping_add(pc);
            Some(Instruction::branch(mnemonic, f.a, target))
        }
    }
}

fn format3(f: &Format3Fields) -> Option<Instruction> {
    let (_, desc) = opcodes::resolve(f.op, f.op3, f.opf)?;
    let ops = match desc.form {
        Form::Load(data) => vec![Operand::Memory(address(f)), data_operand(data, f.rd)],
        Form::Store(data) => vec![data_operand(data, f.rd), Operand::Memory(address(f))],
        Form::Arith => vec![Operand::IntReg(f.rs1), operand2(f), Operand::IntReg(f.rd)],
        Form::JumpLink => vec![Operand::Address(address(f)), Operand::IntReg(f.rd)],
        Form::ReadState => vec![
            Operand::State(state_reg(f.op3, f.rs1)),
            Operand::IntReg(f.rd),
        ],
        Form::WriteState => vec![
            Operand::IntReg(f.rs1),
            operand2(f),
            Operand::State(state_reg(f.op3, f.rd)),
        ],
        Form::FpBinary => vec![
            Operand::FloatReg(f.rs1),
            Operand::FloatReg(f.rs2),
            Operand::FloatReg(f.rd),
        ],
        Form::FpUnary => vec![Operand::FloatReg(f.rs2), Operand::FloatReg(f.rd)],
        Form::FpCompare => vec![Operand::FloatReg(f.rs1), Operand::FloatReg(f.rs2)],
        Form::AddressOnly => vec![Operand::Address(address(f))],
    };
    Some(Instruction::new(desc.mnemonic, ops))
}

// Address registers are always integer registers, whatever the data moved.
fn address(f: &Format3Fields) -> Address {
    Address { rs1: f.rs1, rs2: f.rs2, i: f.i, simm13: f.simm13, bank: RegBank::Integer }
}

fn operand2(f: &Format3Fields) -> Operand {
    if f.i {
        Operand::Imm(f.simm13)
    } else {
        Operand::IntReg(f.rs2)
    }
}

fn data_operand(data: DataReg, rd: u8) -> Operand {
    match data {
        DataReg::Int => Operand::IntReg(rd),
        DataReg::Float => Operand::FloatReg(rd),
        DataReg::Coproc => Operand::CoprocReg(rd),
        DataReg::Special(s) => Operand::Special(s),
    }
}

/// State register selected by the low two bits of a RD/WR `op3`.
/// `reg` is `rs1` for reads and `rd` for writes; it only matters for `%y`/`%asr`.
fn state_reg(op3: u8, reg: u8) -> StateReg {
    match op3 & 0b11 {
        0 if reg == 0 => StateReg::Y,
        0 => StateReg::Asr(reg),
        1 => StateReg::Psr,
        2 => StateReg::Wim,
        _ => StateReg::Tbr,
    }
}
