use std::fmt;

use crate::decoder::{Address, Decoded, Instruction, Operand, SpecialReg, StateReg};
use crate::registers::{int_name, reg_name, RegBank};

pub fn fmt_decoded(d: &Decoded) -> String {
    d.insn.to_string()
}

/// Effective address text, e.g. `%g3 + 0x25` or `%l2 + %l3`.
pub fn render_address(rs1: u8, rs2: u8, i: bool, simm13: u32, bank: RegBank) -> String {
    format!("{} + {}", reg_name(bank, rs1), render_operand2(rs2, i, simm13, bank))
}

/// Second ALU operand: `rs2` when `i` is clear, else the sign-extended immediate.
pub fn render_operand2(rs2: u8, i: bool, simm13: u32, bank: RegBank) -> String {
    if i {
        hex(simm13)
    } else {
        reg_name(bank, rs2)
    }
}

fn hex(v: u32) -> String {
    format!("0x{v:X}")
}

impl fmt::Display for SpecialReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SpecialReg::Fsr => "%fsr",
            SpecialReg::Fq => "%fq",
            SpecialReg::Csr => "%csr",
            SpecialReg::Cq => "%cq",
        })
    }
}

impl fmt::Display for StateReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateReg::Y => f.write_str("%y"),
            StateReg::Asr(n) => write!(f, "%asr{n}"),
            StateReg::Psr => f.write_str("%psr"),
            StateReg::Wim => f.write_str("%wim"),
            StateReg::Tbr => f.write_str("%tbr"),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_address(self.rs1, self.rs2, self.i, self.simm13, self.bank))
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::IntReg(r) => f.write_str(&int_name(*r)),
            Operand::FloatReg(r) => f.write_str(&reg_name(RegBank::Float, *r)),
            Operand::CoprocReg(r) => f.write_str(&reg_name(RegBank::Coprocessor, *r)),
            Operand::Special(s) => write!(f, "{s}"),
            Operand::State(s) => write!(f, "{s}"),
            Operand::Imm(v) | Operand::Target(v) => f.write_str(&hex(*v)),
            Operand::Hi(v) => write!(f, "%hi({})", hex(*v)),
            Operand::Memory(a) => write!(f, "[ {a} ]"),
            Operand::Address(a) => write!(f, "{a}"),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic)?;
        if self.annul {
            f.write_str(",a")?;
        }
        for (n, op) in self.operands.iter().enumerate() {
            f.write_str(if n == 0 { " " } else { ", " })?;
            write!(f, "{op}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.insn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn address_register_and_immediate() {
        assert_eq!(render_address(3, 0, true, 0x25, RegBank::Integer), "%g3 + 0x25");
        assert_eq!(render_address(18, 19, false, 0, RegBank::Integer), "%l2 + %l3");
        assert_eq!(render_address(1, 2, false, 0, RegBank::Float), "%f1 + %f2");
        assert_eq!(render_address(30, 0, true, 0xFFFF_FFF8, RegBank::Integer), "%i6 + 0xFFFFFFF8");
    }

    #[test]
    fn operand2_shows_bit_pattern() {
        assert_eq!(render_operand2(5, false, 0, RegBank::Integer), "%g5");
        assert_eq!(render_operand2(0, true, 0xFFFF_FFFF, RegBank::Integer), "0xFFFFFFFF");
        assert_eq!(render_operand2(0, true, 0, RegBank::Integer), "0x0");
    }

    #[test]
    fn instruction_layout() {
        let ret = Instruction::new("nop", vec![]);
        assert_eq!(ret.to_string(), "nop");

        let br = Instruction::branch("bne", true, 0x4000);
        assert_eq!(br.to_string(), "bne,a 0x4000");

        let ld = Instruction::new(
            "ld",
            vec![
                Operand::Memory(Address { rs1: 1, rs2: 2, i: false, simm13: 0, bank: RegBank::Integer }),
                Operand::Special(SpecialReg::Fsr),
            ],
        );
        assert_eq!(ld.to_string(), "ld [ %g1 + %g2 ], %fsr");

        let rd = Instruction::new("rd", vec![Operand::State(StateReg::Asr(17)), Operand::IntReg(9)]);
        assert_eq!(rd.to_string(), "rd %asr17, %o1");

        let sethi = Instruction::new("sethi", vec![Operand::Hi(0x48D1_5800), Operand::IntReg(1)]);
        assert_eq!(sethi.to_string(), "sethi %hi(0x48D15800), %g1");
    }
}
