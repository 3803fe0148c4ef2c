use pretty_assertions::assert_eq;
use sparc_rs::decoder::{DecodeError, Decoder};
use sparc_rs::isa::v8::V8Decoder;
use sparc_rs::opcodes::ARITH;

// Format 3, op=2: rd[29:25] op3[24:19] rs1[18:14] i[13] simm13/rs2
fn enc_alu(op3: u32, rd: u32, rs1: u32, i: u32, low13: u32) -> u32 {
    (2 << 30) | (rd << 25) | (op3 << 19) | (rs1 << 14) | (i << 13) | (low13 & 0x1FFF)
}

fn text(word: u32) -> String {
    V8Decoder::new().decode(word, 0).expect("decodes").to_string()
}

#[test]
fn add_immediate() {
    assert_eq!(text(enc_alu(0b000000, 2, 1, 1, 5)), "add %g1, 0x5, %g2");
}

#[test]
fn sub_register() {
    assert_eq!(text(enc_alu(0b000100, 9, 8, 0, 10)), "sub %o0, %o2, %o1");
}

#[test]
fn simm13_minus_one_is_full_word() {
    assert_eq!(text(enc_alu(0b000010, 1, 0, 1, 0x1FFF)), "or %g0, 0xFFFFFFFF, %g1");
}

#[test]
fn save_restore() {
    // save %sp, -96, %sp
    assert_eq!(text(0x9DE3_BFA0), "save %o6, 0xFFFFFFA0, %o6");
    assert_eq!(text(enc_alu(0b111101, 0, 0, 0, 0)), "restore %g0, %g0, %g0");
}

#[test]
fn shifts_and_muldiv() {
    assert_eq!(text(enc_alu(0b100101, 3, 3, 1, 2)), "sll %g3, 0x2, %g3");
    assert_eq!(text(enc_alu(0b100111, 4, 4, 1, 31)), "sra %g4, 0x1F, %g4");
    assert_eq!(text(enc_alu(0b011011, 10, 11, 0, 12)), "smulcc %o3, %o4, %o2");
    assert_eq!(text(enc_alu(0b001110, 16, 17, 0, 18)), "udiv %l1, %l2, %l0");
    assert_eq!(text(enc_alu(0b100010, 1, 2, 1, 3)), "taddcctv %g2, 0x3, %g1");
}

#[test]
fn every_alu_opcode_renders_three_operands() {
    for e in ARITH {
        let w = enc_alu(e.code as u32, 1, 2, 0, 3);
        assert_eq!(text(w), format!("{} %g2, %g3, %g1", e.mnemonic));
    }
}

#[test]
fn jmpl_ret_and_retl() {
    assert_eq!(text(0x81C7_E008), "jmpl %i7 + 0x8, %g0");
    assert_eq!(text(0x81C3_E008), "jmpl %o7 + 0x8, %g0");
    assert_eq!(text(enc_alu(0b111000, 15, 1, 0, 2)), "jmpl %g1 + %g2, %o7");
}

#[test]
fn rett_and_flush() {
    assert_eq!(text(enc_alu(0b111001, 0, 18, 1, 0)), "rett %l2 + 0x0");
    assert_eq!(text(enc_alu(0b111011, 0, 1, 0, 2)), "flush %g1 + %g2");
}

#[test]
fn unassigned_alu_op3_is_unresolved() {
    let dec = V8Decoder::new();
    // 0x09/0x0D/0x19/0x1D are unused, 0x2C-0x2F are V9 only, 0x36/0x37 are CPop, 0x3A is Ticc
    for op3 in [0x09u32, 0x0D, 0x19, 0x1D, 0x2C, 0x2F, 0x36, 0x37, 0x3A, 0x3E, 0x3F] {
        let w = enc_alu(op3, 1, 1, 0, 0);
        match dec.decode(w, 0) {
            Err(DecodeError::UnresolvedOpcode { word, .. }) => assert_eq!(word, w),
            other => panic!("op3={op3:#x}: unexpected {other:?}"),
        }
    }
}
