pub mod decoder;
pub mod disasm;
pub mod fields;
pub mod opcodes;
pub mod registers;

pub mod isa {
    pub mod v8; // SPARC V8 integer unit, FPU and coprocessor encodings
}

pub use decoder::{DecodeError, Decoded, Decoder, Instruction, Operand};
pub use isa::v8::V8Decoder;

/// Decodes four big-endian instruction bytes located at `pc` into assembly text.
pub fn disassemble(bytes: &[u8], pc: u32) -> Result<String, DecodeError> {
    V8Decoder::new().decode_bytes(bytes, pc).map(|d| d.to_string())
}
