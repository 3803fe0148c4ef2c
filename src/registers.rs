use serde::{Deserialize, Serialize};

/// Register file a 5-bit register index is interpreted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegBank {
    Integer,
    Float,
    Coprocessor,
}

/// Conventional display name of register `index` in `bank`.
///
/// Integer registers follow the window layout of the V8 manual (chapter 4):
///
/// ```text
/// r[0]  - r[7]   => %g0 - %g7
/// r[8]  - r[15]  => %o0 - %o7
/// r[16] - r[23]  => %l0 - %l7
/// r[24] - r[31]  => %i0 - %i7
/// ```
///
/// Coprocessor registers are shown with the `%f` prefix, same as floating-point.
pub fn reg_name(bank: RegBank, index: u8) -> String {
    match bank {
        RegBank::Integer => int_name(index),
        RegBank::Float | RegBank::Coprocessor => format!("%f{index}"),
    }
}

pub fn int_name(index: u8) -> String {
    let group = match index {
        0..=7 => 'g',
        8..=15 => 'o',
        16..=23 => 'l',
        _ => 'i',
    };
    format!("%{group}{}", index % 8)
}
