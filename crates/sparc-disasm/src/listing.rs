use serde::Serialize;
use std::fmt::Write as _;

use sparc_rs::decoder::Decoder;
use sparc_rs::disasm::fmt_decoded;
use sparc_rs::{Instruction, V8Decoder};

use crate::model::{read_u32, Image};

#[derive(Debug, Clone, Serialize)]
pub struct Line {
    pub addr: u32,
    pub bytes: [u8; 4],
    pub text: String,
    /// `None` when the word did not resolve to an instruction.
    pub insn: Option<Instruction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub lines: Vec<Line>,
    /// First address of the range that fell outside the image, if any.
    pub oob: Option<u32>,
}

/// Linear sweep over `[start, end)` in word steps.
pub fn sweep(img: &Image, start: u32, end: u32) -> Listing {
    let dec = V8Decoder::new();
    let mut lines = Vec::new();
    let mut pc = start;
    while pc < end {
        let Some(word) = read_u32(img, pc) else {
            return Listing { lines, oob: Some(pc) };
        };
        let bytes = word.to_be_bytes();
        let line = match dec.decode(word, pc) {
            Ok(d) => Line { addr: pc, bytes, text: fmt_decoded(&d), insn: Some(d.insn) },
            Err(e) => {
                tracing::debug!("{pc:#010x}: {e}");
                Line { addr: pc, bytes, text: format!(".word {word:#010x}"), insn: None }
            }
        };
        lines.push(line);
        let Some(next) = pc.checked_add(4) else { break };
        pc = next;
    }
    Listing { lines, oob: None }
}

pub fn render_text(listing: &Listing, show_bytes: bool) -> String {
    let mut buf = String::new();
    for l in &listing.lines {
        let _ = write!(buf, "{:#010x}: ", l.addr);
        if show_bytes {
            for b in l.bytes {
                let _ = write!(buf, "{b:02x} ");
            }
            buf.push_str("  ");
        }
        let _ = writeln!(buf, "{}", l.text);
    }
    if let Some(pc) = listing.oob {
        let _ = writeln!(buf, "{pc:#010x}: <oob>");
    }
    buf
}
