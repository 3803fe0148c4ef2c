use anyhow::Result;
use clap::Parser;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use sparc_rs::{Decoder, V8Decoder};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Decode SPARC V8 instruction words given on the command line"
)]
struct Opts {
    /// Address of the first word (hex or dec); later words follow at +4
    #[arg(long, default_value = "0")]
    pc: String,
    /// Emit one JSON object per word: fields, typed operands and text
    #[arg(long)]
    json: bool,
    /// Instruction words (hex or dec)
    #[arg(value_name = "WORD", required = true)]
    words: Vec<String>,
}

fn parse_u32(s: &str) -> Result<u32> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Ok(u32::from_str_radix(hex, 16)?)
    } else {
        Ok(s.parse::<u32>()?)
    }
}

fn render_line(dec: &impl Decoder, word: u32, pc: u32, json: bool) -> Result<String> {
    let res = dec.decode(word, pc);
    if !json {
        return Ok(match res {
            Ok(d) => format!("{pc:#010x}: {word:08x}  {d}"),
            Err(e) => format!("{pc:#010x}: {word:08x}  ; {e}"),
        });
    }
    let value = match res {
        Ok(d) => {
            let mut v = serde_json::to_value(&d)?;
            v["text"] = json!(d.to_string());
            v
        }
        Err(e) => json!({ "word": word, "pc": pc, "error": e.to_string() }),
    };
    Ok(serde_json::to_string(&value)?)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();
    let mut pc = parse_u32(&opts.pc)?;
    let dec = V8Decoder::new();

    for w in &opts.words {
        let word = parse_u32(w)?;
        println!("{}", render_line(&dec, word, pc, opts.json)?);
        pc = pc.wrapping_add(4);
    }

    Ok(())
}
