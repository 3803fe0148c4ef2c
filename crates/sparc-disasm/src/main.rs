use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use std::path::Path;

use sparc_disasm::{is_mapped, load_raw_bin, render_text, sweep, Image};

#[derive(Parser, Debug)]
#[command(author, version, about = "Linear-sweep disassembler for raw SPARC V8 code images", long_about = None)]
struct Cli {
    /// Address of the first loaded byte (hex or dec, word aligned)
    #[arg(long, default_value = "0")]
    base: String,
    /// Bytes to drop from the front of the file, e.g. a boot header
    #[arg(long, default_value_t = 0usize)]
    skip: usize,
    /// Raw big-endian code image
    #[arg(value_name = "IMAGE")]
    input: String,
    /// Bytes to load after --skip (default: rest of file)
    #[arg(long)]
    len: Option<usize>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the loaded image: address range and word count
    Sections,
    /// Decode every word in [start, end)
    Range {
        /// First address (hex or dec, word aligned)
        start: String,
        /// End address (hex or dec, exclusive)
        end: String,
        /// Prefix each line with its four instruction bytes
        #[arg(long)]
        show_bytes: bool,
        /// Listing format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Write the listing here instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat { Text, Json }

fn parse_u32(s: &str) -> Result<u32> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Ok(u32::from_str_radix(hex, 16)?)
    } else {
        Ok(s.parse::<u32>()?)
    }
}

fn render_sections(img: &Image) -> String {
    let mut buf = format!("{:<8} {:<10} {:<10} {}\n", "name", "start", "end", "words");
    for s in &img.segments {
        buf += &format!("{:<8} {:#010x} {:#010x} {}\n", s.name, s.base, s.end(), s.words());
    }
    buf
}

fn check_range(img: &Image, start: u32, end: u32) -> Result<()> {
    anyhow::ensure!(end >= start, "end must be >= start");
    anyhow::ensure!(start % 4 == 0, "start {start:#x} is not word aligned");
    anyhow::ensure!(start == end || is_mapped(img, start), "start {start:#010x} is outside the image");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let base = parse_u32(&cli.base)?;
    let img = load_raw_bin(Path::new(&cli.input), base, cli.skip, cli.len)?;

    match cli.cmd {
        Command::Sections => print!("{}", render_sections(&img)),
        Command::Range { start, end, show_bytes, format, out } => {
            let start = parse_u32(&start)?;
            let end = parse_u32(&end)?;
            check_range(&img, start, end)?;

            let listing = sweep(&img, start, end);
            let buf = match format {
                OutputFormat::Text => render_text(&listing, show_bytes),
                OutputFormat::Json => serde_json::to_string_pretty(&listing)? + "\n",
            };
            if let Some(path) = out { std::fs::write(path, buf)?; } else { print!("{}", buf); }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparc_disasm::Segment;

    #[test]
    fn parse_u32_hex_and_dec() {
        assert_eq!(parse_u32("0x10").unwrap(), 0x10);
        assert_eq!(parse_u32("0XfF").unwrap(), 0xFF);
        assert_eq!(parse_u32("16").unwrap(), 16);
        assert!(parse_u32("zz").is_err());
    }

    fn image(base: u32, len: usize) -> Image {
        Image { segments: vec![Segment { name: ".text".into(), base, bytes: vec![0; len] }] }
    }

    #[test]
    fn cli_parses_range() {
        let cli = Cli::try_parse_from(["sparc-disasm", "--base", "0x40000000", "a.bin", "range", "0x40000000", "0x40000010", "--format", "json"]).unwrap();
        assert_eq!(parse_u32(&cli.base).unwrap(), 0x4000_0000);
        assert!(matches!(cli.cmd, Command::Range { format: OutputFormat::Json, .. }));
    }

    #[test]
    fn sections_show_word_count() {
        let text = render_sections(&image(0x4000_0000, 10));
        assert_eq!(text, "name     start      end        words\n.text    0x40000000 0x4000000a 2\n");
    }

    #[test]
    fn range_must_start_inside_image() {
        let img = image(0x1000, 8);
        assert!(check_range(&img, 0x1000, 0x1008).is_ok());
        assert!(check_range(&img, 0x1004, 0x1004).is_ok());
        assert!(check_range(&img, 0x0FFC, 0x1008).is_err());
        assert!(check_range(&img, 0x2000, 0x2004).is_err());
        assert!(check_range(&img, 0x1002, 0x1008).is_err());
        assert!(check_range(&img, 0x1008, 0x1000).is_err());
    }
}
