use anyhow::Result;
use std::path::Path;

/// Contiguous run of big-endian instruction words at `base`.
#[derive(Debug, Clone)]
pub struct Segment {
    pub name: String,
    pub base: u32,
    pub bytes: Vec<u8>,
}

impl Segment {
    pub fn end(&self) -> u32 {
        self.base.wrapping_add(self.bytes.len() as u32)
    }

    /// Whole words in the segment; a trailing partial word is not counted.
    pub fn words(&self) -> usize {
        self.bytes.len() / 4
    }
}

#[derive(Debug, Clone)]
pub struct Image {
    pub segments: Vec<Segment>,
}

/// Loads a flat SPARC code image. `base` must be word aligned since every
/// instruction sits on a 4-byte boundary.
pub fn load_raw_bin(path: &Path, base: u32, skip: usize, len: Option<usize>) -> Result<Image> {
    anyhow::ensure!(base % 4 == 0, "--base {base:#x} is not word aligned");
    let file = std::fs::read(path)?;
    anyhow::ensure!(skip <= file.len(), "--skip exceeds file size");
    let mut payload = &file[skip..];
    if let Some(lim) = len {
        anyhow::ensure!(lim <= payload.len(), "--len exceeds remaining file size after skip");
        payload = &payload[..lim];
    }
    if payload.len() % 4 != 0 {
        tracing::warn!("{}: {} trailing bytes do not form a word", path.display(), payload.len() % 4);
    }
    tracing::debug!("loaded {} words from {} at {base:#010x}", payload.len() / 4, path.display());
    let seg = Segment { name: ".text".into(), base, bytes: payload.to_vec() };
    Ok(Image { segments: vec![seg] })
}

fn read_u8(img: &Image, addr: u32) -> Option<u8> {
    img.segments.iter().find_map(|s| {
        let off = addr.checked_sub(s.base)? as usize;
        s.bytes.get(off).copied()
    })
}

/// Word at `addr`, most significant byte first.
pub fn read_u32(img: &Image, addr: u32) -> Option<u32> {
    Some(u32::from_be_bytes([
        read_u8(img, addr)?,
        read_u8(img, addr.wrapping_add(1))?,
        read_u8(img, addr.wrapping_add(2))?,
        read_u8(img, addr.wrapping_add(3))?,
    ]))
}

pub fn is_mapped(img: &Image, addr: u32) -> bool {
    read_u8(img, addr).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loader_maps_skip_and_len() {
        let path = std::env::temp_dir().join("_sparc_disasm_model_test.bin");
        std::fs::write(&path, [0u8, 1, 2, 3, 4, 5, 6]).unwrap();
        let img = load_raw_bin(&path, 0x1000_0000, 1, Some(6)).unwrap();
        assert_eq!(img.segments.len(), 1);
        let s = &img.segments[0];
        assert_eq!(s.name, ".text");
        assert_eq!(s.base, 0x1000_0000);
        assert_eq!(s.end(), 0x1000_0006);
        assert_eq!(s.words(), 1);
        assert_eq!(s.bytes, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(read_u32(&img, 0x1000_0000), Some(0x0102_0304));
        assert!(read_u32(&img, 0x1000_0004).is_none());
        assert!(is_mapped(&img, 0x1000_0005));
        assert!(!is_mapped(&img, 0x0FFF_FFFF));
        assert!(load_raw_bin(&path, 0, 8, None).is_err());
        assert!(load_raw_bin(&path, 0, 2, Some(6)).is_err());
        assert!(load_raw_bin(&path, 0x1002, 0, None).is_err());
        let _ = std::fs::remove_file(&path);
    }
}
