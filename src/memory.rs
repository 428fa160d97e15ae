use crate::error::{Chip8Error, Result};
use std::io;

// NB. addresses are u16 as per the chip-8; lengths are usize to stop endless casting

/// Represents the memory map. Every address is wrapped into range, so
/// nothing a program does can read or write outside of memory.
pub trait MemoryMap {
    /// read one byte
    fn read_byte(&self, addr: u16) -> u8;

    /// write one byte
    fn write_byte(&mut self, addr: u16, value: u8);

    /// write a chunk of bytes, wrapping at the top of memory
    fn write(&mut self, data: &[u8], addr: u16) {
        for (offset, byte) in data.iter().enumerate() {
            self.write_byte(addr.wrapping_add(offset as u16), *byte);
        }
    }

    /// get a big-endian two-byte word (instructions)
    fn read_word(&self, addr: u16) -> u16 {
        u16::from_be_bytes([self.read_byte(addr), self.read_byte(addr.wrapping_add(1))])
    }
}

/// how much RAM we have
pub const CHIP8_RAM_SIZE_BYTES: usize = 4096;

/// mask applied to every address
pub const CHIP8_ADDR_MASK: u16 = 0x0fff;

/// where the program is loaded
pub const CHIP8_PROGRAM_ADDR: u16 = 0x0200;

/// largest program that fits between 0x200 and the top of RAM
pub const CHIP8_MAX_PROGRAM_BYTES: usize = CHIP8_RAM_SIZE_BYTES - CHIP8_PROGRAM_ADDR as usize;

/// where the hex digit glyphs live
pub const CHIP8_FONT_ADDR: u16 = 0x050;

/// bytes per glyph
pub const CHIP8_FONT_GLYPH_BYTES: u16 = 5;

/// 16 glyphs, 0-9 then A-F, 5 rows each, high nibble only
#[rustfmt::skip]
pub const CHIP8_FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// CHIP-8 memory layout as this interpreter sees it:
///   0x0000-0x004f  unused
///   0x0050-0x009f  font (written once, never touched by instructions in
///                  well-behaved programs; not enforced)
///   0x00a0-0x01ff  unused
///   0x0200-0x0fff  program
///
/// the call stack and display live outside of memory
pub struct Chip8MemoryMap {
    bytes: Box<[u8]>,
}

impl MemoryMap for Chip8MemoryMap {
    fn read_byte(&self, addr: u16) -> u8 {
        self.bytes[(addr & CHIP8_ADDR_MASK) as usize]
    }

    fn write_byte(&mut self, addr: u16, value: u8) {
        self.bytes[(addr & CHIP8_ADDR_MASK) as usize] = value;
    }
}

impl Chip8MemoryMap {
    /// zeroed memory with the font baked in
    pub fn new() -> Self {
        let mut mm = Chip8MemoryMap {
            bytes: vec![0u8; CHIP8_RAM_SIZE_BYTES].into_boxed_slice(),
        };
        mm.write(&CHIP8_FONT, CHIP8_FONT_ADDR);
        mm
    }

    /// copy a program image in at 0x200. anything that doesn't fit below
    /// the top of memory is dropped; returns how many bytes were copied
    pub fn load_bytes(&mut self, image: &[u8]) -> usize {
        let len = image.len().min(CHIP8_MAX_PROGRAM_BYTES);
        let start = CHIP8_PROGRAM_ADDR as usize;
        self.bytes[start..start + len].copy_from_slice(&image[..len]);
        len
    }

    /// read a whole program image and load it, refusing anything oversized
    pub fn load_program(&mut self, reader: &mut impl io::Read) -> Result<usize> {
        let mut buf = Vec::new();
        let len = reader.read_to_end(&mut buf)?;
        if len > CHIP8_MAX_PROGRAM_BYTES {
            return Err(Chip8Error::ProgramTooLarge {
                len,
                max: CHIP8_MAX_PROGRAM_BYTES,
            });
        }
        log::debug!("loaded {} byte program at {:#05x}", len, CHIP8_PROGRAM_ADDR);
        Ok(self.load_bytes(&buf))
    }

    /// r/o view of a range; panics if the range runs off the end
    #[cfg(test)]
    pub(crate) fn get_ro_slice(&self, addr: u16, len: usize) -> &[u8] {
        let a = addr as usize;
        &self.bytes[a..(a + len)]
    }
}

impl Default for Chip8MemoryMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_memory_zeroed() {
        let m = Chip8MemoryMap::new();
        // NB. memory is zeroed apart from the font
        assert_eq!(m.bytes[..0x50], [0; 0x50]);
        assert_eq!(m.bytes[0xa0..], [0; 0xf60]);
    }

    #[test]
    fn test_font_loaded() {
        let m = Chip8MemoryMap::new();
        assert_eq!(m.get_ro_slice(0x50, 80), &CHIP8_FONT);
    }

    #[test]
    fn test_write_slice_ok() {
        let mut dst = Chip8MemoryMap::new();
        dst.write(&[0, 1, 2, 3, 4, 5, 6, 7], 8);
        assert_eq!(
            dst.bytes[..16],
            [0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 3, 4, 5, 6, 7]
        );
    }

    #[test]
    fn test_write_wraps_at_top() {
        let mut dst = Chip8MemoryMap::new();
        dst.write(&[0xaa, 0xbb, 0xcc], 0xffe);
        assert_eq!(dst.read_byte(0xffe), 0xaa);
        assert_eq!(dst.read_byte(0xfff), 0xbb);
        assert_eq!(dst.read_byte(0x000), 0xcc);
    }

    #[test]
    fn test_addresses_masked() {
        let mut m = Chip8MemoryMap::new();
        m.write_byte(0x1234, 0x42);
        assert_eq!(m.read_byte(0x0234), 0x42);
    }

    #[test]
    fn test_read_word() {
        let mut m = Chip8MemoryMap::new();
        m.write(&[0, 1, 2, 3, 4, 5, 6, 7], 0x300);
        assert_eq!(m.read_word(0x304), 0x0405);
    }

    #[test]
    fn test_read_word_wraps() {
        let mut m = Chip8MemoryMap::new();
        m.write_byte(0xfff, 0x12);
        m.write_byte(0x000, 0x34);
        assert_eq!(m.read_word(0xfff), 0x1234);
    }

    #[test]
    fn test_program_load_ok() -> Result<()> {
        let mut dst = Chip8MemoryMap::new();
        let mut prog: &[u8] = &[0x00, 0xe0]; // clear screen
        assert_eq!(dst.load_program(&mut prog)?, 2);
        assert_eq!(dst.get_ro_slice(0x200, 2), &[0x00, 0xe0]);
        Ok(())
    }

    #[test]
    fn test_program_load_full_size_ok() -> Result<()> {
        let mut dst = Chip8MemoryMap::new();
        let image = vec![0xa5; CHIP8_MAX_PROGRAM_BYTES];
        let mut prog: &[u8] = &image;
        assert_eq!(dst.load_program(&mut prog)?, 3584);
        assert_eq!(dst.read_byte(0xfff), 0xa5);
        Ok(())
    }

    #[test]
    fn test_program_load_too_big() {
        let mut dst = Chip8MemoryMap::new();
        let image = vec![0; CHIP8_MAX_PROGRAM_BYTES + 1];
        let mut prog: &[u8] = &image;
        match dst.load_program(&mut prog) {
            Err(Chip8Error::ProgramTooLarge { len, max }) => {
                assert_eq!(len, 3585);
                assert_eq!(max, 3584);
            }
            other => panic!("expected ProgramTooLarge, got {:?}", other),
        }
        // nothing was copied
        assert_eq!(dst.read_byte(0x200), 0);
    }

    #[test]
    fn test_load_bytes_truncates() {
        let mut dst = Chip8MemoryMap::new();
        let image = vec![0x11; CHIP8_MAX_PROGRAM_BYTES + 10];
        assert_eq!(dst.load_bytes(&image), CHIP8_MAX_PROGRAM_BYTES);
        // didn't wrap round into the font
        assert_eq!(dst.get_ro_slice(0x50, 80), &CHIP8_FONT);
    }

    proptest! {
        #[test]
        fn test_load_round_trip(image in proptest::collection::vec(any::<u8>(), 0..=CHIP8_MAX_PROGRAM_BYTES)) {
            let mut m = Chip8MemoryMap::new();
            m.load_bytes(&image);
            prop_assert_eq!(m.get_ro_slice(0x200, image.len()), image.as_slice());
            prop_assert_eq!(m.get_ro_slice(0x50, 80), &CHIP8_FONT[..]);
        }
    }
}
