//! Utilities to read a ROM image into memory
//!
//! The loader is the only component that understands the cartridge
//! header. The core consumes just two things from it: an opaque
//! byte-addressable [`Memory`] and the interrupt vector addresses.
//!
//! # Literature
//!
//! - the [super famicom wiki page](https://wiki.superfamicom.org/memory-mapping)

use crate::memory::Memory;

const MINIMUM_SIZE: usize = 0x8000;
const HEADER_SIZE: usize = 64;

/// Candidate in-image offsets of the header block
const HEADER_OFFSETS: [usize; 3] = [0x7fc0, 0xffc0, 0x40ffc0];

#[derive(Debug)]
pub enum HeaderError {
    BadTitle(std::str::Utf8Error),
    UnknownMakeup(u8),
}

impl std::fmt::Display for HeaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::BadTitle(err) => write!(f, "title is not valid utf-8 ({})", err),
            Self::UnknownMakeup(byte) => write!(f, "unknown ROM makeup byte 0x{:02x}", byte),
        }
    }
}

#[derive(Debug)]
pub enum ReadRomError {
    TooSmall(usize),
    AlignError(usize),
    NoSuitableHeader,
}

impl std::fmt::Display for ReadRomError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::TooSmall(size) => write!(f, "file too small ({} < {})", size, MINIMUM_SIZE),
            Self::AlignError(size) => {
                write!(f, "file must be a multiple of 512 in length (got {})", size)
            }
            Self::NoSuitableHeader => write!(f, "no suitable header found"),
        }
    }
}

/// The ROM makeup byte, bank layout and speed combined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RomMakeup {
    LoRom,
    HiRom,
    Sa1Rom,
    LoFastRom,
    HiFastRom,
    ExLoRom,
    ExHiRom,
}

impl RomMakeup {
    pub const fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            0x20 => Self::LoRom,
            0x21 => Self::HiRom,
            0x23 => Self::Sa1Rom,
            0x30 => Self::LoFastRom,
            0x31 => Self::HiFastRom,
            0x32 => Self::ExLoRom,
            0x35 => Self::ExHiRom,
            _ => return None,
        })
    }
}

impl std::fmt::Display for RomMakeup {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(match self {
            Self::LoRom => "lorom",
            Self::HiRom => "hirom",
            Self::Sa1Rom => "sa1rom",
            Self::LoFastRom => "lofastrom",
            Self::HiFastRom => "hifastrom",
            Self::ExLoRom => "exlorom",
            Self::ExHiRom => "exhirom",
        })
    }
}

/// Content classification from the chipset byte.
/// Everything currently maps to plain ROM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RomContentType {
    Rom,
}

impl RomContentType {
    pub const fn from_byte(_byte: u8) -> Self {
        Self::Rom
    }
}

/// One mode's interrupt entry points
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct VectorTable {
    pub cop: u16,
    pub brk: u16,
    pub abort: u16,
    pub nmi: u16,
    pub reset: u16,
    pub irq: u16,
}

/// Native- and emulation-mode vectors, the part the CPU core consumes
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InterruptVectors {
    pub native: VectorTable,
    /// In emulation mode BREAK and IRQ share one vector
    pub emulation: VectorTable,
}

#[derive(Debug, Clone)]
pub struct Header {
    pub title: String,
    pub makeup: RomMakeup,
    pub content: RomContentType,
    pub rom_size: u32,
    pub sram_size: u32,
    pub country: u8,
    pub license: u8,
    pub version: u8,
    pub checksum_complement: u16,
    pub checksum: u16,
    pub vectors: InterruptVectors,
}

fn word(bytes: &[u8], index: usize) -> u16 {
    u16::from_le_bytes([bytes[index], bytes[index + 1]])
}

impl Header {
    /// Parse the 64-byte header block
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, HeaderError> {
        assert_eq!(bytes.len(), HEADER_SIZE);
        let title = std::str::from_utf8(&bytes[..21])
            .map_err(HeaderError::BadTitle)?
            .trim_end_matches(|c| c == ' ' || c == '\0')
            .to_string();
        let makeup =
            RomMakeup::from_byte(bytes[0x15]).ok_or(HeaderError::UnknownMakeup(bytes[0x15]))?;
        let content = RomContentType::from_byte(bytes[0x16]);
        let rom_size = 0x400u32.wrapping_shl(bytes[0x17].into());
        let sram_size = 0x400u32.wrapping_shl(bytes[0x18].into());
        let sram_size = if sram_size == 0x400 { 0 } else { sram_size };
        // vector area: two unused slots lead each table, and the
        // emulation table leaves its fourth slot unused
        let native = VectorTable {
            cop: word(bytes, 0x24),
            brk: word(bytes, 0x26),
            abort: word(bytes, 0x28),
            nmi: word(bytes, 0x2a),
            reset: word(bytes, 0x2c),
            irq: word(bytes, 0x2e),
        };
        let emulation = VectorTable {
            cop: word(bytes, 0x34),
            abort: word(bytes, 0x38),
            nmi: word(bytes, 0x3a),
            reset: word(bytes, 0x3c),
            brk: word(bytes, 0x3e),
            irq: word(bytes, 0x3e),
        };
        Ok(Self {
            title,
            makeup,
            content,
            rom_size,
            sram_size,
            country: bytes[0x19],
            license: bytes[0x1a],
            version: bytes[0x1b],
            checksum_complement: word(bytes, 0x1c),
            checksum: word(bytes, 0x1e),
            vectors: InterruptVectors { native, emulation },
        })
    }

    /// Whether the checksum/complement pair is internally consistent
    pub const fn checksum_pair_valid(&self) -> bool {
        self.checksum_complement == !self.checksum
    }
}

/// A loaded ROM image with its parsed header
#[derive(Debug, Clone)]
pub struct Cartridge {
    header: Header,
    rom: Vec<u8>,
}

impl Cartridge {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ReadRomError> {
        if bytes.len() < MINIMUM_SIZE {
            return Err(ReadRomError::TooSmall(bytes.len()));
        }
        if bytes.len() & 0x1ff != 0 {
            return Err(ReadRomError::AlignError(bytes.len()));
        }
        // skip a 512-byte copier header if one offsets the image
        let bytes = if bytes.len() & 0x3ff == 0 {
            bytes
        } else {
            &bytes[512..]
        };

        let mut header: Option<Header> = None;
        for offset in HEADER_OFFSETS {
            if bytes.len() < offset + HEADER_SIZE {
                continue;
            }
            if let Ok(parsed) = Header::from_bytes(&bytes[offset..offset + HEADER_SIZE]) {
                let prefer = match &header {
                    // a candidate with a consistent checksum pair wins
                    Some(current) => {
                        parsed.checksum_pair_valid() && !current.checksum_pair_valid()
                    }
                    None => true,
                };
                if prefer {
                    header = Some(parsed);
                }
            }
        }
        let header = header.ok_or(ReadRomError::NoSuitableHeader)?;

        use core::num::Wrapping;
        let Wrapping(checksum): Wrapping<u16> =
            bytes.iter().copied().map(Into::into).map(Wrapping).sum();
        if checksum != header.checksum {
            eprintln!(
                "warning: checksum did not match! Checksum in ROM is {:04x}; Calculated checksum is {:04x}",
                header.checksum, checksum
            );
        }

        Ok(Self {
            header,
            rom: bytes.to_vec(),
        })
    }

    pub const fn header(&self) -> &Header {
        &self.header
    }

    pub fn title(&self) -> &str {
        &self.header.title
    }

    pub const fn vectors(&self) -> &InterruptVectors {
        &self.header.vectors
    }

    pub fn rom(&self) -> &[u8] {
        &self.rom
    }

    /// Hand the image over to the CPU core
    pub fn into_memory(self) -> Memory {
        Memory::new(self.rom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_block(makeup: u8) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[..21].copy_from_slice(b"TEST ROM             ");
        bytes[0x15] = makeup;
        bytes[0x16] = 0x00;
        bytes[0x17] = 0x05; // 32 KiB
        bytes[0x18] = 0x03; // 8 KiB SRAM
        bytes[0x19] = 0x01;
        bytes[0x1a] = 0x33;
        bytes[0x1b] = 0x02;
        // consistent checksum/complement pair
        bytes[0x1c] = 0xff;
        bytes[0x1d] = 0xff;
        bytes[0x1e] = 0x00;
        bytes[0x1f] = 0x00;
        // native vectors
        bytes[0x24..0x26].copy_from_slice(&0x8010u16.to_le_bytes()); // cop
        bytes[0x26..0x28].copy_from_slice(&0x8020u16.to_le_bytes()); // brk
        bytes[0x28..0x2a].copy_from_slice(&0x8030u16.to_le_bytes()); // abort
        bytes[0x2a..0x2c].copy_from_slice(&0x8040u16.to_le_bytes()); // nmi
        bytes[0x2c..0x2e].copy_from_slice(&0x8050u16.to_le_bytes()); // reset
        bytes[0x2e..0x30].copy_from_slice(&0x8060u16.to_le_bytes()); // irq
        // emulation vectors
        bytes[0x34..0x36].copy_from_slice(&0x9010u16.to_le_bytes()); // cop
        bytes[0x38..0x3a].copy_from_slice(&0x9030u16.to_le_bytes()); // abort
        bytes[0x3a..0x3c].copy_from_slice(&0x9040u16.to_le_bytes()); // nmi
        bytes[0x3c..0x3e].copy_from_slice(&0x9050u16.to_le_bytes()); // reset
        bytes[0x3e..0x40].copy_from_slice(&0x9060u16.to_le_bytes()); // brk/irq
        bytes
    }

    #[test]
    fn header_fields_parse() {
        let header = Header::from_bytes(&header_block(0x21)).unwrap();
        assert_eq!(header.title, "TEST ROM");
        assert_eq!(header.makeup, RomMakeup::HiRom);
        assert_eq!(header.content, RomContentType::Rom);
        assert_eq!(header.rom_size, 0x400 << 5);
        assert_eq!(header.sram_size, 0x400 << 3);
        assert_eq!(header.country, 1);
        assert_eq!(header.license, 0x33);
        assert_eq!(header.version, 2);
        assert!(header.checksum_pair_valid());
    }

    #[test]
    fn vectors_are_little_endian_and_ordered() {
        let header = Header::from_bytes(&header_block(0x20)).unwrap();
        let native = header.vectors.native;
        assert_eq!(
            (native.cop, native.brk, native.abort, native.nmi, native.reset, native.irq),
            (0x8010, 0x8020, 0x8030, 0x8040, 0x8050, 0x8060)
        );
        let emu = header.vectors.emulation;
        assert_eq!(emu.reset, 0x9050);
        // BREAK and IRQ share the last emulation slot
        assert_eq!(emu.brk, 0x9060);
        assert_eq!(emu.irq, 0x9060);
    }

    #[test]
    fn unknown_makeup_is_invalid() {
        assert!(matches!(
            Header::from_bytes(&header_block(0x22)),
            Err(HeaderError::UnknownMakeup(0x22))
        ));
    }

    #[test]
    fn non_utf8_title_is_invalid() {
        let mut bytes = header_block(0x20);
        bytes[0] = 0xff;
        assert!(matches!(
            Header::from_bytes(&bytes),
            Err(HeaderError::BadTitle(_))
        ));
    }

    #[test]
    fn cartridge_finds_the_lorom_header() {
        let mut image = vec![0u8; 0x8000];
        image[0x7fc0..0x8000].copy_from_slice(&header_block(0x20));
        let cartridge = Cartridge::from_bytes(&image).unwrap();
        assert_eq!(cartridge.title(), "TEST ROM");
        assert_eq!(cartridge.vectors().emulation.reset, 0x9050);
        let memory = cartridge.into_memory();
        assert_eq!(memory.len(), 0x8000);
    }

    #[test]
    fn undersized_and_misaligned_images_are_rejected() {
        assert!(matches!(
            Cartridge::from_bytes(&[0; 0x100]),
            Err(ReadRomError::TooSmall(0x100))
        ));
        assert!(matches!(
            Cartridge::from_bytes(&vec![0; 0x8100]),
            Err(ReadRomError::AlignError(0x8100))
        ));
    }

    #[test]
    fn image_without_header_is_rejected() {
        assert!(matches!(
            Cartridge::from_bytes(&vec![0; 0x8000]),
            Err(ReadRomError::NoSuitableHeader)
        ));
    }
}
