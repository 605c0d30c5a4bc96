use std::sync::Arc;
use thiserror::Error;

const NES_MAGIC_BYTES: &[u8; 4] = b"NES\x1A";
const HEADER_SIZE: usize = 16;
const TRAINER_SIZE: usize = 512;
const PRG_ROM_PAGE_SIZE: usize = 0x4000;
const CHR_ROM_PAGE_SIZE: usize = 0x2000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("{0}")]
    InvalidFormat(String),

    #[error("Unsupported ROM version: v{0}")]
    UnsupportedVersion(u8),

    #[error("ROM truncated: header declares {declared} bytes, file has {actual}")]
    Truncated { declared: usize, actual: usize },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mirroring {
    Vertical,
    Horizontal,
    FourScreen,
}

/// What the iNES header of a program image says about it
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InesHeader {
    pub prg_rom_size: usize,
    pub chr_rom_size: usize,
    pub mapper: u8,
    pub has_trainer: bool,
    pub screen_mirroring: Mirroring,
}

/// Immutable cartridge bytes, created once per file selection
///
/// Cloning shares the bytes; the host receives its own copy when the image is
/// loaded, so nothing on the front end can mutate what the machine runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramImage {
    bytes: Arc<[u8]>,
}

impl ProgramImage {
    /// Returns `None` for empty content: no machine can start from zero bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Option<Self> {
        if bytes.is_empty() {
            return None;
        }
        Some(Self {
            bytes: bytes.into(),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }

    /// Validates the iNES 1.0 header and that the declared banks fit the file
    pub fn parse_header(&self) -> Result<InesHeader, ImageError> {
        let raw = self.as_bytes();

        // Check NES magic bytes
        if raw.len() < HEADER_SIZE || &raw[0..4] != NES_MAGIC_BYTES {
            return Err(ImageError::InvalidFormat("Not an iNES file".into()));
        }

        let mapper = (raw[7] & 0b1111_0000) | (raw[6] >> 4);

        let ines_ver = (raw[7] >> 2) & 0b11;
        if ines_ver != 0 {
            return Err(ImageError::UnsupportedVersion(ines_ver));
        }

        let four_screen = raw[6] & 0b1000 != 0;
        let vertical_mirroring = raw[6] & 0b1 != 0;
        let screen_mirroring = match (four_screen, vertical_mirroring) {
            (true, _) => Mirroring::FourScreen,
            (false, true) => Mirroring::Vertical,
            (false, false) => Mirroring::Horizontal,
        };

        let prg_rom_size = raw[4] as usize * PRG_ROM_PAGE_SIZE;
        let chr_rom_size = raw[5] as usize * CHR_ROM_PAGE_SIZE;
        let has_trainer = raw[6] & 0b100 != 0;

        let declared = HEADER_SIZE
            + if has_trainer { TRAINER_SIZE } else { 0 }
            + prg_rom_size
            + chr_rom_size;
        if raw.len() < declared {
            return Err(ImageError::Truncated {
                declared,
                actual: raw.len(),
            });
        }

        Ok(InesHeader {
            prg_rom_size,
            chr_rom_size,
            mapper,
            has_trainer,
            screen_mirroring,
        })
    }
}
