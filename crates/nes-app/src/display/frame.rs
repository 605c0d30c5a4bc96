use crate::error::FrameError;
use std::fmt;

pub const NES_WIDTH: usize = 256;
pub const NES_HEIGHT: usize = 240;
pub const BYTES_PER_PIXEL: usize = 4;

/// Logical resolution shared by host and surface for the whole session
pub const NES_RESOLUTION: Resolution = Resolution::new(NES_WIDTH, NES_HEIGHT);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub width: usize,
    pub height: usize,
}

impl Resolution {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Length of one RGBA frame at this resolution
    pub const fn rgba_len(&self) -> usize {
        self.width * self.height * BYTES_PER_PIXEL
    }

    pub fn check_rgba(&self, rgba: &[u8]) -> Result<(), FrameError> {
        if rgba.len() != self.rgba_len() {
            return Err(FrameError::Size {
                width: self.width,
                height: self.height,
                expected: self.rgba_len(),
                actual: rgba.len(),
            });
        }
        Ok(())
    }
}

/// One full RGBA video frame at [`NES_RESOLUTION`]
///
/// The length is checked on construction, so a `PixelFrame` in hand is always
/// exactly 256 x 240 x 4 bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelFrame {
    rgba: Vec<u8>,
}

impl PixelFrame {
    pub fn from_rgba(rgba: Vec<u8>) -> Result<Self, FrameError> {
        NES_RESOLUTION.check_rgba(&rgba)?;
        Ok(Self { rgba })
    }

    /// A frame with every channel set to `value`
    pub fn filled(value: u8) -> Self {
        Self {
            rgba: vec![value; NES_RESOLUTION.rgba_len()],
        }
    }

    pub fn resolution(&self) -> Resolution {
        NES_RESOLUTION
    }

    pub fn as_rgba(&self) -> &[u8] {
        &self.rgba
    }

    pub(crate) fn as_rgba_mut(&mut self) -> &mut [u8] {
        &mut self.rgba
    }

    pub fn into_rgba(self) -> Vec<u8> {
        self.rgba
    }
}

impl fmt::Debug for PixelFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelFrame")
            .field("resolution", &NES_RESOLUTION)
            .field("len", &self.rgba.len())
            .finish()
    }
}
