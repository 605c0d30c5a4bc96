use crate::display::frame::Resolution;
use crate::error::FrameError;
use crate::shared::frame_buffer::SharedFrameHandle;
use log::debug;

/// Element handle of the rendering surface
pub const SURFACE_ID: &str = "nes";

/// Fixed linear scale between logical pixels and on-screen size
pub const DISPLAY_SCALE: usize = 2;

/// Something a full RGBA frame can be blitted to
pub trait PresentationSurface {
    /// Writes `rgba` at the origin as a full-frame replace
    ///
    /// Fails without touching the surface when `rgba` is not exactly
    /// `resolution.width * resolution.height * 4` bytes.
    fn present(&mut self, resolution: Resolution, rgba: &[u8]) -> Result<(), FrameError>;
}

/// 2D pixel surface with a separate on-screen display size
///
/// Like a canvas element: `resolution` is the pixel buffer, `display_size` the
/// styled size it is shown at. Changing the buffer size clears it, so it is only
/// resized when the incoming resolution differs.
pub struct Canvas {
    id: String,
    resolution: Resolution,
    display_scale: usize,
    display_size: [usize; 2],
    pixels: Vec<u8>,
    resizes: u64,
    frames: u64,
    publish_to: Option<SharedFrameHandle>,
}

impl Canvas {
    pub fn new(id: impl Into<String>, display_scale: usize) -> Self {
        Self {
            id: id.into(),
            resolution: Resolution::new(0, 0),
            display_scale,
            display_size: [0, 0],
            pixels: Vec::new(),
            resizes: 0,
            frames: 0,
            publish_to: None,
        }
    }

    /// Publishes every presented frame to `shared` for the UI thread
    pub fn with_publisher(mut self, shared: SharedFrameHandle) -> Self {
        self.publish_to = Some(shared);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn display_size(&self) -> [usize; 2] {
        self.display_size
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn resizes(&self) -> u64 {
        self.resizes
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn resize(&mut self, resolution: Resolution) {
        debug!(
            "[canvas {}] resize {}x{} -> {}x{}",
            self.id,
            self.resolution.width,
            self.resolution.height,
            resolution.width,
            resolution.height
        );
        self.resolution = resolution;
        self.pixels.clear();
        self.pixels.resize(resolution.rgba_len(), 0);
        self.resizes += 1;
    }
}

impl PresentationSurface for Canvas {
    fn present(&mut self, resolution: Resolution, rgba: &[u8]) -> Result<(), FrameError> {
        resolution.check_rgba(rgba)?;

        if self.resolution != resolution {
            self.resize(resolution);
        }
        self.display_size = [
            resolution.width * self.display_scale,
            resolution.height * self.display_scale,
        ];
        self.pixels.copy_from_slice(rgba);
        self.frames += 1;

        if let Some(shared) = &self.publish_to {
            shared.write(self.resolution, self.display_size, &self.pixels);
        }
        Ok(())
    }
}
