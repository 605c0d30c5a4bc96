use crate::display::frame::{NES_RESOLUTION, Resolution};
use crate::display::surface::{DISPLAY_SCALE, SURFACE_ID};
use crate::session::file::FileOptions;
use std::time::Duration;

pub const TARGET_FPS: u32 = 60;

/// Value sent with the `self-test-echo` probe during bootstrap
pub const ECHO_PROBE: u32 = 1;

#[derive(Clone, Debug)]
pub struct FrontendConfig {
    /// Frame loop tick rate
    pub target_fps: u32,
    pub display_scale: usize,
    pub surface_id: String,
    pub file_options: FileOptions,
    pub echo_probe: u32,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            target_fps: TARGET_FPS,
            display_scale: DISPLAY_SCALE,
            surface_id: SURFACE_ID.to_string(),
            file_options: FileOptions::new().with("accept", ".nes"),
            echo_probe: ECHO_PROBE,
        }
    }
}

impl FrontendConfig {
    /// Delay between frame loop ticks (1000 / fps milliseconds)
    pub fn interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.target_fps.max(1)))
    }

    pub fn resolution(&self) -> Resolution {
        NES_RESOLUTION
    }

    /// On-screen size of the surface in logical points
    pub fn display_size(&self) -> [f32; 2] {
        [
            (NES_RESOLUTION.width * self.display_scale) as f32,
            (NES_RESOLUTION.height * self.display_scale) as f32,
        ]
    }
}
