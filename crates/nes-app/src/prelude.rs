//! Convenient imports for consumers of nes-app
//!
//! ```rust
//! use nes_app::prelude::*;
//! ```

pub use crate::config::FrontendConfig;
pub use crate::display::frame::{NES_RESOLUTION, PixelFrame, Resolution};
pub use crate::display::surface::{Canvas, PresentationSurface};
pub use crate::driver::frame_driver::{DriverHandle, FrameDriver};
pub use crate::driver::stats::{DriverReport, DriverSnapshot};
pub use crate::emu::bridge::{CommandBridge, CommandBridgeExt};
pub use crate::emu::commands::{EmuCommand, EmuResponse};
pub use crate::emu::host::EmuHost;
pub use crate::emu::image::ProgramImage;
pub use crate::emu::machine::{Machine, MachineFactory};
pub use crate::error::{BootstrapError, BridgeError, CycleError, FrameError, HostError};
pub use crate::session::bootstrap::bootstrap;
pub use crate::session::file::{FileBlob, FileOptions, FilePicker};
pub use crate::session::runner::{Session, SessionEvent, SessionHandle};
