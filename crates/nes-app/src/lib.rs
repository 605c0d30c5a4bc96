//! Front end for an NES emulator that runs behind a command bridge.
//!
//! The host owns the emulator and answers typed commands. The front end picks a
//! ROM, boots the host, then drives a fixed-rate advance/render loop whose frames
//! land on a presentation surface shown by the egui window.

pub mod app;
pub mod config;
pub mod display;
pub mod driver;
pub mod emu;
pub mod error;
pub mod session;
pub mod shared;

pub mod prelude;
