pub mod frame_driver;
pub mod guard;
pub mod stats;
pub mod timer;
