pub mod frame;
pub mod surface;
