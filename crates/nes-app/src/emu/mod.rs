pub mod bridge;
pub mod commands;
pub mod host;
pub mod image;
pub mod machine;
pub mod runtime;
