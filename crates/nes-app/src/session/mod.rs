pub mod bootstrap;
pub mod file;
pub mod runner;
