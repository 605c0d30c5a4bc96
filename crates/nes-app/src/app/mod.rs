pub mod action;
#[allow(clippy::module_inception)]
pub mod app;
pub mod ui;
