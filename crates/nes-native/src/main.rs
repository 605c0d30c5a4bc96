#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::Context;
use eframe::NativeOptions;
use nes_app::app::app::App;
use nes_app::config::FrontendConfig;
use nes_app::emu::host::EmuHost;
use nes_app::emu::machine::NesRustMachine;
use nes_app::session::runner::SessionHandle;
use nes_app::shared::frame_buffer::SharedFrame;
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = FrontendConfig::default();
    let [width, height] = config.display_size();
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width + 32.0, height + 32.0])
            .with_title("NES Emulator"),
        ..Default::default()
    };

    let host = EmuHost::start(NesRustMachine::factory()).context("failed to start emulator host")?;
    let frame = Arc::new(SharedFrame::new());
    let session = SessionHandle::spawn(config, host, frame.clone())
        .context("failed to start session thread")?;
    log::info!("host and session threads up");

    eframe::run_native(
        "NES Emulator",
        options,
        Box::new(move |_cc| Ok(Box::new(App::new(session, frame)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe failed: {e}"))
}
