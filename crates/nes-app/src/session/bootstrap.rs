use crate::emu::bridge::{CommandBridge, CommandBridgeExt};
use crate::error::{BootstrapError, BridgeError};
use crate::session::file::{FileBlob, FileOptions, FilePicker, extract_buffer};
use log::{debug, info, warn};
use tokio::time::Instant;

/// What a successful bootstrap put into the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booted {
    pub rom_name: String,
    pub rom_len: usize,
}

/// One-shot session setup, every step awaited before the next
///
/// 1. diagnostic probes (failures only logged)
/// 2. pick a ROM
/// 3. read it; no content aborts
/// 4. create instance, load image, power on; any fault aborts
pub async fn bootstrap<B, P>(
    bridge: &B,
    picker: &P,
    options: &FileOptions,
    echo_probe: u32,
) -> Result<Booted, BootstrapError>
where
    B: CommandBridge,
    P: FilePicker,
{
    run_probes(bridge, echo_probe).await;

    let file = picker
        .pick(options)
        .await
        .into_iter()
        .next()
        .ok_or(BootstrapError::NoImage)?;
    let rom_name = file.name();

    let image = extract_buffer(&file)
        .await
        .ok_or(BootstrapError::EmptyImage)?;
    let rom_len = image.len();
    info!("[bootstrap] {rom_name}: {rom_len} bytes");

    bridge
        .create_instance()
        .await
        .map_err(aborted("create-emulator-instance"))?;
    bridge
        .load_program_image(image)
        .await
        .map_err(aborted("load-program-image"))?;
    bridge.power_on().await.map_err(aborted("power-on"))?;

    info!("[bootstrap] {rom_name} powered on");
    Ok(Booted { rom_name, rom_len })
}

async fn run_probes<B: CommandBridge>(bridge: &B, echo_probe: u32) {
    let started = Instant::now();
    match bridge.read_global_data().await {
        Ok(data) => debug!(
            "[bootstrap] read-global-data: {} bytes in {:?}",
            data.len(),
            started.elapsed()
        ),
        Err(e) => warn!("[bootstrap] read-global-data probe failed: {e}"),
    }

    match bridge.self_test_echo(echo_probe).await {
        Ok(echoed) => debug!("[bootstrap] self-test-echo({echo_probe}) -> {echoed}"),
        Err(e) => warn!("[bootstrap] self-test-echo probe failed: {e}"),
    }
}

fn aborted(command: &'static str) -> impl FnOnce(BridgeError) -> BootstrapError {
    move |source| BootstrapError::Command { command, source }
}
