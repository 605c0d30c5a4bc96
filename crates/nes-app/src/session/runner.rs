use crate::config::FrontendConfig;
use crate::display::surface::{Canvas, PresentationSurface};
use crate::driver::frame_driver::FrameDriver;
use crate::emu::bridge::CommandBridge;
use crate::emu::host::EmuHost;
use crate::error::BootstrapError;
use crate::session::bootstrap::{Booted, bootstrap};
use crate::session::file::{DialogPicker, FilePicker};
use crate::shared::frame_buffer::SharedFrameHandle;
use anyhow::Context;
use log::{error, info};
use std::io;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::LocalSet;

/// One user-initiated run: bootstrap, then the frame loop
///
/// The loop is only reachable through a successful [`Session::start`].
pub struct Session<B, P> {
    config: FrontendConfig,
    bridge: B,
    picker: P,
}

impl<B, P> Session<B, P>
where
    B: CommandBridge + 'static,
    P: FilePicker,
{
    pub fn new(config: FrontendConfig, bridge: B, picker: P) -> Self {
        Self {
            config,
            bridge,
            picker,
        }
    }

    pub async fn start<S>(self, surface: S) -> Result<(Booted, FrameDriver<B, S>), BootstrapError>
    where
        S: PresentationSurface + 'static,
    {
        let booted = bootstrap(
            &self.bridge,
            &self.picker,
            &self.config.file_options,
            self.config.echo_probe,
        )
        .await?;
        let driver = FrameDriver::new(self.bridge, surface, self.config.interval());
        Ok((booted, driver))
    }
}

#[derive(Debug)]
pub enum SessionEvent {
    Starting,
    Running(Booted),
    Failed(anyhow::Error),
}

/// How often the running loop's statistics are published for the UI
pub const REPORT_PERIOD: Duration = Duration::from_millis(500);

/// UI side of the session thread
pub struct SessionHandle {
    start_tx: mpsc::UnboundedSender<()>,
    event_rx: crossbeam_channel::Receiver<SessionEvent>,
}

impl SessionHandle {
    /// Spawns the session thread; nothing happens on it until [`SessionHandle::start`]
    pub fn spawn(
        config: FrontendConfig,
        host: EmuHost,
        frame: SharedFrameHandle,
    ) -> io::Result<Self> {
        Self::spawn_with(config, frame, move || (host, DialogPicker))
    }

    /// Like [`SessionHandle::spawn`], with the bridge and picker built by `build`
    ///
    /// `build` runs on the session thread, so neither needs to be `Send`.
    pub fn spawn_with<B, P, F>(
        config: FrontendConfig,
        frame: SharedFrameHandle,
        build: F,
    ) -> io::Result<Self>
    where
        B: CommandBridge + Clone + 'static,
        P: FilePicker + Clone + 'static,
        F: FnOnce() -> (B, P) + Send + 'static,
    {
        let (start_tx, start_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = crossbeam_channel::unbounded();

        thread::Builder::new().name("session".into()).spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
                .context("failed to build session runtime")
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    error!("{e:#}");
                    event_tx.send(SessionEvent::Failed(e)).ok();
                    return;
                }
            };
            let (bridge, picker) = build();
            let local = LocalSet::new();
            local.block_on(
                &runtime,
                serve(config, bridge, picker, frame, start_rx, event_tx),
            );
        })?;

        Ok(Self { start_tx, event_rx })
    }

    /// Forwards the user's start gesture; ignored once a session is running
    pub fn start(&self) {
        self.start_tx.send(()).ok();
    }

    pub fn try_recv(&self) -> Option<SessionEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn serve<B, P>(
    config: FrontendConfig,
    bridge: B,
    picker: P,
    frame: SharedFrameHandle,
    mut start_rx: mpsc::UnboundedReceiver<()>,
    event_tx: crossbeam_channel::Sender<SessionEvent>,
) where
    B: CommandBridge + Clone + 'static,
    P: FilePicker + Clone,
{
    while start_rx.recv().await.is_some() {
        event_tx.send(SessionEvent::Starting).ok();

        let canvas =
            Canvas::new(config.surface_id.clone(), config.display_scale).with_publisher(frame.clone());
        let session = Session::new(config.clone(), bridge.clone(), picker.clone());

        match session.start(canvas).await {
            Ok((booted, driver)) => {
                info!("[session] running {}", booted.rom_name);
                event_tx.send(SessionEvent::Running(booted)).ok();

                let stats_slot = frame.clone();
                tokio::task::spawn_local(
                    driver
                        .handle()
                        .report_every(REPORT_PERIOD, move |report| stats_slot.publish_report(report)),
                );
                driver.run().await;
            }
            Err(e) => {
                error!("[session] bootstrap aborted: {e}");
                event_tx
                    .send(SessionEvent::Failed(
                        anyhow::Error::new(e).context("Failed to start session"),
                    ))
                    .ok();
            }
        }
    }
}
