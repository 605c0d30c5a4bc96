use crate::display::surface::PresentationSurface;
use crate::driver::guard::LoopGuard;
use crate::driver::stats::{DriverReport, DriverSnapshot, DriverStats};
use crate::driver::timer::{MIN_PERIOD, RepeatingTimer};
use crate::emu::bridge::{CommandBridge, CommandBridgeExt};
use crate::error::CycleError;
use log::{debug, info, trace, warn};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::Instant;

/// Fixed-rate advance/render loop
///
/// Every tick re-arms the next one and then attempts a cycle on a separate
/// local task. An attempt that finds the [`LoopGuard`] held does nothing, so a
/// host slower than the tick period lowers the frame rate instead of building
/// a backlog.
pub struct FrameDriver<B, S> {
    period: Duration,
    cycle: Rc<Cycle<B, S>>,
}

struct Cycle<B, S> {
    bridge: B,
    surface: RefCell<S>,
    guard: LoopGuard,
    stats: Rc<DriverStats>,
}

/// Read-only view of a running driver
#[derive(Clone)]
pub struct DriverHandle {
    guard: LoopGuard,
    stats: Rc<DriverStats>,
}

impl DriverHandle {
    pub fn cycle_in_flight(&self) -> bool {
        self.guard.is_held()
    }

    pub fn stats(&self) -> DriverSnapshot {
        self.stats.snapshot()
    }

    /// Hands a [`DriverReport`] for the last `every` to `publish`, forever
    pub async fn report_every(self, every: Duration, mut publish: impl FnMut(DriverReport)) {
        let mut timer = RepeatingTimer::new(every);
        let mut last = self.stats();
        loop {
            timer.fire().await;
            let now = self.stats();
            publish(DriverReport::between(&last, &now, timer.period()));
            last = now;
        }
    }
}

impl<B, S> FrameDriver<B, S>
where
    B: CommandBridge + 'static,
    S: PresentationSurface + 'static,
{
    /// `period` is raised to [`MIN_PERIOD`] if shorter
    pub fn new(bridge: B, surface: S, period: Duration) -> Self {
        Self {
            period: period.max(MIN_PERIOD),
            cycle: Rc::new(Cycle {
                bridge,
                surface: RefCell::new(surface),
                guard: LoopGuard::new(),
                stats: Rc::new(DriverStats::default()),
            }),
        }
    }

    pub fn handle(&self) -> DriverHandle {
        DriverHandle {
            guard: self.cycle.guard.clone(),
            stats: self.cycle.stats.clone(),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Drives the loop until the future is dropped
    ///
    /// Attempts run as local tasks owned by the loop, so this must be polled
    /// inside a `tokio::task::LocalSet`. Dropping the future aborts a cycle that
    /// is still in flight; its guard token is released as the task unwinds.
    pub async fn run(self) {
        let mut timer = RepeatingTimer::new(self.period);
        let mut attempts = JoinSet::new();
        info!("[driver] frame loop started, period {:?}", self.period);

        loop {
            let tick = timer.fire().await;
            self.cycle.stats.record_tick();

            // Reap finished attempts so the set stays at most one cycle deep
            while attempts.try_join_next().is_some() {}
            attempts.spawn_local(self.cycle.clone().attempt(tick.index));
        }
    }
}

impl<B, S> Cycle<B, S>
where
    B: CommandBridge,
    S: PresentationSurface,
{
    async fn attempt(self: Rc<Self>, tick: u64) {
        let Some(_token) = self.guard.try_acquire() else {
            self.stats.record_skip();
            trace!("[driver] tick {tick} skipped, previous cycle still in flight");
            return;
        };

        self.stats.record_active();
        match self.run_cycle().await {
            Ok(()) => self.stats.record_presented(),
            Err(e) => {
                self.stats.record_fault();
                warn!("[driver] tick {tick}: {e}");
            }
        }
    }

    async fn run_cycle(&self) -> Result<(), CycleError> {
        let started = Instant::now();
        self.bridge.advance_frame().await?;
        let advanced = Instant::now();

        let frame = self.bridge.render_frame().await?;
        let rendered = Instant::now();

        let (advance, render) = (advanced - started, rendered - advanced);
        self.stats.record_timings(advance, render);
        debug!(
            "[driver] advance-one-frame {advance:?}, render-current-frame {render:?} ({} bytes)",
            frame.as_rgba().len()
        );

        self.surface
            .borrow_mut()
            .present(frame.resolution(), frame.as_rgba())?;
        Ok(())
    }
}
