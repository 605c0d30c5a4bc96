use std::cell::Cell;
use std::time::Duration;

/// Counters kept by the frame driver, readable while it runs
#[derive(Default)]
pub struct DriverStats {
    ticks: Cell<u64>,
    active_cycles: Cell<u64>,
    skipped_ticks: Cell<u64>,
    faulted_cycles: Cell<u64>,
    frames_presented: Cell<u64>,
    last_advance: Cell<Duration>,
    last_render: Cell<Duration>,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct DriverSnapshot {
    pub ticks: u64,
    pub active_cycles: u64,
    pub skipped_ticks: u64,
    pub faulted_cycles: u64,
    pub frames_presented: u64,
    pub last_advance: Duration,
    pub last_render: Duration,
}

/// Loop health over one reporting window, as shown by the UI
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct DriverReport {
    /// Frames presented per second over the window
    pub fps: f64,
    pub skipped: u64,
    pub faulted: u64,
    pub totals: DriverSnapshot,
}

impl DriverReport {
    pub fn between(earlier: &DriverSnapshot, later: &DriverSnapshot, window: Duration) -> Self {
        let presented = later.frames_presented - earlier.frames_presented;
        let secs = window.as_secs_f64();
        Self {
            fps: if secs > 0.0 { presented as f64 / secs } else { 0.0 },
            skipped: later.skipped_ticks - earlier.skipped_ticks,
            faulted: later.faulted_cycles - earlier.faulted_cycles,
            totals: *later,
        }
    }
}

impl DriverStats {
    pub(crate) fn record_tick(&self) {
        bump(&self.ticks);
    }

    pub(crate) fn record_active(&self) {
        bump(&self.active_cycles);
    }

    pub(crate) fn record_skip(&self) {
        bump(&self.skipped_ticks);
    }

    pub(crate) fn record_fault(&self) {
        bump(&self.faulted_cycles);
    }

    pub(crate) fn record_presented(&self) {
        bump(&self.frames_presented);
    }

    pub(crate) fn record_timings(&self, advance: Duration, render: Duration) {
        self.last_advance.set(advance);
        self.last_render.set(render);
    }

    pub fn snapshot(&self) -> DriverSnapshot {
        DriverSnapshot {
            ticks: self.ticks.get(),
            active_cycles: self.active_cycles.get(),
            skipped_ticks: self.skipped_ticks.get(),
            faulted_cycles: self.faulted_cycles.get(),
            frames_presented: self.frames_presented.get(),
            last_advance: self.last_advance.get(),
            last_render: self.last_render.get(),
        }
    }
}

#[inline]
fn bump(counter: &Cell<u64>) {
    counter.set(counter.get() + 1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_covers_only_the_window() {
        let stats = DriverStats::default();
        for _ in 0..10 {
            stats.record_presented();
        }
        let earlier = stats.snapshot();

        for _ in 0..30 {
            stats.record_presented();
        }
        stats.record_skip();
        stats.record_fault();
        stats.record_timings(Duration::from_millis(3), Duration::from_millis(1));

        let report = DriverReport::between(&earlier, &stats.snapshot(), Duration::from_millis(500));
        assert_eq!(report.fps, 60.0);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.faulted, 1);
        assert_eq!(report.totals.frames_presented, 40);
        assert_eq!(report.totals.last_advance, Duration::from_millis(3));
    }
}
