use crate::display::frame::Resolution;
use crate::driver::stats::DriverReport;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Last frame blitted to the canvas, as the UI should show it
pub struct PublishedFrame {
    pub resolution: Resolution,
    /// On-screen size in logical points (resolution times display scale)
    pub display_size: [usize; 2],
    pub rgba: Vec<u8>,
}

pub type SharedFrameHandle = Arc<SharedFrame>;

/// Hand-off slot between the session thread (writer) and the UI thread (reader)
///
/// `seq` is bumped after every write so the UI can skip texture uploads when
/// nothing new has been published.
pub struct SharedFrame {
    seq: AtomicU64,
    slot: Mutex<PublishedFrame>,
    report: Mutex<Option<DriverReport>>,
}

impl Default for SharedFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedFrame {
    pub fn new() -> Self {
        Self {
            seq: AtomicU64::new(0),
            slot: Mutex::new(PublishedFrame {
                resolution: Resolution::new(0, 0),
                display_size: [0, 0],
                rgba: Vec::new(),
            }),
            report: Mutex::new(None),
        }
    }

    /// Number of frames published so far
    #[inline]
    pub fn seq(&self) -> u64 {
        self.seq.load(Ordering::Acquire)
    }

    pub fn read(&self) -> MutexGuard<'_, PublishedFrame> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self, resolution: Resolution, display_size: [usize; 2], rgba: &[u8]) {
        {
            let mut slot = self.read();
            slot.resolution = resolution;
            slot.display_size = display_size;
            slot.rgba.clear();
            slot.rgba.extend_from_slice(rgba);
        }
        self.seq.fetch_add(1, Ordering::Release);
    }

    /// Latest frame-loop report, if the loop has run for a full window yet
    pub fn report(&self) -> Option<DriverReport> {
        *self.report.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn publish_report(&self, report: DriverReport) {
        *self.report.lock().unwrap_or_else(PoisonError::into_inner) = Some(report);
    }
}
