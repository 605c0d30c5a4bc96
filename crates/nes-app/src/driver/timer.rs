use tokio::time::{Duration, Instant, sleep_until};

/// Shortest period a timer accepts; shorter ones are raised to this
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Tick {
    /// 1-based count of ticks fired so far
    pub index: u64,
    pub deadline: Instant,
}

/// Fixed-delay repeating timer
///
/// Each tick re-arms the next deadline one period after it fired, before the
/// caller gets control back. Work done after [`RepeatingTimer::fire`] returns can
/// therefore never delay the following tick.
pub struct RepeatingTimer {
    period: Duration,
    next: Instant,
    fired: u64,
}

impl RepeatingTimer {
    /// First tick fires one `period` from now
    pub fn new(period: Duration) -> Self {
        let period = period.max(MIN_PERIOD);
        Self::starting_at(Instant::now() + period, period)
    }

    pub fn starting_at(first: Instant, period: Duration) -> Self {
        Self {
            period: period.max(MIN_PERIOD),
            next: first,
            fired: 0,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn next_deadline(&self) -> Instant {
        self.next
    }

    pub async fn fire(&mut self) -> Tick {
        sleep_until(self.next).await;
        let deadline = self.next;

        // Re-arm first
        self.next = Instant::now() + self.period;
        self.fired += 1;

        Tick {
            index: self.fired,
            deadline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_one_period_and_rearms() {
        let start = Instant::now();
        let period = Duration::from_millis(20);
        let mut timer = RepeatingTimer::new(period);
        assert_eq!(timer.next_deadline(), start + period);

        let tick = timer.fire().await;
        assert_eq!(tick.index, 1);
        assert_eq!(tick.deadline, start + period);
        assert_eq!(Instant::now(), start + period);
        assert_eq!(timer.next_deadline(), start + period * 2);

        let tick = timer.fire().await;
        assert_eq!(tick.index, 2);
        assert_eq!(Instant::now(), start + period * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_caller_does_not_get_a_burst() {
        let period = Duration::from_millis(10);
        let mut timer = RepeatingTimer::new(period);
        timer.fire().await;

        // Caller goes away for several periods before asking again
        tokio::time::sleep(period * 5).await;
        let late = timer.fire().await;
        let after_late = Instant::now();
        timer.fire().await;

        assert_eq!(late.index, 2);
        assert_eq!(Instant::now(), after_late + period);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_period_is_raised_to_the_minimum() {
        let start = Instant::now();
        let mut timer = RepeatingTimer::new(Duration::ZERO);
        assert_eq!(timer.period(), MIN_PERIOD);

        timer.fire().await;
        timer.fire().await;
        assert_eq!(Instant::now(), start + MIN_PERIOD * 2);
    }
}
