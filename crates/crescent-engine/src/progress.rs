//! Percentage-complete tracking for a run.

/// Tracks integer percent complete as the tick counter approaches the
/// stop tick.
///
/// [`update`](Progress::update) returns the new percentage only when it
/// has increased since the last report, so callers can log it
/// unconditionally without flooding.
#[derive(Clone, Debug, Default)]
pub struct Progress {
    end: u64,
    last: u64,
}

impl Progress {
    /// A tracker for a run ending at `end`.
    pub fn new(end: u64) -> Self {
        Self { end, last: 0 }
    }

    /// Restart tracking for a run ending at `end`.
    pub fn reset(&mut self, end: u64) {
        self.end = end;
        self.last = 0;
    }

    /// Percent complete at tick `now`, before the tick runs.
    ///
    /// Always 0 when the stop tick is 0.
    pub fn percent(&self, now: u64) -> u64 {
        if self.end == 0 {
            return 0;
        }
        let pct = u128::from(now) * 100 / u128::from(self.end);
        pct.min(100) as u64
    }

    /// Record tick `now`; returns the percentage if it increased.
    pub fn update(&mut self, now: u64) -> Option<u64> {
        let pct = self.percent(now);
        if pct > self.last {
            self.last = pct;
            Some(pct)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_each_increase_once() {
        let mut p = Progress::new(200);
        let reported: Vec<u64> = (0..=200).filter_map(|t| p.update(t)).collect();
        assert_eq!(reported, (1..=100).collect::<Vec<_>>());
    }

    #[test]
    fn sparse_reports_on_short_runs() {
        let mut p = Progress::new(4);
        let reported: Vec<u64> = (0..=4).filter_map(|t| p.update(t)).collect();
        assert_eq!(reported, [25, 50, 75, 100]);
    }

    #[test]
    fn zero_length_run_reports_nothing() {
        let mut p = Progress::new(0);
        assert_eq!(p.update(0), None);
        assert_eq!(p.percent(5), 0);
    }

    #[test]
    fn reset_starts_over() {
        let mut p = Progress::new(10);
        assert_eq!(p.update(10), Some(100));
        p.reset(20);
        assert_eq!(p.update(10), Some(50));
        assert_eq!(p.update(10), None);
    }

    #[test]
    fn clamps_past_end() {
        let p = Progress::new(10);
        assert_eq!(p.percent(50), 100);
    }
}
