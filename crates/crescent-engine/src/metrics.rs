//! Per-run performance metrics for the scheduler.

/// Timing data collected during one [`Scheduler::run`](crate::Scheduler::run).
///
/// All durations are in microseconds. On a failed run the metrics
/// cover the ticks completed before the failure; they are logged but
/// not returned.
#[derive(Clone, Debug, Default)]
pub struct RunMetrics {
    /// Ticks in which every task was dispatched successfully.
    pub ticks_completed: u64,
    /// Total successful `dispatch` calls.
    pub dispatches: u64,
    /// Wall-clock time for the whole run, in microseconds.
    pub total_us: u64,
    /// Cumulative dispatch time per task: `(name, microseconds)`, in
    /// registration order.
    pub task_us: Vec<(String, u64)>,
    /// Time spent sleeping for real-time pacing, in microseconds.
    pub pacing_sleep_us: u64,
}

impl RunMetrics {
    pub(crate) fn for_tasks<'a>(names: impl Iterator<Item = &'a str>) -> Self {
        Self {
            task_us: names.map(|n| (n.to_string(), 0)).collect(),
            ..Self::default()
        }
    }

    /// Cumulative dispatch time of the task named `name`.
    pub fn task_time_us(&self, name: &str) -> Option<u64> {
        self.task_us
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, us)| us)
    }
}
