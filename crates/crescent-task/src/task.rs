//! The [`Task`] trait.

use crate::context::TaskContext;
use crate::error::TaskError;

/// A unit of work dispatched once per tick.
///
/// # Contract
///
/// - Tasks resolve the elements they use during construction and keep
///   the returned [`ElementId`](crescent_core::ElementId)s; `dispatch`
///   then reads and writes by ID.
/// - `dispatch` returning `Err` is fatal: the scheduler stops at once,
///   skipping the remaining tasks of the tick and all later ticks.
/// - Tasks run sequentially in registration order on one thread.
/// - [`finish`](Task::finish) runs once after the last dispatch of a
///   run. Tasks that buffer output flush it there, so write failures
///   reach the caller instead of being lost on drop.
///
/// # Object safety
///
/// The scheduler stores tasks as `Vec<Box<dyn Task>>`.
///
/// # Examples
///
/// ```
/// use crescent_core::ElementId;
/// use crescent_store::Store;
/// use crescent_task::{Task, TaskContext, TaskError};
///
/// struct Counter {
///     count: ElementId,
/// }
///
/// impl Counter {
///     fn new(store: &mut Store) -> Self {
///         Self { count: store.create::<u64>("root/counter/count") }
///     }
/// }
///
/// impl Task for Counter {
///     fn name(&self) -> &str { "Counter" }
///
///     fn dispatch(&mut self, ctx: &mut TaskContext<'_>) -> Result<(), TaskError> {
///         *ctx.store().load::<u64>(self.count) += 1;
///         Ok(())
///     }
/// }
///
/// let mut store = Store::new();
/// let mut task = Counter::new(&mut store);
/// let mut ctx = TaskContext::new(&mut store, Default::default(), 0.01);
/// task.dispatch(&mut ctx).unwrap();
/// assert_eq!(*store.read::<u64>(task.count), 1);
/// ```
pub trait Task: 'static {
    /// Human-readable name for logging and error reporting.
    fn name(&self) -> &str;

    /// Execute the task for one tick.
    fn dispatch(&mut self, ctx: &mut TaskContext<'_>) -> Result<(), TaskError>;

    /// Called once when a run ends, after the last dispatch.
    ///
    /// The context carries the scheduler's current tick. The default
    /// does nothing.
    fn finish(&mut self, _ctx: &mut TaskContext<'_>) -> Result<(), TaskError> {
        Ok(())
    }
}
