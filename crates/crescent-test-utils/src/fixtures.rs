//! Reusable task fixtures.
//!
//! - [`CountingTask`]: increments a counter element every tick.
//! - [`TraceTask`]: appends `name@tick;` to a shared log element.
//! - [`FailingTask`]: counts like [`CountingTask`] and fails at one tick.
//! - [`FinishingTask`]: counts its end-of-run finishes, optionally failing.
//! - [`WriteTask`]: writes the result of a closure to an element.
//! - [`CopyTask`]: copies one element to another of the same kind.
//!
//! Counters live at `root/tasks/<name>/count`.

use crescent_core::{ElementId, Primitive};
use crescent_store::Store;
use crescent_task::{Task, TaskContext, TaskError};

fn counter(store: &mut Store, name: &str) -> ElementId {
    store
        .root_mut()
        .subdir("tasks")
        .subdir(name)
        .create_element::<u64>("count")
}

/// Increments `root/tasks/<name>/count` on every dispatch.
pub struct CountingTask {
    name: String,
    count: ElementId,
}

impl CountingTask {
    pub fn new(store: &mut Store, name: impl Into<String>) -> Self {
        let name = name.into();
        let count = counter(store, &name);
        Self { name, count }
    }

    pub fn count_id(&self) -> ElementId {
        self.count
    }
}

impl Task for CountingTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn dispatch(&mut self, ctx: &mut TaskContext<'_>) -> Result<(), TaskError> {
        *ctx.store().load::<u64>(self.count) += 1;
        Ok(())
    }
}

/// Appends `name@tick;` to a `string` element shared by several tasks.
///
/// Reading the log after a run shows the exact dispatch order.
pub struct TraceTask {
    name: String,
    log: ElementId,
}

impl TraceTask {
    /// Create the shared log element at `path`.
    pub fn log(store: &mut Store, path: &str) -> ElementId {
        store.create::<String>(path)
    }

    pub fn new(name: impl Into<String>, log: ElementId) -> Self {
        Self {
            name: name.into(),
            log,
        }
    }
}

impl Task for TraceTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn dispatch(&mut self, ctx: &mut TaskContext<'_>) -> Result<(), TaskError> {
        let tick = ctx.tick();
        let entry = format!("{}@{};", self.name, tick);
        ctx.store().try_load::<String>(self.log)?.push_str(&entry);
        Ok(())
    }
}

/// Counts its calls and returns an error at exactly one tick.
///
/// The failing call is counted too, so a task failing at tick `n` ends
/// with a count of `n + 1` when the run started at tick 0.
pub struct FailingTask {
    name: String,
    count: ElementId,
    fail_at: u64,
}

impl FailingTask {
    pub fn new(store: &mut Store, name: impl Into<String>, fail_at: u64) -> Self {
        let name = name.into();
        let count = counter(store, &name);
        Self {
            name,
            count,
            fail_at,
        }
    }

    pub fn count_id(&self) -> ElementId {
        self.count
    }
}

impl Task for FailingTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn dispatch(&mut self, ctx: &mut TaskContext<'_>) -> Result<(), TaskError> {
        *ctx.store().load::<u64>(self.count) += 1;
        if ctx.tick().0 == self.fail_at {
            return Err(TaskError::failed(format!(
                "{} configured to fail at tick {}",
                self.name, self.fail_at
            )));
        }
        Ok(())
    }
}

/// Counts [`finish`](Task::finish) calls in `root/tasks/<name>/finished`.
///
/// With `fail` set, every finish is counted and then returns an error.
pub struct FinishingTask {
    name: String,
    finished: ElementId,
    fail: bool,
}

impl FinishingTask {
    pub fn new(store: &mut Store, name: impl Into<String>, fail: bool) -> Self {
        let name = name.into();
        let finished = store
            .root_mut()
            .subdir("tasks")
            .subdir(&name)
            .create_element::<u64>("finished");
        Self {
            name,
            finished,
            fail,
        }
    }

    pub fn finished_id(&self) -> ElementId {
        self.finished
    }
}

impl Task for FinishingTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn dispatch(&mut self, _ctx: &mut TaskContext<'_>) -> Result<(), TaskError> {
        Ok(())
    }

    fn finish(&mut self, ctx: &mut TaskContext<'_>) -> Result<(), TaskError> {
        *ctx.store().load::<u64>(self.finished) += 1;
        if self.fail {
            return Err(TaskError::failed(format!("{} configured to fail on finish", self.name)));
        }
        Ok(())
    }
}

/// Writes `f(ctx)` to an element every tick.
pub struct WriteTask<T, F> {
    name: String,
    output: ElementId,
    f: F,
    _kind: std::marker::PhantomData<T>,
}

impl<T, F> WriteTask<T, F>
where
    T: Primitive,
    F: FnMut(&TaskContext<'_>) -> Result<T, TaskError> + 'static,
{
    pub fn new(name: impl Into<String>, output: ElementId, f: F) -> Self {
        Self {
            name: name.into(),
            output,
            f,
            _kind: std::marker::PhantomData,
        }
    }
}

impl<T, F> Task for WriteTask<T, F>
where
    T: Primitive,
    F: FnMut(&TaskContext<'_>) -> Result<T, TaskError> + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn dispatch(&mut self, ctx: &mut TaskContext<'_>) -> Result<(), TaskError> {
        let value = (self.f)(ctx)?;
        *ctx.store().try_load::<T>(self.output)? = value;
        Ok(())
    }
}

/// Copies one element's value to another of the same kind every tick.
pub struct CopyTask<T> {
    name: String,
    from: ElementId,
    to: ElementId,
    _kind: std::marker::PhantomData<T>,
}

impl<T: Primitive> CopyTask<T> {
    pub fn new(name: impl Into<String>, from: ElementId, to: ElementId) -> Self {
        Self {
            name: name.into(),
            from,
            to,
            _kind: std::marker::PhantomData,
        }
    }
}

impl<T: Primitive> Task for CopyTask<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn dispatch(&mut self, ctx: &mut TaskContext<'_>) -> Result<(), TaskError> {
        let value = ctx.store_ref().try_read::<T>(self.from)?.clone();
        *ctx.store().try_load::<T>(self.to)? = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crescent_core::TickId;

    fn dispatch_at(task: &mut dyn Task, store: &mut Store, tick: u64) -> Result<(), TaskError> {
        let mut ctx = TaskContext::new(store, TickId(tick), 0.01);
        task.dispatch(&mut ctx)
    }

    #[test]
    fn counting_task_increments() {
        let mut store = Store::new();
        let mut t = CountingTask::new(&mut store, "c");
        for tick in 0..3 {
            dispatch_at(&mut t, &mut store, tick).unwrap();
        }
        assert_eq!(*store.read::<u64>(t.count_id()), 3);
        assert_eq!(store.lookup("root/tasks/c/count"), Ok(t.count_id()));
    }

    #[test]
    fn failing_task_fails_once_at_its_tick() {
        let mut store = Store::new();
        let mut t = FailingTask::new(&mut store, "f", 1);
        assert!(dispatch_at(&mut t, &mut store, 0).is_ok());
        assert!(dispatch_at(&mut t, &mut store, 1).is_err());
        assert!(dispatch_at(&mut t, &mut store, 2).is_ok());
        assert_eq!(*store.read::<u64>(t.count_id()), 3);
    }

    #[test]
    fn finishing_task_counts_and_fails_on_request() {
        let mut store = Store::new();
        let mut ok = FinishingTask::new(&mut store, "ok", false);
        let mut bad = FinishingTask::new(&mut store, "bad", true);
        let mut ctx = TaskContext::new(&mut store, TickId(3), 0.01);
        assert!(ok.finish(&mut ctx).is_ok());
        assert!(bad.finish(&mut ctx).is_err());
        assert_eq!(*store.read::<u64>(ok.finished_id()), 1);
        assert_eq!(*store.read::<u64>(bad.finished_id()), 1);
    }

    #[test]
    fn copy_task_copies_strings() {
        let mut store = Store::new();
        let from = store.create::<String>("root/a");
        let to = store.create::<String>("root/b");
        store.load::<String>(from).push_str("Apollo");
        let mut t = CopyTask::<String>::new("copy", from, to);
        dispatch_at(&mut t, &mut store, 0).unwrap();
        assert_eq!(store.read::<String>(to), "Apollo");
    }

    #[test]
    fn write_task_reports_wrong_kind() {
        let mut store = Store::new();
        let out = store.create::<u8>("root/out");
        let mut t = WriteTask::new("w", out, |_: &TaskContext<'_>| Ok(1.0f64));
        let err = dispatch_at(&mut t, &mut store, 0).unwrap_err();
        assert!(matches!(err, TaskError::Access(_)));
    }
}
