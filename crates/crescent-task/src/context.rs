//! Execution context passed to tasks during dispatch.

use crescent_core::TickId;
use crescent_store::Store;

/// Execution context passed to each task's [`dispatch`](crate::Task::dispatch).
///
/// Borrows the store mutably for the duration of one dispatch, so tasks
/// in the same tick observe each other's writes in registration order.
pub struct TaskContext<'a> {
    store: &'a mut Store,
    tick: TickId,
    tick_period: f64,
}

impl<'a> TaskContext<'a> {
    /// Construct a new task context.
    ///
    /// Typically called by the scheduler, not by tasks directly.
    pub fn new(store: &'a mut Store, tick: TickId, tick_period: f64) -> Self {
        Self {
            store,
            tick,
            tick_period,
        }
    }

    /// The tick being dispatched.
    pub fn tick(&self) -> TickId {
        self.tick
    }

    /// Simulated seconds per tick.
    pub fn tick_period(&self) -> f64 {
        self.tick_period
    }

    /// Simulated time at this tick, in seconds.
    pub fn sim_time(&self) -> f64 {
        self.tick.0 as f64 * self.tick_period
    }

    /// The shared store.
    pub fn store(&mut self) -> &mut Store {
        self.store
    }

    /// Read-only access to the shared store.
    pub fn store_ref(&self) -> &Store {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sim_time_scales_with_tick() {
        let mut store = Store::new();
        let ctx = TaskContext::new(&mut store, TickId(250), 0.01);
        assert_eq!(ctx.tick(), TickId(250));
        assert!((ctx.sim_time() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn store_writes_are_visible_after_dispatch() {
        let mut store = Store::new();
        let id = store.create::<u32>("root/n");
        {
            let mut ctx = TaskContext::new(&mut store, TickId(0), 0.01);
            *ctx.store().load::<u32>(id) = 7;
            assert_eq!(*ctx.store_ref().read::<u32>(id), 7);
        }
        assert_eq!(*store.read::<u32>(id), 7);
    }
}
