//! Publishes simulated time.

use crescent_core::ElementId;
use crescent_store::DirectoryMut;
use crescent_task::{Task, TaskContext, TaskError};

/// Writes `tick * tick_period` to a `sim_time` element every tick.
#[derive(Debug)]
pub struct TimeKeeper {
    sim_time: ElementId,
}

impl TimeKeeper {
    /// Create `sim_time: double` in `dir`.
    pub fn new(mut dir: DirectoryMut<'_>) -> Self {
        Self {
            sim_time: dir.create_element::<f64>("sim_time"),
        }
    }

    /// ID of the `sim_time` element.
    pub fn sim_time_id(&self) -> ElementId {
        self.sim_time
    }
}

impl Task for TimeKeeper {
    fn name(&self) -> &str {
        "SimulationTime"
    }

    fn dispatch(&mut self, ctx: &mut TaskContext<'_>) -> Result<(), TaskError> {
        let t = ctx.sim_time();
        *ctx.store().try_load::<f64>(self.sim_time)? = t;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crescent_core::TickId;
    use crescent_store::Store;

    #[test]
    fn writes_scaled_tick() {
        let mut store = Store::new();
        let mut tk = TimeKeeper::new(store.root_mut());
        assert_eq!(store.lookup("root/sim_time"), Ok(tk.sim_time_id()));

        let mut ctx = TaskContext::new(&mut store, TickId(250), 0.01);
        tk.dispatch(&mut ctx).unwrap();
        assert!((store.read::<f64>(tk.sim_time_id()) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn can_live_in_a_subdirectory() {
        let mut store = Store::new();
        let tk = TimeKeeper::new(store.root_mut().subdir("clock"));
        assert_eq!(store.lookup("root/clock/sim_time"), Ok(tk.sim_time_id()));
        assert_eq!(tk.name(), "SimulationTime");
    }
}
