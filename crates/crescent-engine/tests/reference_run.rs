//! Integration test: a full simulation with the reference tasks.
//!
//! Builds time keeping, orbital masses and telemetry against one store,
//! registers telemetry last, and checks the bytes it streamed against
//! the state the earlier tasks published.

use std::io::{BufWriter, Write};

use crescent_engine::{
    HaltReason, Override, RunError, SchedulerState, Simulation, SimulationConfig,
};
use crescent_task::TaskError;
use crescent_tasks::{Orbital, Telemetry, TimeKeeper, BASE_RATE_HZ};
use crescent_test_utils::{BrokenSink, SharedBuffer};

const MASSES: &str = "\
sun    1.989e30
earth  5.972e24
moon   7.342e22
";

const TELEMETRY: &str = "\
# path                                rate
root/sim_time                          100
root/orbital/total_mass                 25
root/orbital/earth/telemetry/mass       25
";

#[test]
fn reference_tasks_stream_published_state() {
    let mut sim = Simulation::new(SimulationConfig::default()).unwrap();

    let keeper = TimeKeeper::new(sim.store_mut().root_mut());
    let orbital = Orbital::new(sim.store_mut(), MASSES).unwrap();
    let earth = orbital.mass_id("earth").unwrap();

    let fast = SharedBuffer::new();
    let slow = SharedBuffer::new();
    let (f, s) = (fast.clone(), slow.clone());
    let telemetry = Telemetry::new(sim.store(), TELEMETRY, BASE_RATE_HZ, move |rate| {
        let buf = if rate == 100 { f.clone() } else { s.clone() };
        Ok(Box::new(buf) as Box<dyn Write>)
    })
    .unwrap();

    sim.register(keeper);
    sim.register(orbital);
    sim.register(telemetry);
    assert_eq!(
        sim.scheduler().task_names(),
        ["SimulationTime", "Orbital", "Telemetry"]
    );

    // Heavier earth before the run; Orbital republishes the total.
    sim.apply_overrides(&[Override::new(
        "root/orbital/earth/telemetry/mass",
        "6.0e24",
    )])
    .unwrap();

    let metrics = sim.run(99).unwrap();
    assert_eq!(metrics.ticks_completed, 100);
    assert_eq!(metrics.dispatches, 300);
    assert_eq!(metrics.task_us.len(), 3);

    // sim_time at 100 Hz: one f64 per tick, last one is 0.99 s.
    let fast = fast.contents();
    assert_eq!(fast.len(), 100 * 8);
    let last = f64::from_le_bytes(fast[fast.len() - 8..].try_into().unwrap());
    assert!((last - 0.99).abs() < 1e-12);

    // 25 Hz: period 4, ticks 0, 4, ..., 96 => 25 samples of two f64s.
    let slow = slow.contents();
    assert_eq!(slow.len(), 25 * 16);
    let total = f64::from_le_bytes(slow[0..8].try_into().unwrap());
    let earth_mass = f64::from_le_bytes(slow[8..16].try_into().unwrap());
    assert_eq!(earth_mass, 6.0e24);
    assert_eq!(total, 1.989e30 + 6.0e24 + 7.342e22);

    assert_eq!(*sim.store().read::<f64>(earth), 6.0e24);
    let sim_time = sim.store().lookup("root/sim_time").unwrap();
    assert!((sim.store().read::<f64>(sim_time) - 0.99).abs() < 1e-12);
}

#[test]
fn buffered_telemetry_failure_fails_the_run() {
    let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
    let keeper = TimeKeeper::new(sim.store_mut().root_mut());
    let telemetry = Telemetry::new(sim.store(), "root/sim_time 100", BASE_RATE_HZ, |_| {
        Ok(Box::new(BufWriter::new(BrokenSink)) as Box<dyn Write>)
    })
    .unwrap();
    sim.register(keeper);
    sim.register(telemetry);

    // Ten samples fit the buffer; the loss only shows at the final flush.
    let err = sim.run(9).unwrap_err();
    match err {
        RunError::FinishFailed { task, source } => {
            assert_eq!(task, "Telemetry");
            assert!(matches!(source, TaskError::Io(_)));
        }
        other => panic!("expected FinishFailed, got {other:?}"),
    }
    assert_eq!(
        sim.scheduler().state(),
        SchedulerState::Halted(HaltReason::TaskFailed)
    );
}

#[test]
fn tree_dump_lists_reference_layout() {
    let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
    TimeKeeper::new(sim.store_mut().root_mut());
    Orbital::new(sim.store_mut(), "sun 1\n").unwrap();

    let dump = sim.store().tree().to_string();
    let expected = "\
 -- root/
    |   - sim_time (double)
    |
     -- orbital/
        |   - total_mass (double)
        |
         -- sun/
            |
             -- telemetry/
                |   - mass (double)
";
    assert_eq!(dump, expected);
}
