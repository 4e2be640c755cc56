//! Run the reference tasks for ten simulated seconds.
//!
//! ```text
//! RUST_LOG=info cargo run -p crescent-engine --example quickstart
//! ```
//!
//! Telemetry files are written to the system temp directory.

use std::error::Error;

use crescent_engine::{Override, SchedulerConfig, Simulation, SimulationConfig, Verbosity};
use crescent_tasks::{file_sinks, Orbital, Telemetry, TimeKeeper, BASE_RATE_HZ};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const MASSES: &str = "\
# body   mass (kg)
sun      1.989e30
earth    5.972e24
moon     7.342e22
";

const TELEMETRY: &str = "\
root/sim_time                       100
root/orbital/total_mass               1
root/orbital/moon/telemetry/mass     10
";

const OVERRIDES: &str = "\
# heavier moon
root/orbital/moon/telemetry/mass = 7.35e22
";

fn main() -> Result<(), Box<dyn Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = SimulationConfig {
        scheduler: SchedulerConfig {
            verbosity: Verbosity::Verbose,
            ..SchedulerConfig::default()
        },
    };
    let mut sim = Simulation::new(config)?;

    sim.register_with(|store| Ok::<_, Box<dyn Error>>(TimeKeeper::new(store.root_mut())))?;
    sim.register_with(|store| Orbital::new(store, MASSES))?;
    sim.apply_overrides(&Override::parse_lines(OVERRIDES)?)?;

    let out_dir = std::env::temp_dir();
    let telemetry = Telemetry::new(
        sim.store(),
        TELEMETRY,
        BASE_RATE_HZ,
        file_sinks(&out_dir, "quickstart"),
    )?;
    sim.register(telemetry);

    let metrics = sim.run(999)?;
    println!(
        "{} ticks, {} dispatches in {} us",
        metrics.ticks_completed, metrics.dispatches, metrics.total_us
    );
    for (name, us) in &metrics.task_us {
        println!("  {name:<16} {us:>8} us");
    }
    println!("telemetry written to {}", out_dir.display());

    sim.store().print()?;
    Ok(())
}
