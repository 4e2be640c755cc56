//! Benchmark profiles and utilities for the Crescent simulation substrate.
//!
//! - [`populated_store`]: a store with `dirs * elements` doubles
//! - [`masses_config`] / [`telemetry_config`]: synthetic config text
//! - [`reference_simulation`]: the reference tasks wired to a null sink

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::error::Error;
use std::io::{self, Write};

use crescent_engine::{SchedulerConfig, Simulation, SimulationConfig, Verbosity};
use crescent_store::Store;
use crescent_tasks::{Orbital, SetupError, Telemetry, TimeKeeper, BASE_RATE_HZ};

/// Full path of element `e` in directory `d` of a [`populated_store`].
pub fn element_path(d: usize, e: usize) -> String {
    format!("root/bench/d{d:03}/e{e:03}")
}

/// A store holding `dirs * elements` `double` elements under
/// `root/bench`, created in directory-major order.
pub fn populated_store(dirs: usize, elements: usize) -> Store {
    let mut store = Store::new();
    for d in 0..dirs {
        for e in 0..elements {
            store.create::<f64>(&element_path(d, e));
        }
    }
    store
}

/// A masses config with `n` bodies named `body000`, `body001`, ...
pub fn masses_config(n: usize) -> String {
    (0..n)
        .map(|i| format!("body{i:03} {}\n", 1.0e20 * (i + 1) as f64))
        .collect()
}

/// A telemetry config sampling every body's mass at a spread of rates,
/// plus `sim_time` at the base rate.
pub fn telemetry_config(n: usize) -> String {
    const RATES: [u32; 4] = [1, 10, 50, 100];
    let mut text = String::from("root/sim_time 100\n");
    for i in 0..n {
        let rate = RATES[i % RATES.len()];
        text.push_str(&format!("root/orbital/body{i:03}/telemetry/mass {rate}\n"));
    }
    text
}

/// TimeKeeper, Orbital over `bodies` bodies and Telemetry into
/// [`io::sink`], with progress reporting off.
pub fn reference_simulation(bodies: usize) -> Result<Simulation, Box<dyn Error>> {
    let config = SimulationConfig {
        scheduler: SchedulerConfig {
            verbosity: Verbosity::Quiet,
            ..SchedulerConfig::default()
        },
    };
    let mut sim = Simulation::new(config)?;
    sim.register_with(|store| Ok::<_, SetupError>(TimeKeeper::new(store.root_mut())))?;
    sim.register_with(|store| Orbital::new(store, &masses_config(bodies)))?;
    let telemetry = Telemetry::new(
        sim.store(),
        &telemetry_config(bodies),
        BASE_RATE_HZ,
        |_| Ok(Box::new(io::sink()) as Box<dyn Write>),
    )?;
    sim.register(telemetry);
    Ok(sim)
}
