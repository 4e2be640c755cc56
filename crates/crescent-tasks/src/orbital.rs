//! Orbital bodies and their masses.
//!
//! The masses config has one body per line:
//!
//! ```text
//! # body    mass (kg)
//! sun       1.989e30
//! earth     5.972e24
//! moon                # mass defaults to 0
//! ```
//!
//! For every body the task creates `orbital/<body>/telemetry/mass`, and
//! it keeps `orbital/total_mass` equal to the sum of the body masses.

use indexmap::IndexMap;

use crescent_core::{config_lines, ElementId};
use crescent_store::Store;
use crescent_task::{Task, TaskContext, TaskError};
use tracing::debug;

use crate::error::SetupError;

/// Parse a masses config into `(body, mass)` pairs in file order.
///
/// Tokens after the mass are ignored.
pub fn parse_masses(text: &str) -> Result<IndexMap<String, f64>, SetupError> {
    let mut masses = IndexMap::new();
    for line in config_lines(text) {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            continue;
        };
        let mass = match tokens.next() {
            Some(text) => text.parse::<f64>().map_err(|_| SetupError::InvalidNumber {
                line: line.to_string(),
                text: text.to_string(),
            })?,
            None => 0.0,
        };
        if masses.insert(name.to_string(), mass).is_some() {
            return Err(SetupError::DuplicateBody {
                name: name.to_string(),
            });
        }
    }
    Ok(masses)
}

#[derive(Debug)]
struct Body {
    name: String,
    mass: ElementId,
}

/// Publishes the configured bodies' masses.
#[derive(Debug)]
pub struct Orbital {
    bodies: Vec<Body>,
    total_mass: ElementId,
}

impl Orbital {
    /// Create `root/orbital/` and populate it from the masses config.
    ///
    /// Fails with [`SetupError::Access`] if one of the paths already
    /// holds an element that is not a double.
    pub fn new(store: &mut Store, masses: &str) -> Result<Self, SetupError> {
        let masses = parse_masses(masses)?;
        store.root_mut().subdir("orbital");
        let mut bodies = Vec::with_capacity(masses.len());
        let mut total = 0.0;
        for (name, mass) in masses {
            let id = store.create::<f64>(&format!("root/orbital/{name}/telemetry/mass"));
            *store.try_load::<f64>(id)? = mass;
            total += mass;
            debug!(body = %name, mass, "orbital body");
            bodies.push(Body { name, mass: id });
        }
        let total_mass = store.create::<f64>("root/orbital/total_mass");
        *store.try_load::<f64>(total_mass)? = total;
        Ok(Self { bodies, total_mass })
    }

    /// Body names in config order.
    pub fn bodies(&self) -> impl Iterator<Item = &str> + '_ {
        self.bodies.iter().map(|b| b.name.as_str())
    }

    /// Whether `name` is a configured body.
    pub fn exists(&self, name: &str) -> bool {
        self.mass_id(name).is_some()
    }

    /// ID of `orbital/<name>/telemetry/mass`.
    pub fn mass_id(&self, name: &str) -> Option<ElementId> {
        let name = name.trim();
        self.bodies.iter().find(|b| b.name == name).map(|b| b.mass)
    }

    /// ID of `orbital/total_mass`.
    pub fn total_mass_id(&self) -> ElementId {
        self.total_mass
    }
}

impl Task for Orbital {
    fn name(&self) -> &str {
        "Orbital"
    }

    fn dispatch(&mut self, ctx: &mut TaskContext<'_>) -> Result<(), TaskError> {
        let mut total = 0.0;
        for body in &self.bodies {
            total += *ctx.store_ref().try_read::<f64>(body.mass)?;
        }
        *ctx.store().try_load::<f64>(self.total_mass)? = total;
        Ok(())
    }
}
