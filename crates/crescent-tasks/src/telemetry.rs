//! Fixed-rate binary telemetry.
//!
//! The telemetry config lists one element per line with its sampling
//! rate in Hz:
//!
//! ```text
//! # path                            rate
//! root/orbital/earth/telemetry/mass   10
//! root/sim_time                      100
//! ```
//!
//! Elements sharing a rate form a [`Flow`] with its own output stream.
//! A flow samples every `base_rate / rate` ticks (integer division) and
//! writes each of its elements, in config order, as fixed-width
//! little-endian bytes. There are no headers or separators; a reader
//! needs the config to decode a stream.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use indexmap::IndexMap;

use crescent_core::{config_lines, path, AccessError, ElementId, StoreError};
use crescent_store::Store;
use crescent_task::{Task, TaskContext, TaskError};
use tracing::{debug, info};

use crate::error::SetupError;

/// Tick rate the flow periods are derived from.
pub const BASE_RATE_HZ: u32 = 100;

/// Elements sampled at one rate into one stream.
pub struct Flow {
    rate: u32,
    period: u64,
    elements: Vec<(String, ElementId)>,
    sink: Box<dyn Write>,
}

impl Flow {
    /// Configured sampling rate in Hz.
    pub fn rate(&self) -> u32 {
        self.rate
    }

    /// Ticks between samples.
    pub fn period(&self) -> u64 {
        self.period
    }

    /// Element paths in write order.
    pub fn paths(&self) -> impl Iterator<Item = &str> + '_ {
        self.elements.iter().map(|(p, _)| p.as_str())
    }

    /// Bytes written per sample.
    pub fn record_len(&self, store: &Store) -> usize {
        self.elements
            .iter()
            .filter_map(|&(_, id)| store.get_type(id)?.fixed_width())
            .sum()
    }
}

impl fmt::Debug for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flow")
            .field("rate", &self.rate)
            .field("period", &self.period)
            .field("elements", &self.elements)
            .finish_non_exhaustive()
    }
}

/// Samples configured elements into per-rate binary streams.
///
/// Register it after every task whose output it records, so each
/// sample reflects the state at the end of the tick. Streams are
/// flushed when the run finishes; a flush failure fails the run.
#[derive(Debug)]
pub struct Telemetry {
    flows: Vec<Flow>,
}

impl Telemetry {
    /// Resolve every configured element and open one stream per rate.
    ///
    /// `open` is called once per distinct rate, in ascending rate order.
    /// Rates must lie in `1..=base_rate`. Unknown paths and `string`
    /// elements are rejected here, before anything is opened.
    pub fn new<F>(
        store: &Store,
        config: &str,
        base_rate: u32,
        mut open: F,
    ) -> Result<Self, SetupError>
    where
        F: FnMut(u32) -> io::Result<Box<dyn Write>>,
    {
        let mut groups: IndexMap<u32, Vec<(String, ElementId)>> = IndexMap::new();
        for line in config_lines(config) {
            let missing = |field| SetupError::MissingField {
                line: line.to_string(),
                field,
            };
            let mut tokens = line.split_whitespace();
            let full_path = tokens.next().ok_or_else(|| missing("path"))?;
            let rate_text = tokens.next().ok_or_else(|| missing("rate"))?;
            let rate: u32 = rate_text.parse().map_err(|_| SetupError::InvalidNumber {
                line: line.to_string(),
                text: rate_text.to_string(),
            })?;
            if rate == 0 || rate > base_rate {
                return Err(SetupError::RateOutOfRange {
                    rate,
                    max: base_rate,
                });
            }

            let id = store.lookup(full_path)?;
            let normalized = path::normalize(full_path);
            let tag = store.get_type(id).ok_or(StoreError::NotFound {
                path: normalized.clone(),
            })?;
            if tag.fixed_width().is_none() {
                return Err(SetupError::UnsupportedKind {
                    path: normalized,
                    tag,
                });
            }
            groups.entry(rate).or_default().push((normalized, id));
        }
        groups.sort_keys();

        let mut flows = Vec::with_capacity(groups.len());
        for (rate, elements) in groups {
            let period = u64::from(base_rate / rate);
            let sink = open(rate)?;
            info!(rate, period, elements = elements.len(), "telemetry flow opened");
            flows.push(Flow {
                rate,
                period,
                elements,
                sink,
            });
        }
        Ok(Self { flows })
    }

    /// The flows in ascending rate order.
    pub fn flows(&self) -> &[Flow] {
        &self.flows
    }

    /// Flush every stream.
    pub fn flush(&mut self) -> io::Result<()> {
        for flow in &mut self.flows {
            flow.sink.flush()?;
        }
        Ok(())
    }
}

impl Task for Telemetry {
    fn name(&self) -> &str {
        "Telemetry"
    }

    fn dispatch(&mut self, ctx: &mut TaskContext<'_>) -> Result<(), TaskError> {
        let tick = ctx.tick().0;
        let store = ctx.store_ref();
        for flow in &mut self.flows {
            if tick % flow.period != 0 {
                continue;
            }
            for &(_, id) in &flow.elements {
                let value = store.value(id).ok_or(AccessError::UnknownElement { id })?;
                value.write_le(&mut flow.sink)?;
            }
        }
        Ok(())
    }

    fn finish(&mut self, _ctx: &mut TaskContext<'_>) -> Result<(), TaskError> {
        self.flush()?;
        debug!(flows = self.flows.len(), "telemetry flushed");
        Ok(())
    }
}

/// A sink opener that creates `<dir>/<prefix>_<rate>Hz.telem` for each
/// rate, buffered.
pub fn file_sinks(
    dir: impl Into<PathBuf>,
    prefix: impl Into<String>,
) -> impl FnMut(u32) -> io::Result<Box<dyn Write>> {
    let dir = dir.into();
    let prefix = prefix.into();
    move |rate| {
        let file_path = dir.join(format!("{prefix}_{rate}Hz.telem"));
        debug!(path = %file_path.display(), "creating telemetry file");
        let file = File::create(file_path)?;
        Ok(Box::new(BufWriter::new(file)) as Box<dyn Write>)
    }
}
