//! Discrete-time CPU scheduling engine.
//!
//! [`simulate`] runs a process set under one of five classical disciplines
//! and returns a [`SimulationResult`]: the compacted Gantt segments, one
//! timeline snapshot per simulated tick, and per-process timings with
//! their means. The engine is a pure function of its arguments.

pub mod algorithm;
pub mod error;
pub mod policy;
pub mod process;
pub mod result;
pub mod stats;
pub mod stepper;
pub mod timeline;
pub mod types;

pub use algorithm::Algorithm;
pub use error::{InputError, SimError};
pub use process::{Process, ProcessStore};
pub use result::SimulationResult;
pub use stats::{Averages, ProcessStats};
pub use stepper::Stepper;
pub use timeline::{GanttSegment, ProcessState, ProcessStateEntry, TimelineSnapshot};
pub use types::{ProcessId, Ticks};

use log::info;

/// Simulates `processes` under `algorithm`.
///
/// `quantum` is required (and must be at least 1) for round robin and
/// ignored otherwise. All validation happens before the first tick; the
/// caller's slice is only read.
pub fn simulate(
    processes: &[Process],
    algorithm: Algorithm,
    quantum: Option<Ticks>,
) -> Result<SimulationResult, SimError> {
    let store = ProcessStore::new(processes)?;
    let selector = policy::selector_for(algorithm, quantum)?;

    info!(
        "simulating {} processes under {}",
        store.len(),
        algorithm.name()
    );

    let result = Stepper::new(store, selector).run_to_completion()?;

    info!(
        "{} finished at t={} (avg waiting {:.2}, avg turnaround {:.2})",
        algorithm,
        result.total_time,
        result.avg_waiting,
        result.avg_turnaround
    );

    Ok(result)
}
