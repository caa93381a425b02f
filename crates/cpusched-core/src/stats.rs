use crate::error::SimError;
use crate::process::Task;
use crate::types::{ProcessId, Ticks};
use serde::{Deserialize, Serialize};

/// Final timings of one completed process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStats {
    pub id: ProcessId,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub priority: i32,
    pub start_time: Ticks,
    pub finish_time: Ticks,
    pub response_time: Ticks,
    pub waiting_time: Ticks,
    pub turnaround_time: Ticks,
}

impl ProcessStats {
    pub(crate) fn from_task(task: &Task) -> Self {
        debug_assert!(
            task.finish_time.is_some(),
            "{} has no finish time",
            task.id()
        );

        Self {
            id: task.id(),
            arrival_time: task.process.arrival_time,
            burst_time: task.process.burst_time,
            priority: task.process.priority,
            start_time: task.start_time.unwrap_or_default(),
            finish_time: task.finish_time.unwrap_or_default(),
            response_time: task.response_time.unwrap_or_default(),
            waiting_time: task.waiting_time.unwrap_or_default(),
            turnaround_time: task.turnaround_time.unwrap_or_default(),
        }
    }
}

/// Unweighted means across all processes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Averages {
    pub waiting: f64,
    pub turnaround: f64,
    pub response: f64,
}

impl Averages {
    pub fn of(stats: &[ProcessStats]) -> Result<Self, SimError> {
        if stats.is_empty() {
            return Err(SimError::EmptyInput);
        }

        let n = stats.len() as f64;
        let mean = |field: fn(&ProcessStats) -> Ticks| {
            stats.iter().map(|s| u128::from(field(s))).sum::<u128>() as f64 / n
        };

        Ok(Self {
            waiting: mean(|s| s.waiting_time),
            turnaround: mean(|s| s.turnaround_time),
            response: mean(|s| s.response_time),
        })
    }
}
