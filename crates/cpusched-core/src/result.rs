use crate::stats::ProcessStats;
use crate::timeline::{GanttSegment, TimelineSnapshot};
use crate::types::{ProcessId, Ticks};
use serde::{Deserialize, Serialize};

/// Complete, replayable record of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    #[serde(rename = "ganttChart")]
    pub segments: Vec<GanttSegment>,
    pub timeline: Vec<TimelineSnapshot>,
    pub total_time: Ticks,
    /// One entry per process, in arrival order.
    pub process_stats: Vec<ProcessStats>,
    #[serde(rename = "averageWaitingTime")]
    pub avg_waiting: f64,
    #[serde(rename = "averageTurnaroundTime")]
    pub avg_turnaround: f64,
    #[serde(rename = "averageResponseTime")]
    pub avg_response: f64,
}

impl SimulationResult {
    /// Timeline entry at replay position `step`.
    pub fn snapshot(&self, step: usize) -> Option<&TimelineSnapshot> {
        self.timeline.get(step)
    }

    pub fn len_steps(&self) -> usize {
        self.timeline.len()
    }

    pub fn stats_for(&self, id: ProcessId) -> Option<&ProcessStats> {
        self.process_stats.iter().find(|stats| stats.id == id)
    }

    pub fn segments_for(&self, id: ProcessId) -> impl Iterator<Item = &GanttSegment> + '_ {
        self.segments
            .iter()
            .filter(move |segment| segment.process_id == Some(id))
    }

    pub fn idle_time(&self) -> Ticks {
        self.segments
            .iter()
            .filter(|segment| segment.is_idle())
            .map(|segment| segment.duration)
            .sum()
    }
}
