use crate::process::{ProcessStore, Task};
use crate::types::{ProcessId, Ticks};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessState {
    New,
    Ready,
    Running,
    /// Reserved for I/O phases; never produced by the engine.
    Waiting,
    Terminated,
}

impl ProcessState {
    fn of(task: &Task, now: Ticks, running: bool) -> Self {
        if task.is_finished() {
            ProcessState::Terminated
        } else if running {
            ProcessState::Running
        } else if task.has_arrived(now) {
            ProcessState::Ready
        } else {
            ProcessState::New
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStateEntry {
    pub id: ProcessId,
    pub state: ProcessState,
    pub remaining_time: Ticks,
}

/// State of the whole system at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineSnapshot {
    pub time: Ticks,
    pub running_process: Option<ProcessId>,
    pub ready_queue: Vec<ProcessId>,
    /// One entry per process, in arrival order.
    pub process_states: Vec<ProcessStateEntry>,
}

impl TimelineSnapshot {
    /// Captures `store` at `now`. Remaining times are read before the unit executes.
    pub(crate) fn capture(
        now: Ticks,
        store: &ProcessStore,
        running: Option<usize>,
        ready_queue: Vec<ProcessId>,
    ) -> Self {
        let process_states = store
            .iter()
            .enumerate()
            .map(|(slot, task)| ProcessStateEntry {
                id: task.id(),
                state: ProcessState::of(task, now, running == Some(slot)),
                remaining_time: task.remaining,
            })
            .collect();

        Self {
            time: now,
            running_process: running.map(|slot| store.get(slot).id()),
            ready_queue,
            process_states,
        }
    }

    /// Snapshot before anything has happened: every process is `New`.
    pub(crate) fn initial(store: &ProcessStore) -> Self {
        Self::uniform(0, store, ProcessState::New)
    }

    pub(crate) fn terminal(now: Ticks, store: &ProcessStore) -> Self {
        Self::uniform(now, store, ProcessState::Terminated)
    }

    fn uniform(now: Ticks, store: &ProcessStore, state: ProcessState) -> Self {
        let process_states = store
            .iter()
            .map(|task| ProcessStateEntry {
                id: task.id(),
                state,
                remaining_time: task.remaining,
            })
            .collect();

        Self {
            time: now,
            running_process: None,
            ready_queue: Vec::new(),
            process_states,
        }
    }

    pub fn state_of(&self, id: ProcessId) -> Option<ProcessState> {
        self.process_states
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.state)
    }
}

/// Maximal interval during which one process (or nothing) holds the CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttSegment {
    /// `None` for idle time.
    pub process_id: Option<ProcessId>,
    pub start_time: Ticks,
    pub duration: Ticks,
}

impl GanttSegment {
    pub fn end_time(&self) -> Ticks {
        self.start_time + self.duration
    }

    pub fn is_idle(&self) -> bool {
        self.process_id.is_none()
    }
}
