use crate::error::{InputError, SimError};
use crate::types::{ProcessId, Ticks};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Caller-supplied process descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    pub id: ProcessId,
    #[serde(default)]
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    /// Lower value = higher priority. Only consulted by priority scheduling.
    #[serde(default)]
    pub priority: i32,
}

impl Process {
    pub fn new(id: ProcessId, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
            priority: 0,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// Working copy of a process, owned by the store for the length of one run.
#[derive(Debug, Clone)]
pub struct Task {
    pub process: Process,
    pub remaining: Ticks,
    pub start_time: Option<Ticks>,
    pub finish_time: Option<Ticks>,
    pub response_time: Option<Ticks>,
    pub turnaround_time: Option<Ticks>,
    pub waiting_time: Option<Ticks>,
}

impl Task {
    fn new(process: Process) -> Self {
        Self {
            remaining: process.burst_time,
            process,
            start_time: None,
            finish_time: None,
            response_time: None,
            turnaround_time: None,
            waiting_time: None,
        }
    }

    pub fn id(&self) -> ProcessId {
        self.process.id
    }

    pub fn arrival_time(&self) -> Ticks {
        self.process.arrival_time
    }

    pub fn has_arrived(&self, now: Ticks) -> bool {
        self.process.arrival_time <= now
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// Arrived and still has work left.
    pub fn is_eligible(&self, now: Ticks) -> bool {
        self.has_arrived(now) && !self.is_finished()
    }

    /// Records the first dispatch. Later dispatches leave start and response untouched.
    pub(crate) fn dispatch(&mut self, now: Ticks) {
        debug_assert!(self.is_eligible(now), "dispatching ineligible {}", self.id());
        if self.start_time.is_none() {
            self.start_time = Some(now);
            self.response_time = Some(now - self.process.arrival_time);
        }
    }

    pub(crate) fn run_for(&mut self, ticks: Ticks) {
        debug_assert!(ticks <= self.remaining, "{} overran its burst", self.id());
        self.remaining -= ticks;
    }

    pub(crate) fn complete(&mut self, now: Ticks) {
        debug_assert!(self.is_finished(), "{} completed with work left", self.id());
        debug_assert!(self.finish_time.is_none(), "{} completed twice", self.id());

        let turnaround = now - self.process.arrival_time;
        self.finish_time = Some(now);
        self.turnaround_time = Some(turnaround);
        self.waiting_time = Some(turnaround - self.process.burst_time);
    }
}

/// Normalized working set, sorted by arrival time (stable on ties).
#[derive(Debug, Clone)]
pub struct ProcessStore {
    tasks: Vec<Task>,
}

impl ProcessStore {
    pub fn new(processes: &[Process]) -> Result<Self, SimError> {
        if processes.is_empty() {
            return Err(SimError::EmptyInput);
        }

        let mut seen = HashSet::with_capacity(processes.len());
        for process in processes {
            if process.burst_time == 0 {
                return Err(InputError::ZeroBurst { id: process.id }.into());
            }
            if !seen.insert(process.id) {
                return Err(InputError::DuplicateId(process.id).into());
            }
        }

        // Simulated time never passes the latest arrival plus all work.
        let latest = processes.iter().map(|p| p.arrival_time).max().unwrap_or(0);
        processes
            .iter()
            .try_fold(latest, |end, p| end.checked_add(p.burst_time))
            .ok_or(InputError::TimeOverflow)?;

        let mut tasks: Vec<Task> = processes.iter().cloned().map(Task::new).collect();
        tasks.sort_by_key(|task| task.process.arrival_time);

        Ok(Self { tasks })
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks in arrival order. The position is the task's slot.
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn get(&self, slot: usize) -> &Task {
        &self.tasks[slot]
    }

    pub(crate) fn get_mut(&mut self, slot: usize) -> &mut Task {
        &mut self.tasks[slot]
    }

    pub fn slot_of(&self, id: ProcessId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == id)
    }

    pub fn by_id(&self, id: ProcessId) -> Option<&Task> {
        self.slot_of(id).map(|slot| &self.tasks[slot])
    }

    /// Slots eligible at `now`, in arrival order.
    pub fn eligible(&self, now: Ticks) -> impl Iterator<Item = usize> + '_ {
        self.tasks
            .iter()
            .enumerate()
            .filter(move |(_, task)| task.is_eligible(now))
            .map(|(slot, _)| slot)
    }

    /// Arrival time of the next unfinished process that has not arrived yet.
    pub fn next_arrival(&self, now: Ticks) -> Option<Ticks> {
        self.tasks
            .iter()
            .find(|task| task.arrival_time() > now && !task.is_finished())
            .map(Task::arrival_time)
    }

    pub fn all_finished(&self) -> bool {
        self.tasks.iter().all(Task::is_finished)
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }
}
