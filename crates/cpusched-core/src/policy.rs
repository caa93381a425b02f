use crate::algorithm::Algorithm;
use crate::error::InputError;
use crate::process::{ProcessStore, Task};
use crate::types::{ProcessId, Ticks};
use std::collections::VecDeque;
use std::num::NonZeroU64;

/// Picks which process holds the CPU at each decision point.
///
/// Slots are positions in the store's arrival order, so "first found"
/// tie-breaks fall out of scanning the store front to back.
pub trait Selector {
    /// Select the next slot to run at `now`, or `None` if nothing is eligible.
    fn schedule(&mut self, now: Ticks, store: &ProcessStore) -> Option<usize>;

    /// Ticks the selected task runs before the next decision point.
    fn slice(&self, task: &Task) -> Ticks;

    /// Called when `slot` left the CPU at `now` with work remaining.
    fn preempted(&mut self, _slot: usize, _now: Ticks, _store: &ProcessStore) {}

    /// Ready processes at `now`, in queue order, excluding `running`.
    fn ready_queue(
        &self,
        now: Ticks,
        store: &ProcessStore,
        running: Option<usize>,
    ) -> Vec<ProcessId> {
        store
            .eligible(now)
            .filter(|&slot| Some(slot) != running)
            .map(|slot| store.get(slot).id())
            .collect()
    }
}

/// Builds the selector for `algorithm`. `quantum` is only read for round robin.
pub fn selector_for(
    algorithm: Algorithm,
    quantum: Option<Ticks>,
) -> Result<Box<dyn Selector>, InputError> {
    let selector: Box<dyn Selector> = match algorithm {
        Algorithm::Fcfs => Box::new(FirstComeFirstServed),
        Algorithm::Sjf => Box::new(ShortestJobFirst),
        Algorithm::Srtf => Box::new(ShortestRemainingTime),
        Algorithm::Priority => Box::new(PriorityScheduler),
        Algorithm::RoundRobin => {
            let quantum = quantum.ok_or(InputError::MissingQuantum)?;
            let quantum = NonZeroU64::new(quantum).ok_or(InputError::ZeroQuantum)?;
            Box::new(RoundRobinScheduler::new(quantum))
        }
    };
    Ok(selector)
}

// `min_by_key` keeps the first of equal minima, i.e. the earliest slot.
fn pick_min<K: Ord>(now: Ticks, store: &ProcessStore, key: impl Fn(&Task) -> K) -> Option<usize> {
    store.eligible(now).min_by_key(|&slot| key(store.get(slot)))
}

pub struct FirstComeFirstServed;

impl Selector for FirstComeFirstServed {
    fn schedule(&mut self, now: Ticks, store: &ProcessStore) -> Option<usize> {
        pick_min(now, store, Task::arrival_time)
    }

    fn slice(&self, task: &Task) -> Ticks {
        task.remaining
    }
}

pub struct ShortestJobFirst;

impl Selector for ShortestJobFirst {
    fn schedule(&mut self, now: Ticks, store: &ProcessStore) -> Option<usize> {
        pick_min(now, store, |task| (task.process.burst_time, task.arrival_time()))
    }

    fn slice(&self, task: &Task) -> Ticks {
        task.remaining
    }
}

/// Re-evaluated every tick; a shorter arrival displaces the running task.
pub struct ShortestRemainingTime;

impl Selector for ShortestRemainingTime {
    fn schedule(&mut self, now: Ticks, store: &ProcessStore) -> Option<usize> {
        pick_min(now, store, |task| task.remaining)
    }

    fn slice(&self, _task: &Task) -> Ticks {
        1
    }
}

pub struct PriorityScheduler;

impl Selector for PriorityScheduler {
    fn schedule(&mut self, now: Ticks, store: &ProcessStore) -> Option<usize> {
        pick_min(now, store, |task| (task.process.priority, task.arrival_time()))
    }

    fn slice(&self, task: &Task) -> Ticks {
        task.remaining
    }
}

pub struct RoundRobinScheduler {
    queue: VecDeque<usize>,
    quantum: NonZeroU64,
}

impl RoundRobinScheduler {
    pub fn new(quantum: NonZeroU64) -> Self {
        Self {
            queue: VecDeque::new(),
            quantum,
        }
    }

    /// Append newly eligible slots in arrival order, skipping `running`.
    fn admit(&mut self, now: Ticks, store: &ProcessStore, running: Option<usize>) {
        for slot in store.eligible(now) {
            if Some(slot) != running && !self.queue.contains(&slot) {
                self.queue.push_back(slot);
            }
        }
    }
}

impl Selector for RoundRobinScheduler {
    fn schedule(&mut self, now: Ticks, store: &ProcessStore) -> Option<usize> {
        self.admit(now, store, None);
        self.queue.pop_front()
    }

    fn slice(&self, task: &Task) -> Ticks {
        task.remaining.min(self.quantum.get())
    }

    // Arrivals during the expired quantum go ahead of the preempted slot.
    fn preempted(&mut self, slot: usize, now: Ticks, store: &ProcessStore) {
        self.admit(now, store, Some(slot));
        self.queue.push_back(slot);
    }

    fn ready_queue(
        &self,
        now: Ticks,
        store: &ProcessStore,
        running: Option<usize>,
    ) -> Vec<ProcessId> {
        // Arrivals not yet admitted will be appended in arrival order.
        let pending = store
            .eligible(now)
            .filter(|slot| Some(*slot) != running && !self.queue.contains(slot));
        self.queue
            .iter()
            .copied()
            .chain(pending)
            .map(|slot| store.get(slot).id())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::Process;

    fn store(rows: &[(u32, Ticks, Ticks, i32)]) -> ProcessStore {
        let processes: Vec<Process> = rows
            .iter()
            .map(|&(id, arrival, burst, prio)| {
                Process::new(ProcessId::new(id).unwrap(), arrival, burst).with_priority(prio)
            })
            .collect();
        ProcessStore::new(&processes).unwrap()
    }

    #[test]
    fn fcfs_prefers_input_order_on_equal_arrival() {
        let s = store(&[(4, 0, 9, 0), (2, 0, 1, 0)]);
        assert_eq!(FirstComeFirstServed.schedule(0, &s), Some(0));
    }

    #[test]
    fn sjf_breaks_burst_ties_by_arrival() {
        let s = store(&[(1, 0, 5, 0), (2, 1, 3, 0), (3, 2, 3, 0)]);
        assert_eq!(ShortestJobFirst.schedule(2, &s), Some(1));
        assert_eq!(ShortestJobFirst.schedule(0, &s), Some(0));
    }

    #[test]
    fn priority_uses_lowest_value() {
        let s = store(&[(1, 0, 5, 3), (2, 0, 3, 1), (3, 0, 3, 1)]);
        assert_eq!(PriorityScheduler.schedule(0, &s), Some(1));
    }

    #[test]
    fn srtf_runs_single_ticks() {
        let s = store(&[(1, 0, 8, 0)]);
        assert_eq!(ShortestRemainingTime.slice(s.get(0)), 1);
    }

    #[test]
    fn nothing_eligible_yields_none() {
        let s = store(&[(1, 3, 2, 0)]);
        assert_eq!(FirstComeFirstServed.schedule(0, &s), None);
        let mut rr = RoundRobinScheduler::new(NonZeroU64::new(2).unwrap());
        assert_eq!(rr.schedule(0, &s), None);
    }

    #[test]
    fn round_robin_queues_arrivals_before_preempted() {
        let s = store(&[(1, 0, 5, 0), (2, 1, 3, 0)]);
        let mut rr = RoundRobinScheduler::new(NonZeroU64::new(2).unwrap());

        assert_eq!(rr.schedule(0, &s), Some(0));
        assert_eq!(rr.slice(s.get(0)), 2);
        assert_eq!(rr.ready_queue(1, &s, Some(0)), vec![ProcessId::new(2).unwrap()]);

        rr.preempted(0, 2, &s);
        assert_eq!(rr.queue.iter().copied().collect::<Vec<_>>(), vec![1, 0]);
        assert_eq!(rr.schedule(2, &s), Some(1));
    }

    #[test]
    fn quantum_validation() {
        assert_eq!(
            selector_for(Algorithm::RoundRobin, None).err(),
            Some(InputError::MissingQuantum)
        );
        assert_eq!(
            selector_for(Algorithm::RoundRobin, Some(0)).err(),
            Some(InputError::ZeroQuantum)
        );
        assert!(selector_for(Algorithm::Fcfs, Some(0)).is_ok());
    }
}
