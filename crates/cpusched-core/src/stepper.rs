use crate::error::SimError;
use crate::policy::Selector;
use crate::process::ProcessStore;
use crate::result::SimulationResult;
use crate::stats::{Averages, ProcessStats};
use crate::timeline::{GanttSegment, TimelineSnapshot};
use crate::types::{ProcessId, Ticks};
use log::{debug, trace};

/// Drives simulated time forward, one decision point per `step`.
pub struct Stepper {
    store: ProcessStore,
    selector: Box<dyn Selector>,
    now: Ticks,
    segments: Vec<GanttSegment>,
    timeline: Vec<TimelineSnapshot>,
}

impl Stepper {
    pub fn new(store: ProcessStore, selector: Box<dyn Selector>) -> Self {
        let timeline = vec![TimelineSnapshot::initial(&store)];
        Self {
            store,
            selector,
            now: 0,
            segments: Vec::new(),
            timeline,
        }
    }

    pub fn now(&self) -> Ticks {
        self.now
    }

    /// Runs the next slice or idle gap. Returns false once every process is done.
    pub fn step(&mut self) -> bool {
        if let Some(slot) = self.selector.schedule(self.now, &self.store) {
            self.run(slot);
            return true;
        }

        match self.store.next_arrival(self.now) {
            Some(arrival) => {
                self.idle_until(arrival);
                true
            }
            None => {
                debug_assert!(self.store.all_finished(), "stalled at t={}", self.now);
                false
            }
        }
    }

    pub fn run_to_completion(mut self) -> Result<SimulationResult, SimError> {
        while self.step() {}
        self.finish()
    }

    fn run(&mut self, slot: usize) {
        self.store.get_mut(slot).dispatch(self.now);

        let task = self.store.get(slot);
        let id = task.id();
        let slice = self.selector.slice(task);
        debug_assert!(slice >= 1 && slice <= task.remaining, "bad slice {slice} for {id}");
        debug!("t={} dispatch {} for {} (remaining {})", self.now, id, slice, task.remaining);

        self.record_segment(Some(id), slice);

        for _ in 0..slice {
            let ready = self.selector.ready_queue(self.now, &self.store, Some(slot));
            trace!("t={} running {} ready {:?}", self.now, id, ready);
            self.timeline
                .push(TimelineSnapshot::capture(self.now, &self.store, Some(slot), ready));
            self.store.get_mut(slot).run_for(1);
            self.now += 1;
        }

        if self.store.get(slot).is_finished() {
            self.store.get_mut(slot).complete(self.now);
            debug!("t={} {} terminated", self.now, id);
        } else {
            debug!("t={} {} preempted", self.now, id);
            self.selector.preempted(slot, self.now, &self.store);
        }
    }

    fn idle_until(&mut self, arrival: Ticks) {
        debug!("t={} idle until {}", self.now, arrival);
        self.record_segment(None, arrival - self.now);
        self.timeline
            .push(TimelineSnapshot::capture(self.now, &self.store, None, Vec::new()));
        self.now = arrival;
    }

    // Back-to-back slices of the same process share one segment.
    fn record_segment(&mut self, process_id: Option<ProcessId>, duration: Ticks) {
        if let Some(last) = self.segments.last_mut() {
            if last.process_id == process_id && last.end_time() == self.now {
                last.duration += duration;
                return;
            }
        }

        self.segments.push(GanttSegment {
            process_id,
            start_time: self.now,
            duration,
        });
    }

    fn finish(mut self) -> Result<SimulationResult, SimError> {
        self.timeline
            .push(TimelineSnapshot::terminal(self.now, &self.store));

        let process_stats: Vec<ProcessStats> = self
            .store
            .into_tasks()
            .iter()
            .map(ProcessStats::from_task)
            .collect();
        let averages = Averages::of(&process_stats)?;

        Ok(SimulationResult {
            segments: self.segments,
            timeline: self.timeline,
            total_time: self.now,
            process_stats,
            avg_waiting: averages.waiting,
            avg_turnaround: averages.turnaround,
            avg_response: averages.response,
        })
    }
}
