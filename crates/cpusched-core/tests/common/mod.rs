#![allow(dead_code)]

use cpusched_core::*;

/// Initialize `env_logger` from `RUST_LOG`. Safe to call from every test.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn pid(id: u32) -> ProcessId {
    ProcessId::new(id).unwrap()
}

/// Processes from `(id, arrival, burst)` triples.
pub fn processes(rows: &[(u32, Ticks, Ticks)]) -> Vec<Process> {
    rows.iter()
        .map(|&(id, arrival, burst)| Process::new(pid(id), arrival, burst))
        .collect()
}

/// Processes from `(id, arrival, burst, priority)` tuples.
pub fn prioritized(rows: &[(u32, Ticks, Ticks, i32)]) -> Vec<Process> {
    rows.iter()
        .map(|&(id, arrival, burst, prio)| {
            Process::new(pid(id), arrival, burst).with_priority(prio)
        })
        .collect()
}

/// The canonical four-process SRTF example.
pub fn textbook_srtf() -> Vec<Process> {
    processes(&[(1, 0, 8), (2, 1, 4), (3, 2, 9), (4, 3, 5)])
}

/// Segments as `(id or 0 for idle, start, duration)` for compact assertions.
pub fn gantt(result: &SimulationResult) -> Vec<(u32, Ticks, Ticks)> {
    result
        .segments
        .iter()
        .map(|s| (s.process_id.map_or(0, |id| id.val()), s.start_time, s.duration))
        .collect()
}

pub fn waiting(result: &SimulationResult, id: u32) -> Ticks {
    result.stats_for(pid(id)).unwrap().waiting_time
}

pub fn finish(result: &SimulationResult, id: u32) -> Ticks {
    result.stats_for(pid(id)).unwrap().finish_time
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Checks every structural invariant of a result against its input.
pub fn check_invariants(input: &[Process], result: &SimulationResult) {
    assert_eq!(result.process_stats.len(), input.len());

    // Gantt segments tile [0, total_time)
    let mut cursor = 0;
    for pair in result.segments.windows(2) {
        assert_ne!(
            pair[0].process_id, pair[1].process_id,
            "adjacent segments share an owner: {:?}",
            pair
        );
    }
    for segment in &result.segments {
        assert_eq!(segment.start_time, cursor, "gap or overlap at {:?}", segment);
        assert!(segment.duration > 0, "empty segment {:?}", segment);
        cursor = segment.end_time();
    }
    assert_eq!(cursor, result.total_time);

    // Conservation and bounds per process
    for process in input {
        let stats = result.stats_for(process.id).expect("missing stats");
        assert_eq!(stats.finish_time - stats.arrival_time, stats.turnaround_time);
        assert_eq!(stats.turnaround_time - stats.burst_time, stats.waiting_time);
        assert!(stats.start_time >= stats.arrival_time);
        assert_eq!(stats.start_time - stats.arrival_time, stats.response_time);
        assert!(stats.finish_time <= result.total_time);

        let served: Ticks = result.segments_for(process.id).map(|s| s.duration).sum();
        assert_eq!(served, process.burst_time, "{} served {}", process.id, served);
        let first = result.segments_for(process.id).next().expect("never ran");
        assert_eq!(first.start_time, stats.start_time);
    }

    // Timeline shape
    let timeline = &result.timeline;
    let first = timeline.first().expect("empty timeline");
    assert_eq!(first.time, 0);
    assert!(first.process_states.iter().all(|e| e.state == ProcessState::New));

    let last = timeline.last().expect("empty timeline");
    assert_eq!(last.time, result.total_time);
    assert_eq!(last.running_process, None);
    assert!(last
        .process_states
        .iter()
        .all(|e| e.state == ProcessState::Terminated));

    let idle_gaps = result.segments.iter().filter(|s| s.is_idle()).count() as Ticks;
    let busy = result.total_time - result.idle_time();
    assert_eq!(timeline.len() as Ticks, busy + idle_gaps + 2);

    for pair in timeline.windows(2) {
        assert!(pair[0].time <= pair[1].time, "timeline goes backwards");
    }

    for snap in &timeline[1..timeline.len() - 1] {
        assert_eq!(snap.process_states.len(), input.len());
        assert!(snap
            .process_states
            .iter()
            .all(|e| e.state != ProcessState::Waiting));

        match snap.running_process {
            Some(running) => {
                assert_eq!(snap.state_of(running), Some(ProcessState::Running));
                assert!(!snap.ready_queue.contains(&running));
            }
            None => assert!(snap.ready_queue.is_empty()),
        }

        for id in &snap.ready_queue {
            assert_eq!(snap.state_of(*id), Some(ProcessState::Ready));
        }
        let ready_count = snap
            .process_states
            .iter()
            .filter(|e| e.state == ProcessState::Ready)
            .count();
        assert_eq!(ready_count, snap.ready_queue.len());
    }
}
