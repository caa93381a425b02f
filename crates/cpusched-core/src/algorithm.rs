use crate::error::InputError;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Scheduling discipline selected for a simulation run.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// First-Come-First-Served
    Fcfs,
    /// Shortest-Job-First, non-preemptive
    Sjf,
    /// Shortest-Remaining-Time-First, preemptive every tick
    Srtf,
    /// Lowest priority value first, non-preemptive
    Priority,
    /// FIFO queue with a fixed time quantum
    #[serde(rename = "rr")]
    RoundRobin,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Fcfs,
        Algorithm::Sjf,
        Algorithm::Srtf,
        Algorithm::Priority,
        Algorithm::RoundRobin,
    ];

    /// Short identifier accepted by `FromStr`.
    pub fn id(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "fcfs",
            Algorithm::Sjf => "sjf",
            Algorithm::Srtf => "srtf",
            Algorithm::Priority => "priority",
            Algorithm::RoundRobin => "rr",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "First Come First Served",
            Algorithm::Sjf => "Shortest Job First",
            Algorithm::Srtf => "Shortest Remaining Time First",
            Algorithm::Priority => "Priority Scheduling",
            Algorithm::RoundRobin => "Round Robin",
        }
    }

    /// Whether a running process can be displaced before it finishes.
    pub fn is_preemptive(&self) -> bool {
        matches!(self, Algorithm::Srtf | Algorithm::RoundRobin)
    }

    /// Whether `simulate` requires a time quantum.
    pub fn needs_quantum(&self) -> bool {
        matches!(self, Algorithm::RoundRobin)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Algorithm {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fcfs" => Ok(Algorithm::Fcfs),
            "sjf" => Ok(Algorithm::Sjf),
            "srtf" => Ok(Algorithm::Srtf),
            "priority" => Ok(Algorithm::Priority),
            "rr" | "round-robin" => Ok(Algorithm::RoundRobin),
            _ => Err(InputError::UnknownAlgorithm(s.to_owned())),
        }
    }
}
