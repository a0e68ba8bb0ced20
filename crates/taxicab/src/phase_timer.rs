use std::{
    fmt,
    time::{Duration, Instant},
};

use tracing::debug;

/// The timed steps of a route computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePhase {
    /// Finding the boundary edges of both coordinates.
    Snap,
    /// Running the shortest path search between boundary edges.
    Search,
}

impl fmt::Display for RoutePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutePhase::Snap => write!(f, "snap"),
            RoutePhase::Search => write!(f, "search"),
        }
    }
}

/// Times one [`RoutePhase`]. Finishing it emits a debug event carrying the
/// phase and its duration in microseconds.
#[derive(Debug)]
pub struct PhaseTimer {
    phase: RoutePhase,
    started: Instant,
}

impl PhaseTimer {
    pub fn start(phase: RoutePhase) -> Self {
        PhaseTimer {
            phase,
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn finish(self) -> Duration {
        let elapsed = self.elapsed();
        debug!(
            phase = %self.phase,
            elapsed_us = elapsed.as_micros() as u64,
            "route phase finished"
        );
        elapsed
    }
}
