use std::time::Duration;
use std::time::Instant;

/// Tracks the wall-clock time the solver spends inside its search loop.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Stopwatch {
    time_start: Instant,
}

impl Stopwatch {
    pub(crate) fn starting_now() -> Stopwatch {
        Stopwatch {
            time_start: Instant::now(),
        }
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.time_start.elapsed()
    }
}
