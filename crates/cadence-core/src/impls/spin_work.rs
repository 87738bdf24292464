//! Work unit implementations.

use crate::ports::WorkUnit;

/// Default number of spin rounds per iteration. Small enough to stay well
/// under a millisecond on current hardware, large enough that the iteration
/// body consumes a non-zero, bounded slice of wall-clock time.
pub const DEFAULT_SPINS: u64 = 100_000;

/// SpinWork burns a bounded amount of CPU and nothing else.
///
/// `black_box` keeps the loop from being optimized away; no memory is
/// touched and no side effect is observable beyond the CPU consumption.
#[derive(Debug, Clone, Copy)]
pub struct SpinWork {
    spins: u64,
}

impl SpinWork {
    pub fn new(spins: u64) -> Self {
        Self { spins }
    }
}

impl Default for SpinWork {
    fn default() -> Self {
        Self::new(DEFAULT_SPINS)
    }
}

impl WorkUnit for SpinWork {
    fn run(&self) {
        for k in 0..self.spins {
            std::hint::black_box(k);
        }
    }
}

/// NoopWork does nothing. Timing tests use it to decouple cadence
/// assertions from real CPU burn.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopWork;

impl WorkUnit for NoopWork {
    fn run(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spin_work_terminates() {
        SpinWork::new(1_000).run();
    }

    #[test]
    fn noop_work_terminates() {
        NoopWork.run();
    }
}
