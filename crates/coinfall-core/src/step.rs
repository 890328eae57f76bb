/// Default simulation rate in Hz.
pub const TICK_RATE: f32 = 60.0;

/// Longest burst of catch-up steps a single frame may run. Beyond this the
/// backlog is dropped rather than spiraling on a slow renderer.
pub const MAX_CATCHUP_STEPS: u32 = 5;

/// Fixed-timestep accumulator: wall-clock seconds in, whole simulation
/// steps out. The remainder carries over so the long-run step rate matches
/// the configured Hz regardless of render cadence.
#[derive(Debug, Clone)]
pub struct FixedStep {
    step_secs: f32,
    accumulator: f32,
}

impl FixedStep {
    pub fn new(hz: f32) -> Self {
        Self {
            step_secs: 1.0 / hz,
            accumulator: 0.0,
        }
    }

    /// Feed elapsed wall-clock time and get the number of fixed steps to
    /// run now. Non-finite or negative elapsed time contributes nothing.
    pub fn advance(&mut self, elapsed_secs: f32) -> u32 {
        if elapsed_secs.is_finite() && elapsed_secs > 0.0 {
            self.accumulator += elapsed_secs;
        }

        let mut steps = 0;
        while steps < MAX_CATCHUP_STEPS && self.accumulator >= self.step_secs {
            self.accumulator -= self.step_secs;
            steps += 1;
        }
        if self.accumulator >= self.step_secs {
            self.accumulator %= self.step_secs;
        }
        steps
    }
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(TICK_RATE)
    }
}
