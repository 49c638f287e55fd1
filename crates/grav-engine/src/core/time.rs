/// Fixed timestep accumulator.
/// Turns variable frame deltas into a whole number of fixed-length ticks.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f64,
    /// Accumulated time from variable frame deltas.
    accumulator: f64,
}

impl FixedTimestep {
    pub fn new(dt: f64) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f64) -> u32 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt;
        // Cap to prevent spiral of death (max 10 steps per frame)
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f64 * self.dt;
        steps
    }

    /// Drop any partial tick.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f64 {
        self.dt
    }
}

/// Whether the periodic integrator is armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Idle,
    Running,
}

/// Fixed-rate scheduler for the integrator.
///
/// Frames are fed in with [`SimClock::advance`]; while `Running` it reports how
/// many ticks are due. Stopping takes effect at the next call: no tick is
/// reported after `stop`, and time accrued before it is discarded.
#[derive(Debug, Clone)]
pub struct SimClock {
    timestep: FixedTimestep,
    state: ClockState,
}

impl SimClock {
    pub fn new(dt: f64) -> Self {
        Self {
            timestep: FixedTimestep::new(dt),
            state: ClockState::Idle,
        }
    }

    pub fn start(&mut self) {
        if self.state == ClockState::Idle {
            log::debug!("clock: running at {:.4}s per tick", self.timestep.dt());
        }
        self.state = ClockState::Running;
    }

    pub fn stop(&mut self) {
        if self.state == ClockState::Running {
            log::debug!("clock: idle");
        }
        self.state = ClockState::Idle;
        self.timestep.reset();
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    /// Feed one frame delta. Returns the number of ticks due (0 while idle).
    pub fn advance(&mut self, frame_dt: f64) -> u32 {
        match self.state {
            ClockState::Idle => 0,
            ClockState::Running => self.timestep.accumulate(frame_dt),
        }
    }

    /// Length of one tick in seconds.
    pub fn dt(&self) -> f64 {
        self.timestep.dt()
    }
}
