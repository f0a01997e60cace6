//! Fixed-timestep tick scheduling
//!
//! World logic (streaming, generation) runs at a fixed rate while rendering
//! runs as often as the host loop allows. The accumulator turns variable
//! frame deltas into a whole number of simulation ticks.

/// Largest frame delta fed into the accumulator, in seconds.
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Accumulator that converts frame time into fixed-size ticks
#[derive(Clone, Debug)]
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
    tick_count: u64,
}

impl FixedTimestep {
    /// Create a timestep running at `ticks_per_second`
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            step: 1.0 / ticks_per_second.max(1) as f32,
            accumulator: 0.0,
            tick_count: 0,
        }
    }

    /// Duration of one tick in seconds
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Feed a frame delta and return how many ticks are due.
    ///
    /// Deltas are clamped to [`MAX_FRAME_DELTA`] so a stall (debugger,
    /// window drag, a large chunk-load spike) cannot trigger a burst of
    /// catch-up ticks.
    pub fn advance(&mut self, frame_delta: f32) -> u32 {
        self.accumulator += frame_delta.clamp(0.0, MAX_FRAME_DELTA);
        let mut due = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            due += 1;
        }
        self.tick_count += due as u64;
        due
    }

    /// Total ticks issued so far
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(60)
    }
}
