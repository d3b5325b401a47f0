use std::time::Instant;

/// Fixed-step phase accumulator - the time base for all periodic motion.
/// Advances by the same increment on every tick regardless of wall time,
/// and never rewinds for as long as the scene lives.
#[derive(Debug, Clone, Copy)]
pub struct SceneClock {
    phase: f32,
    step: f32,
}

impl SceneClock {
    /// Create a clock at phase zero with the given per-tick increment
    pub fn new(step: f32) -> Self {
        Self { phase: 0.0, step }
    }

    /// Advance one step and return the new phase
    pub fn tick(&mut self) -> f32 {
        self.phase += self.step;
        self.phase
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn step(&self) -> f32 {
        self.step
    }
}

/// Wall-clock frame-rate estimate for the stats overlay, smoothed with an
/// exponential moving average so the readout does not jitter.
#[derive(Debug)]
pub struct FpsCounter {
    last_frame: Instant,
    smoothed_fps: f32,
    smoothing: f32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Call once per presented frame
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        if delta > 0.0 {
            let instant_fps = 1.0 / delta;
            self.smoothed_fps += (instant_fps - self.smoothed_fps) * self.smoothing;
        }
    }

    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}
