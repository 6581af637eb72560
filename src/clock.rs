//! Fixed-step scheduling. The event loop feeds wall time in; tests feed
//! whatever they like.

/// One display refresh.
pub const FRAME_DT: f32 = 1.0 / 60.0;
/// Seconds between batches.
pub const SPAWN_INTERVAL: f32 = 2.0;
/// Frames a slow loop may catch up in one go.
const MAX_BACKLOG: usize = 3;

/// Turns elapsed wall time into whole simulation ticks.
#[derive(Debug, Default)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `elapsed` seconds and return how many ticks are due.
    pub fn advance(&mut self, elapsed: f32) -> usize {
        self.accumulator += elapsed;

        let mut steps = 0;
        while self.accumulator >= FRAME_DT {
            self.accumulator -= FRAME_DT;
            steps += 1;
        }
        // Frames beyond the backlog are dropped rather than replayed
        steps.min(MAX_BACKLOG)
    }
}

/// Fires once per interval, starting one interval after creation.
#[derive(Debug)]
pub struct SpawnTimer {
    interval: f32,
    elapsed: f32,
}

impl SpawnTimer {
    pub fn new(interval: f32) -> Self {
        Self { interval, elapsed: 0.0 }
    }

    /// Add `dt` seconds and return how many intervals completed.
    pub fn advance(&mut self, dt: f32) -> usize {
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            fired += 1;
        }
        fired
    }
}

impl Default for SpawnTimer {
    fn default() -> Self {
        Self::new(SPAWN_INTERVAL)
    }
}
