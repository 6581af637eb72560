//! The fireworks show: rising shells, their staged bursts and the shared
//! particle pool.

pub mod firework;
pub mod particle;
pub mod rng;

use crate::surface::{Rgb, Surface};
use firework::Firework;
use particle::Particle;
use rng::RandomSource;

pub const COLORS: [Rgb; 7] = [
    (0xff, 0x4e, 0x50), // Coral red
    (0xfc, 0xab, 0x10), // Amber
    (0x4a, 0x47, 0xa3), // Indigo
    (0x3c, 0xba, 0x92), // Mint
    (0xf4, 0x50, 0x78), // Pink
    (0x3b, 0x59, 0x98), // Slate blue
    (0x00, 0xac, 0xed), // Sky blue
];

/// Smallest batch; a batch holds this many or one more.
pub const MIN_BATCH: usize = 3;

/// Owns every live firework and the particles they have released.
pub struct Simulation<R = fastrand::Rng> {
    rng: R,
    fireworks: Vec<Firework>,
    particles: Vec<Particle>,
}

impl Simulation<fastrand::Rng> {
    pub fn with_seed(seed: u64) -> Self {
        Self::new(fastrand::Rng::with_seed(seed))
    }
}

impl Default for Simulation<fastrand::Rng> {
    fn default() -> Self {
        Self::new(fastrand::Rng::new())
    }
}

impl<R: RandomSource> Simulation<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            fireworks: Vec::new(),
            particles: Vec::new(),
        }
    }

    /// Launch 3 or 4 fireworks from the bottom centre toward random targets
    /// in the upper half. Returns how many were launched.
    pub fn spawn_batch(&mut self, width: f32, height: f32) -> usize {
        let count = MIN_BATCH + self.rng.usize(0..2);

        let launches: Vec<(f32, f32, Rgb)> = (0..count)
            .map(|_| {
                let target_x = self.rng.f32() * width;
                let target_y = self.rng.f32() * height / 2.0;
                let color = COLORS[self.rng.usize(0..COLORS.len())];
                (target_x, target_y, color)
            })
            .collect();

        for (target_x, target_y, color) in launches {
            self.fireworks.push(Firework::new(
                width / 2.0,
                height,
                target_x,
                target_y,
                color,
                &mut self.rng,
            ));
        }

        log::debug!(
            "launched {count} fireworks ({} active, {} particles)",
            self.fireworks.len(),
            self.particles.len()
        );
        count
    }

    /// One frame: clear, advance and draw everything, drop what is finished.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        surface.clear();

        let Self { rng, fireworks, particles } = self;

        fireworks.retain_mut(|firework| {
            firework.update(rng, particles);
            firework.draw(surface, rng, particles);
            !firework.is_spent()
        });

        particles.retain_mut(|particle| {
            particle.update();
            particle.draw(surface);
            particle.is_alive()
        });
    }

    pub fn fireworks(&self) -> &[Firework] {
        &self.fireworks
    }

    /// Particles released into the shared pool.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_idle(&self) -> bool {
        self.fireworks.is_empty() && self.particles.is_empty()
    }
}
