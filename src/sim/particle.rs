use super::rng::RandomSource;
use crate::surface::{Rgb, Surface};
use std::f32::consts::TAU;

/// A fading point thrown out by an explosion.
#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub vx: f32,
    pub vy: f32,
    pub color: Rgb,
    pub opacity: f32,
    pub decay: f32,
}

impl Particle {
    pub fn new<R: RandomSource + ?Sized>(x: f32, y: f32, color: Rgb, rng: &mut R) -> Self {
        let radius = rng.f32() * 2.0 + 1.0;
        let speed = rng.f32() * 3.0 + 1.0;
        let angle = rng.f32() * TAU;
        let decay = rng.f32() * 0.02 + 0.01;

        Self {
            x,
            y,
            radius,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            color,
            opacity: 1.0,
            decay,
        }
    }

    pub fn update(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.opacity = (self.opacity - self.decay).max(0.0);
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.fill_circle(self.x, self.y, self.radius, self.color, self.opacity);
    }

    pub fn is_alive(&self) -> bool {
        self.opacity > 0.0
    }
}
