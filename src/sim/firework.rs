use super::particle::Particle;
use super::rng::RandomSource;
use crate::surface::{Rgb, Surface};

/// Distance travelled per tick while rising.
pub const SPEED: f32 = 3.0;
/// Particles held by the firework for the first flash.
pub const FLASH_PARTICLES: usize = 50;
/// Particles released to the shared pool once the flash has faded.
pub const CLOUD_PARTICLES: usize = 200;
/// Radius of the rising head.
const HEAD_RADIUS: f32 = 2.0;

/// A shell rising in a straight line toward its target.
///
/// The explosion is staged: the flash particles are created at launch and
/// animated by the firework once it explodes. When every one of them has
/// faded, a larger cloud is pushed into the shared pool and the firework is
/// spent.
#[derive(Debug, Clone)]
pub struct Firework {
    pub origin: (f32, f32),
    pub x: f32,
    pub y: f32,
    pub target_x: f32,
    pub target_y: f32,
    pub color: Rgb,
    vx: f32,
    vy: f32,
    exploded: bool,
    released: bool,
    burst: Vec<Particle>,
}

impl Firework {
    pub fn new<R: RandomSource + ?Sized>(
        x: f32,
        y: f32,
        target_x: f32,
        target_y: f32,
        color: Rgb,
        rng: &mut R,
    ) -> Self {
        let angle = (target_y - y).atan2(target_x - x);
        let burst = (0..FLASH_PARTICLES)
            .map(|_| Particle::new(x, y, color, rng))
            .collect();

        Self {
            origin: (x, y),
            x,
            y,
            target_x,
            target_y,
            color,
            vx: angle.cos() * SPEED,
            vy: angle.sin() * SPEED,
            exploded: false,
            released: false,
            burst,
        }
    }

    pub fn update<R: RandomSource + ?Sized>(&mut self, rng: &mut R, pool: &mut Vec<Particle>) {
        if self.exploded {
            return;
        }

        self.x += self.vx;
        self.y += self.vy;

        let dx = self.target_x - self.x;
        let dy = self.target_y - self.y;
        if (dx * dx + dy * dy).sqrt() < SPEED {
            self.exploded = true;
            log::trace!("firework exploded at ({:.1}, {:.1})", self.x, self.y);
            self.create_particles(rng, pool);
        }
    }

    /// Draw the head while rising; once exploded, drive and draw the flash.
    pub fn draw<S, R>(&mut self, surface: &mut S, rng: &mut R, pool: &mut Vec<Particle>)
    where
        S: Surface + ?Sized,
        R: RandomSource + ?Sized,
    {
        if !self.exploded {
            surface.fill_circle(self.x, self.y, HEAD_RADIUS, self.color, 1.0);
            return;
        }

        for particle in &mut self.burst {
            particle.update();
            particle.draw(surface);
        }
        self.create_particles(rng, pool);
    }

    /// Drop faded flash particles; release the cloud once none are left.
    fn create_particles<R: RandomSource + ?Sized>(&mut self, rng: &mut R, pool: &mut Vec<Particle>) {
        self.burst.retain(Particle::is_alive);

        if self.burst.is_empty() && !self.released {
            self.released = true;
            pool.extend((0..CLOUD_PARTICLES).map(|_| Particle::new(self.x, self.y, self.color, rng)));
            log::trace!("firework released {CLOUD_PARTICLES} particles");
        }
    }

    pub fn exploded(&self) -> bool {
        self.exploded
    }

    /// Flash particles still held by the firework.
    pub fn burst(&self) -> &[Particle] {
        &self.burst
    }

    /// Exploded and the flash has fully faded.
    pub fn is_spent(&self) -> bool {
        self.exploded && self.burst.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::scripted::Scripted;
    use crate::surface::recording::Recording;

    const COLOR: Rgb = (10, 20, 30);

    fn step(fw: &mut Firework, surface: &mut Recording, rng: &mut fastrand::Rng, pool: &mut Vec<Particle>) {
        surface.clear();
        fw.update(rng, pool);
        fw.draw(surface, rng, pool);
    }

    #[test]
    fn flash_is_created_at_launch_position() {
        let mut rng = fastrand::Rng::with_seed(1);
        let fw = Firework::new(400.0, 600.0, 100.0, 50.0, COLOR, &mut rng);
        assert_eq!(fw.burst().len(), FLASH_PARTICLES);
        assert!(fw.burst().iter().all(|p| p.x == 400.0 && p.y == 600.0 && p.opacity == 1.0));
        assert!(!fw.exploded());
        assert!(!fw.is_spent());
    }

    #[test]
    fn velocity_points_at_target_with_fixed_speed() {
        let mut rng = fastrand::Rng::with_seed(1);
        let mut fw = Firework::new(0.0, 0.0, 30.0, 40.0, COLOR, &mut rng);
        let mut pool = Vec::new();
        fw.update(&mut rng, &mut pool);
        assert!((fw.x - 1.8).abs() < 1e-5);
        assert!((fw.y - 2.4).abs() < 1e-5);
    }

    #[test]
    fn rising_firework_draws_only_its_head() {
        let mut rng = fastrand::Rng::with_seed(2);
        let mut fw = Firework::new(0.0, 100.0, 0.0, 0.0, COLOR, &mut rng);
        let mut pool = Vec::new();
        let mut surface = Recording::new(100.0, 100.0);
        step(&mut fw, &mut surface, &mut rng, &mut pool);

        assert_eq!(surface.circles.len(), 1);
        let head = &surface.circles[0];
        assert!(head.x.abs() < 1e-5 && (head.y - 97.0).abs() < 1e-5);
        assert_eq!((head.radius, head.alpha, head.color), (HEAD_RADIUS, 1.0, COLOR));
        // Held particles are not animated before the explosion
        assert!(fw.burst().iter().all(|p| p.opacity == 1.0 && p.y == 100.0));
    }

    #[test]
    fn explodes_once_at_first_tick_within_speed() {
        let mut rng = fastrand::Rng::with_seed(4);
        // 10 units to travel: 3, 6, 9 -> within 3 after the third tick
        let mut fw = Firework::new(0.0, 0.0, 10.0, 0.0, COLOR, &mut rng);
        let mut pool = Vec::new();
        let mut surface = Recording::new(100.0, 100.0);

        let mut flips = Vec::new();
        for tick in 1..=200 {
            let before = fw.exploded();
            step(&mut fw, &mut surface, &mut rng, &mut pool);
            if before != fw.exploded() {
                flips.push(tick);
            }
            if fw.exploded() {
                assert!(fw.x < 10.0 && fw.x > 8.99);
            }
        }
        assert_eq!(flips, vec![3]);
        assert!(fw.exploded());
        // No further movement once exploded
        assert!((fw.x - 9.0).abs() < 1e-5);
    }

    #[test]
    fn cloud_released_only_after_flash_fades() {
        let mut rng = fastrand::Rng::with_seed(5);
        let mut fw = Firework::new(50.0, 50.0, 52.0, 50.0, COLOR, &mut rng);
        let mut pool = Vec::new();
        let mut surface = Recording::new(100.0, 100.0);

        let mut released_at = None;
        for tick in 1..=200 {
            step(&mut fw, &mut surface, &mut rng, &mut pool);
            if pool.is_empty() {
                assert!(!fw.burst().is_empty(), "tick {tick}: flash gone but no cloud");
            } else if released_at.is_none() {
                released_at = Some(tick);
                assert!(fw.burst().is_empty());
                assert!(fw.is_spent());
            }
        }

        assert!(released_at.is_some());
        assert_eq!(pool.len(), CLOUD_PARTICLES);
        assert!(pool.iter().all(|p| p.x == fw.x && p.y == fw.y && p.opacity == 1.0));
        assert!(pool.iter().all(|p| p.color == COLOR));
    }

    #[test]
    fn cloud_waits_for_the_slowest_flash_particle() {
        // Every flash particle fades within 34 ticks except one at 0.01
        let mut floats = Vec::new();
        for i in 0..FLASH_PARTICLES {
            floats.extend_from_slice(&[0.0, 0.0, 0.0, if i == 7 { 0.0 } else { 0.99 }]);
        }
        let mut rng = Scripted::new(&floats, &[], 0.0);
        let mut fw = Firework::new(0.0, 0.0, 1.0, 0.0, COLOR, &mut rng);
        let mut pool = Vec::new();
        let mut surface = Recording::new(100.0, 100.0);

        fw.update(&mut rng, &mut pool);
        assert!(fw.exploded());
        assert!(pool.is_empty());

        let mut ticks = 0;
        while !fw.is_spent() {
            fw.draw(&mut surface, &mut rng, &mut pool);
            ticks += 1;
            if !fw.is_spent() {
                assert!(pool.is_empty());
            }
            assert!(ticks < 200);
        }
        assert!(fw.burst().is_empty());
        assert!(ticks >= 99, "released after {ticks} ticks");
        assert_eq!(pool.len(), CLOUD_PARTICLES);

        // Further draws never release a second cloud
        fw.draw(&mut surface, &mut rng, &mut pool);
        assert_eq!(pool.len(), CLOUD_PARTICLES);
    }
}
