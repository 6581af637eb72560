/// Source of randomness for the show.
///
/// Implemented for `fastrand::Rng` so a seeded generator makes a show
/// reproducible, and by scripted sources in tests.
pub trait RandomSource {
    /// Uniform float in `[0, 1)`.
    fn f32(&mut self) -> f32;
    /// Uniform integer in `range`.
    fn usize(&mut self, range: std::ops::Range<usize>) -> usize;
}

impl RandomSource for fastrand::Rng {
    fn f32(&mut self) -> f32 {
        fastrand::Rng::f32(self)
    }

    fn usize(&mut self, range: std::ops::Range<usize>) -> usize {
        fastrand::Rng::usize(self, range)
    }
}
