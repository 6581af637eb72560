//! Terminal fireworks: shells rise from the bottom of the screen, burst into
//! a short flash and then a larger cloud of fading sparks.

pub mod cli;
pub mod clock;
pub mod error;
pub mod sim;
pub mod surface;
