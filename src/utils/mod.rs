//! Small standalone helpers that don't belong to the graphics stack.

pub mod math;

pub use math::is_prime;
