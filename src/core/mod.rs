pub mod color;
pub mod coord;
pub mod loader;
pub mod ray;
pub mod rng;
pub mod sampling;
pub mod transform;
