pub mod water;

pub use water::{WaterDroplets, PARTICLE_FLOATS};
