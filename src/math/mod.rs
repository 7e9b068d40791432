pub mod vec3;
pub mod matrix;
pub mod bezier;

pub use vec3::Vec3;
pub use matrix::Mat4;
pub use bezier::{cubic_bezier, sample_cubic};
