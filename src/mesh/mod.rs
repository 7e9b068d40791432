pub mod primitives;
pub mod sunflower;

pub use primitives::{Mesh, Vertex, VERTEX_FLOATS};
pub use sunflower::{PETAL_COUNT, LEAF_COUNT};
