//! Frame composition: turns garden state and elapsed time into draw calls.

pub mod sunflower;
pub mod bouquet;
pub mod garden;

pub use sunflower::{
    FlowerShape, SunflowerMeshes, SunflowerPart, flower_group, garden_flower_draws, pick_targets,
};
pub use bouquet::{Bouquet, BouquetMeshes};
pub use garden::{GardenMeshes, droplet_origin, garden_draws, ground_mesh, ground_transform};
