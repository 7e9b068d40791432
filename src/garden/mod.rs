//! Garden simulation: planting, watering and growth.
//!
//! All state lives in one [`Garden`] owned by the engine; renderers only ever
//! borrow it.

mod flower;
mod store;

pub use flower::{Flower, MAX_GROWTH};
pub use store::{Garden, GrowthEvent, PlantOutcome, Watering};
