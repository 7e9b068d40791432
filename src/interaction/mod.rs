pub mod picking;
pub mod controller;

pub use picking::{Ray, PickTarget, Pick, GardenPicker};
pub use controller::{ClickAction, resolve_click};
