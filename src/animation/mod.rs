//! Cosmetic, time-driven motion.
//!
//! Nothing here feeds back into the garden state; it only shapes model
//! matrices for the current frame.

mod sway;

pub use sway::{Sway, Pulse};
