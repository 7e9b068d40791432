//! Unit geometry for the sunflower parts.
//!
//! Parts are modeled once at unit size and placed per frame by model
//! matrices, so a flower's growth never has to touch vertex data.

use crate::math::{Vec3, sample_cubic};
use super::primitives::{self, Mesh};

pub const PETAL_COUNT: usize = 24;
pub const LEAF_COUNT: usize = 4;

/// Samples per Bézier edge of the petal outline
const PETAL_CURVE_SEGMENTS: usize = 32;

/// Closed petal outline in the XY plane, base at the origin and tip at (0, 2)
pub fn petal_outline() -> Vec<Vec3> {
    let right = sample_cubic(
        Vec3::ZERO,
        Vec3::new(0.5, 0.5, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(0.0, 2.0, 0.0),
        PETAL_CURVE_SEGMENTS,
    );
    let left = sample_cubic(
        Vec3::new(0.0, 2.0, 0.0),
        Vec3::new(-1.0, 1.0, 0.0),
        Vec3::new(-0.5, 0.5, 0.0),
        Vec3::ZERO,
        PETAL_CURVE_SEGMENTS,
    );

    // Both curves share their endpoints; keep each point once
    let mut outline = right;
    outline.extend(left.into_iter().skip(1));
    outline.pop();
    outline
}

pub fn petal() -> Mesh {
    primitives::flat_shape(&petal_outline())
}

/// Garden stem: unit height, scaled to the flower's stem height
pub fn garden_stem() -> Mesh {
    primitives::cylinder(0.1, 1.0, 8)
}

/// Cut-flower stem for the bouquet
pub fn bouquet_stem() -> Mesh {
    primitives::cylinder(0.1, 5.0, 32)
}

pub fn center() -> Mesh {
    primitives::sphere(0.4, 32, 32)
}

pub fn leaf() -> Mesh {
    primitives::cone(0.2, 1.0, 8)
}

/// Paper wrap around a bouquet
pub fn wrap() -> Mesh {
    primitives::cone(1.5, 3.0, 16)
}
