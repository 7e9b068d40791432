use std::f32::consts::{FRAC_PI_2, PI};
use crate::animation::Sway;
use crate::garden::Flower;
use crate::interaction::PickTarget;
use crate::math::{Vec3, Mat4};
use crate::mesh::{PETAL_COUNT, LEAF_COUNT};
use crate::render::{DrawCall, Material, MeshId};

/// Angle between neighbouring petals
pub const PETAL_STEP: f32 = PI / 12.0;

/// Visual parameters derived from a flower's growth.
///
/// Nothing here is stored on the flower; it is recomputed every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowerShape {
    pub growth: f32,
    pub stem_height: f32,
    /// Height of the flower head above the stem base
    pub head_offset: f32,
    /// Uniform scale of petals and center
    pub head_scale: f32,
    /// Uniform scale of the leaves
    pub leaf_scale: f32,
}

/// Addressable pieces of a sunflower
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SunflowerPart {
    Stem,
    Petal(usize),
    Center,
    Leaf(usize),
}

impl FlowerShape {
    pub fn from_growth(growth: f32) -> Self {
        let stem_height = 3.0 * growth;
        Self {
            growth,
            stem_height,
            head_offset: stem_height,
            head_scale: growth.clamp(0.0, 1.0) * 1.5,
            leaf_scale: growth,
        }
    }

    /// Rotation of petal `i` about the head's axis
    pub fn petal_angle(i: usize) -> f32 {
        PETAL_STEP * i as f32
    }

    /// Height of leaf `k` (0-based) along the stem
    pub fn leaf_height(&self, k: usize) -> f32 {
        self.stem_height * (k + 1) as f32 / 5.0
    }

    /// Leaves face the four compass directions
    pub fn leaf_yaw(k: usize) -> f32 {
        FRAC_PI_2 * k as f32
    }

    /// Local transforms of every part, relative to the stem base
    pub fn part_transforms(&self) -> Vec<(SunflowerPart, Mat4)> {
        let mut parts = Vec::with_capacity(2 + PETAL_COUNT + LEAF_COUNT);

        // Unit-height stem stretched to the stem height
        parts.push((
            SunflowerPart::Stem,
            Mat4::translation(0.0, self.stem_height / 2.0, 0.0)
                .mul(&Mat4::scale(1.0, self.stem_height, 1.0)),
        ));

        let head = Mat4::translation(0.0, self.head_offset, 0.0);
        let head_scale = Mat4::uniform_scale(self.head_scale);
        for i in 0..PETAL_COUNT {
            let m = head
                .mul(&Mat4::rotation_z(Self::petal_angle(i)))
                .mul(&head_scale);
            parts.push((SunflowerPart::Petal(i), m));
        }
        parts.push((SunflowerPart::Center, head.mul(&head_scale)));

        for k in 0..LEAF_COUNT {
            let m = Mat4::compose(
                Vec3::new(0.0, self.leaf_height(k), 0.0),
                Vec3::new(0.0, Self::leaf_yaw(k), 0.0),
                Vec3::splat(self.leaf_scale),
            );
            parts.push((SunflowerPart::Leaf(k), m));
        }

        parts
    }

    /// Bounding sphere relative to the stem base: (center offset, radius).
    /// Petals reach two units from the head at unit scale.
    pub fn bounds(&self) -> (Vec3, f32) {
        let half = self.head_offset / 2.0;
        let radius = half + 2.0 * self.head_scale;
        (Vec3::new(0.0, half, 0.0), radius.max(0.3))
    }
}

/// Uploaded meshes for garden sunflowers
#[derive(Debug, Clone, Copy)]
pub struct SunflowerMeshes {
    pub stem: MeshId,
    pub petal: MeshId,
    pub center: MeshId,
    pub leaf: MeshId,
}

fn stem_material() -> Material {
    Material::lit(0x008000)
}

fn petal_material() -> Material {
    Material::lit(0xffd700)
}

fn center_material() -> Material {
    Material::lit(0x8b4513)
}

/// World transform of a planted flower at time `t`
pub fn flower_group(flower: &Flower, sway: &Sway, t: f32) -> Mat4 {
    let position = flower.position + Vec3::new(0.0, sway.bob(t), 0.0);
    Mat4::translate(position).mul(&Mat4::rotation_y(sway.yaw(t)))
}

/// Append the draw calls for one garden flower
pub fn garden_flower_draws(
    shape: &FlowerShape,
    group: &Mat4,
    meshes: &SunflowerMeshes,
    out: &mut Vec<DrawCall>,
) {
    for (part, local) in shape.part_transforms() {
        let (mesh, material) = match part {
            SunflowerPart::Stem => (meshes.stem, stem_material()),
            SunflowerPart::Petal(_) => (meshes.petal, petal_material()),
            SunflowerPart::Center => (meshes.center, center_material()),
            SunflowerPart::Leaf(_) => (meshes.leaf, stem_material()),
        };
        out.push(DrawCall::new(mesh, group.mul(&local), material));
    }
}

/// Clickable bounds of every flower, at rest position
pub fn pick_targets(flowers: &[Flower]) -> Vec<PickTarget> {
    flowers
        .iter()
        .enumerate()
        .map(|(index, flower)| {
            let (offset, radius) = FlowerShape::from_growth(flower.growth).bounds();
            PickTarget {
                index,
                center: flower.position + offset,
                radius,
            }
        })
        .collect()
}
