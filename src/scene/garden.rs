use std::f32::consts::FRAC_PI_2;
use crate::animation::Sway;
use crate::garden::Garden;
use crate::math::{Mat4, Vec3};
use crate::mesh::{primitives, Mesh};
use crate::render::{DrawCall, Material, MeshId};
use super::sunflower::{FlowerShape, SunflowerMeshes, flower_group, garden_flower_draws};

/// Height of the soil plane
pub const GROUND_Y: f32 = -1.0;
/// Side length of the square soil plane
pub const GROUND_SIZE: f32 = 20.0;
/// Soil texture repeats per side
pub const GROUND_REPEAT: f32 = 5.0;

#[derive(Debug, Clone, Copy)]
pub struct GardenMeshes {
    pub ground: MeshId,
    pub flower: SunflowerMeshes,
}

/// Unit ground mesh: the XY plane, laid flat by `ground_transform`
pub fn ground_mesh() -> Mesh {
    primitives::plane(GROUND_SIZE, GROUND_SIZE, GROUND_REPEAT)
}

pub fn ground_transform() -> Mat4 {
    Mat4::translation(0.0, GROUND_Y, 0.0).mul(&Mat4::rotation_x(-FRAC_PI_2))
}

/// Every draw for one garden frame: the soil, then each flower in planting order
pub fn garden_draws(garden: &Garden, meshes: &GardenMeshes, sway: &Sway, t: f32) -> Vec<DrawCall> {
    let mut draws = Vec::with_capacity(1 + garden.len() * 30);
    draws.push(DrawCall::new(meshes.ground, ground_transform(), Material::textured()));

    for flower in garden.flowers() {
        let shape = FlowerShape::from_growth(flower.growth);
        let group = flower_group(flower, sway, t);
        garden_flower_draws(&shape, &group, &meshes.flower, &mut draws);
    }
    draws
}

/// Where the water column of the watering flower is anchored this frame
pub fn droplet_origin(garden: &Garden, sway: &Sway, t: f32) -> Option<Vec3> {
    let index = garden.watering_index()?;
    let flower = garden.get(index)?;
    Some(flower.position + Vec3::new(0.0, sway.bob(t), 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 0.0001;

    fn meshes() -> GardenMeshes {
        GardenMeshes {
            ground: MeshId(0),
            flower: SunflowerMeshes {
                stem: MeshId(1),
                petal: MeshId(2),
                center: MeshId(3),
                leaf: MeshId(4),
            },
        }
    }

    #[test]
    fn test_ground_lies_flat_at_minus_one() {
        let m = ground_transform();
        let corner = m.transform_point(Vec3::new(10.0, 10.0, 0.0));
        assert!((corner.y - GROUND_Y).abs() < EPS);
        assert!((corner.x - 10.0).abs() < EPS);
        assert!((corner.z.abs() - 10.0).abs() < EPS);

        // The plane faces up after laying it down
        let normal = m.transform_direction(Vec3::FORWARD);
        assert!((normal.y - 1.0).abs() < EPS);
    }

    #[test]
    fn test_empty_garden_draws_only_ground() {
        let garden = Garden::default();
        let draws = garden_draws(&garden, &meshes(), &Sway::default(), 0.0);
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].mesh, MeshId(0));
        assert!(draws[0].material.textured);
    }

    #[test]
    fn test_each_flower_adds_its_parts() {
        let mut garden = Garden::default();
        garden.plant(Vec3::new(1.0, 0.0, 1.0));
        garden.plant(Vec3::new(-1.0, 0.0, 2.0));

        let draws = garden_draws(&garden, &meshes(), &Sway::default(), 1.0);
        // stem + 24 petals + center + 4 leaves per flower
        assert_eq!(draws.len(), 1 + 2 * 30);
    }

    #[test]
    fn test_droplets_follow_watering_flower() {
        let mut garden = Garden::default();
        let sway = Sway::default();
        assert!(droplet_origin(&garden, &sway, 0.0).is_none());

        garden.plant(Vec3::new(2.0, 0.0, 3.0));
        garden.water(0);
        let origin = droplet_origin(&garden, &sway, 0.0).unwrap();
        assert!((origin.x - 2.0).abs() < EPS);
        assert!((origin.y + 0.9).abs() < EPS);
        assert!((origin.z - 3.0).abs() < EPS);
    }
}
