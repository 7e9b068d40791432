use crate::animation::Pulse;
use crate::math::{Vec3, Mat4};
use crate::mesh::PETAL_COUNT;
use crate::render::{DrawCall, Material, MeshId};
use super::sunflower::FlowerShape;

/// Uploaded meshes for the song scene
#[derive(Debug, Clone, Copy)]
pub struct BouquetMeshes {
    pub wrap: MeshId,
    pub stem: MeshId,
    pub petal: MeshId,
    pub center: MeshId,
}

/// Three wrapped sunflowers side by side, always in bloom
#[derive(Debug, Clone)]
pub struct Bouquet {
    pub positions: Vec<Vec3>,
    pub pulse: Pulse,
}

impl Default for Bouquet {
    fn default() -> Self {
        Self {
            positions: vec![
                Vec3::new(-3.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(3.0, 0.0, 0.0),
            ],
            pulse: Pulse::default(),
        }
    }
}

/// Petals are narrowed to 0.7 of the unit outline
const PETAL_SCALE: Vec3 = Vec3::new(0.7, 1.0, 0.7);

fn petal_material() -> Material {
    Material::lit(0xffd700)
        .with_emissive(0xffff00, 0.3)
        .with_shininess(200.0)
}

impl Bouquet {
    /// Transform of the flower head group inside bouquet `origin`
    pub fn flower_transform(&self, origin: Vec3, t: f32) -> Mat4 {
        Mat4::translate(origin + Vec3::new(0.0, 0.5, 0.0))
            .mul(&Mat4::rotation_y(self.pulse.spin(t)))
            .mul(&Mat4::uniform_scale(self.pulse.scale(t)))
    }

    pub fn draws(&self, t: f32, meshes: &BouquetMeshes) -> Vec<DrawCall> {
        let mut out = Vec::with_capacity(self.positions.len() * (PETAL_COUNT + 3));
        let wrap = Material::unlit(0xc4a484);
        let stem = Material::lit(0x228b22);
        let petal = petal_material();
        let center = Material::lit(0x8b4513).with_shininess(70.0);

        for origin in &self.positions {
            // Wrap cone hangs upside down below the flower
            let wrap_model = Mat4::translate(*origin + Vec3::new(0.0, -1.5, 0.0))
                .mul(&Mat4::rotation_z(std::f32::consts::PI));
            out.push(DrawCall::new(meshes.wrap, wrap_model, wrap));

            let group = self.flower_transform(*origin, t);
            out.push(DrawCall::new(
                meshes.stem,
                group.mul(&Mat4::translation(0.0, -3.0, 0.0)),
                stem,
            ));

            for i in 0..PETAL_COUNT {
                let local = Mat4::compose(
                    Vec3::new(0.0, 0.0, 0.01),
                    Vec3::new(0.0, 0.0, FlowerShape::petal_angle(i)),
                    PETAL_SCALE,
                );
                out.push(DrawCall::new(meshes.petal, group.mul(&local), petal));
            }

            out.push(DrawCall::new(meshes.center, group, center));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meshes() -> BouquetMeshes {
        BouquetMeshes {
            wrap: MeshId(0),
            stem: MeshId(1),
            petal: MeshId(2),
            center: MeshId(3),
        }
    }

    fn tip_height(draws: &[DrawCall]) -> f32 {
        let petal = draws.iter().find(|d| d.mesh == MeshId(2)).unwrap();
        petal.model.transform_point(Vec3::new(0.0, 2.0, 0.0)).y
    }

    #[test]
    fn test_three_bouquets() {
        let draws = Bouquet::default().draws(0.0, &meshes());
        assert_eq!(draws.len(), 3 * (PETAL_COUNT + 3));
        assert_eq!(draws.iter().filter(|d| d.mesh == MeshId(0)).count(), 3);
    }

    #[test]
    fn test_petals_are_open_at_rest() {
        // Head at y 0.5, full-length petal tip at (0, 2) with unit pulse at t=0
        let draws = Bouquet::default().draws(0.0, &meshes());
        assert!((tip_height(&draws) - (0.5 + 2.0)).abs() < 0.0001);
    }

    #[test]
    fn test_stopped_playback_keeps_petals_open() {
        let playback = crate::music::Playback::default();
        assert!(!playback.is_playing());
        assert!(!playback.is_open());

        let draws = Bouquet::default().draws(0.0, &meshes());
        assert!((tip_height(&draws) - 2.5).abs() < 0.0001);
    }

    #[test]
    fn test_petals_breathe() {
        let bouquet = Bouquet::default();
        let peak = bouquet.draws(std::f32::consts::FRAC_PI_4, &meshes());
        // Scale 1.1 at the breathing peak; spin is about Y so height is kept
        assert!((tip_height(&peak) - (0.5 + 2.2)).abs() < 0.0001);
    }

    #[test]
    fn test_wrap_is_flipped_under_flower() {
        let draws = Bouquet::default().draws(0.0, &meshes());
        let wrap = draws.iter().find(|d| d.mesh == MeshId(0)).unwrap();
        // Cone apex (0, 1.5) points down after the flip
        let apex = wrap.model.transform_point(Vec3::new(0.0, 1.5, 0.0));
        assert!((apex.x + 3.0).abs() < 0.0001);
        assert!((apex.y + 3.0).abs() < 0.0001);
    }

    #[test]
    fn test_flowers_spin() {
        let bouquet = Bouquet::default();
        let a = bouquet.flower_transform(Vec3::ZERO, 0.0);
        let b = bouquet.flower_transform(Vec3::ZERO, 1.0);
        assert_ne!(a, b);
    }
}
