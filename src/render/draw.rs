use crate::math::{Vec3, Mat4};

/// Handle to a mesh uploaded with `RenderPipeline::upload_mesh`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(pub usize);

/// Surface parameters for one draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Vec3,
    /// Added after lighting
    pub emissive: Vec3,
    /// Unlit surfaces ignore the lights (paper wrap)
    pub lit: bool,
    /// Sample the ground texture, tinted by `color`
    pub textured: bool,
    pub shininess: f32,
}

impl Material {
    pub fn lit(hex: u32) -> Self {
        Self {
            color: Vec3::from_hex(hex),
            emissive: Vec3::ZERO,
            lit: true,
            textured: false,
            shininess: 30.0,
        }
    }

    pub fn unlit(hex: u32) -> Self {
        Self {
            lit: false,
            ..Self::lit(hex)
        }
    }

    pub fn textured() -> Self {
        Self {
            textured: true,
            ..Self::lit(0xffffff)
        }
    }

    pub fn with_emissive(mut self, hex: u32, intensity: f32) -> Self {
        self.emissive = Vec3::from_hex(hex).scale(intensity);
        self
    }

    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }
}

/// One mesh placed in the world for the current frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub mesh: MeshId,
    pub model: Mat4,
    pub material: Material,
}

impl DrawCall {
    pub fn new(mesh: MeshId, model: Mat4, material: Material) -> Self {
        Self { mesh, model, material }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_builders() {
        let petal = Material::lit(0xffd700).with_emissive(0xffff00, 0.3);
        assert!(petal.lit);
        assert!((petal.emissive.x - 0.3).abs() < 0.0001);
        assert_eq!(petal.emissive.z, 0.0);

        let wrap = Material::unlit(0xc4a484);
        assert!(!wrap.lit);
        assert!(!wrap.textured);

        let ground = Material::textured();
        assert!(ground.textured);
        assert_eq!(ground.color, Vec3::ONE);
    }
}
