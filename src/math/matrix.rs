use super::Vec3;

/// 4x4 matrix for transformations (column-major for WebGL)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub data: [f32; 16],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub fn identity() -> Self {
        Self {
            data: [
                1.0, 0.0, 0.0, 0.0,
                0.0, 1.0, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::identity();
        m.data[12] = x;
        m.data[13] = y;
        m.data[14] = z;
        m
    }

    pub fn translate(v: Vec3) -> Self {
        Self::translation(v.x, v.y, v.z)
    }

    pub fn scale(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::identity();
        m.data[0] = x;
        m.data[5] = y;
        m.data[10] = z;
        m
    }

    pub fn uniform_scale(s: f32) -> Self {
        Self::scale(s, s, s)
    }

    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            data: [
                1.0, 0.0, 0.0, 0.0,
                0.0, c, s, 0.0,
                0.0, -s, c, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            data: [
                c, 0.0, -s, 0.0,
                0.0, 1.0, 0.0, 0.0,
                s, 0.0, c, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            data: [
                c, s, 0.0, 0.0,
                -s, c, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Euler rotation applied X, then Y, then Z (three.js "XYZ" order)
    pub fn rotation_xyz(x: f32, y: f32, z: f32) -> Self {
        Self::rotation_x(x).mul(&Self::rotation_y(y)).mul(&Self::rotation_z(z))
    }

    /// Translation * rotation * scale, the usual object transform
    pub fn compose(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self::translate(position)
            .mul(&Self::rotation_xyz(rotation.x, rotation.y, rotation.z))
            .mul(&Self::scale(scale.x, scale.y, scale.z))
    }

    /// Perspective projection matrix
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y / 2.0).tan();
        let nf = 1.0 / (near - far);

        Self {
            data: [
                f / aspect, 0.0, 0.0, 0.0,
                0.0, f, 0.0, 0.0,
                0.0, 0.0, (far + near) * nf, -1.0,
                0.0, 0.0, 2.0 * far * near * nf, 0.0,
            ],
        }
    }

    /// Look-at view matrix
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let f = (target - eye).normalize();
        let r = f.cross(&up).normalize();
        let u = r.cross(&f);

        Self {
            data: [
                r.x, u.x, -f.x, 0.0,
                r.y, u.y, -f.y, 0.0,
                r.z, u.z, -f.z, 0.0,
                -r.dot(&eye), -u.dot(&eye), f.dot(&eye), 1.0,
            ],
        }
    }

    pub fn mul(&self, other: &Mat4) -> Self {
        let mut result = [0.0f32; 16];

        for row in 0..4 {
            for col in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.data[row + k * 4] * other.data[k + col * 4];
                }
                result[row + col * 4] = sum;
            }
        }

        Self { data: result }
    }

    /// General inverse; `None` when the matrix is singular
    pub fn inverse(&self) -> Option<Self> {
        let m = &self.data;
        let mut inv = [0.0f32; 16];

        inv[0] = m[5] * m[10] * m[15] - m[5] * m[11] * m[14] - m[9] * m[6] * m[15]
            + m[9] * m[7] * m[14] + m[13] * m[6] * m[11] - m[13] * m[7] * m[10];
        inv[4] = -m[4] * m[10] * m[15] + m[4] * m[11] * m[14] + m[8] * m[6] * m[15]
            - m[8] * m[7] * m[14] - m[12] * m[6] * m[11] + m[12] * m[7] * m[10];
        inv[8] = m[4] * m[9] * m[15] - m[4] * m[11] * m[13] - m[8] * m[5] * m[15]
            + m[8] * m[7] * m[13] + m[12] * m[5] * m[11] - m[12] * m[7] * m[9];
        inv[12] = -m[4] * m[9] * m[14] + m[4] * m[10] * m[13] + m[8] * m[5] * m[14]
            - m[8] * m[6] * m[13] - m[12] * m[5] * m[10] + m[12] * m[6] * m[9];
        inv[1] = -m[1] * m[10] * m[15] + m[1] * m[11] * m[14] + m[9] * m[2] * m[15]
            - m[9] * m[3] * m[14] - m[13] * m[2] * m[11] + m[13] * m[3] * m[10];
        inv[5] = m[0] * m[10] * m[15] - m[0] * m[11] * m[14] - m[8] * m[2] * m[15]
            + m[8] * m[3] * m[14] + m[12] * m[2] * m[11] - m[12] * m[3] * m[10];
        inv[9] = -m[0] * m[9] * m[15] + m[0] * m[11] * m[13] + m[8] * m[1] * m[15]
            - m[8] * m[3] * m[13] - m[12] * m[1] * m[11] + m[12] * m[3] * m[9];
        inv[13] = m[0] * m[9] * m[14] - m[0] * m[10] * m[13] - m[8] * m[1] * m[14]
            + m[8] * m[2] * m[13] + m[12] * m[1] * m[10] - m[12] * m[2] * m[9];
        inv[2] = m[1] * m[6] * m[15] - m[1] * m[7] * m[14] - m[5] * m[2] * m[15]
            + m[5] * m[3] * m[14] + m[13] * m[2] * m[7] - m[13] * m[3] * m[6];
        inv[6] = -m[0] * m[6] * m[15] + m[0] * m[7] * m[14] + m[4] * m[2] * m[15]
            - m[4] * m[3] * m[14] - m[12] * m[2] * m[7] + m[12] * m[3] * m[6];
        inv[10] = m[0] * m[5] * m[15] - m[0] * m[7] * m[13] - m[4] * m[1] * m[15]
            + m[4] * m[3] * m[13] + m[12] * m[1] * m[7] - m[12] * m[3] * m[5];
        inv[14] = -m[0] * m[5] * m[14] + m[0] * m[6] * m[13] + m[4] * m[1] * m[14]
            - m[4] * m[2] * m[13] - m[12] * m[1] * m[6] + m[12] * m[2] * m[5];
        inv[3] = -m[1] * m[6] * m[11] + m[1] * m[7] * m[10] + m[5] * m[2] * m[11]
            - m[5] * m[3] * m[10] - m[9] * m[2] * m[7] + m[9] * m[3] * m[6];
        inv[7] = m[0] * m[6] * m[11] - m[0] * m[7] * m[10] - m[4] * m[2] * m[11]
            + m[4] * m[3] * m[10] + m[8] * m[2] * m[7] - m[8] * m[3] * m[6];
        inv[11] = -m[0] * m[5] * m[11] + m[0] * m[7] * m[9] + m[4] * m[1] * m[11]
            - m[4] * m[3] * m[9] - m[8] * m[1] * m[7] + m[8] * m[3] * m[5];
        inv[15] = m[0] * m[5] * m[10] - m[0] * m[6] * m[9] - m[4] * m[1] * m[10]
            + m[4] * m[2] * m[9] + m[8] * m[1] * m[6] - m[8] * m[2] * m[5];

        let det = m[0] * inv[0] + m[1] * inv[4] + m[2] * inv[8] + m[3] * inv[12];
        if det.abs() < f32::EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        for v in inv.iter_mut() {
            *v *= inv_det;
        }
        Some(Self { data: inv })
    }

    /// Transform a point (applies translation)
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            self.data[0] * p.x + self.data[4] * p.y + self.data[8] * p.z + self.data[12],
            self.data[1] * p.x + self.data[5] * p.y + self.data[9] * p.z + self.data[13],
            self.data[2] * p.x + self.data[6] * p.y + self.data[10] * p.z + self.data[14],
        )
    }

    /// Transform a point and divide by w (for clip/NDC space round trips)
    pub fn project_point(&self, p: Vec3) -> Vec3 {
        let w = self.data[3] * p.x + self.data[7] * p.y + self.data[11] * p.z + self.data[15];
        let q = self.transform_point(p);
        if w.abs() > f32::EPSILON {
            q.scale(1.0 / w)
        } else {
            q
        }
    }

    /// Transform a direction (ignores translation)
    pub fn transform_direction(&self, d: Vec3) -> Vec3 {
        Vec3::new(
            self.data[0] * d.x + self.data[4] * d.y + self.data[8] * d.z,
            self.data[1] * d.x + self.data[5] * d.y + self.data[9] * d.z,
            self.data[2] * d.x + self.data[6] * d.y + self.data[10] * d.z,
        )
    }

    /// Get as slice for WebGL
    pub fn as_slice(&self) -> &[f32; 16] {
        &self.data
    }
}
