use std::ops::{Add, Sub, Mul, Neg};
use serde::{Serialize, Deserialize};

/// 3D vector for positions, directions, and colors
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const ONE: Vec3 = Vec3 { x: 1.0, y: 1.0, z: 1.0 };
    pub const UP: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };
    pub const RIGHT: Vec3 = Vec3 { x: 1.0, y: 0.0, z: 0.0 };
    pub const FORWARD: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 1.0 };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Same value on every axis (uniform scale)
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Color from a 0xRRGGBB literal
    pub fn from_hex(rgb: u32) -> Self {
        Self {
            x: ((rgb >> 16) & 0xff) as f32 / 255.0,
            y: ((rgb >> 8) & 0xff) as f32 / 255.0,
            z: (rgb & 0xff) as f32 / 255.0,
        }
    }

    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            self.scale(1.0 / len)
        } else {
            *self
        }
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        *self + (*other - *self).scale(t)
    }

    pub fn scale(&self, s: f32) -> Self {
        Self {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    /// Copy with the y component replaced
    pub fn with_y(&self, y: f32) -> Self {
        Self { y, ..*self }
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    pub fn distance(&self, other: &Self) -> f32 {
        (*self - *other).length()
    }

    /// Any unit vector perpendicular to this one
    pub fn perpendicular(&self) -> Self {
        let n = self.normalize();
        if n.y.abs() < 0.9 {
            n.cross(&Vec3::UP).normalize()
        } else {
            n.cross(&Vec3::RIGHT).normalize()
        }
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        self.scale(scalar)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let gold = Vec3::from_hex(0xffd700);
        assert!((gold.x - 1.0).abs() < 0.0001);
        assert!((gold.y - 215.0 / 255.0).abs() < 0.0001);
        assert_eq!(gold.z, 0.0);
    }

    #[test]
    fn test_normalize() {
        let n = Vec3::new(3.0, 4.0, 0.0).normalize();
        assert!((n.length() - 1.0).abs() < 0.0001);
        assert!((n.x - 0.6).abs() < 0.0001);

        // Zero vector stays zero instead of turning into NaN
        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
    }

    #[test]
    fn test_cross_right_up_is_forward() {
        let c = Vec3::RIGHT.cross(&Vec3::UP);
        assert!((c.z - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_with_y_keeps_xz() {
        let p = Vec3::new(2.0, 0.0, 3.0).with_y(-0.9);
        assert_eq!(p, Vec3::new(2.0, -0.9, 3.0));
    }

    #[test]
    fn test_perpendicular() {
        for v in [Vec3::UP, Vec3::RIGHT, Vec3::new(1.0, 2.0, 3.0)] {
            assert!(v.perpendicular().dot(&v).abs() < 0.0001);
        }
    }

    #[test]
    fn test_ops() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!((a + b).x, 5.0);
        assert_eq!((b - a).y, 3.0);
        assert_eq!((a * 2.0).z, 6.0);
        assert_eq!((-a).x, -1.0);
        assert_eq!(a.lerp(&b, 0.5), Vec3::new(2.5, 3.5, 4.5));
    }
}
