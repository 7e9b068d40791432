use crate::math::Vec3;

/// Fully grown
pub const MAX_GROWTH: f32 = 1.0;

/// A planted sunflower
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flower {
    /// World-space position of the stem base
    pub position: Vec3,
    /// Maturity in [0, 1]
    pub growth: f32,
}

impl Flower {
    pub fn new(position: Vec3, growth: f32) -> Self {
        Self {
            position,
            growth: growth.clamp(0.0, MAX_GROWTH),
        }
    }

    /// Add `step` to growth, saturating at [`MAX_GROWTH`]. Never shrinks.
    pub fn grow(&mut self, step: f32) -> f32 {
        self.growth = (self.growth + step.max(0.0)).min(MAX_GROWTH);
        self.growth
    }

    pub fn is_fully_grown(&self) -> bool {
        self.growth >= MAX_GROWTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_growth() {
        assert_eq!(Flower::new(Vec3::ZERO, 1.7).growth, 1.0);
        assert_eq!(Flower::new(Vec3::ZERO, -0.3).growth, 0.0);
    }

    #[test]
    fn test_grow_saturates() {
        let mut flower = Flower::new(Vec3::ZERO, 0.9);
        assert_eq!(flower.grow(0.2), 1.0);
        assert!(flower.is_fully_grown());
        assert_eq!(flower.grow(0.2), 1.0);
    }

    #[test]
    fn test_grow_never_shrinks() {
        let mut flower = Flower::new(Vec3::ZERO, 0.5);
        flower.grow(-0.4);
        assert_eq!(flower.growth, 0.5);
    }
}
