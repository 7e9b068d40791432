use crate::math::Vec3;

/// Floats per particle: position(3) + size(1) + alpha(1) + color(3)
pub const PARTICLE_FLOATS: usize = 8;

/// Droplet color (#4FC3F7)
const DROPLET_COLOR: u32 = 0x4fc3f7;

/// Falling water column shown above the flower being watered.
///
/// Droplets live in the flower's local space and wrap from the bottom of the
/// column back to the top, so the count never changes.
pub struct WaterDroplets {
    droplets: Vec<Vec3>,
    /// Fall speed in units per second
    pub fall_speed: f32,
    /// Droplets falling below this wrap to `top`
    pub bottom: f32,
    pub top: f32,
    /// Point size in world units
    pub size: f32,
    pub opacity: f32,
    color: Vec3,
    seed: u32,
}

impl WaterDroplets {
    pub fn new(count: usize) -> Self {
        let mut system = Self {
            droplets: Vec::with_capacity(count),
            fall_speed: 6.0, // 0.1 per frame at 60 fps
            bottom: -2.0,
            top: 2.0,
            size: 0.05,
            opacity: 0.8,
            color: Vec3::from_hex(DROPLET_COLOR),
            seed: 42,
        };
        system.scatter(count);
        system
    }

    /// Re-seed every droplet inside the column: x, z in [-0.25, 0.25), y in [0, 4)
    fn scatter(&mut self, count: usize) {
        self.droplets.clear();
        for _ in 0..count {
            let x = (self.next_unit() - 0.5) * 0.5;
            let y = self.next_unit() * 4.0;
            let z = (self.next_unit() - 0.5) * 0.5;
            self.droplets.push(Vec3::new(x, y, z));
        }
    }

    /// Start a fresh column (a new watering began)
    pub fn reset(&mut self) {
        let count = self.droplets.len();
        self.scatter(count);
    }

    pub fn update(&mut self, dt: f32) {
        let fall = self.fall_speed * dt.max(0.0);
        let span = self.top - self.bottom;
        for drop in &mut self.droplets {
            drop.y -= fall;
            if drop.y < self.bottom {
                drop.y = self.top - (self.bottom - drop.y) % span;
            }
        }
    }

    /// Local-space droplet positions
    pub fn positions(&self) -> &[Vec3] {
        &self.droplets
    }

    /// GPU data with droplets offset to `origin`
    pub fn particle_data(&self, origin: Vec3) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.droplets.len() * PARTICLE_FLOATS);
        for drop in &self.droplets {
            let p = origin + *drop;
            data.extend_from_slice(&[
                p.x, p.y, p.z,
                self.size,
                self.opacity,
                self.color.x, self.color.y, self.color.z,
            ]);
        }
        data
    }

    pub fn count(&self) -> usize {
        self.droplets.len()
    }

    /// LCG step mapped to [0, 1)
    fn next_unit(&mut self) -> f32 {
        self.seed = self.seed.wrapping_mul(1664525).wrapping_add(1013904223);
        (self.seed % 10000) as f32 / 10000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_column_bounds() {
        let system = WaterDroplets::new(100);
        assert_eq!(system.count(), 100);
        for p in system.positions() {
            assert!(p.x >= -0.25 && p.x < 0.25);
            assert!(p.z >= -0.25 && p.z < 0.25);
            assert!(p.y >= 0.0 && p.y < 4.0);
        }
    }

    #[test]
    fn test_droplets_fall() {
        let mut system = WaterDroplets::new(10);
        let before: Vec<f32> = system.positions().iter().map(|p| p.y).collect();
        system.update(1.0 / 60.0);
        for (p, y) in system.positions().iter().zip(before) {
            // Either fell 0.1 or wrapped to the top
            assert!((y - p.y - 0.1).abs() < 0.0001 || p.y > y);
        }
    }

    #[test]
    fn test_droplets_wrap_and_stay_in_range() {
        let mut system = WaterDroplets::new(50);
        for _ in 0..600 {
            system.update(1.0 / 60.0);
            for p in system.positions() {
                assert!(p.y >= -2.0 && p.y <= 4.0);
            }
        }
        assert_eq!(system.count(), 50);
    }

    #[test]
    fn test_particle_data_offset() {
        let system = WaterDroplets::new(3);
        let origin = Vec3::new(2.0, -0.9, 3.0);
        let data = system.particle_data(origin);
        assert_eq!(data.len(), 3 * PARTICLE_FLOATS);
        assert!((data[0] - (origin.x + system.positions()[0].x)).abs() < 0.0001);
        assert_eq!(data[4], 0.8);
    }

    #[test]
    fn test_reset_keeps_count() {
        let mut system = WaterDroplets::new(20);
        system.update(0.5);
        system.reset();
        assert_eq!(system.count(), 20);
    }
}
