use crate::math::{Vec3, Mat4};

/// A ray in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Ray through a canvas pixel, unprojected from the near to the far plane
    pub fn from_screen(
        screen_x: f32,
        screen_y: f32,
        screen_width: f32,
        screen_height: f32,
        view: &Mat4,
        projection: &Mat4,
    ) -> Option<Self> {
        if screen_width <= 0.0 || screen_height <= 0.0 {
            return None;
        }

        let ndc_x = (2.0 * screen_x / screen_width) - 1.0;
        let ndc_y = 1.0 - (2.0 * screen_y / screen_height);

        let inv = projection.mul(view).inverse()?;
        let near = inv.project_point(Vec3::new(ndc_x, ndc_y, -1.0));
        let far = inv.project_point(Vec3::new(ndc_x, ndc_y, 1.0));

        Some(Self::new(near, far - near))
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction.scale(t)
    }

    /// Distance to the horizontal plane at height `y`
    pub fn intersect_plane_y(&self, y: f32) -> Option<f32> {
        if self.direction.y.abs() < 1e-6 {
            return None;
        }
        let t = (y - self.origin.y) / self.direction.y;
        (t > 0.0).then_some(t)
    }

    /// Nearest positive distance to a sphere
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;

        let a = self.direction.dot(&self.direction);
        let b = 2.0 * oc.dot(&self.direction);
        let c = oc.dot(&oc) - radius * radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        let t1 = (-b - sqrt_d) / (2.0 * a);
        let t2 = (-b + sqrt_d) / (2.0 * a);

        if t1 > 0.0 {
            Some(t1)
        } else if t2 > 0.0 {
            Some(t2)
        } else {
            None
        }
    }
}

/// Bounding sphere of a clickable flower
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickTarget {
    pub index: usize,
    pub center: Vec3,
    pub radius: f32,
}

/// What a click landed on
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pick {
    Flower { index: usize, distance: f32 },
    Ground { point: Vec3 },
    Nothing,
}

/// Resolves clicks against the flowers and the square ground plane
#[derive(Debug, Clone, Copy)]
pub struct GardenPicker {
    pub ground_y: f32,
    /// Half of the ground's side length
    pub ground_half_extent: f32,
}

impl Default for GardenPicker {
    fn default() -> Self {
        Self {
            ground_y: -1.0,
            ground_half_extent: 10.0,
        }
    }
}

impl GardenPicker {
    /// Closest flower hit wins; the ground only counts when no flower is hit
    pub fn pick(&self, ray: &Ray, targets: &[PickTarget]) -> Pick {
        let flower = targets
            .iter()
            .filter_map(|t| ray.intersect_sphere(t.center, t.radius).map(|d| (t.index, d)))
            .min_by(|a, b| a.1.total_cmp(&b.1));

        if let Some((index, distance)) = flower {
            return Pick::Flower { index, distance };
        }

        match self.ground_hit(ray) {
            Some(point) => Pick::Ground { point },
            None => Pick::Nothing,
        }
    }

    pub fn ground_hit(&self, ray: &Ray) -> Option<Vec3> {
        let t = ray.intersect_plane_y(self.ground_y)?;
        let point = ray.at(t);
        let inside = point.x.abs() <= self.ground_half_extent
            && point.z.abs() <= self.ground_half_extent;
        inside.then_some(point)
    }

    /// Closest flower under the ray, ignoring the ground
    pub fn hover(&self, ray: &Ray, targets: &[PickTarget]) -> Option<usize> {
        match self.pick(ray, targets) {
            Pick::Flower { index, .. } => Some(index),
            _ => None,
        }
    }
}
