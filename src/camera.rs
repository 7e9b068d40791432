//! Orbit camera shared by both scenes
//!
//! Angles are an elevation above the horizontal plane and an azimuth around
//! the y axis, with the camera sitting `distance` away from `target`.

use std::f32::consts::FRAC_PI_2;
use crate::math::{Mat4, Vec3};

const ORBIT_SPEED: f32 = 0.01;
const ZOOM_SPEED: f32 = 0.5;
const PAN_SPEED: f32 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub fov: f32,
    distance: f32,
    elevation: f32,
    azimuth: f32,
    min_distance: f32,
    max_distance: f32,
    min_elevation: f32,
    max_elevation: f32,
    pan_enabled: bool,
}

impl OrbitCamera {
    /// Camera at `position` looking at `target`
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let distance = offset.length().max(0.001);
        let elevation = (offset.y / distance).clamp(-1.0, 1.0).asin();
        let azimuth = offset.x.atan2(offset.z);

        Self {
            target,
            fov: std::f32::consts::FRAC_PI_4,
            distance,
            elevation,
            azimuth,
            min_distance: 1.0,
            max_distance: 50.0,
            min_elevation: -FRAC_PI_2 + 0.1,
            max_elevation: FRAC_PI_2 - 0.1,
            pan_enabled: true,
        }
    }

    /// Garden view: above the ground, never dipping below the horizon, no pan
    pub fn garden() -> Self {
        let mut camera = Self::looking_at(Vec3::new(0.0, 5.0, 5.0), Vec3::ZERO);
        camera.fov = 75f32.to_radians();
        // A polar angle of at most pi/2 - 0.1 from straight up
        camera.min_elevation = 0.1;
        camera.max_elevation = FRAC_PI_2 - 0.01;
        camera.min_distance = 2.0;
        camera.max_distance = 30.0;
        camera.pan_enabled = false;
        camera
    }

    /// Song view: facing the three bouquets, zoom kept within [3, 20]
    pub fn song() -> Self {
        let mut camera = Self::looking_at(Vec3::new(0.0, 0.0, 8.0), Vec3::ZERO);
        camera.fov = 75f32.to_radians();
        camera.min_distance = 3.0;
        camera.max_distance = 20.0;
        camera
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn elevation(&self) -> f32 {
        self.elevation
    }

    pub fn position(&self) -> Vec3 {
        let (sin_x, cos_x) = self.elevation.sin_cos();
        let (sin_y, cos_y) = self.azimuth.sin_cos();

        Vec3::new(
            self.target.x + self.distance * cos_x * sin_y,
            self.target.y + self.distance * sin_x,
            self.target.z + self.distance * cos_x * cos_y,
        )
    }

    pub fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        self.azimuth += delta_x * ORBIT_SPEED;
        self.elevation = (self.elevation + delta_y * ORBIT_SPEED)
            .clamp(self.min_elevation, self.max_elevation);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance =
            (self.distance + delta * ZOOM_SPEED).clamp(self.min_distance, self.max_distance);
    }

    /// Move the target in camera-relative space; ignored when pan is off
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        if !self.pan_enabled {
            return;
        }
        let right = Vec3::new(self.azimuth.cos(), 0.0, -self.azimuth.sin());
        self.target = self.target + right.scale(-delta_x * PAN_SPEED) + Vec3::UP.scale(delta_y * PAN_SPEED);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position(), self.target, Vec3::UP)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective(self.fov, aspect, 0.1, 1000.0)
    }
}
