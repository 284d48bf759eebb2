//! Perspective camera looking down -Z at the field's origin.
//!
//! Platform-agnostic: both front-ends build their view-projection from it,
//! and the scroll binding only ever moves it along Z.

use crate::constants::*;
use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_BASE_DISTANCE),
            target: Vec3::new(0.0, 0.0, CAMERA_BASE_DISTANCE - 1.0),
            up: Vec3::Y,
            aspect: sanitize_aspect(aspect),
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    /// Moves the camera along Z, keeping it looking straight down -Z.
    pub fn set_distance(&mut self, distance: f32) {
        self.eye = Vec3::new(0.0, 0.0, distance);
        self.target = Vec3::new(0.0, 0.0, distance - 1.0);
    }

    pub fn distance(&self) -> f32 {
        self.eye.z
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.aspect = sanitize_aspect(width / height.max(1.0));
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[inline]
fn sanitize_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    }
}
