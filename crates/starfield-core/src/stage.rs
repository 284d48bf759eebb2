//! Scene context shared by the render loop, scroll binding and theme
//! controller.
//!
//! The field is installed once it has been built. Theme and scroll changes
//! that arrive earlier are remembered and applied at install time, so callers
//! never have to poll for readiness.

use crate::camera::Camera;
use crate::field::ParticleField;
use crate::scroll::ScrollPose;
use crate::theme::Theme;

#[derive(Default)]
pub struct Stage {
    pub camera: Camera,
    field: Option<ParticleField>,
    theme: Option<Theme>,
    pose: ScrollPose,
}

impl Stage {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            field: None,
            theme: None,
            pose: ScrollPose::default(),
        }
    }

    /// Hands the built field to the stage and brings it up to date with the
    /// latest theme and scroll pose.
    pub fn install_field(&mut self, mut field: ParticleField) {
        if let Some(theme) = self.theme {
            field.apply_theme(theme);
        }
        field.set_scale(self.pose.field_scale);
        field.set_point_size(self.pose.point_size);
        log::info!(
            "[stage] field ready: {} particles, theme={}",
            field.len(),
            self.theme.unwrap_or_default()
        );
        self.field = Some(field);
    }

    pub fn is_ready(&self) -> bool {
        self.field.is_some()
    }

    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref()
    }

    pub fn field_mut(&mut self) -> Option<&mut ParticleField> {
        self.field.as_mut()
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = Some(theme);
        match self.field.as_mut() {
            Some(field) => field.apply_theme(theme),
            None => log::debug!("[stage] theme {} deferred until field is ready", theme),
        }
    }

    /// Last requested theme, whether or not a field has seen it yet.
    pub fn theme(&self) -> Option<Theme> {
        self.theme
    }

    pub fn set_scroll_pose(&mut self, pose: ScrollPose) {
        self.pose = pose;
        self.camera.set_distance(pose.camera_distance);
        if let Some(field) = self.field.as_mut() {
            field.set_scale(pose.field_scale);
            field.set_point_size(pose.point_size);
        }
    }

    pub fn scroll_pose(&self) -> ScrollPose {
        self.pose
    }
}
