use crate::constants::*;
use crate::stage::Stage;

/// Normalized scroll position in [0, 1]. A page that cannot scroll is at 0.
#[inline]
pub fn scroll_progress(offset: f64, max_offset: f64) -> f32 {
    if !(max_offset > 0.0) || !offset.is_finite() {
        return 0.0;
    }
    (offset / max_offset).clamp(0.0, 1.0) as f32
}

/// Camera distance, field scale and point size for one scroll position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollPose {
    pub camera_distance: f32,
    pub field_scale: f32,
    pub point_size: f32,
}

impl ScrollPose {
    pub fn from_progress(progress: f32) -> Self {
        let p = progress.clamp(0.0, 1.0);
        Self {
            camera_distance: CAMERA_BASE_DISTANCE - p * SCROLL_CAMERA_TRAVEL,
            field_scale: 1.0 + p * SCROLL_SCALE_GAIN,
            point_size: BASE_POINT_SIZE + p * SCROLL_POINT_SIZE_GAIN,
        }
    }
}

impl Default for ScrollPose {
    fn default() -> Self {
        Self::from_progress(0.0)
    }
}

/// Maps page scroll onto the stage's camera and field.
///
/// Stateless: the same offsets always produce the same stage state.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollCameraBinding;

impl ScrollCameraBinding {
    pub fn on_scroll(&self, stage: &mut Stage, offset: f64, max_offset: f64) -> ScrollPose {
        let pose = ScrollPose::from_progress(scroll_progress(offset, max_offset));
        stage.set_scroll_pose(pose);
        pose
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_clamps_and_handles_unscrollable_pages() {
        assert_eq!(scroll_progress(-20.0, 100.0), 0.0);
        assert_eq!(scroll_progress(250.0, 100.0), 1.0);
        assert_eq!(scroll_progress(50.0, 0.0), 0.0);
        assert_eq!(scroll_progress(50.0, -5.0), 0.0);
        assert!((scroll_progress(25.0, 100.0) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn midway_pose_interpolates_linearly() {
        let pose = ScrollPose::from_progress(0.5);
        assert!((pose.camera_distance - 950.0).abs() < 1e-4);
        assert!((pose.field_scale - 2.5).abs() < 1e-6);
        assert!((pose.point_size - 8.0).abs() < 1e-6);
    }
}
