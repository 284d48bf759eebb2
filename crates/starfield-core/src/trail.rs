use crate::constants::{TRAIL_EASING, TRAIL_HALF_EXTENT_PX, TRAIL_TOUCH_IDLE_SECS};
use glam::Vec2;
use std::time::Duration;

/// Eased follower for the cursor-trail element.
///
/// On touch devices the trail hides itself after a few seconds without
/// pointer movement.
#[derive(Clone, Debug, Default)]
pub struct CursorTrail {
    target: Vec2,
    pos: Vec2,
    active: bool,
    touch: bool,
    idle: Duration,
}

impl CursorTrail {
    pub fn new(touch: bool) -> Self {
        Self {
            touch,
            ..Default::default()
        }
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.target = Vec2::new(x, y);
        self.active = true;
        self.idle = Duration::ZERO;
    }

    pub fn pointer_left(&mut self) {
        self.active = false;
        self.idle = Duration::ZERO;
    }

    /// Advances one frame and returns the element's top-left in CSS px.
    pub fn step(&mut self, dt: Duration) -> Vec2 {
        self.pos += (self.target - self.pos) * TRAIL_EASING;
        if self.touch && self.active {
            self.idle += dt;
            if self.idle.as_secs_f32() >= TRAIL_TOUCH_IDLE_SECS {
                self.active = false;
            }
        }
        self.css_position()
    }

    pub fn css_position(&self) -> Vec2 {
        self.pos - Vec2::splat(TRAIL_HALF_EXTENT_PX)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}
