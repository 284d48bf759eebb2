//! Per-refresh driver: advance the field, then draw it.

use crate::field::StarInstance;
use crate::monitor::FrameRateMonitor;
use crate::stage::Stage;
use glam::Mat4;
use std::fmt::Display;
use std::time::Duration;

/// Everything a renderer needs for one frame.
pub struct FrameSnapshot<'a> {
    pub view_proj: Mat4,
    pub model: Mat4,
    pub point_size: f32,
    pub opacity: f32,
    pub instances: &'a [StarInstance],
}

/// Draws a frame. Implemented by the GPU hosts and by test doubles.
pub trait SceneRenderer {
    type Error: Display;

    fn render(&mut self, frame: &FrameSnapshot<'_>) -> Result<(), Self::Error>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// No field or no renderer yet; nothing happened.
    Skipped,
    Rendered,
    /// The renderer reported an error; it has been logged.
    Failed,
}

#[derive(Default)]
pub struct RenderLoop {
    scratch: Vec<StarInstance>,
    monitor: Option<FrameRateMonitor>,
    frames: u64,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_monitor(mut self, monitor: FrameRateMonitor) -> Self {
        self.monitor = Some(monitor);
        self
    }

    pub fn tick<R: SceneRenderer>(
        &mut self,
        stage: &mut Stage,
        renderer: Option<&mut R>,
        dt: Duration,
    ) -> FrameOutcome {
        if let Some(m) = self.monitor.as_mut() {
            m.record(dt);
        }
        let view_proj = stage.camera.view_projection();
        let (Some(field), Some(renderer)) = (stage.field_mut(), renderer) else {
            return FrameOutcome::Skipped;
        };
        field.advance(dt);
        field.pack_instances(&mut self.scratch);
        let snapshot = FrameSnapshot {
            view_proj,
            model: field.model_matrix(),
            point_size: field.point_size(),
            opacity: field.material_opacity(),
            instances: &self.scratch,
        };
        self.frames += 1;
        match renderer.render(&snapshot) {
            Ok(()) => FrameOutcome::Rendered,
            Err(e) => {
                log::error!("render error: {}", e);
                FrameOutcome::Failed
            }
        }
    }

    /// Number of frames handed to a renderer so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
