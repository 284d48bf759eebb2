//! Runtime tunables for the starfield.
//!
//! Defaults come from `constants.rs`. Front-ends may override individual keys
//! through a string lookup: the web build reads `data-*` attributes on the
//! canvas container, the native build reads `STARFIELD_*` environment
//! variables.

use crate::constants::*;
use crate::error::{Result, StarfieldError};

/// How theme changes rewrite particle colors and opacities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecolorPolicy {
    /// Displayed values are derived from the immutable creation-time values,
    /// so toggling themes is lossless.
    #[default]
    Canonical,
    /// In-place reclassification of the displayed values. Returning to light
    /// mode re-randomizes anything that looks dark.
    Reclassify,
}

/// What drives the field's slow rotation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RotationClock {
    /// Fixed increment per advance call, so rotation speed follows frame rate.
    #[default]
    PerFrame,
    /// Increment scaled by elapsed time at a 60 Hz reference rate.
    Elapsed,
}

/// Coarse viewport classification used for particle budget and pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceClass {
    Narrow,
    Wide,
}

impl DeviceClass {
    pub fn from_viewport_width(width_px: f32, breakpoint_px: f32) -> Self {
        if width_px <= breakpoint_px {
            DeviceClass::Narrow
        } else {
            DeviceClass::Wide
        }
    }

    pub fn is_narrow(self) -> bool {
        matches!(self, DeviceClass::Narrow)
    }

    /// Caps the device pixel ratio to keep fill-rate reasonable on phones.
    pub fn pixel_ratio(self, device_pixel_ratio: f64) -> f64 {
        let cap = match self {
            DeviceClass::Narrow => PIXEL_RATIO_CAP_NARROW,
            DeviceClass::Wide => PIXEL_RATIO_CAP_WIDE,
        };
        device_pixel_ratio.min(cap).max(1.0)
    }

    /// Canvas backing-store size in device pixels for a CSS size at the
    /// current device pixel ratio. Never zero.
    pub fn backing_size(self, css_width: f64, css_height: f64, device_pixel_ratio: f64) -> (u32, u32) {
        let ratio = self.pixel_ratio(device_pixel_ratio);
        let px = |css: f64| ((css.max(0.0) * ratio) as u32).max(1);
        (px(css_width), px(css_height))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StarfieldConfig {
    pub particles_wide: usize,
    pub particles_narrow: usize,
    pub narrow_breakpoint_px: f32,
    pub recolor: RecolorPolicy,
    pub rotation: RotationClock,
    /// Fixed RNG seed; `None` lets the host pick one per page load.
    pub seed: Option<u64>,
    pub monitor_fps: bool,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            particles_wide: PARTICLES_WIDE,
            particles_narrow: PARTICLES_NARROW,
            narrow_breakpoint_px: NARROW_BREAKPOINT_PX,
            recolor: RecolorPolicy::default(),
            rotation: RotationClock::default(),
            seed: None,
            monitor_fps: false,
        }
    }
}

/// Keys understood by [`StarfieldConfig::from_lookup`].
pub const CONFIG_KEYS: [&str; 7] = [
    "particles",
    "particles-narrow",
    "breakpoint",
    "recolor",
    "rotation",
    "seed",
    "monitor-fps",
];

impl StarfieldConfig {
    /// Builds a config from defaults plus whatever keys `lookup` knows.
    ///
    /// Only [`CONFIG_KEYS`] are asked for; a present but malformed value is
    /// an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        for key in CONFIG_KEYS {
            if let Some(v) = lookup(key) {
                cfg.apply(key, &v)?;
            }
        }
        Ok(cfg)
    }

    /// Like [`from_lookup`](Self::from_lookup), but a malformed value only
    /// drops its own key. The rejected keys come back alongside the config.
    pub fn from_lookup_lenient<F>(lookup: F) -> (Self, Vec<StarfieldError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        let mut rejected = Vec::new();
        for key in CONFIG_KEYS {
            if let Some(v) = lookup(key) {
                if let Err(e) = cfg.apply(key, &v) {
                    rejected.push(e);
                }
            }
        }
        (cfg, rejected)
    }

    /// Parses one override into `self`; on error `self` is unchanged.
    pub fn apply(&mut self, key: &str, v: &str) -> Result<()> {
        match key {
            "particles" => self.particles_wide = parse_count("particles", v)?,
            "particles-narrow" => self.particles_narrow = parse_count("particles-narrow", v)?,
            "breakpoint" => {
                self.narrow_breakpoint_px = v
                    .trim()
                    .parse::<f32>()
                    .ok()
                    .filter(|b| b.is_finite() && *b >= 0.0)
                    .ok_or_else(|| invalid("breakpoint", v, "expected a non-negative width in px"))?
            }
            "recolor" => {
                self.recolor = match v.trim().to_ascii_lowercase().as_str() {
                    "canonical" => RecolorPolicy::Canonical,
                    "reclassify" => RecolorPolicy::Reclassify,
                    _ => return Err(invalid("recolor", v, "expected `canonical` or `reclassify`")),
                }
            }
            "rotation" => {
                self.rotation = match v.trim().to_ascii_lowercase().as_str() {
                    "frame" => RotationClock::PerFrame,
                    "elapsed" => RotationClock::Elapsed,
                    _ => return Err(invalid("rotation", v, "expected `frame` or `elapsed`")),
                }
            }
            "seed" => {
                let seed = v
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| invalid("seed", v, &e.to_string()))?;
                self.seed = Some(seed);
            }
            "monitor-fps" => self.monitor_fps = parse_flag("monitor-fps", v)?,
            _ => return Err(invalid("key", key, "unknown config key")),
        }
        Ok(())
    }

    pub fn device_class(&self, viewport_width_px: f32) -> DeviceClass {
        DeviceClass::from_viewport_width(viewport_width_px, self.narrow_breakpoint_px)
    }

    pub fn particle_count(&self, class: DeviceClass) -> usize {
        match class {
            DeviceClass::Narrow => self.particles_narrow,
            DeviceClass::Wide => self.particles_wide,
        }
    }
}

fn invalid(key: &'static str, value: &str, reason: &str) -> StarfieldError {
    StarfieldError::InvalidConfig {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_count(key: &'static str, value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err(invalid(key, value, "particle count must be positive")),
        Ok(n) => Ok(n),
        Err(e) => Err(invalid(key, value, &e.to_string())),
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value, "expected a boolean")),
    }
}
