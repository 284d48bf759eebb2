//! The particle field behind the animated background.
//!
//! Particles are rows in parallel arrays (positions, colors, sizes,
//! opacities, velocities), all of the same length, fixed at creation. Each
//! frame only touches z positions and the field-wide rotation; theme changes
//! only touch colors, opacities and the material opacity.

use crate::config::{DeviceClass, RecolorPolicy, RotationClock, StarfieldConfig};
use crate::constants::*;
use crate::theme::Theme;
use glam::{Mat4, Vec3};
use rand::prelude::*;
use std::f32::consts::TAU;
use std::time::Duration;

/// GPU-ready packed particle, rebuilt from the field every frame.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct StarInstance {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 3],
    pub opacity: f32,
}

pub struct ParticleField {
    positions: Vec<Vec3>,
    colors: Vec<[f32; 3]>,
    sizes: Vec<f32>,
    opacities: Vec<f32>,
    velocities: Vec<f32>,
    // creation-time light-mode values
    canonical_colors: Vec<[f32; 3]>,
    canonical_opacities: Vec<f32>,

    /// (pitch, yaw) in radians; applied as X then Y rotation.
    rotation: [f32; 2],
    scale: f32,
    point_size: f32,
    material_opacity: f32,

    recolor: RecolorPolicy,
    rotation_clock: RotationClock,
    theme: Theme,
    rng: StdRng,
}

impl ParticleField {
    /// Scatters `count` particles through the spherical shell with random
    /// palette colors, sizes, opacities and drift velocities.
    pub fn create(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut positions = Vec::with_capacity(count);
        let mut colors = Vec::with_capacity(count);
        let mut sizes = Vec::with_capacity(count);
        let mut opacities = Vec::with_capacity(count);
        let mut velocities = Vec::with_capacity(count);

        for _ in 0..count {
            let radius = rng.gen::<f32>() * SHELL_THICKNESS + SHELL_INNER_RADIUS;
            let theta = rng.gen::<f32>() * TAU;
            let phi = (rng.gen::<f32>() * 2.0 - 1.0).acos();
            positions.push(Vec3::new(
                radius * phi.sin() * theta.cos(),
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
            ));
            colors.push(random_palette_color(&mut rng));
            sizes.push(rng.gen::<f32>() * SIZE_SPAN + SIZE_MIN);
            opacities.push(random_opacity(&mut rng));
            velocities.push((rng.gen::<f32>() - 0.5) * VELOCITY_SPAN);
        }

        log::info!("[field] created {} particles (seed={})", count, seed);

        Self {
            canonical_colors: colors.clone(),
            canonical_opacities: opacities.clone(),
            positions,
            colors,
            sizes,
            opacities,
            velocities,
            rotation: [0.0, 0.0],
            scale: 1.0,
            point_size: BASE_POINT_SIZE,
            material_opacity: MATERIAL_OPACITY_LIGHT,
            recolor: RecolorPolicy::default(),
            rotation_clock: RotationClock::default(),
            theme: Theme::Light,
            rng,
        }
    }

    /// Creates a field sized for the device class, honoring the config's
    /// recolor policy and rotation clock.
    pub fn for_device(class: DeviceClass, config: &StarfieldConfig, seed: u64) -> Self {
        let mut field = Self::create(config.particle_count(class), seed);
        field.recolor = config.recolor;
        field.rotation_clock = config.rotation;
        field
    }

    pub fn with_recolor_policy(mut self, policy: RecolorPolicy) -> Self {
        self.recolor = policy;
        self
    }

    pub fn with_rotation_clock(mut self, clock: RotationClock) -> Self {
        self.rotation_clock = clock;
        self
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Per-frame update: z drift with wrap-around plus the slow field rotation.
    pub fn advance(&mut self, dt: Duration) {
        for (p, v) in self.positions.iter_mut().zip(&self.velocities) {
            p.z += v * DRIFT_SPEED;
            if p.z > DRIFT_Z_LIMIT {
                p.z = -DRIFT_Z_LIMIT;
            }
            if p.z < -DRIFT_Z_LIMIT {
                p.z = DRIFT_Z_LIMIT;
            }
        }
        let steps = match self.rotation_clock {
            RotationClock::PerFrame => 1.0,
            RotationClock::Elapsed => dt.as_secs_f32() * REFERENCE_FPS,
        };
        self.rotation[0] += PITCH_PER_FRAME * steps;
        self.rotation[1] += YAW_PER_FRAME * steps;
    }

    /// Recolors the field for `theme` according to the recolor policy.
    pub fn apply_theme(&mut self, theme: Theme) {
        self.material_opacity = match theme {
            Theme::Dark => MATERIAL_OPACITY_DARK,
            Theme::Light => MATERIAL_OPACITY_LIGHT,
        };
        match self.recolor {
            RecolorPolicy::Canonical => self.derive_from_canonical(theme),
            RecolorPolicy::Reclassify => self.reclassify(theme),
        }
        self.theme = theme;
        log::debug!("[field] applied {} theme ({:?})", theme, self.recolor);
    }

    fn derive_from_canonical(&mut self, theme: Theme) {
        let is_dark = theme.is_dark();
        for (out, base) in self.colors.iter_mut().zip(&self.canonical_colors) {
            *out = if is_dark { darken_color(*base) } else { *base };
        }
        for (out, base) in self.opacities.iter_mut().zip(&self.canonical_opacities) {
            *out = if is_dark { dim_opacity(*base) } else { *base };
        }
    }

    fn reclassify(&mut self, theme: Theme) {
        match theme {
            Theme::Dark => {
                for c in self.colors.iter_mut() {
                    *c = darken_color(*c);
                }
                for o in self.opacities.iter_mut() {
                    *o = dim_opacity(*o);
                }
            }
            Theme::Light => {
                for c in self.colors.iter_mut() {
                    if looks_dark(*c) {
                        *c = random_palette_color(&mut self.rng);
                    }
                }
                for o in self.opacities.iter_mut() {
                    *o = random_opacity(&mut self.rng);
                }
            }
        }
    }

    /// Pins one particle to a position and drift velocity.
    pub fn place(&mut self, index: usize, position: Vec3, velocity: f32) {
        if let (Some(p), Some(v)) = (self.positions.get_mut(index), self.velocities.get_mut(index)) {
            *p = position;
            *v = velocity;
        }
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    pub fn set_point_size(&mut self, size: f32) {
        self.point_size = size;
    }

    /// Field transform: uniform scale, then pitch about X and yaw about Y.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.rotation[0])
            * Mat4::from_rotation_y(self.rotation[1])
            * Mat4::from_scale(Vec3::splat(self.scale))
    }

    /// Packs the current displayed state into `out`, replacing its contents.
    pub fn pack_instances(&self, out: &mut Vec<StarInstance>) {
        out.clear();
        out.reserve(self.len());
        for i in 0..self.len() {
            out.push(StarInstance {
                position: self.positions[i].to_array(),
                size: self.sizes[i],
                color: self.colors[i],
                opacity: self.opacities[i],
            });
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }
    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }
    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }
    pub fn opacities(&self) -> &[f32] {
        &self.opacities
    }
    pub fn velocities(&self) -> &[f32] {
        &self.velocities
    }
    pub fn canonical_colors(&self) -> &[[f32; 3]] {
        &self.canonical_colors
    }
    pub fn canonical_opacities(&self) -> &[f32] {
        &self.canonical_opacities
    }
    /// (pitch, yaw) in radians.
    pub fn rotation(&self) -> [f32; 2] {
        self.rotation
    }
    pub fn scale(&self) -> f32 {
        self.scale
    }
    pub fn point_size(&self) -> f32 {
        self.point_size
    }
    pub fn material_opacity(&self) -> f32 {
        self.material_opacity
    }
    pub fn theme(&self) -> Theme {
        self.theme
    }
    pub fn recolor_policy(&self) -> RecolorPolicy {
        self.recolor
    }
}

fn random_palette_color(rng: &mut StdRng) -> [f32; 3] {
    *PALETTE.choose(rng).unwrap_or(&PALETTE[0])
}

fn random_opacity(rng: &mut StdRng) -> f32 {
    rng.gen::<f32>() * OPACITY_SPAN + OPACITY_MIN
}

/// Dark-mode color rule: white and pink become muted blues, bright blues are
/// scaled down, anything else is kept.
pub fn darken_color(c: [f32; 3]) -> [f32; 3] {
    let [r, g, b] = c;
    if r > 0.85 && g > 0.85 && b > 0.85 {
        DARK_WHITE_REPLACEMENT
    } else if r > 0.8 && g > 0.6 && b > 0.7 {
        DARK_PINK_REPLACEMENT
    } else if b > 0.7 && r < 0.3 && g < 0.9 {
        [
            (r * DARK_BLUE_SCALE[0]).max(0.0),
            (g * DARK_BLUE_SCALE[1]).max(0.0),
            (b * DARK_BLUE_SCALE[2]).max(0.0),
        ]
    } else {
        c
    }
}

#[inline]
pub fn dim_opacity(o: f32) -> f32 {
    (o * DARK_OPACITY_SCALE).max(DARK_OPACITY_FLOOR)
}

/// Whether a stored color looks like one produced by `darken_color`.
#[inline]
pub fn looks_dark(c: [f32; 3]) -> bool {
    c[0] < 0.3 && c[1] < 0.4 && c[2] < 0.6
}
