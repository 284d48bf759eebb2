// Shared visual tuning constants used by both web and native frontends.

// Field population
pub const PARTICLES_WIDE: usize = 12_000;
pub const PARTICLES_NARROW: usize = 6_000;
pub const NARROW_BREAKPOINT_PX: f32 = 768.0; // viewports at or below this width count as narrow

// Spherical shell the particles are scattered in
pub const SHELL_INNER_RADIUS: f32 = 500.0;
pub const SHELL_THICKNESS: f32 = 2000.0; // outer radius = inner + thickness

// Per-particle attribute ranges
pub const SIZE_MIN: f32 = 1.5;
pub const SIZE_SPAN: f32 = 4.0;
pub const OPACITY_MIN: f32 = 0.2;
pub const OPACITY_SPAN: f32 = 0.8;
pub const VELOCITY_SPAN: f32 = 0.5; // drift velocity in [-span/2, span/2]

// Light-mode palette: primary blue, light blue, white, pink
pub const PALETTE: [[f32; 3]; 4] = [
    [0.0, 0.31, 1.0], // #0050FF
    [0.4, 0.8, 1.0],  // #66CCFF
    [1.0, 1.0, 1.0],  // #FFFFFF
    [1.0, 0.8, 0.9],  // #FFCCE6
];

// Drift
pub const DRIFT_SPEED: f32 = 0.1; // z += velocity * DRIFT_SPEED per frame
pub const DRIFT_Z_LIMIT: f32 = 1500.0; // z wraps at +/- this bound
pub const YAW_PER_FRAME: f32 = 0.0005;
pub const PITCH_PER_FRAME: f32 = 0.0002;
pub const REFERENCE_FPS: f32 = 60.0; // converts elapsed seconds into frame-equivalents

// Theme levels
pub const MATERIAL_OPACITY_LIGHT: f32 = 0.9;
pub const MATERIAL_OPACITY_DARK: f32 = 0.25;
pub const DARK_OPACITY_SCALE: f32 = 0.3;
pub const DARK_OPACITY_FLOOR: f32 = 0.05;

// Dark-mode replacement colors
pub const DARK_WHITE_REPLACEMENT: [f32; 3] = [0.2, 0.3, 0.5]; // blue-gray
pub const DARK_PINK_REPLACEMENT: [f32; 3] = [0.15, 0.2, 0.4]; // purple-blue
pub const DARK_BLUE_SCALE: [f32; 3] = [0.4, 0.5, 0.6];

// Camera
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 2000.0;
pub const CAMERA_BASE_DISTANCE: f32 = 1000.0;

// Scroll mapping
pub const SCROLL_CAMERA_TRAVEL: f32 = 100.0; // camera moves this much closer at full scroll
pub const SCROLL_SCALE_GAIN: f32 = 3.0;
pub const BASE_POINT_SIZE: f32 = 4.0;
pub const SCROLL_POINT_SIZE_GAIN: f32 = 8.0;

// Mean particle size; a particle of this size renders at the material point size
pub const SIZE_REFERENCE: f32 = SIZE_MIN + SIZE_SPAN * 0.5;

// Device pixel ratio caps
pub const PIXEL_RATIO_CAP_NARROW: f64 = 1.5;
pub const PIXEL_RATIO_CAP_WIDE: f64 = 2.0;

// Cursor trail
pub const TRAIL_EASING: f32 = 0.1; // fraction of the remaining gap closed per frame
pub const TRAIL_HALF_EXTENT_PX: f32 = 10.0;
pub const TRAIL_TOUCH_IDLE_SECS: f32 = 3.0;

// Frame rate monitor
pub const FPS_SAMPLE_SECS: f32 = 1.0;
pub const FPS_WARN_BELOW: f32 = 50.0;

// Persistence
pub const THEME_STORAGE_KEY: &str = "theme";

// Content reveals: fraction of the viewport height the trigger's top must
// reach before the element plays in
pub const REVEAL_START_SECTION: f64 = 0.80;
pub const REVEAL_START_ITEM: f64 = 0.85;
pub const HERO_FIRST_DELAY_SECS: f64 = 0.3;
pub const HERO_LINE_STAGGER_SECS: f64 = 0.2;
