pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod field;
pub mod frame;
pub mod gpu;
pub mod monitor;
pub mod reveal;
pub mod scroll;
pub mod sections;
pub mod stage;
pub mod theme;
pub mod trail;

pub static STARFIELD_WGSL: &str = include_str!("../shaders/starfield.wgsl");

pub use camera::*;
pub use config::*;
pub use constants::*;
pub use error::{Result, StarfieldError};
pub use field::*;
pub use frame::*;
pub use monitor::*;
pub use reveal::*;
pub use scroll::*;
pub use sections::*;
pub use stage::*;
pub use theme::*;
pub use trail::*;
