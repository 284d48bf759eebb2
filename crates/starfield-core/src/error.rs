use thiserror::Error;

/// Errors surfaced by the starfield core.
///
/// None of these are fatal to a page: callers log them and fall back to
/// defaults (light theme, default config, in-memory preference).
#[derive(Debug, Error)]
pub enum StarfieldError {
    #[error("unknown theme `{0}`")]
    UnknownTheme(String),
    #[error("invalid value `{value}` for `{key}`: {reason}")]
    InvalidConfig {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("theme store unavailable: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, StarfieldError>;
