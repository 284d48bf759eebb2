//! Light/dark theme state and its persistence.

use crate::constants::THEME_STORAGE_KEY;
use crate::error::{Result, StarfieldError};
use crate::stage::Stage;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = StarfieldError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(StarfieldError::UnknownTheme(other.to_string())),
        }
    }
}

/// Client-local key/value persistence for the theme preference.
pub trait ThemeStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// OS-level "preferred color scheme" query.
pub trait ColorSchemePreference {
    fn prefers_dark(&self) -> bool;
}

impl ColorSchemePreference for bool {
    fn prefers_dark(&self) -> bool {
        *self
    }
}

/// Non-persistent store, used in tests and when no real storage exists.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut values = HashMap::new();
        values.insert(key.to_string(), value.to_string());
        Self { values }
    }
}

impl ThemeStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Tracks the current theme, persists changes and forwards every transition
/// to the stage's particle field.
pub struct ThemeController<S, P> {
    store: S,
    preference: P,
    current: Theme,
}

impl<S: ThemeStore, P: ColorSchemePreference> ThemeController<S, P> {
    pub fn new(store: S, preference: P) -> Self {
        Self {
            store,
            preference,
            current: Theme::Light,
        }
    }

    /// Stored choice, else OS preference, else light.
    ///
    /// A stored value other than `"dark"` counts as an explicit light choice.
    pub fn resolve_initial(&self) -> Theme {
        match self.store.get(THEME_STORAGE_KEY) {
            Some(saved) if !saved.is_empty() => match saved.parse::<Theme>() {
                Ok(theme) => theme,
                Err(e) => {
                    log::warn!("[theme] {}; falling back to light", e);
                    Theme::Light
                }
            },
            _ if self.preference.prefers_dark() => Theme::Dark,
            _ => Theme::Light,
        }
    }

    /// Resolves, persists and applies the initial theme.
    pub fn initialize(&mut self, stage: &mut Stage) -> Theme {
        let theme = self.resolve_initial();
        log::info!("[theme] initial theme: {}", theme);
        self.transition(theme, stage);
        theme
    }

    /// Flips the theme, persists it and applies it.
    pub fn toggle(&mut self, stage: &mut Stage) -> Theme {
        let theme = self.current.toggled();
        self.transition(theme, stage);
        theme
    }

    fn transition(&mut self, theme: Theme, stage: &mut Stage) {
        self.current = theme;
        if let Err(e) = self.store.set(THEME_STORAGE_KEY, theme.as_str()) {
            log::warn!("[theme] could not persist preference: {}", e);
        }
        stage.set_theme(theme);
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
