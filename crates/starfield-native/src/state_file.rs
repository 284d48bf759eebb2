use starfield_core::{StarfieldError, ThemeStore};
use std::fs;
use std::path::{Path, PathBuf};

/// One small text file per key under a state directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `$STARFIELD_STATE_DIR`, else the platform config dir (`~/.config`,
    /// `%APPDATA%`, `~/Library/Application Support`) joined with `starfield`.
    pub fn from_env() -> Self {
        let dir = state_dir(
            std::env::var_os("STARFIELD_STATE_DIR").map(PathBuf::from),
            dirs::config_dir(),
        );
        Self::new(dir)
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// An explicit state dir wins; otherwise `<config dir>/starfield`, and the
/// working directory only when the platform reports no config dir at all.
fn state_dir(explicit: Option<PathBuf>, config_dir: Option<PathBuf>) -> PathBuf {
    explicit
        .filter(|d| !d.as_os_str().is_empty())
        .or_else(|| config_dir.map(|d| d.join("starfield")))
        .unwrap_or_else(|| {
            log::warn!("[theme] no config directory; saving theme in the working directory");
            PathBuf::from(".")
        })
}

impl ThemeStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path(key))
            .ok()
            .map(|s| s.trim().to_string())
    }

    fn set(&mut self, key: &str, value: &str) -> starfield_core::Result<()> {
        fs::create_dir_all(&self.dir)
            .and_then(|_| fs::write(self.path(key), value))
            .map_err(|e| StarfieldError::Store(format!("{}: {}", self.path(key).display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starfield_core::{Camera, Stage, Theme, ThemeController};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("starfield-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn explicit_state_dir_takes_precedence() {
        let dir = state_dir(
            Some(PathBuf::from("/srv/starfield-state")),
            Some(PathBuf::from("/home/ada/.config")),
        );
        assert_eq!(dir, PathBuf::from("/srv/starfield-state"));
    }

    #[test]
    fn falls_back_to_platform_config_dir() {
        let config = PathBuf::from("/home/ada/.config");
        assert_eq!(state_dir(None, Some(config.clone())), config.join("starfield"));
        // an empty override is treated as unset
        assert_eq!(
            state_dir(Some(PathBuf::new()), Some(config.clone())),
            config.join("starfield")
        );
    }

    #[test]
    fn from_env_uses_a_real_config_dir() {
        // STARFIELD_STATE_DIR is not set under test; the platform config dir
        // resolves on Linux, macOS and Windows alike
        if std::env::var_os("STARFIELD_STATE_DIR").is_some() {
            return;
        }
        if let Some(config) = dirs::config_dir() {
            let store = FileStore::from_env();
            assert_eq!(store.dir(), config.join("starfield").as_path());
            assert_ne!(store.dir(), Path::new("."));
        }
    }

    #[test]
    fn missing_file_reads_as_absent() {
        let store = FileStore::new(scratch_dir("absent"));
        assert_eq!(store.get("theme"), None);
    }

    #[test]
    fn value_survives_a_new_store() {
        let dir = scratch_dir("persist");
        let mut store = FileStore::new(&dir);
        store.set("theme", "dark").unwrap();

        let reopened = FileStore::new(&dir);
        assert_eq!(reopened.get("theme").as_deref(), Some("dark"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn toggle_is_persisted_to_disk() {
        let dir = scratch_dir("toggle");
        let mut stage = Stage::new(Camera::new(1.0));
        let mut ctl = ThemeController::new(FileStore::new(&dir), false);
        assert_eq!(ctl.initialize(&mut stage), Theme::Light);
        assert_eq!(ctl.toggle(&mut stage), Theme::Dark);

        let ctl = ThemeController::new(FileStore::new(&dir), false);
        assert_eq!(ctl.resolve_initial(), Theme::Dark);
        let _ = fs::remove_dir_all(&dir);
    }
}
