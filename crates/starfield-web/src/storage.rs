use starfield_core::{ColorSchemePreference, StarfieldError, ThemeStore};
use web_sys as web;

/// `window.localStorage`, when the browser lets us have it.
pub struct LocalStorage {
    storage: web::Storage,
}

impl LocalStorage {
    /// `None` when storage is disabled (private mode, sandboxed iframes).
    pub fn open() -> Option<Self> {
        let storage = web::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

impl ThemeStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> starfield_core::Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StarfieldError::Store(format!("{:?}", e)))
    }
}

/// Falls back to an in-memory map when local storage is unavailable.
pub enum PageStore {
    Local(LocalStorage),
    Memory(starfield_core::MemoryStore),
}

impl PageStore {
    pub fn open() -> Self {
        match LocalStorage::open() {
            Some(s) => PageStore::Local(s),
            None => {
                log::warn!("[theme] localStorage unavailable; preference will not persist");
                PageStore::Memory(Default::default())
            }
        }
    }
}

impl ThemeStore for PageStore {
    fn get(&self, key: &str) -> Option<String> {
        match self {
            PageStore::Local(s) => s.get(key),
            PageStore::Memory(s) => s.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> starfield_core::Result<()> {
        match self {
            PageStore::Local(s) => s.set(key, value),
            PageStore::Memory(s) => s.set(key, value),
        }
    }
}

/// `prefers-color-scheme: dark` media query.
pub struct MediaColorScheme;

impl ColorSchemePreference for MediaColorScheme {
    fn prefers_dark(&self) -> bool {
        web::window()
            .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
            .map(|mql| mql.matches())
            .unwrap_or(false)
    }
}
