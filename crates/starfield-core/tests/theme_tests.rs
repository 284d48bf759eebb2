// Host-side tests for theme resolution, persistence and deferred application.

use starfield_core::*;

struct FailingStore;

impl ThemeStore for FailingStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }
    fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
        Err(StarfieldError::Store("quota exceeded".into()))
    }
}

fn ready_stage() -> Stage {
    let mut stage = Stage::new(Camera::default());
    stage.install_field(ParticleField::create(50, 1));
    stage
}

#[test]
fn os_dark_preference_is_used_and_persisted_when_unset() {
    let mut stage = ready_stage();
    let mut ctl = ThemeController::new(MemoryStore::default(), true);
    assert_eq!(ctl.initialize(&mut stage), Theme::Dark);
    assert_eq!(ctl.current(), Theme::Dark);
    assert_eq!(ctl.store().get(THEME_STORAGE_KEY).as_deref(), Some("dark"));
    assert_eq!(stage.field().map(|f| f.theme()), Some(Theme::Dark));
}

#[test]
fn falls_back_to_light_without_preference() {
    let mut stage = ready_stage();
    let mut ctl = ThemeController::new(MemoryStore::default(), false);
    assert_eq!(ctl.initialize(&mut stage), Theme::Light);
    assert_eq!(ctl.store().get(THEME_STORAGE_KEY).as_deref(), Some("light"));
}

#[test]
fn stored_choice_beats_os_preference() {
    let mut stage = ready_stage();
    let store = MemoryStore::with_value(THEME_STORAGE_KEY, "light");
    let mut ctl = ThemeController::new(store, true);
    assert_eq!(ctl.initialize(&mut stage), Theme::Light);

    let store = MemoryStore::with_value(THEME_STORAGE_KEY, "dark");
    let mut ctl = ThemeController::new(store, false);
    assert_eq!(ctl.initialize(&mut stage), Theme::Dark);
}

#[test]
fn unrecognized_stored_value_means_light() {
    let store = MemoryStore::with_value(THEME_STORAGE_KEY, "solarized");
    let ctl = ThemeController::new(store, true);
    assert_eq!(ctl.resolve_initial(), Theme::Light);
}

#[test]
fn empty_stored_value_counts_as_unset() {
    let store = MemoryStore::with_value(THEME_STORAGE_KEY, "");
    let ctl = ThemeController::new(store, true);
    assert_eq!(ctl.resolve_initial(), Theme::Dark);
}

#[test]
fn toggle_flips_persists_and_recolors() {
    let mut stage = ready_stage();
    let mut ctl = ThemeController::new(MemoryStore::default(), false);
    ctl.initialize(&mut stage);
    assert_eq!(ctl.toggle(&mut stage), Theme::Dark);
    assert_eq!(ctl.store().get(THEME_STORAGE_KEY).as_deref(), Some("dark"));
    assert_eq!(stage.field().map(|f| f.material_opacity()), Some(MATERIAL_OPACITY_DARK));
    assert_eq!(ctl.toggle(&mut stage), Theme::Light);
    assert_eq!(ctl.store().get(THEME_STORAGE_KEY).as_deref(), Some("light"));
    assert_eq!(stage.field().map(|f| f.material_opacity()), Some(MATERIAL_OPACITY_LIGHT));
}

#[test]
fn theme_before_field_is_applied_when_field_arrives() {
    let mut stage = Stage::new(Camera::default());
    let mut ctl = ThemeController::new(MemoryStore::default(), true);
    ctl.initialize(&mut stage);
    assert!(!stage.is_ready());
    assert_eq!(stage.theme(), Some(Theme::Dark));

    stage.install_field(ParticleField::create(50, 3));
    let field = stage.field().expect("installed");
    assert_eq!(field.theme(), Theme::Dark);
    assert_eq!(field.material_opacity(), MATERIAL_OPACITY_DARK);
}

#[test]
fn store_failure_does_not_block_the_transition() {
    let mut stage = ready_stage();
    let mut ctl = ThemeController::new(FailingStore, true);
    assert_eq!(ctl.initialize(&mut stage), Theme::Dark);
    assert_eq!(ctl.toggle(&mut stage), Theme::Light);
    assert_eq!(stage.field().map(|f| f.theme()), Some(Theme::Light));
}

#[test]
fn theme_strings_round_trip() {
    assert_eq!("dark".parse::<Theme>().ok(), Some(Theme::Dark));
    assert_eq!(" light ".parse::<Theme>().ok(), Some(Theme::Light));
    assert!(matches!(
        "sepia".parse::<Theme>(),
        Err(StarfieldError::UnknownTheme(s)) if s == "sepia"
    ));
    assert_eq!(Theme::Dark.to_string(), "dark");
    assert_eq!(Theme::Light.toggled(), Theme::Dark);
}
