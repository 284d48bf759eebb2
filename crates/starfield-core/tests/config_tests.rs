// Host-side tests for config defaults and key/value overrides.

use starfield_core::*;
use std::collections::HashMap;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn empty_lookup_yields_defaults() {
    let cfg = StarfieldConfig::from_lookup(|_| None).expect("defaults parse");
    assert_eq!(cfg, StarfieldConfig::default());
    assert_eq!(cfg.particles_wide, 12_000);
    assert_eq!(cfg.particles_narrow, 6_000);
    assert_eq!(cfg.recolor, RecolorPolicy::Canonical);
    assert_eq!(cfg.rotation, RotationClock::PerFrame);
    assert!(!cfg.monitor_fps);
}

#[test]
fn overrides_are_applied() {
    let cfg = StarfieldConfig::from_lookup(lookup_from(&[
        ("particles", "8000"),
        ("particles-narrow", " 2500 "),
        ("breakpoint", "900"),
        ("recolor", "Reclassify"),
        ("rotation", "elapsed"),
        ("seed", "1234"),
        ("monitor-fps", "on"),
    ]))
    .expect("valid overrides");
    assert_eq!(cfg.particles_wide, 8000);
    assert_eq!(cfg.particles_narrow, 2500);
    assert_eq!(cfg.narrow_breakpoint_px, 900.0);
    assert_eq!(cfg.recolor, RecolorPolicy::Reclassify);
    assert_eq!(cfg.rotation, RotationClock::Elapsed);
    assert_eq!(cfg.seed, Some(1234));
    assert!(cfg.monitor_fps);
    assert_eq!(cfg.particle_count(cfg.device_class(850.0)), 2500);
}

#[test]
fn malformed_values_are_rejected_with_their_key() {
    for (key, value) in [
        ("particles", "lots"),
        ("particles", "0"),
        ("breakpoint", "-1"),
        ("recolor", "rainbow"),
        ("rotation", "sometimes"),
        ("seed", "-4"),
        ("monitor-fps", "maybe"),
    ] {
        match StarfieldConfig::from_lookup(lookup_from(&[(key, value)])) {
            Err(StarfieldError::InvalidConfig { key: k, value: v, .. }) => {
                assert_eq!(k, key);
                assert_eq!(v, value);
            }
            other => panic!("{key}={value} should be rejected, got {other:?}"),
        }
    }
}

#[test]
fn pixel_ratio_is_capped_per_device_class() {
    assert_eq!(DeviceClass::Narrow.pixel_ratio(3.0), 1.5);
    assert_eq!(DeviceClass::Wide.pixel_ratio(3.0), 2.0);
    assert_eq!(DeviceClass::Wide.pixel_ratio(1.25), 1.25);
    assert_eq!(DeviceClass::Narrow.pixel_ratio(0.5), 1.0);
}

#[test]
fn backing_size_follows_the_current_device_pixel_ratio() {
    let wide = DeviceClass::Wide;
    assert_eq!(wide.backing_size(800.0, 600.0, 1.0), (800, 600));
    // zooming in or moving to a denser monitor raises the ratio
    assert_eq!(wide.backing_size(800.0, 600.0, 1.5), (1200, 900));
    assert_eq!(wide.backing_size(800.0, 600.0, 3.0), (1600, 1200));
    assert_eq!(DeviceClass::Narrow.backing_size(400.0, 700.0, 3.0), (600, 1050));
    assert_eq!(wide.backing_size(0.0, -5.0, 2.0), (1, 1));
}

#[test]
fn lenient_lookup_drops_only_the_malformed_key() {
    let (cfg, rejected) = StarfieldConfig::from_lookup_lenient(lookup_from(&[
        ("particles", "lots"),
        ("particles-narrow", "2500"),
        ("rotation", "elapsed"),
        ("seed", "99"),
    ]));
    assert_eq!(cfg.particles_wide, PARTICLES_WIDE);
    assert_eq!(cfg.particles_narrow, 2500);
    assert_eq!(cfg.rotation, RotationClock::Elapsed);
    assert_eq!(cfg.seed, Some(99));
    assert_eq!(rejected.len(), 1);
    assert!(matches!(
        &rejected[0],
        StarfieldError::InvalidConfig { key: "particles", .. }
    ));
}

#[test]
fn lenient_lookup_without_errors_matches_strict_lookup() {
    let pairs = [("breakpoint", "900"), ("monitor-fps", "yes")];
    let strict = StarfieldConfig::from_lookup(lookup_from(&pairs)).expect("valid");
    let (lenient, rejected) = StarfieldConfig::from_lookup_lenient(lookup_from(&pairs));
    assert!(rejected.is_empty());
    assert_eq!(strict, lenient);
}

#[test]
fn apply_leaves_config_unchanged_on_error() {
    let mut cfg = StarfieldConfig::default();
    assert!(cfg.apply("recolor", "rainbow").is_err());
    assert!(cfg.apply("volume", "11").is_err());
    assert_eq!(cfg, StarfieldConfig::default());
}
