// Host-side tests for the particle field.

use glam::Vec3;
use starfield_core::*;
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);

#[test]
fn all_attribute_arrays_share_the_particle_count() {
    for &n in &[0usize, 1, 100, 6000] {
        let f = ParticleField::create(n, 7);
        assert_eq!(f.len(), n);
        assert_eq!(f.positions().len(), n);
        assert_eq!(f.colors().len(), n);
        assert_eq!(f.sizes().len(), n);
        assert_eq!(f.opacities().len(), n);
        assert_eq!(f.velocities().len(), n);
    }
}

#[test]
fn device_class_picks_particle_budget() {
    let cfg = StarfieldConfig::default();
    let narrow = ParticleField::for_device(cfg.device_class(375.0), &cfg, 1);
    let wide = ParticleField::for_device(cfg.device_class(1440.0), &cfg, 1);
    assert_eq!(narrow.len(), 6000);
    assert_eq!(wide.len(), 12000);
    // the breakpoint itself still counts as narrow
    assert!(cfg.device_class(768.0).is_narrow());
}

#[test]
fn positions_lie_in_the_spherical_shell() {
    let f = ParticleField::create(5000, 42);
    for p in f.positions() {
        let r = p.length();
        assert!(r >= 500.0 - 0.01 && r <= 2500.0 + 0.01, "radius {r} outside shell");
    }
}

#[test]
fn initial_attributes_stay_in_their_ranges() {
    let f = ParticleField::create(5000, 3);
    for c in f.colors() {
        assert!(PALETTE.contains(c), "color {c:?} not from palette");
    }
    for &s in f.sizes() {
        assert!((1.5..=5.5).contains(&s));
    }
    for &o in f.opacities() {
        assert!((0.2..=1.0).contains(&o));
    }
    for &v in f.velocities() {
        assert!((-0.25..=0.25).contains(&v));
    }
}

#[test]
fn same_seed_builds_the_same_field() {
    let a = ParticleField::create(200, 99);
    let b = ParticleField::create(200, 99);
    assert_eq!(a.positions(), b.positions());
    assert_eq!(a.colors(), b.colors());
    let c = ParticleField::create(200, 100);
    assert_ne!(a.positions(), c.positions());
}

#[test]
fn advance_only_moves_z_and_never_leaves_bounds() {
    let mut f = ParticleField::create(500, 11);
    let before = f.positions().to_vec();
    let colors = f.colors().to_vec();
    for _ in 0..2000 {
        f.advance(FRAME);
        for p in f.positions() {
            assert!(p.z >= -1500.0 && p.z <= 1500.0, "z={} escaped", p.z);
        }
    }
    for (a, b) in before.iter().zip(f.positions()) {
        assert_eq!(a.x, b.x);
        assert_eq!(a.y, b.y);
    }
    assert_eq!(colors, f.colors());
}

#[test]
fn advance_wraps_from_far_side_to_near_side() {
    let mut f = ParticleField::create(2, 5);
    f.place(0, Vec3::new(0.0, 0.0, 1499.99), 1.0);
    f.place(1, Vec3::new(0.0, 0.0, -1499.99), -1.0);
    f.advance(FRAME);
    assert_eq!(f.positions()[0].z, -1500.0);
    assert_eq!(f.positions()[1].z, 1500.0);
}

#[test]
fn pinned_particle_wraps_then_keeps_oscillating_in_bounds() {
    let mut f = ParticleField::create(100, 2024);
    f.place(0, Vec3::new(10.0, 20.0, 1490.0), 0.3);
    let mut wrapped_at = None;
    let mut prev = f.positions()[0].z;
    for i in 0..15_000 {
        f.advance(FRAME);
        let z = f.positions()[0].z;
        assert!((-1500.0..=1500.0).contains(&z), "iteration {i}: z={z}");
        if z < prev && wrapped_at.is_none() {
            assert!(z <= -1499.0, "wrapped to {z}, expected near -1500");
            wrapped_at = Some(i);
        }
        prev = z;
    }
    let at = wrapped_at.expect("particle never wrapped");
    // (1500 - 1490) / 0.03 ≈ 334 frames
    assert!((330..340).contains(&at), "wrapped at {at}");
    for p in f.positions() {
        assert!((-1500.0..=1500.0).contains(&p.z));
    }
}

#[test]
fn per_frame_rotation_ignores_elapsed_time() {
    let mut f = ParticleField::create(10, 1);
    f.advance(Duration::from_millis(5));
    f.advance(Duration::from_millis(500));
    let [pitch, yaw] = f.rotation();
    assert!((pitch - 0.0004).abs() < 1e-7);
    assert!((yaw - 0.001).abs() < 1e-7);
}

#[test]
fn elapsed_rotation_scales_with_dt() {
    let mut f = ParticleField::create(10, 1).with_rotation_clock(RotationClock::Elapsed);
    f.advance(Duration::from_secs(1));
    let [pitch, yaw] = f.rotation();
    assert!((pitch - 0.0002 * 60.0).abs() < 1e-5);
    assert!((yaw - 0.0005 * 60.0).abs() < 1e-5);
}

#[test]
fn theme_sets_material_opacity() {
    let mut f = ParticleField::create(10, 1);
    assert_eq!(f.material_opacity(), 0.9);
    f.apply_theme(Theme::Dark);
    assert_eq!(f.material_opacity(), 0.25);
    f.apply_theme(Theme::Light);
    assert_eq!(f.material_opacity(), 0.9);
}

#[test]
fn dark_theme_dims_every_opacity() {
    let mut f = ParticleField::create(1000, 8);
    let before = f.opacities().to_vec();
    f.apply_theme(Theme::Dark);
    for (o, b) in f.opacities().iter().zip(&before) {
        let expected = (b * 0.3).max(0.05);
        assert!((o - expected).abs() < 1e-6);
    }
}

#[test]
fn canonical_policy_restores_exact_values_after_toggling() {
    let mut f = ParticleField::create(2000, 21);
    let colors = f.colors().to_vec();
    let opacities = f.opacities().to_vec();
    for _ in 0..5 {
        f.apply_theme(Theme::Dark);
        f.apply_theme(Theme::Light);
    }
    assert_eq!(f.colors(), colors.as_slice());
    assert_eq!(f.opacities(), opacities.as_slice());
}

#[test]
fn canonical_dark_theme_is_stable_across_repeats() {
    let mut f = ParticleField::create(500, 4);
    f.apply_theme(Theme::Dark);
    let once = f.colors().to_vec();
    let once_op = f.opacities().to_vec();
    f.apply_theme(Theme::Dark);
    assert_eq!(f.colors(), once.as_slice());
    assert_eq!(f.opacities(), once_op.as_slice());
}

#[test]
fn reclassify_round_trip_stays_in_bounds() {
    let mut f = ParticleField::create(3000, 77).with_recolor_policy(RecolorPolicy::Reclassify);
    for _ in 0..4 {
        f.apply_theme(Theme::Dark);
        f.apply_theme(Theme::Light);
        for &o in f.opacities() {
            assert!((0.2..=1.0).contains(&o), "opacity {o}");
        }
        for c in f.colors() {
            assert!(c.iter().all(|ch| (0.0..=1.0).contains(ch)), "color {c:?}");
        }
    }
}

#[test]
fn reclassify_round_trip_loses_original_values() {
    // The legacy policy re-randomizes on the way back to light, so the
    // creation-time per-particle values are not recovered.
    let mut f = ParticleField::create(3000, 77).with_recolor_policy(RecolorPolicy::Reclassify);
    let colors = f.colors().to_vec();
    let opacities = f.opacities().to_vec();
    f.apply_theme(Theme::Dark);
    f.apply_theme(Theme::Light);
    assert_ne!(f.opacities(), opacities.as_slice());
    assert_ne!(f.colors(), colors.as_slice());
    // the canonical copy is untouched either way
    assert_eq!(f.canonical_colors(), colors.as_slice());
}

#[test]
fn reclassify_dark_leaves_light_blue_untouched() {
    let mut f = ParticleField::create(3000, 12).with_recolor_policy(RecolorPolicy::Reclassify);
    let before = f.colors().to_vec();
    f.apply_theme(Theme::Dark);
    for (now, was) in f.colors().iter().zip(&before) {
        if *was == PALETTE[1] {
            assert_eq!(now, was);
        } else {
            assert_ne!(now, was);
        }
    }
}

#[test]
fn packed_instances_mirror_the_arrays() {
    let f = ParticleField::create(64, 9);
    let mut out = vec![StarInstance::default(); 3];
    f.pack_instances(&mut out);
    assert_eq!(out.len(), 64);
    for (i, inst) in out.iter().enumerate() {
        assert_eq!(inst.position, f.positions()[i].to_array());
        assert_eq!(inst.color, f.colors()[i]);
        assert_eq!(inst.size, f.sizes()[i]);
        assert_eq!(inst.opacity, f.opacities()[i]);
    }
}

#[test]
fn model_matrix_applies_scale() {
    let mut f = ParticleField::create(1, 1);
    f.set_scale(4.0);
    let p = f.model_matrix().transform_point3(Vec3::new(1.0, 0.0, 0.0));
    assert!((p.length() - 4.0).abs() < 1e-5);
}

#[test]
fn creation_time_values_survive_a_reclassify_round_trip() {
    let mut f = ParticleField::create(2000, 31).with_recolor_policy(RecolorPolicy::Reclassify);
    assert_eq!(f.recolor_policy(), RecolorPolicy::Reclassify);
    let canonical_colors = f.canonical_colors().to_vec();
    let canonical_opacities = f.canonical_opacities().to_vec();
    assert_eq!(f.opacities(), canonical_opacities.as_slice());

    f.apply_theme(Theme::Dark);
    f.apply_theme(Theme::Light);
    assert_eq!(f.canonical_colors(), canonical_colors.as_slice());
    assert_eq!(f.canonical_opacities(), canonical_opacities.as_slice());
}

#[test]
fn for_device_takes_recolor_policy_from_config() {
    let mut cfg = StarfieldConfig::default();
    let f = ParticleField::for_device(DeviceClass::Narrow, &cfg, 3);
    assert_eq!(f.recolor_policy(), RecolorPolicy::Canonical);
    cfg.recolor = RecolorPolicy::Reclassify;
    let f = ParticleField::for_device(DeviceClass::Narrow, &cfg, 3);
    assert_eq!(f.recolor_policy(), RecolorPolicy::Reclassify);
}
