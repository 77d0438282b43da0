use super::*;
use crate::color::hsv::rgb_to_hsv;
use crate::stages::blend::BlendMode;

fn solid(width: u32, height: u32, px: Rgba) -> ImageRgba32F {
    ImageRgba32F::new(width, height, px).unwrap()
}

fn ramp_mask(width: u32, height: u32) -> ImageRgba32F {
    let n = (width * height - 1).max(1) as f32;
    ImageRgba32F::from_fn(width, height, |x, y| {
        let a = (y * width + x) as f32 / n;
        Rgba::new(a, 1.0 - a, 0.5, a)
    })
    .unwrap()
}

#[test]
fn reference_pixel_is_opaque_red() {
    let base = solid(1, 1, Rgba::new(1.0, 0.0, 0.0, 1.0));
    let mask = solid(1, 1, Rgba::new(0.0, 0.0, 0.0, 0.8));
    let out = composite(&base, &mask, &CompositeParams::default(), Preset::Optimized).unwrap();
    assert_eq!(out.texels(), &[Rgba::new(1.0, 0.0, 0.0, 1.0)]);
}

#[test]
fn reference_pixel_matches_across_presets() {
    let base = solid(3, 3, Rgba::new(1.0, 0.0, 0.0, 1.0));
    let mask = solid(3, 3, Rgba::new(0.0, 0.0, 0.0, 0.8));
    for preset in Preset::ALL {
        let out = composite(&base, &mask, &CompositeParams::default(), preset).unwrap();
        for t in out.texels() {
            assert!((t.r - 1.0).abs() < 1e-6 && t.g == 0.0 && t.b == 0.0);
            assert!((t.a - 1.0).abs() < 1e-6);
        }
    }
}

#[test]
fn mismatched_dimensions_are_invalid_input() {
    let base = solid(2, 2, Rgba::TRANSPARENT);
    let mask = solid(2, 3, Rgba::TRANSPARENT);
    let err = composite(&base, &mask, &CompositeParams::default(), Preset::Fast).unwrap_err();
    assert!(matches!(err, MaskblendError::InvalidInput(_)));
}

#[test]
fn non_finite_params_are_rejected() {
    let img = solid(1, 1, Rgba::TRANSPARENT);
    let params = CompositeParams {
        threshold: f32::INFINITY,
        ..CompositeParams::default()
    };
    let err = composite(&img, &img, &params, Preset::Quality).unwrap_err();
    assert!(matches!(err, MaskblendError::Validation(_)));
}

#[test]
fn fast_preset_ignores_contrast_brightness_and_spill() {
    let params = CompositeParams {
        contrast: 5.0,
        brightness: 0.4,
        edge_smoothing: 0.4,
        spill_suppression: 1.0,
        ..CompositeParams::default()
    };
    let green = Rgba::new(0.1, 0.9, 0.1, 1.0);
    let fast = composite_texel(green, 0.6, Rgb::default(), &params, Preset::Fast);
    assert_eq!(fast, Rgba::new(0.1, 0.9, 0.1, 1.0));

    let just_below = composite_texel(green, 0.47, Rgb::default(), &params, Preset::Fast);
    assert_eq!(just_below.a, 0.0);
}

#[test]
fn spill_runs_only_when_strength_positive() {
    let green = Rgba::new(0.2, 0.9, 0.2, 1.0);
    let defaults = CompositeParams::default();
    let off = composite_texel(green, 1.0, Rgb::default(), &defaults, Preset::Optimized);
    assert_eq!(off.rgb(), green.rgb());

    let params = CompositeParams {
        spill_suppression: 1.0,
        ..CompositeParams::default()
    };
    let on = composite_texel(green, 1.0, Rgb::default(), &params, Preset::Optimized);
    assert!(rgb_to_hsv(on.rgb()).s < 1e-5);
}

#[test]
fn overlay_source_mask_blends_mask_color() {
    let params = CompositeParams {
        blend_mode: BlendMode::Multiply,
        overlay_source: OverlaySource::Mask,
        ..CompositeParams::default()
    };
    let out = composite_texel(
        Rgba::new(0.5, 0.5, 0.5, 1.0),
        1.0,
        Rgb::new(0.2, 0.4, 1.0),
        &params,
        Preset::Optimized,
    );
    assert!((out.r - 0.1).abs() < 1e-6);
    assert!((out.g - 0.2).abs() < 1e-6);
    assert!((out.b - 0.5).abs() < 1e-6);
    assert_eq!(out.a, 1.0);
}

#[test]
fn quality_preset_softens_hard_mask_edges() {
    let base = solid(3, 1, Rgba::new(1.0, 1.0, 1.0, 1.0));
    let mask = ImageRgba32F::from_texels(
        3,
        1,
        vec![
            Rgba::new(0.0, 0.0, 0.0, 0.0),
            Rgba::new(0.0, 0.0, 0.0, 1.0),
            Rgba::new(0.0, 0.0, 0.0, 1.0),
        ],
    )
    .unwrap();
    let params = CompositeParams {
        edge_smoothing: 0.5,
        ..CompositeParams::default()
    };
    let optimized = composite(&base, &mask, &params, Preset::Optimized).unwrap();
    let quality = composite(&base, &mask, &params, Preset::Quality).unwrap();
    assert_eq!(optimized.texels()[0].a, 0.0);
    assert!(quality.texels()[0].a > 0.0);
    assert!(quality.texels()[1].a < optimized.texels()[1].a);
}

#[test]
fn parallel_output_is_identical_to_sequential() {
    let base = ImageRgba32F::from_fn(17, 9, |x, y| {
        Rgba::new(x as f32 / 16.0, y as f32 / 8.0, 0.3, 1.0)
    })
    .unwrap();
    let mask = ramp_mask(17, 9);
    let params = CompositeParams {
        blend_mode: BlendMode::Overlay,
        spill_suppression: 0.6,
        ..CompositeParams::default()
    };
    for preset in Preset::ALL {
        let seq = composite(&base, &mask, &params, preset).unwrap();
        let par = composite_with(&base, &mask, &params, preset, &Threading::parallel(Some(3)))
            .unwrap();
        assert_eq!(seq, par);
    }
}

#[test]
fn zero_threads_is_rejected() {
    let img = solid(1, 1, Rgba::TRANSPARENT);
    let err = composite_with(
        &img,
        &img,
        &CompositeParams::default(),
        Preset::Fast,
        &Threading::parallel(Some(0)),
    )
    .unwrap_err();
    assert!(matches!(err, MaskblendError::Validation(_)));
}

#[test]
fn output_is_premultiplied() {
    let base = ImageRgba32F::from_fn(8, 8, |x, y| {
        Rgba::new(x as f32 / 7.0, 1.0 - y as f32 / 7.0, 0.9, 1.0)
    })
    .unwrap();
    let mask = ramp_mask(8, 8);
    for mode in BlendMode::ALL {
        let params = CompositeParams {
            blend_mode: mode,
            ..CompositeParams::default()
        };
        let out = composite(&base, &mask, &params, Preset::Quality).unwrap();
        for t in out.texels() {
            assert!(t.r <= t.a + 1e-6 && t.g <= t.a + 1e-6 && t.b <= t.a + 1e-6);
        }
    }
}

fn assert_premultiplied(t: Rgba) {
    for c in [t.r, t.g, t.b, t.a] {
        assert!(c.is_finite() && (-1e-6..=1.0 + 1e-6).contains(&c), "{t:?}");
    }
    assert!(t.r <= t.a + 1e-6 && t.g <= t.a + 1e-6 && t.b <= t.a + 1e-6, "{t:?}");
}

#[test]
fn out_of_range_base_stays_premultiplied() {
    let mask_rgb = Rgb::new(0.0, 0.0, 0.0);
    for base in [
        Rgba::new(2.0, 0.5, 0.5, 1.0),
        Rgba::new(-1.0, 0.5, 3.0, 1.0),
    ] {
        for mode in BlendMode::ALL {
            let params = CompositeParams {
                blend_mode: mode,
                ..CompositeParams::default()
            };
            for preset in Preset::ALL {
                let out = composite_texel(base, 0.55, mask_rgb, &params, preset);
                assert_premultiplied(out);
            }
        }
    }
}

#[test]
fn hdr_mask_rgb_stays_premultiplied() {
    let params = CompositeParams {
        overlay_source: OverlaySource::Mask,
        blend_mode: BlendMode::Screen,
        ..CompositeParams::default()
    };
    let base = Rgba::new(0.2, 0.4, 0.6, 1.0);
    let out = composite_texel(base, 0.55, Rgb::new(4.0, -2.0, 1.5), &params, Preset::Optimized);
    assert_premultiplied(out);
}

#[test]
fn nan_inputs_produce_finite_output() {
    let params = CompositeParams::default();
    let nan_base = Rgba::new(f32::NAN, 0.2, 0.2, 1.0);
    let out = composite_texel(nan_base, 1.0, Rgb::GREEN, &params, Preset::Optimized);
    assert_premultiplied(out);
    assert_eq!(out.a, 1.0);
    assert_eq!(out.r, 0.0);

    let out = composite_texel(
        Rgba::new(0.5, 0.5, 0.5, 1.0),
        f32::NAN,
        Rgb::GREEN,
        &params,
        Preset::Fast,
    );
    assert_premultiplied(out);
    assert_eq!(out.a, 0.0);

    let base = solid(3, 1, Rgba::new(0.5, 0.5, 0.5, 1.0));
    let mask = ImageRgba32F::from_texels(
        3,
        1,
        vec![Rgba::new(0.0, 0.0, 0.0, f32::NAN); 3],
    )
    .unwrap();
    let out = composite(&base, &mask, &params, Preset::Quality).unwrap();
    for t in out.texels() {
        assert_premultiplied(*t);
    }
}
