use super::*;

#[test]
fn smoothstep_hits_edges_and_midpoint() {
    assert_eq!(smoothstep(0.4, 0.6, 0.4), 0.0);
    assert_eq!(smoothstep(0.4, 0.6, 0.6), 1.0);
    assert!((smoothstep(0.4, 0.6, 0.5) - 0.5).abs() < 1e-6);
    assert_eq!(smoothstep(0.4, 0.6, -3.0), 0.0);
    assert_eq!(smoothstep(0.4, 0.6, 7.0), 1.0);
}

#[test]
fn lerp_endpoints() {
    assert_eq!(lerp(0.25, 0.75, 0.0), 0.25);
    assert_eq!(lerp(0.25, 0.75, 1.0), 0.75);
    assert_eq!(lerp(1.0, 0.0, 0.5), 0.5);
}

#[test]
fn saturate_and_finite_or() {
    assert_eq!(saturate(-0.5), 0.0);
    assert_eq!(saturate(1.5), 1.0);
    assert_eq!(saturate(0.3), 0.3);
    assert_eq!(finite_or(f32::NAN, 2.0), 2.0);
    assert_eq!(finite_or(f32::INFINITY, 2.0), 2.0);
    assert_eq!(finite_or(0.7, 2.0), 0.7);
}

#[test]
fn saturate_maps_nan_to_zero() {
    assert_eq!(saturate(f32::NAN), 0.0);
    assert_eq!(saturate(f32::INFINITY), 1.0);
    assert_eq!(saturate(f32::NEG_INFINITY), 0.0);
}
