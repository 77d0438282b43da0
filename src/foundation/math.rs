/// Clamp to `[0, 1]`; NaN maps to 0.
pub(crate) fn saturate(x: f32) -> f32 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

/// Exact at both ends: `t = 0` gives `a`, `t = 1` gives `b`.
pub(crate) fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Cubic Hermite step between `e0` and `e1`. Callers guarantee `e0 < e1`.
pub(crate) fn smoothstep(e0: f32, e1: f32, x: f32) -> f32 {
    if x <= e0 {
        return 0.0;
    }
    if x >= e1 {
        return 1.0;
    }
    let t = (x - e0) / (e1 - e0);
    (t * t * (3.0 - 2.0 * t)).clamp(0.0, 1.0)
}

/// Returns `v` unless it is NaN or infinite, in which case `fallback`.
pub(crate) fn finite_or(v: f32, fallback: f32) -> f32 {
    if v.is_finite() { v } else { fallback }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
