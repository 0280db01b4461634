/// Clamp a progress value into `[0, 1]`.
///
/// Every non-finite value maps to `1` (fully revealed).
pub(crate) fn sanitize_progress(p: f64) -> f64 {
    if !p.is_finite() {
        return 1.0;
    }
    p.clamp(0.0, 1.0)
}

/// Exponential smoothing factor for a step of `dt_ms` with the given half-life.
pub(crate) fn half_life_alpha(dt_ms: f64, half_life_ms: f64) -> f64 {
    if half_life_ms <= 0.0 || !half_life_ms.is_finite() {
        return 1.0;
    }
    if dt_ms <= 0.0 {
        return 0.0;
    }
    1.0 - 0.5f64.powf(dt_ms / half_life_ms)
}

pub(crate) fn is_finite_non_negative(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}
