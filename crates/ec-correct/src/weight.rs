//! Raw efficiency to fill weight.

/// Lower clamp of the raw efficiency; bounds the weight at `1e6`.
pub const MIN_EFFICIENCY: f64 = 1e-6;

/// Raw efficiency clamped into `[1e-6, 1]`. Negative and NaN inputs map to the
/// lower bound.
pub fn clamp_efficiency(raw: f64) -> f64 {
    if raw.is_nan() { MIN_EFFICIENCY } else { raw.clamp(MIN_EFFICIENCY, 1.0) }
}

/// Inverse-efficiency weight `1 / clamp(raw, 1e-6, 1)`, always in `[1, 1e6]`.
pub fn effective_weight(raw: f64) -> f64 {
    1.0 / clamp_efficiency(raw)
}
