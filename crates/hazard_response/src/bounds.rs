//! Clamping helpers for out-of-domain numeric inputs.
//!
//! Every engine input passes through one of these before it is used, so a
//! negative count or an intensity of 1.4 shows up as 0 or 1.0 in the outcome.

/// Clamp to `[0, 1]`. NaN maps to 0.
#[inline]
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Clamp to `[0, inf)`. NaN maps to 0.
#[inline]
pub fn clamp_non_negative(value: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else {
        value
    }
}

/// Map a `[0, 1]` score onto `[floor, 1]`.
#[inline]
pub fn lift(score: f64, floor: f64) -> f64 {
    floor + (1.0 - floor) * clamp_unit(score)
}

/// Share-weighted mean of `(share, factor)` pairs.
///
/// Shares are clamped non-negative and need not sum to one. An all-zero mix
/// is neutral and returns 1.0.
pub fn weighted_factor(pairs: &[(f64, f64)]) -> f64 {
    let mut total_share = 0.0;
    let mut total = 0.0;
    for &(share, factor) in pairs {
        let share = clamp_non_negative(share);
        total_share += share;
        total += share * factor;
    }
    if total_share <= 0.0 {
        1.0
    } else {
        total / total_share
    }
}
