// ============================================================================
// Monetary amount checks shared by every entity
// ============================================================================

/// Whether `value` is a usable non-negative amount (rejects NaN and infinities)
pub fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Whether `value` is a usable strictly positive amount
pub fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
