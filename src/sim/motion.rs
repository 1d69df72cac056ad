//! Constant-velocity vertical fall
//!
//! Position is a pure function of un-paused elapsed time, so freezing an
//! entity is just a matter of not counting the frozen interval.

/// Fraction of the fall completed, in [0, 1]
#[inline]
pub fn fall_progress(elapsed_ms: u64, fall_duration_ms: u64) -> f32 {
    if fall_duration_ms == 0 {
        return 1.0;
    }
    (elapsed_ms as f32 / fall_duration_ms as f32).min(1.0)
}

/// `y(t) = field_height * min(1, t / duration)`
#[inline]
pub fn y_at(elapsed_ms: u64, fall_duration_ms: u64, field_height: f32) -> f32 {
    field_height * fall_progress(elapsed_ms, fall_duration_ms)
}

/// True once the entity has reached the bottom of the field
#[inline]
pub fn has_landed(elapsed_ms: u64, fall_duration_ms: u64) -> bool {
    elapsed_ms >= fall_duration_ms
}
