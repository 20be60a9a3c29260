//! Clamped, minimum-progress volume delta computation.

/// Apply a signed percentage step to `current`, clamped to `[min, max]`.
///
/// The step is `current * |percent| / 100` in integer arithmetic, raised to
/// at least 1 for any nonzero percent so the result always moves in the
/// requested direction unless it is already at a bound. Intermediate math is
/// 64-bit, so overflow-scale deltas still land inside the bounds.
///
/// Callers keep `min <= max`.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // clamped to a u32 bound
pub fn bounded_increment(current: u32, percent: i32, min: u32, max: u32) -> u32 {
    let mut step = u64::from(current) * u64::from(percent.unsigned_abs()) / 100;
    if step == 0 && percent != 0 {
        step = 1;
    }
    let next = if percent >= 0 {
        u64::from(current).saturating_add(step)
    } else {
        u64::from(current).saturating_sub(step)
    };
    next.clamp(u64::from(min), u64::from(max)) as u32
}
