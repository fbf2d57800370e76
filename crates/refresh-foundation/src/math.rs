/// Returns `x` clamped to `[min, max]`.
///
/// Unlike [`f32::clamp`] this never panics: when `min > max` the upper bound
/// is checked first, so the result is `max`.
pub fn clamp(x: f32, min: f32, max: f32) -> f32 {
    if x > max {
        return max;
    }
    if x < min {
        return min;
    }
    x
}
