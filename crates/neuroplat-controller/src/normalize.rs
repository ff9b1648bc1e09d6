/// Maps `value` from `[min, max]` onto `[-1, 1]`, saturating outside the range.
///
/// `NaN` is treated as `min`. A degenerate range (`min >= max`) maps everything
/// to `0`. The result is always finite and monotonic in `value`.
///
/// ```
/// use neuroplat_controller::normalize;
///
/// assert_eq!(normalize(50.0, 0.0, 100.0), 0.0);
/// assert_eq!(normalize(-7.0, 0.0, 100.0), -1.0);
/// assert_eq!(normalize(f32::INFINITY, 0.0, 100.0), 1.0);
/// ```
#[must_use]
pub fn normalize(value: f32, min: f32, max: f32) -> f32 {
    if min.partial_cmp(&max) != Some(std::cmp::Ordering::Less) {
        return 0.0;
    }
    if value.is_nan() {
        return -1.0;
    }
    let clamped = value.clamp(min, max);
    let unit = (clamped - min) / (max - min);
    (unit * 2.0 - 1.0).clamp(-1.0, 1.0)
}
