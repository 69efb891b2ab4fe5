/// `num / den` rounded half-up (away from zero) to 2 decimals, computed on
/// integers so `x.xx5` boundaries land exactly. `None` when `den == 0`.
pub fn round_ratio(num: i64, den: i64) -> Option<f64> {
    if den == 0 {
        return None;
    }
    let negative = (num < 0) != (den < 0);
    let (num, den) = (num.unsigned_abs() as u128, den.unsigned_abs() as u128);
    let hundredths = (num * 200 + den) / (den * 2);
    let value = hundredths as f64 / 100.0;
    Some(if negative && hundredths != 0 { -value } else { value })
}

/// Continuous median: linear interpolation between the order statistics
/// around rank `0.5 * (n - 1)`.
pub fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let pos = 0.5 * (values.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    Some(values[lo] + (values[hi] - values[lo]) * (pos - lo as f64))
}
