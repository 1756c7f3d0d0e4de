/// Percentage of `part` in `total`. Returns 0.0 when `total` is zero.
pub fn pct(part: f64, total: f64) -> f64 {
    if total == 0.0 {
        0.0
    } else {
        part * 100.0 / total
    }
}

/// Orders rows by `key` descending. Ties keep their incoming order.
pub fn sort_desc_by<T>(rows: &mut [T], key: impl Fn(&T) -> f64) {
    rows.sort_by(|a, b| key(b).total_cmp(&key(a)));
}
