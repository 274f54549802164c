//! Numeric helpers shared by the aggregators.

/// Arithmetic mean. Empty input yields 0.0.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Discrete median of an ascending-sorted slice: the middle element for odd
/// lengths, the mean of the two middle elements for even lengths. No
/// interpolation. Empty input yields 0.0.
pub fn median_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// R-7 percentile (the "inclusive" definition spreadsheets use) over an
/// ascending-sorted slice, for a whole-number percentile `p` in 0..=100.
///
/// On the 1-indexed sequence the rank is h = (p/100)(n-1) + 1; an integral
/// rank selects that element, otherwise the elements at floor(h) and ceil(h)
/// are interpolated linearly by the fractional part. The rank is carried as
/// an integer count of hundredths; ranks that land exactly on an element
/// must stay exact under the caller's integer truncation.
pub fn percentile_r7_sorted(sorted: &[u64], p: u32) -> f64 {
    debug_assert!(p <= 100);
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    // Zero-indexed rank, scaled by 100.
    let scaled = p as usize * (n - 1);
    let whole = scaled / 100;
    let rem = (scaled % 100) as f64;
    let lo = sorted[whole] as f64;
    if rem == 0.0 {
        return lo;
    }
    let hi = sorted[whole + 1] as f64;
    lo + ((hi - lo) * rem) / 100.0
}
