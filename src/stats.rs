//! Order statistics over image samples.
//!
//! Computed in f64 over a sorted copy of the samples. Quantiles interpolate
//! linearly between neighbouring order statistics; the median of an even
//! count is the mean of the two middle values.

/// Sorted copy of `values` with NaNs dropped.
pub fn sorted_samples(values: &[f32]) -> Vec<f64> {
    let mut out: Vec<f64> = values
        .iter()
        .filter(|v| !v.is_nan())
        .map(|&v| v as f64)
        .collect();
    out.sort_by(|a, b| a.total_cmp(b));
    out
}

/// Quantile `q ∈ [0, 1]` of already sorted samples, `None` when empty.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Median of already sorted samples, `None` when empty.
pub fn median_sorted(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    match n {
        0 => None,
        _ if n % 2 == 1 => Some(sorted[n / 2]),
        _ => Some(0.5 * (sorted[n / 2 - 1] + sorted[n / 2])),
    }
}

/// Population standard deviation (divides by `n`), `None` when empty.
pub fn std_dev<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
    I::IntoIter: Clone,
{
    let iter = values.into_iter();
    let (n, sum) = iter.clone().fold((0usize, 0.0f64), |(n, s), v| (n + 1, s + v));
    if n == 0 {
        return None;
    }
    let mean = sum / n as f64;
    let var = iter.map(|v| (v - mean) * (v - mean)).sum::<f64>() / n as f64;
    Some(var.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantile_interpolates_linearly() {
        let s = sorted_samples(&[4.0, 1.0, 3.0, 2.0, 5.0]);
        assert_eq!(quantile_sorted(&s, 0.0), Some(1.0));
        assert_eq!(quantile_sorted(&s, 1.0), Some(5.0));
        let q = quantile_sorted(&s, 0.9).unwrap();
        assert!((q - 4.6).abs() < 1e-12);
        assert_eq!(quantile_sorted(&[], 0.5), None);
    }

    #[test]
    fn median_handles_even_and_odd_counts() {
        assert_eq!(median_sorted(&[1.0, 2.0, 9.0]), Some(2.0));
        assert_eq!(median_sorted(&[1.0, 2.0, 4.0, 9.0]), Some(3.0));
        assert_eq!(median_sorted(&[]), None);
    }

    #[test]
    fn std_dev_is_population_form() {
        let sd = std_dev(vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((sd - 2.0).abs() < 1e-12);
        assert_eq!(std_dev(Vec::<f64>::new()), None);
    }
}
