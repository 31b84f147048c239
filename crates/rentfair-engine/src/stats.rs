//! Order statistics shared by the filter, aggregator and regressor.
//!
//! Two percentile flavours coexist: the outlier filter uses plain
//! rank indexing while the rate aggregator interpolates linearly. Results must
//! be bit-reproducible, so every sort uses `total_cmp`.

/// Sort a copy of `values` ascending.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Percentile by rank indexing: `sorted[floor(n·p/100)]`, no interpolation.
pub fn rank_percentile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let idx = ((sorted.len() as f64 * p / 100.0).floor() as usize).min(sorted.len() - 1);
    Some(sorted[idx])
}

/// Percentile using linear interpolation between closest ranks.
pub fn linear_percentile(sorted: &[f64], p: f64) -> Option<f64> {
    match sorted.len() {
        0 => None,
        1 => Some(sorted[0]),
        n => {
            let rank = (p / 100.0) * (n - 1) as f64;
            let lower = rank.floor() as usize;
            let upper = rank.ceil() as usize;
            let frac = rank - lower as f64;
            if upper >= n {
                Some(sorted[n - 1])
            } else {
                Some(sorted[lower] * (1.0 - frac) + sorted[upper] * frac)
            }
        }
    }
}

/// Median taking the lower-middle element for even lengths. Sorts in place.
pub fn lower_median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    Some(values[(values.len() - 1) / 2])
}

pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_percentile_does_not_interpolate() {
        let s = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        assert_eq!(rank_percentile(&s, 25.0), Some(3.0));
        assert_eq!(rank_percentile(&s, 75.0), Some(7.0));
        assert_eq!(rank_percentile(&[], 25.0), None);
    }

    #[test]
    fn linear_percentile_interpolates() {
        let s = [1.0, 2.0, 3.0, 4.0];
        assert!((linear_percentile(&s, 50.0).unwrap() - 2.5).abs() < 1e-12);
        assert!((linear_percentile(&s, 25.0).unwrap() - 1.75).abs() < 1e-12);
        assert_eq!(linear_percentile(&[7.0], 90.0), Some(7.0));
        assert_eq!(linear_percentile(&[], 50.0), None);
    }

    #[test]
    fn lower_median_picks_lower_middle() {
        assert_eq!(lower_median(&mut [4.0, 1.0, 3.0, 2.0]), Some(2.0));
        assert_eq!(lower_median(&mut [5.0, 1.0, 3.0]), Some(3.0));
        assert_eq!(lower_median(&mut []), None);
    }

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(Vec::<f64>::new()), None);
        assert_eq!(mean([1.0, 2.0, 6.0]), Some(3.0));
    }
}
