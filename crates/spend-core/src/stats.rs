// ── Percentile helper ─────────────────────────────────────────────────────────

/// Compute the `p`-th percentile of a **sorted** slice using linear
/// interpolation between closest ranks.
///
/// Returns `0.0` for an empty slice.
pub fn percentile(sorted_data: &[f64], p: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }
    let len = sorted_data.len();
    if len == 1 {
        return sorted_data[0];
    }
    let rank = (p / 100.0) * (len as f64 - 1.0);
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted_data[lo];
    }
    let frac = rank - lo as f64;
    sorted_data[lo] + frac * (sorted_data[hi] - sorted_data[lo])
}

// ── Five-number summary ───────────────────────────────────────────────────────

/// The values a box plot draws: extremes, quartiles and median.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiveNumber {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Summarise `values` (any order). Returns `None` when empty.
pub fn five_number_summary(values: &[f64]) -> Option<FiveNumber> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    Some(FiveNumber {
        min: sorted[0],
        q1: percentile(&sorted, 25.0),
        median: percentile(&sorted, 50.0),
        q3: percentile(&sorted, 75.0),
        max: sorted[sorted.len() - 1],
    })
}

/// Round to `decimals` places; exact halves go to the even digit.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round_ties_even() / factor
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_empty() {
        assert_eq!(percentile(&[], 50.0), 0.0);
    }

    #[test]
    fn test_percentile_single() {
        assert_eq!(percentile(&[42.0], 90.0), 42.0);
    }

    #[test]
    fn test_percentile_interpolates() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert!((percentile(&data, 50.0) - 2.5).abs() < 1e-9);
        assert!((percentile(&data, 25.0) - 1.75).abs() < 1e-9);
        assert_eq!(percentile(&data, 100.0), 4.0);
        assert_eq!(percentile(&data, 0.0), 1.0);
    }

    #[test]
    fn test_five_number_summary_unsorted_input() {
        let summary = five_number_summary(&[9.0, 1.0, 5.0, 3.0, 7.0]).unwrap();
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.q1, 3.0);
        assert_eq!(summary.median, 5.0);
        assert_eq!(summary.q3, 7.0);
        assert_eq!(summary.max, 9.0);
    }

    #[test]
    fn test_five_number_summary_empty() {
        assert!(five_number_summary(&[]).is_none());
    }

    #[test]
    fn test_round_to_three_decimals() {
        assert_eq!(round_to(7.5, 3), 7.5);
        assert_eq!(round_to(10.0 / 3.0, 3), 3.333);
        assert_eq!(round_to(2.0 / 3.0, 3), 0.667);
    }

    #[test]
    fn test_round_to_halves_go_to_even() {
        assert_eq!(round_to(0.0625, 3), 0.062);
        assert_eq!(round_to(0.1875, 3), 0.188);
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(3.5, 0), 4.0);
    }
}
