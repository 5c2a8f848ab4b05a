//! Small statistics helpers shared by loading and fitting.

/// Mean over the present values, ignoring missing cells.
///
/// Returns `None` when nothing is present, which downstream code treats
/// as "this row has no signal" rather than zero.
pub fn mean_present(values: &[Option<f64>]) -> Option<f64> {
    let mut sum = 0.0;
    let mut n = 0usize;
    for v in values.iter().flatten() {
        sum += *v;
        n += 1;
    }
    (n > 0).then(|| sum / n as f64)
}

/// Median, sorting the slice in place.
///
/// Even-length inputs average the two middle values, matching the usual
/// numeric-library convention.
pub fn median_mut(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_unstable_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_skips_missing_cells() {
        assert_eq!(mean_present(&[Some(1.0), None, Some(2.0)]), Some(1.5));
        assert_eq!(mean_present(&[Some(3.25)]), Some(3.25));
    }

    #[test]
    fn mean_of_nothing_is_none() {
        assert_eq!(mean_present(&[]), None);
        assert_eq!(mean_present(&[None, None]), None);
    }

    #[test]
    fn median_odd_picks_middle() {
        let mut v = vec![5.0, 1.0, 3.0];
        assert_eq!(median_mut(&mut v), Some(3.0));
    }

    #[test]
    fn median_even_averages_middle_pair() {
        let mut v = vec![78.1, 5000.0, 156.0, 2500.0, 313.0, 1250.0, 625.0, 0.0];
        // Sorted: 0, 78.1, 156, 313, 625, 1250, 2500, 5000 -> (313 + 625) / 2
        assert_eq!(median_mut(&mut v), Some(469.0));
    }

    #[test]
    fn median_of_empty_is_none() {
        assert_eq!(median_mut(&mut []), None);
    }
}
