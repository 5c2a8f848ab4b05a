//! Log-spaced evaluation grids.

/// `n` points spaced evenly in log between `start` and `end`, inclusive
/// of both endpoints.
///
/// This is the usual plotting grid for dose-response curves, whose
/// concentration axis is logarithmic. Returns an empty vector when the
/// interval is not a finite, ordered, positive range.
pub fn log_space(start: f64, end: f64, n: usize) -> Vec<f64> {
    if !(start > 0.0) || !(end > start) || !end.is_finite() {
        return Vec::new();
    }
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let (ls, le) = (start.ln(), end.ln());
            let step = (le - ls) / (n - 1) as f64;
            (0..n).map(|i| (ls + step * i as f64).exp()).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn endpoints_are_included() {
        let grid = log_space(7.81, 50_000.0, 100);
        assert_eq!(grid.len(), 100);
        assert_relative_eq!(grid[0], 7.81, max_relative = 1e-12);
        assert_relative_eq!(grid[99], 50_000.0, max_relative = 1e-12);
    }

    #[test]
    fn spacing_is_uniform_in_log() {
        let grid = log_space(1.0, 1000.0, 4);
        let expected = [1.0, 10.0, 100.0, 1000.0];
        for (g, e) in grid.iter().zip(expected) {
            assert_relative_eq!(*g, e, max_relative = 1e-12);
        }
    }

    #[test]
    fn grid_is_strictly_increasing() {
        let grid = log_space(0.5, 2.0e6, 64);
        assert!(grid.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn degenerate_ranges_yield_empty() {
        assert!(log_space(0.0, 10.0, 5).is_empty());
        assert!(log_space(-1.0, 10.0, 5).is_empty());
        assert!(log_space(10.0, 10.0, 5).is_empty());
        assert!(log_space(10.0, 1.0, 5).is_empty());
        assert!(log_space(1.0, f64::INFINITY, 5).is_empty());
        assert!(log_space(1.0, 10.0, 0).is_empty());
    }
}
