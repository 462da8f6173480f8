//! Closed-form reference for the number of distinct items recalled.

use std::f64::consts::PI;

/// Expected number of distinct items recalled from a list of `items`
/// memories, for large N and small f: `sqrt(1.5 * pi * L)`.
///
/// ```
/// let r = recall_core::expected_scaling(100);
/// assert!((r - 21.708).abs() < 1e-3);
/// ```
pub fn expected_scaling(items: usize) -> f64 {
    (1.5 * PI * items as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert!((expected_scaling(10) - 6.8647).abs() < 1e-4);
        assert!((expected_scaling(500) - 48.5406).abs() < 1e-4);
        assert_eq!(expected_scaling(0), 0.0);
    }

    #[test]
    fn test_square_root_growth() {
        let ratio = expected_scaling(400) / expected_scaling(100);
        assert!((ratio - 2.0).abs() < 1e-12);
    }
}
