//! Stop predicate for the recall chain.

/// Whether some consecutive pair of items recurs later in the trace in the
/// same order, i.e. there are positions `j < m` with
/// `trace[j..j + 2] == trace[m..m + 2]`.
///
/// Overlapping occurrences count (`m == j + 1`). Runs in O(len²).
pub fn has_repeated_pair(trace: &[usize]) -> bool {
    let pairs = trace.len().saturating_sub(1);
    for j in 0..pairs {
        for m in (j + 1)..pairs {
            if trace[j] == trace[m] && trace[j + 1] == trace[m + 1] {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_traces_never_repeat() {
        assert!(!has_repeated_pair(&[]));
        assert!(!has_repeated_pair(&[0]));
        assert!(!has_repeated_pair(&[0, 1]));
        assert!(!has_repeated_pair(&[0, 1, 0]));
    }

    #[test]
    fn test_detects_pair_in_same_order() {
        assert!(has_repeated_pair(&[0, 1, 2, 0, 1]));
        assert!(has_repeated_pair(&[3, 4, 1, 2, 5, 1, 2]));
    }

    #[test]
    fn test_reversed_pair_is_not_a_repeat() {
        assert!(!has_repeated_pair(&[0, 1, 2, 1]));
        assert!(!has_repeated_pair(&[0, 1, 2, 3, 2, 4]));
    }

    #[test]
    fn test_overlapping_occurrence_counts() {
        assert!(has_repeated_pair(&[5, 5, 5]));
    }
}
