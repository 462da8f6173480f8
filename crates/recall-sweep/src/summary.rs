//! Per-cell comparison of observed recall against the scaling law.

use std::collections::BTreeMap;

use recall_core::expected_scaling;
use serde::Serialize;

use crate::key::ConfigKey;

/// Observed vs. predicted distinct count for one cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalingRow {
    /// The (f, L) cell.
    pub key: ConfigKey,
    /// Number of runs averaged.
    pub samples: usize,
    /// Mean distinct count over those runs.
    pub mean: f64,
    /// Scaling-law prediction for L.
    pub expected: f64,
    /// `(mean - expected) / expected`
    pub relative_error: f64,
}

/// One row per non-empty cell, in key order.
pub fn summarize(grouped: &BTreeMap<ConfigKey, Vec<usize>>) -> Vec<ScalingRow> {
    grouped
        .iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(key, values)| {
            let mean = values.iter().sum::<usize>() as f64 / values.len() as f64;
            let expected = expected_scaling(key.items);
            ScalingRow {
                key: *key,
                samples: values.len(),
                mean,
                expected,
                relative_error: (mean - expected) / expected,
            }
        })
        .collect()
}
