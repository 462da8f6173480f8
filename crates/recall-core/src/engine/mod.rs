//! The recall chain.
//!
//! Starting from item 0 the chain repeatedly jumps to the item with the
//! largest overlap to the current one, never returning straight to the item
//! it just left. It stops as soon as a consecutive pair of items shows up
//! a second time in the same order (the chain has entered a cycle) or after
//! L² steps, whichever comes first. The result is the number of distinct
//! items visited.
//!
//! # Example
//!
//! ```
//! use ndarray::array;
//! use recall_core::{recall, SimilarityMatrix};
//!
//! let sim = SimilarityMatrix::from_array(array![
//!     [0, 5, 1, 2],
//!     [5, 0, 5, 1],
//!     [1, 5, 0, 3],
//!     [2, 1, 3, 0],
//! ])
//! .unwrap();
//!
//! assert_eq!(recall(&sim), 4);
//! ```

pub mod cycle;
pub mod step;

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::RecallResult;
use crate::similarity::SimilarityMatrix;

pub use cycle::has_repeated_pair;
pub use step::{first_max, next_item};

/// Why the chain stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// A consecutive pair of items recurred.
    RepeatedPair,
    /// The L² step bound was reached first.
    StepLimit,
}

/// Full result of one recall chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecallOutcome {
    /// Items in visiting order, starting with item 0.
    pub trace: Vec<usize>,
    /// Number of distinct items in `trace`.
    pub distinct: usize,
    /// Transitions taken after the initial pair.
    pub steps: usize,
    /// What ended the chain.
    pub stop: StopReason,
}

/// Run the recall chain and return the number of distinct items visited.
pub fn recall(sim: &SimilarityMatrix) -> usize {
    recall_trace(sim).distinct
}

/// Validate a raw overlap matrix, then run the recall chain on it.
pub fn recall_array(sim: Array2<u32>) -> RecallResult<usize> {
    let sim = SimilarityMatrix::from_array(sim)?;
    Ok(recall(&sim))
}

/// Run the recall chain and keep the whole trace.
///
/// The first move takes the first maximal entry of row 0 without the
/// backtrack rule (there is no previous item yet).
pub fn recall_trace(sim: &SimilarityMatrix) -> RecallOutcome {
    let len = sim.len();
    let max_steps = len * len;

    let mut trace = Vec::with_capacity(len + 2);
    trace.push(0);
    trace.push(first_max(sim.row(0)));

    let mut steps = 0;
    let mut stop = StopReason::StepLimit;
    for i in 1..max_steps {
        trace!(trace = ?trace, "recall step {}", i);
        let next = next_item(sim.row(trace[i]), trace[i - 1]);
        trace.push(next);
        steps += 1;

        if has_repeated_pair(&trace) {
            stop = StopReason::RepeatedPair;
            break;
        }
    }

    let mut seen = vec![false; len];
    for &item in &trace {
        seen[item] = true;
    }
    let distinct = seen.iter().filter(|&&s| s).count();

    debug!(
        items = len,
        steps,
        distinct,
        stop = ?stop,
        "recall chain finished"
    );

    RecallOutcome {
        trace,
        distinct,
        steps,
        stop,
    }
}
