//! End-to-end recall process: sample items, build overlaps, run the chain.

use rand::Rng;
use tracing::{debug, trace};

use crate::config::RecallParams;
use crate::engine::{recall_trace, RecallOutcome};
use crate::error::RecallResult;
use crate::similarity::generate_similarity;

/// Run one recall process and return the number of distinct items visited.
///
/// Each call draws a fresh item matrix from `rng`; nothing is kept between
/// calls.
pub fn memory_recall_process<R: Rng + ?Sized>(params: &RecallParams, rng: &mut R) -> RecallResult<usize> {
    memory_recall_outcome(params, rng).map(|outcome| outcome.distinct)
}

/// Like [`memory_recall_process`] but returns the full chain.
pub fn memory_recall_outcome<R: Rng + ?Sized>(
    params: &RecallParams,
    rng: &mut R,
) -> RecallResult<RecallOutcome> {
    params.validate()?;
    let sim = generate_similarity(params, rng)?;
    trace!(similarity = ?sim.as_array(), "similarity matrix");

    let outcome = recall_trace(&sim);
    debug!(
        items = params.items,
        neurons = params.neurons,
        activation = params.activation,
        generator = %params.generator,
        distinct = outcome.distinct,
        "recall process complete"
    );
    Ok(outcome)
}
