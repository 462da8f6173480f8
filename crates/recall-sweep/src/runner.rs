//! Resumable sweep execution.
//!
//! The grid is walked run-major: every run visits all activations, and for
//! each activation all item counts. Each cell draws from its own random
//! stream derived from the base seed, the run index and the cell key, so a
//! cell's result does not depend on which other cells ran before it. Cells
//! already present in the results log are skipped.

use std::collections::HashSet;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use recall_core::{memory_recall_process, RecallResult};
use tracing::{debug, info};

use crate::config::SweepConfig;
use crate::key::ConfigKey;
use crate::store::{ResultStore, RunRecord};

/// Statistics from a sweep.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepStats {
    /// Cells computed in this invocation.
    pub executed: u64,
    /// Cells found in the log and not recomputed.
    pub skipped: u64,
    /// Number of writes to the log.
    pub checkpoints: u64,
}

/// Seed for one cell of the grid.
pub fn cell_seed(base: u64, run: usize, key: &ConfigKey) -> u64 {
    let mut state = splitmix64(base);
    for part in [run as u64, key.activation().to_bits(), key.items as u64] {
        state = splitmix64(state ^ part);
    }
    state
}

fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Runs a sweep against a results store.
pub struct SweepRunner {
    config: SweepConfig,
    store: ResultStore,
}

impl SweepRunner {
    /// Create a runner.
    pub fn new(config: SweepConfig, store: ResultStore) -> Self {
        Self { config, store }
    }

    /// The sweep configuration.
    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// The results store.
    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    /// Cells of this sweep already in the log.
    ///
    /// Records made with a different N, generator or base seed belong to
    /// another sweep and do not count.
    fn completed(&self) -> RecallResult<HashSet<(usize, ConfigKey)>> {
        let (records, _) = self.store.load()?;
        Ok(records
            .into_iter()
            .filter(|r| r.belongs_to(&self.config))
            .map(|r| (r.run, r.key()))
            .collect())
    }

    /// Execute every missing cell, writing results at checkpoint runs.
    pub fn run(&self) -> RecallResult<SweepStats> {
        self.config.validate()?;
        let done = self.completed()?;
        let keys = self.config.keys();
        let mut stats = SweepStats::default();
        let mut pending: Vec<RunRecord> = Vec::new();

        info!(
            runs = self.config.runs,
            cells = keys.len(),
            already_done = done.len(),
            path = %self.store.path().display(),
            "starting sweep"
        );

        for run in 0..self.config.runs {
            debug!(run, "sweep run");
            for key in &keys {
                if done.contains(&(run, *key)) {
                    stats.skipped += 1;
                    continue;
                }

                let params = self.config.params_for(key);
                let seed = cell_seed(self.config.seed, run, key);
                let mut rng = StdRng::seed_from_u64(seed);
                let distinct = memory_recall_process(&params, &mut rng)?;
                debug!(run, cell = %key, distinct, "cell done");

                pending.push(RunRecord {
                    run,
                    activation: key.activation(),
                    items: key.items,
                    neurons: self.config.neurons,
                    generator: self.config.generator,
                    seed,
                    distinct,
                    recorded_at: Utc::now(),
                });
                stats.executed += 1;
            }

            if self.config.is_checkpoint(run) && !pending.is_empty() {
                self.store.append(&pending)?;
                stats.checkpoints += 1;
                info!(run, records = pending.len(), "checkpoint saved");
                pending.clear();
            }
        }

        info!(
            executed = stats.executed,
            skipped = stats.skipped,
            checkpoints = stats.checkpoints,
            "sweep finished"
        );
        Ok(stats)
    }
}
