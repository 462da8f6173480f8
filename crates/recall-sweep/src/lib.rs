//! recall-sweep - Batch parameter sweeps for the recall model.
//!
//! Runs the recall process over a grid of activation probabilities and item
//! counts, many times over, and records every result in an append-only JSON
//! Lines log keyed by (f, L). Interrupted sweeps resume from the log.
//!
//! # Example
//!
//! ```no_run
//! use recall_sweep::{ResultStore, SweepConfig, SweepRunner};
//!
//! let config = SweepConfig::builder()
//!     .neurons(5000)
//!     .activations(vec![0.1])
//!     .item_counts(vec![10, 20])
//!     .runs(10)
//!     .results_path("results/sweep.jsonl")
//!     .build();
//!
//! let store = ResultStore::open(&config.results_path)?;
//! let stats = SweepRunner::new(config, store).run()?;
//! println!("computed {} cells", stats.executed);
//! # Ok::<(), recall_core::RecallError>(())
//! ```

pub mod config;
pub mod key;
pub mod runner;
pub mod store;
pub mod summary;

pub use config::{SweepConfig, SweepConfigBuilder};
pub use key::ConfigKey;
pub use runner::{cell_seed, SweepRunner, SweepStats};
pub use store::{group_by_key, LoadStats, ResultStore, RunRecord};
pub use summary::{summarize, ScalingRow};
