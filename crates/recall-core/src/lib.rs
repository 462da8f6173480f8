//! recall-core - Associative recall over sparse random ensembles.
//!
//! Items are random binary vectors over N neurons (each neuron active with
//! probability f). Recall starts at item 0 and keeps jumping to the item with
//! the largest overlap to the current one, never straight back to the item
//! it just came from, until the chain repeats itself. The number of distinct
//! items reached grows like `sqrt(1.5 * pi * L)`.
//!
//! # Example
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use recall_core::{expected_scaling, generate_similarity, recall, RecallParams};
//!
//! let params = RecallParams::new(50, 5000, 0.05);
//! let mut rng = StdRng::seed_from_u64(5);
//!
//! let sim = generate_similarity(&params, &mut rng)?;
//! let distinct = recall(&sim);
//! assert!((2..=50).contains(&distinct));
//! println!("visited {} items, expected about {:.1}", distinct, expected_scaling(50));
//! # Ok::<(), recall_core::RecallError>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod items;
pub mod pipeline;
pub mod scaling;
pub mod similarity;

// Re-export commonly used types
pub use config::RecallParams;
pub use engine::{has_repeated_pair, recall, recall_array, recall_trace, RecallOutcome, StopReason};
pub use error::{ErrorCode, RecallError, RecallResult};
pub use items::{BernoulliGenerator, GeneratorKind, ItemGenerator, ItemMatrix, SparseFillGenerator};
pub use pipeline::{memory_recall_outcome, memory_recall_process};
pub use scaling::expected_scaling;
pub use similarity::{generate_similarity, SimilarityMatrix};
