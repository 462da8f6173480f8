//! Sweep configuration.

use std::path::{Path, PathBuf};

use recall_core::{GeneratorKind, RecallError, RecallParams, RecallResult};
use serde::{Deserialize, Serialize};

use crate::key::ConfigKey;

/// Parameter sweep over activations x item counts, repeated `runs` times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Neurons per ensemble (N), shared by every cell.
    pub neurons: usize,
    /// Activation probabilities (f) to sweep.
    pub activations: Vec<f64>,
    /// Item counts (L) to sweep.
    pub item_counts: Vec<usize>,
    /// Number of repetitions of the whole grid.
    pub runs: usize,
    /// Base seed; every cell derives its own stream from it.
    pub seed: u64,
    /// How ensembles are sampled.
    pub generator: GeneratorKind,
    /// Run indices after which buffered results are written out.
    /// The final run is always written.
    pub checkpoint_runs: Vec<usize>,
    /// Append-only results log (JSON Lines).
    pub results_path: PathBuf,
}

impl Default for SweepConfig {
    fn default() -> Self {
        let data_dir = dirs::home_dir()
            .map(|h| h.join(".recall"))
            .unwrap_or_else(|| PathBuf::from(".recall"));

        Self {
            neurons: 20000,
            activations: vec![0.1, 0.05, 0.01],
            item_counts: vec![10, 20, 50, 80, 130, 280, 500],
            runs: 100,
            seed: 0,
            generator: GeneratorKind::Bernoulli,
            checkpoint_runs: vec![2, 4, 25, 50, 75],
            results_path: data_dir.join("sweep.jsonl"),
        }
    }
}

impl SweepConfig {
    /// Load configuration from a file (TOML, JSON, or YAML).
    pub fn from_file(path: impl AsRef<Path>) -> RecallResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let ext = path.as_ref().extension().and_then(|e| e.to_str());

        match ext {
            Some("toml") => {
                toml::from_str(&content).map_err(|e| RecallError::Configuration(e.to_string()))
            }
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| RecallError::Configuration(e.to_string())),
            Some("yaml" | "yml") => serde_yaml::from_str(&content)
                .map_err(|e| RecallError::Configuration(e.to_string())),
            _ => Err(RecallError::Configuration(
                "Unsupported config file format. Use .toml, .json, or .yaml".to_string(),
            )),
        }
    }

    /// Load configuration from environment variables on top of the defaults.
    ///
    /// Recognised: `RECALL_NEURONS`, `RECALL_RUNS`, `RECALL_SEED`,
    /// `RECALL_GENERATOR`, `RECALL_RESULTS_PATH`.
    pub fn from_env() -> RecallResult<Self> {
        let mut config = Self::default();

        if let Some(neurons) = env_parse("RECALL_NEURONS")? {
            config.neurons = neurons;
        }
        if let Some(runs) = env_parse("RECALL_RUNS")? {
            config.runs = runs;
        }
        if let Some(seed) = env_parse("RECALL_SEED")? {
            config.seed = seed;
        }
        if let Some(generator) = env_parse("RECALL_GENERATOR")? {
            config.generator = generator;
        }
        if let Ok(path) = std::env::var("RECALL_RESULTS_PATH") {
            config.results_path = PathBuf::from(path);
        }

        Ok(config)
    }

    /// Build configuration using builder pattern.
    pub fn builder() -> SweepConfigBuilder {
        SweepConfigBuilder::default()
    }

    /// All cells of the grid, activation-major, in sweep order.
    pub fn keys(&self) -> Vec<ConfigKey> {
        self.activations
            .iter()
            .flat_map(|&f| self.item_counts.iter().map(move |&l| ConfigKey::new(f, l)))
            .collect()
    }

    /// Model parameters for one cell.
    pub fn params_for(&self, key: &ConfigKey) -> RecallParams {
        RecallParams::new(key.items, self.neurons, key.activation()).with_generator(self.generator)
    }

    /// Whether results should be written out after `run`.
    pub fn is_checkpoint(&self, run: usize) -> bool {
        run + 1 == self.runs || self.checkpoint_runs.contains(&run)
    }

    /// Validate the sweep and every cell it contains.
    pub fn validate(&self) -> RecallResult<()> {
        if self.activations.is_empty() {
            return Err(RecallError::Configuration("activations must not be empty".to_string()));
        }
        if self.item_counts.is_empty() {
            return Err(RecallError::Configuration("item_counts must not be empty".to_string()));
        }
        if self.runs == 0 {
            return Err(RecallError::Configuration("runs must be at least 1".to_string()));
        }
        for key in self.keys() {
            self.params_for(&key).validate()?;
        }
        Ok(())
    }
}

fn env_parse<T>(name: &str) -> RecallResult<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| RecallError::Configuration(format!("{}={:?}: {}", name, raw, e))),
        Err(_) => Ok(None),
    }
}

/// Builder for SweepConfig.
#[derive(Default)]
pub struct SweepConfigBuilder {
    config: SweepConfig,
}

impl SweepConfigBuilder {
    /// Set the number of neurons.
    pub fn neurons(mut self, neurons: usize) -> Self {
        self.config.neurons = neurons;
        self
    }

    /// Set the activation probabilities.
    pub fn activations(mut self, activations: Vec<f64>) -> Self {
        self.config.activations = activations;
        self
    }

    /// Set the item counts.
    pub fn item_counts(mut self, item_counts: Vec<usize>) -> Self {
        self.config.item_counts = item_counts;
        self
    }

    /// Set the number of runs.
    pub fn runs(mut self, runs: usize) -> Self {
        self.config.runs = runs;
        self
    }

    /// Set the base seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Set the generator.
    pub fn generator(mut self, generator: GeneratorKind) -> Self {
        self.config.generator = generator;
        self
    }

    /// Set the checkpoint runs.
    pub fn checkpoint_runs(mut self, runs: Vec<usize>) -> Self {
        self.config.checkpoint_runs = runs;
        self
    }

    /// Set the results path.
    pub fn results_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.results_path = path.into();
        self
    }

    /// Build the configuration.
    pub fn build(self) -> SweepConfig {
        self.config
    }
}
