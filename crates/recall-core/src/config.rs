//! Model parameters for a single recall process.

use serde::{Deserialize, Serialize};

use crate::error::{RecallError, RecallResult};
use crate::items::GeneratorKind;

/// Parameters of one recall process.
///
/// `items` is L (number of memories), `neurons` is N (length of every
/// ensemble) and `activation` is f (probability that a neuron belongs to
/// an ensemble).
///
/// The defaults (L=5, N=3000, f=0.1) give a small matrix that is easy to
/// inspect by eye.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecallParams {
    /// Number of items (L).
    pub items: usize,
    /// Number of neurons per ensemble (N).
    pub neurons: usize,
    /// Activation probability (f), strictly between 0 and 1.
    pub activation: f64,
    /// How ensembles are sampled.
    pub generator: GeneratorKind,
}

impl Default for RecallParams {
    fn default() -> Self {
        Self {
            items: 5,
            neurons: 3000,
            activation: 0.1,
            generator: GeneratorKind::Bernoulli,
        }
    }
}

impl RecallParams {
    /// Create parameters with the default Bernoulli generator.
    pub fn new(items: usize, neurons: usize, activation: f64) -> Self {
        Self {
            items,
            neurons,
            activation,
            generator: GeneratorKind::Bernoulli,
        }
    }

    /// Set the number of items.
    pub fn with_items(mut self, items: usize) -> Self {
        self.items = items;
        self
    }

    /// Set the number of neurons.
    pub fn with_neurons(mut self, neurons: usize) -> Self {
        self.neurons = neurons;
        self
    }

    /// Set the activation probability.
    pub fn with_activation(mut self, activation: f64) -> Self {
        self.activation = activation;
        self
    }

    /// Set the generator.
    pub fn with_generator(mut self, generator: GeneratorKind) -> Self {
        self.generator = generator;
        self
    }

    /// Validate parameter ranges. Nothing is clamped.
    ///
    /// A single item is rejected: the chain needs a second item to move to.
    pub fn validate(&self) -> RecallResult<()> {
        if self.items < 2 {
            return Err(RecallError::invalid_items(format!(
                "L = {} but at least 2 items are required",
                self.items
            )));
        }
        if self.neurons < 1 {
            return Err(RecallError::invalid_neurons("N must be at least 1"));
        }
        if !self.activation.is_finite() || self.activation <= 0.0 || self.activation >= 1.0 {
            return Err(RecallError::invalid_activation(format!(
                "f = {} is outside (0, 1)",
                self.activation
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_default_params() {
        let params = RecallParams::default();
        assert_eq!(params.items, 5);
        assert_eq!(params.neurons, 3000);
        assert!((params.activation - 0.1).abs() < 1e-12);
        assert_eq!(params.generator, GeneratorKind::Bernoulli);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let params = RecallParams::default()
            .with_items(50)
            .with_neurons(20000)
            .with_activation(0.01)
            .with_generator(GeneratorKind::SparseFill);
        assert_eq!(params.items, 50);
        assert_eq!(params.neurons, 20000);
        assert_eq!(params.generator, GeneratorKind::SparseFill);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_validation_errors() {
        let single = RecallParams::new(1, 100, 0.1).validate().unwrap_err();
        assert_eq!(single.code(), ErrorCode::ParamItems);

        let empty = RecallParams::new(0, 100, 0.1).validate().unwrap_err();
        assert_eq!(empty.code(), ErrorCode::ParamItems);

        let no_neurons = RecallParams::new(10, 0, 0.1).validate().unwrap_err();
        assert_eq!(no_neurons.code(), ErrorCode::ParamNeurons);

        for f in [0.0, 1.0, -0.2, 1.5, f64::NAN, f64::INFINITY] {
            let err = RecallParams::new(10, 100, f).validate().unwrap_err();
            assert_eq!(err.code(), ErrorCode::ParamActivation, "f = {}", f);
        }
    }

    #[test]
    fn test_serde_defaults_fill_missing_fields() {
        let params: RecallParams = serde_json::from_str(r#"{"items": 20}"#).unwrap();
        assert_eq!(params.items, 20);
        assert_eq!(params.neurons, 3000);

        let params: RecallParams =
            serde_json::from_str(r#"{"generator": "sparse_fill"}"#).unwrap();
        assert_eq!(params.generator, GeneratorKind::SparseFill);
    }
}
