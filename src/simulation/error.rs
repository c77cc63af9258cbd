//! Error types for model persistence and configuration loading.

use thiserror::Error;

/// Failure while saving, loading or discarding a persisted network.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Reading or writing the model file failed.
    #[error("model file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// The model file is not valid JSON for a saved network.
    #[error("malformed model file: {0}")]
    Json(#[from] serde_json::Error),
    /// The saved network has a different number of layers.
    #[error("layer count mismatch: network has {expected} layers, saved model has {found}")]
    LayerCount {
        /// Layers in the live network.
        expected: usize,
        /// Layers in the saved model.
        found: usize,
    },
    /// A saved layer has different dimensions than the live one.
    #[error(
        "shape mismatch in layer {layer}: network expects {expected:?} (inputs, outputs), saved model has {found:?}"
    )]
    ShapeMismatch {
        /// Index of the offending layer.
        layer: usize,
        /// (inputs, outputs) of the live layer.
        expected: (usize, usize),
        /// (inputs, outputs) of the saved layer.
        found: (usize, usize),
    },
}

/// Failure while loading or validating a [`SimConfig`](super::config::SimConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    /// The config file is not valid TOML for a config.
    #[error("could not parse config: {0}")]
    Toml(#[from] toml::de::Error),
    /// A value is out of its allowed range.
    #[error("invalid config: {0}")]
    Invalid(String),
}
