//! Saving, restoring and discarding a network on disk.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::ModelError;
use super::network::Network;

/// On-disk record of a network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedModel {
    /// RFC 3339 time of the save.
    pub saved_at: String,
    /// The network, layers with their last input/output snapshots.
    pub network: Network,
}

/// A single model file.
#[derive(Debug, Clone)]
pub struct ModelStore {
    path: PathBuf,
}

impl ModelStore {
    /// Store backed by `path`. Nothing is touched until a method is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the model file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True if a model file is present.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Writes `network` as pretty JSON, replacing any previous model.
    pub fn save(&self, network: &Network) -> Result<(), ModelError> {
        let record = SavedModel {
            saved_at: chrono::Utc::now().to_rfc3339(),
            network: network.clone(),
        };
        let json = serde_json::to_string_pretty(&record)?;
        std::fs::write(&self.path, json)?;
        log::info!("Saved model to {}", self.path.display());
        Ok(())
    }

    /// Reads the model file without applying it.
    pub fn read(&self) -> Result<SavedModel, ModelError> {
        let json = std::fs::read_to_string(&self.path)?;
        let record = serde_json::from_str(&json)?;
        Ok(record)
    }

    /// Restores weights and biases into `network` if a model file exists.
    ///
    /// Returns `Ok(false)` when there is no file. A model whose topology
    /// differs from `network` fails with [`ModelError::LayerCount`] or
    /// [`ModelError::ShapeMismatch`] and leaves `network` unchanged.
    pub fn load_into(&self, network: &mut Network) -> Result<bool, ModelError> {
        if !self.exists() {
            log::debug!("No model at {}", self.path.display());
            return Ok(false);
        }

        let record = self.read()?;
        network.restore_from(&record.network)?;
        log::debug!(
            "Restored model saved at {} from {}",
            record.saved_at,
            self.path.display()
        );
        Ok(true)
    }

    /// Deletes the model file.
    ///
    /// Returns `Ok(true)` if a file was removed and `Ok(false)` if there was
    /// none. Any other removal error is returned.
    pub fn discard(&self) -> Result<bool, ModelError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                log::info!("Discarded model {}", self.path.display());
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("No model to discard at {}", self.path.display());
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }
}
