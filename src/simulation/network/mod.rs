//! Feed-forward threshold network that turns sensor readings into controls.
//!
//! The network has no training loop. It is adapted only by randomizing it or
//! by mutating a copy of a good one (see [`population`](super::population)).

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::error::ModelError;

pub mod layer;

pub use layer::Layer;

/// Ordered stack of [`Layer`]s.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    /// Ordered layers from input to output.
    pub layers: Vec<Layer>,
}

impl Network {
    /// Creates a network with random weights.
    ///
    /// `layer_sizes` lists neuron counts from the input layer to the output
    /// layer, so `[5, 6, 4]` builds two layers (5→6 and 6→4).
    pub fn new(layer_sizes: &[usize]) -> Self {
        assert!(
            layer_sizes.len() >= 2,
            "network needs at least 2 layer sizes, got {}",
            layer_sizes.len()
        );
        assert!(
            layer_sizes.iter().all(|&size| size > 0),
            "empty layers not allowed: {:?}",
            layer_sizes
        );

        let layers = layer_sizes
            .windows(2)
            .map(|pair| Layer::new_random(pair[0], pair[1]))
            .collect();

        Self { layers }
    }

    /// Neuron counts from input to output, the inverse of [`Network::new`].
    pub fn topology(&self) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.layers.len() + 1);
        if let Some(first) = self.layers.first() {
            sizes.push(first.input_count());
        }
        sizes.extend(self.layers.iter().map(Layer::output_count));
        sizes
    }

    /// Runs a forward pass and returns the final layer's binary outputs.
    pub fn evaluate(&mut self, inputs: &Array1<f32>) -> Array1<f32> {
        let mut outputs = inputs.clone();
        for layer in &mut self.layers {
            outputs = layer.feed_forward(&outputs);
        }
        outputs
    }

    /// Redraws every parameter.
    pub fn randomize(&mut self) {
        for layer in &mut self.layers {
            layer.randomize();
        }
    }

    /// Blends every parameter towards a fresh random value.
    ///
    /// `amount` must lie in [0, 1]: 0 keeps the network unchanged, 1 replaces
    /// it with a random one.
    pub fn mutate(&mut self, amount: f32) {
        assert!(
            (0.0..=1.0).contains(&amount),
            "mutation amount must lie in [0, 1], got {}",
            amount
        );
        for layer in &mut self.layers {
            layer.mutate(amount);
        }
    }

    /// Checks that `other` has the same layer count and layer shapes.
    pub fn check_compatible(&self, other: &Network) -> Result<(), ModelError> {
        if self.layers.len() != other.layers.len() {
            return Err(ModelError::LayerCount {
                expected: self.layers.len(),
                found: other.layers.len(),
            });
        }

        for (index, (live, saved)) in self.layers.iter().zip(&other.layers).enumerate() {
            if live.shape() != saved.shape() || saved.biases.len() != live.biases.len() {
                return Err(ModelError::ShapeMismatch {
                    layer: index,
                    expected: live.shape(),
                    found: saved.shape(),
                });
            }
        }

        Ok(())
    }

    /// Copies weights and biases from `source` after validating every layer.
    ///
    /// Nothing is written unless all layers match, so a failed restore leaves
    /// this network as it was.
    pub fn restore_from(&mut self, source: &Network) -> Result<(), ModelError> {
        self.check_compatible(source)?;
        for (live, saved) in self.layers.iter_mut().zip(&source.layers) {
            live.copy_parameters(saved);
        }
        Ok(())
    }
}
