//! Single threshold layer of the feed-forward network.

use ndarray::{Array1, Array2, Zip};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use serde::{Deserialize, Serialize};

use super::super::geometric_utils::lerp;

/// One affine-threshold stage mapping `input_count` reals to `output_count` bits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    /// Inputs seen by the last feed-forward, kept for inspection.
    pub inputs: Array1<f32>,
    /// Outputs produced by the last feed-forward, kept for inspection.
    pub outputs: Array1<f32>,
    /// Weight matrix (`input_count` × `output_count`).
    pub weights: Array2<f32>,
    /// Bias vector (`output_count`), used as the firing threshold.
    pub biases: Array1<f32>,
}

impl Layer {
    /// Creates a layer with weights and biases drawn uniformly from [-1, 1].
    pub fn new_random(input_count: usize, output_count: usize) -> Self {
        Self {
            inputs: Array1::zeros(input_count),
            outputs: Array1::zeros(output_count),
            weights: Array2::random((input_count, output_count), Uniform::new(-1.0, 1.0)),
            biases: Array1::random(output_count, Uniform::new(-1.0, 1.0)),
        }
    }

    /// Number of inputs this layer accepts.
    pub fn input_count(&self) -> usize {
        self.weights.nrows()
    }

    /// Number of outputs this layer produces.
    pub fn output_count(&self) -> usize {
        self.weights.ncols()
    }

    /// (inputs, outputs) pair.
    pub fn shape(&self) -> (usize, usize) {
        (self.input_count(), self.output_count())
    }

    /// Redraws every weight and bias from [-1, 1].
    pub fn randomize(&mut self) {
        self.weights = Array2::random(self.weights.dim(), Uniform::new(-1.0, 1.0));
        self.biases = Array1::random(self.biases.len(), Uniform::new(-1.0, 1.0));
    }

    /// Feeds `inputs` through the layer.
    ///
    /// Output `i` fires (1.0) when the weighted input sum is strictly greater
    /// than `biases[i]`, otherwise it is 0.0.
    pub fn feed_forward(&mut self, inputs: &Array1<f32>) -> Array1<f32> {
        assert_eq!(
            inputs.len(),
            self.input_count(),
            "layer expects {} inputs, got {}",
            self.input_count(),
            inputs.len()
        );

        self.inputs.assign(inputs);
        let sums = inputs.dot(&self.weights);
        self.outputs = sums
            .iter()
            .zip(self.biases.iter())
            .map(|(sum, bias)| if sum > bias { 1.0 } else { 0.0 })
            .collect();

        self.outputs.clone()
    }

    /// Moves every weight and bias towards a fresh random value by `amount`.
    pub fn mutate(&mut self, amount: f32) {
        let fresh_weights: Array2<f32> = Array2::random(self.weights.dim(), Uniform::new(-1.0, 1.0));
        Zip::from(&mut self.weights)
            .and(&fresh_weights)
            .for_each(|w, &r| *w = lerp(*w, r, amount));

        let fresh_biases: Array1<f32> = Array1::random(self.biases.len(), Uniform::new(-1.0, 1.0));
        Zip::from(&mut self.biases)
            .and(&fresh_biases)
            .for_each(|b, &r| *b = lerp(*b, r, amount));
    }

    /// Copies weights and biases from a layer of the same shape.
    pub(super) fn copy_parameters(&mut self, source: &Layer) {
        self.weights.assign(&source.weights);
        self.biases.assign(&source.biases);
    }
}
