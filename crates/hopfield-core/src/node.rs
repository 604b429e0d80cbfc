//! A single Hopfield neuron.
//!
//! A node owns its row of the weight matrix and its own activation. It never
//! looks at other nodes directly: updates read only the activation vector
//! passed in, so the network can hand every node the same working snapshot.

use crate::activation::Activation;
use crate::error::{HopfieldError, Result};

/// One neuron and its outgoing connection weights.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    weights: Vec<f64>,
    activation: Activation,
    index: usize,
}

impl Node {
    /// Build a node from its parts. `weights` must have one entry per node
    /// in the network; the caller guarantees it.
    pub fn new(weights: Vec<f64>, activation: Activation, index: usize) -> Self {
        Self {
            weights,
            activation,
            index,
        }
    }

    /// Accumulate one pattern's outer-product row into this node's weights.
    ///
    /// The entry at the node's own position is always taken as zero so the
    /// self-connection never grows.
    pub fn add_transposed_pattern(&mut self, row: &[f64]) -> Result<()> {
        if row.len() != self.weights.len() {
            return Err(HopfieldError::node_size_mismatch(
                self.index,
                self.weights.len(),
                row.len(),
            ));
        }
        for (j, (w, delta)) in self.weights.iter_mut().zip(row).enumerate() {
            if j != self.index {
                *w += delta;
            }
        }
        Ok(())
    }

    /// Recompute this node's activation from a full activation vector.
    ///
    /// Stores the result and returns it.
    pub fn calculate_activation(&mut self, activations: &[Activation]) -> Activation {
        self.activation = Activation::from_sum(self.input_sum(activations));
        self.activation
    }

    /// Weighted input `Σ activations[k] * weights[k]`.
    pub fn input_sum(&self, activations: &[Activation]) -> f64 {
        self.weights
            .iter()
            .zip(activations)
            .map(|(w, a)| w * a.as_f64())
            .sum()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn set_activation(&mut self, activation: Activation) {
        self.activation = activation;
    }

    /// Flip the node the way a click on its grid cell does.
    pub fn toggle(&mut self) -> Activation {
        self.activation = self.activation.toggled();
        self.activation
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn self_weight(&self) -> f64 {
        self.weights.get(self.index).copied().unwrap_or(0.0)
    }

    /// Raw access for tests that need to corrupt the weight matrix.
    #[cfg(test)]
    pub(crate) fn weights_mut(&mut self) -> &mut Vec<f64> {
        &mut self.weights
    }
}
