//! The Hopfield network: Hebbian storage and asynchronous recall.
//!
//! # Storage
//!
//! Storing pattern `p` adds its outer product to the weight matrix with the
//! diagonal zeroed: `ΔW[i][j] = p[i] * p[j]` for `i != j`. Patterns superpose
//! additively and no normalization is applied.
//!
//! # Recovery
//!
//! Recovery runs sweeps until one completes without any node changing. Each
//! sweep visits every node exactly once in uniformly random order, and each
//! update is written into the working vector immediately, so later nodes in
//! the same sweep see it. With a symmetric zero-diagonal matrix the energy
//! `-½ sᵀWs` never increases, which is why the loop terminates. A sweep cap
//! (see [`RecoveryConfig`]) turns a corrupted matrix into an error instead of
//! an endless loop.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::activation::Activation;
use crate::error::{HopfieldError, Result};
use crate::node::Node;

/// Node count used by [`HopfieldNetwork::default`].
pub const DEFAULT_NODE_COUNT: usize = 4;

/// Sweep cap used by [`RecoveryConfig::default`].
pub const DEFAULT_MAX_SWEEPS: usize = 1_000;

/// Recovery configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryConfig {
    /// Give up after this many sweeps. `None` loops until convergence.
    pub max_sweeps: Option<usize>,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            max_sweeps: Some(DEFAULT_MAX_SWEEPS),
        }
    }
}

impl RecoveryConfig {
    pub fn unbounded() -> Self {
        Self { max_sweeps: None }
    }

    pub fn with_max_sweeps(max_sweeps: usize) -> Self {
        Self {
            max_sweeps: Some(max_sweeps),
        }
    }
}

/// Outcome of a successful recovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryReport {
    /// The converged activation vector.
    pub activations: Vec<Activation>,
    /// Sweeps run, including the final quiet one.
    pub sweeps: usize,
    /// Number of node updates that changed a value.
    pub updates: usize,
    pub converged: bool,
}

/// A fully-connected network of ternary nodes.
#[derive(Debug, Clone)]
pub struct HopfieldNetwork {
    node_count: usize,
    nodes: Vec<Node>,
    pattern_count: usize,
    recovery: RecoveryConfig,
    rng: ChaCha8Rng,
}

impl Default for HopfieldNetwork {
    fn default() -> Self {
        Self::new(DEFAULT_NODE_COUNT)
    }
}

impl HopfieldNetwork {
    /// Create a network of `node_count` nodes.
    ///
    /// No nodes exist until [`initialise_nodes`](Self::initialise_nodes) is
    /// called. Recovery order is drawn from an entropy-seeded generator.
    pub fn new(node_count: usize) -> Self {
        Self::from_rng(node_count, ChaCha8Rng::from_entropy())
    }

    /// Create a network whose recovery order is reproducible.
    pub fn with_seed(node_count: usize, seed: u64) -> Self {
        Self::from_rng(node_count, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Create and initialise a blank network in one step.
    pub fn blank(node_count: usize) -> Self {
        let mut network = Self::new(node_count);
        network.initialise_nodes();
        network
    }

    fn from_rng(node_count: usize, rng: ChaCha8Rng) -> Self {
        Self {
            node_count,
            nodes: Vec::new(),
            pattern_count: 0,
            recovery: RecoveryConfig::default(),
            rng,
        }
    }

    pub fn with_recovery(mut self, recovery: RecoveryConfig) -> Self {
        self.recovery = recovery;
        self
    }

    /// (Re)build every node with zero weights and neutral activation.
    ///
    /// This is the only way back to an untrained network.
    pub fn initialise_nodes(&mut self) {
        self.nodes = (0..self.node_count)
            .map(|i| Node::new(vec![0.0; self.node_count], Activation::Neutral, i))
            .collect();
        self.pattern_count = 0;
        debug!(nodes = self.node_count, "Initialised blank network");
    }

    fn ensure_initialised(&self) -> Result<()> {
        if self.nodes.len() != self.node_count {
            return Err(HopfieldError::NotInitialised);
        }
        Ok(())
    }

    /// Store a pattern with the Hebbian outer-product rule.
    pub fn add_pattern(&mut self, pattern: &[Activation]) -> Result<()> {
        self.ensure_initialised()?;
        if pattern.len() != self.node_count {
            return Err(HopfieldError::InvalidPattern {
                expected: self.node_count,
                found: pattern.len(),
            });
        }

        let values: Vec<f64> = pattern.iter().map(|a| a.as_f64()).collect();
        let mut row = vec![0.0; self.node_count];
        for (i, node) in self.nodes.iter_mut().enumerate() {
            for (j, slot) in row.iter_mut().enumerate() {
                *slot = values[i] * values[j];
            }
            row[i] = 0.0;
            node.add_transposed_pattern(&row)?;
        }
        self.pattern_count += 1;

        debug!(
            patterns = self.pattern_count,
            nodes = self.node_count,
            "Stored pattern"
        );
        Ok(())
    }

    /// Store whatever the nodes currently hold.
    pub fn add_activations_pattern(&mut self) -> Result<()> {
        let pattern = self.activations();
        self.add_pattern(&pattern)
    }

    /// Overwrite every node's activation positionally.
    pub fn set_activations(&mut self, activations: &[Activation]) -> Result<()> {
        self.ensure_initialised()?;
        if activations.len() != self.nodes.len() {
            return Err(HopfieldError::activation_size_mismatch(
                self.nodes.len(),
                activations.len(),
            ));
        }
        for (node, &a) in self.nodes.iter_mut().zip(activations) {
            node.set_activation(a);
        }
        Ok(())
    }

    /// Write a single node's activation.
    pub fn set_activation(&mut self, index: usize, activation: Activation) -> Result<()> {
        self.node_mut(index)?.set_activation(activation);
        Ok(())
    }

    /// Toggle one node between high and low, returning its new value.
    pub fn toggle(&mut self, index: usize) -> Result<Activation> {
        Ok(self.node_mut(index)?.toggle())
    }

    /// Set every activation to neutral. Weights are untouched.
    pub fn clear(&mut self) {
        for node in &mut self.nodes {
            node.set_activation(Activation::Neutral);
        }
    }

    /// Snapshot of the current activations in node order.
    pub fn activations(&self) -> Vec<Activation> {
        self.nodes.iter().map(Node::activation).collect()
    }

    /// Relax the current activations to a fixed point and return it.
    pub fn recover(&mut self) -> Result<Vec<Activation>> {
        self.recover_report().map(|report| report.activations)
    }

    /// Relax using the network's own random source, reporting sweep counts.
    pub fn recover_report(&mut self) -> Result<RecoveryReport> {
        self.ensure_initialised()?;
        relax(&mut self.nodes, &mut self.rng, self.recovery)
    }

    /// Relax using a caller-supplied random source.
    pub fn recover_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<RecoveryReport> {
        self.ensure_initialised()?;
        relax(&mut self.nodes, rng, self.recovery)
    }

    /// Energy `-½ Σ_i Σ_j w_ij s_i s_j` of the current activations.
    pub fn energy(&self) -> f64 {
        energy(&self.nodes, &self.activations())
    }

    /// Energy of an arbitrary state under this network's weights.
    pub fn energy_of(&self, state: &[Activation]) -> Result<f64> {
        if state.len() != self.nodes.len() {
            return Err(HopfieldError::activation_size_mismatch(
                self.nodes.len(),
                state.len(),
            ));
        }
        Ok(energy(&self.nodes, state))
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    pub fn recovery_config(&self) -> RecoveryConfig {
        self.recovery
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    fn node_mut(&mut self, index: usize) -> Result<&mut Node> {
        let len = self.nodes.len();
        self.nodes
            .get_mut(index)
            .ok_or(HopfieldError::IndexOutOfRange { index, len })
    }

    /// Weight from node `i` to node `j`.
    pub fn weight(&self, i: usize, j: usize) -> Option<f64> {
        self.nodes.get(i)?.weights().get(j).copied()
    }

    /// The full weight matrix, one row per node.
    pub fn weight_matrix(&self) -> Vec<Vec<f64>> {
        self.nodes.iter().map(|n| n.weights().to_vec()).collect()
    }

    /// Whether `w[i][j] == w[j][i]` for every pair and the diagonal is zero.
    pub fn is_symmetric(&self) -> bool {
        self.nodes.iter().enumerate().all(|(i, node)| {
            node.self_weight() == 0.0
                && node
                    .weights()
                    .iter()
                    .enumerate()
                    .all(|(j, &w)| self.weight(j, i) == Some(w))
        })
    }

    #[cfg(test)]
    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }
}

fn energy(nodes: &[Node], state: &[Activation]) -> f64 {
    let total: f64 = nodes
        .iter()
        .zip(state)
        .map(|(node, s)| s.as_f64() * node.input_sum(state))
        .sum();
    -0.5 * total
}

fn relax<R: Rng + ?Sized>(
    nodes: &mut [Node],
    rng: &mut R,
    config: RecoveryConfig,
) -> Result<RecoveryReport> {
    let mut activations: Vec<Activation> = nodes.iter().map(Node::activation).collect();
    let mut sweeps = 0;
    let mut updates = 0;

    loop {
        if let Some(max) = config.max_sweeps {
            if sweeps >= max {
                warn!(sweeps, updates, "Recovery hit sweep cap before converging");
                return Err(HopfieldError::NotConverged { sweeps });
            }
        }
        sweeps += 1;

        let mut changed = false;
        let mut remaining: Vec<usize> = (0..nodes.len()).collect();
        while !remaining.is_empty() {
            let pick = rng.gen_range(0..remaining.len());
            let index = remaining.remove(pick);
            let next = nodes[index].calculate_activation(&activations);
            if next != activations[index] {
                activations[index] = next;
                changed = true;
                updates += 1;
            }
        }

        trace!(sweep = sweeps, changed, "Sweep complete");
        if !changed {
            break;
        }
    }

    debug!(sweeps, updates, "Recovery converged");
    Ok(RecoveryReport {
        activations,
        sweeps,
        updates,
        converged: true,
    })
}
