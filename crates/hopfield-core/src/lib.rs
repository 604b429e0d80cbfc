//! # Hopfield Core
//!
//! A discrete Hopfield associative memory: a fully-connected set of ternary
//! nodes that stores patterns as attractors and recovers them from noisy or
//! partial cues.
//!
//! - **Node**: one neuron, holding its activation and its row of the weight matrix
//! - **HopfieldNetwork**: Hebbian storage and asynchronous stochastic recall
//! - **GridLayout**: row-major mapping between node indices and image cells
//!
//! ## Quick Start
//!
//! ```rust
//! use hopfield_core::prelude::*;
//!
//! let mut network = HopfieldNetwork::with_seed(4, 42);
//! network.initialise_nodes();
//!
//! let memory = pattern_from_ints(&[1, -1, 1, -1]).unwrap();
//! network.add_pattern(&memory).unwrap();
//!
//! // One bit flipped
//! let cue = pattern_from_ints(&[1, -1, 1, 1]).unwrap();
//! network.set_activations(&cue).unwrap();
//!
//! assert_eq!(network.recover().unwrap(), memory);
//! ```

pub mod activation;
pub mod error;
pub mod grid;
pub mod network;
pub mod node;
pub mod prelude;
