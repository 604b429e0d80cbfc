//! Hopfield Core Prelude: convenient imports for common usage.
//!
//! ```rust
//! use hopfield_core::prelude::*;
//! ```

pub use crate::activation::{hamming_distance, pattern_from_ints, Activation};
pub use crate::grid::{Glyphs, GridLayout};
pub use crate::network::{
    HopfieldNetwork, RecoveryConfig, RecoveryReport, DEFAULT_MAX_SWEEPS, DEFAULT_NODE_COUNT,
};
pub use crate::node::Node;

// Re-export error types
pub use crate::error::{HopfieldError, Result};
