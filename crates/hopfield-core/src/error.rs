//! Error types for Hopfield network operations.
//!
//! Every variant is a caller precondition violation. Operations validate
//! before touching any node, so a returned error means nothing was mutated.

use thiserror::Error;

/// Result type for Hopfield operations.
pub type Result<T> = std::result::Result<T, HopfieldError>;

/// Errors that can occur while storing, cueing or recovering patterns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HopfieldError {
    /// A weight row or activation vector has the wrong length.
    ///
    /// `node` is set when the mismatch was detected by a single node
    /// receiving a weight row.
    #[error("{}", size_mismatch_message(.node, .expected, .found))]
    SizeMismatch {
        node: Option<usize>,
        expected: usize,
        found: usize,
    },

    /// A pattern handed to storage does not cover every node.
    #[error("Bad pattern: expected {expected} values, found {found}")]
    InvalidPattern { expected: usize, found: usize },

    /// The network has no nodes yet; call `initialise_nodes` first.
    #[error("Network nodes have not been initialised")]
    NotInitialised,

    /// A single-node access outside `0..len`.
    #[error("Node index {index} out of range (network has {len} nodes)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Recovery hit its sweep cap while nodes were still changing.
    #[error("Recovery did not converge within {sweeps} sweeps")]
    NotConverged { sweeps: usize },

    /// A pattern string contained a character with no activation meaning.
    #[error("Invalid glyph {glyph:?} at cell {position}")]
    InvalidGlyph { glyph: char, position: usize },

    /// A grid layout with a zero dimension.
    #[error("Invalid grid layout {width}x{height}: both dimensions must be positive")]
    InvalidLayout { width: usize, height: usize },
}

fn size_mismatch_message(node: &Option<usize>, expected: &usize, found: &usize) -> String {
    match node {
        Some(index) => format!(
            "Node {}: has a different sized weight vector ({}) than the new pattern ({})",
            index, expected, found
        ),
        None => format!(
            "Number of activations ({}) does not match number of network nodes ({})",
            found, expected
        ),
    }
}

// Convenience constructors
impl HopfieldError {
    pub fn node_size_mismatch(node: usize, expected: usize, found: usize) -> Self {
        HopfieldError::SizeMismatch {
            node: Some(node),
            expected,
            found,
        }
    }

    pub fn activation_size_mismatch(expected: usize, found: usize) -> Self {
        HopfieldError::SizeMismatch {
            node: None,
            expected,
            found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_mismatch_names_the_node() {
        let err = HopfieldError::node_size_mismatch(3, 4, 5);
        let msg = err.to_string();
        assert!(msg.starts_with("Node 3:"), "got: {msg}");
        assert!(msg.contains('4') && msg.contains('5'));
    }

    #[test]
    fn activation_mismatch_message() {
        let err = HopfieldError::activation_size_mismatch(4, 2);
        assert_eq!(
            err.to_string(),
            "Number of activations (2) does not match number of network nodes (4)"
        );
    }
}
