//! Error types for flux kernel evaluation.

use thiserror::Error;

use crate::properties::StateError;

/// Errors that can occur while evaluating a flux kernel.
///
/// Every variant is fatal for the interface being evaluated: no partial
/// flux vector is ever returned alongside an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluxError {
    /// The property provider rejected a node state.
    #[error(transparent)]
    InvalidState(#[from] StateError),

    /// Unrecognized radial model selector.
    #[error("Unrecognized radial variant selector: {0} (expected 1 or 2)")]
    InvalidVariant(i32),

    /// Node index outside a per-node parameter array.
    #[error("Node {index} out of range for '{array}' (length {len})")]
    IndexOutOfRange {
        array: &'static str,
        index: usize,
        len: usize,
    },

    /// Operands carry different numbers of species.
    #[error("Species count mismatch: {left} vs {right}")]
    SpeciesCountMismatch { left: usize, right: usize },

    /// Parameter set violates its construction rules.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl FluxError {
    /// Create an invalid parameter error.
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Whether the error originates from the property provider.
    pub fn is_state_error(&self) -> bool {
        matches!(self, Self::InvalidState(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_error_is_transparent() {
        let inner = StateError::InvalidTemperature(-5.0);
        let err = FluxError::from(inner.clone());
        assert!(err.is_state_error());
        assert_eq!(err.to_string(), inner.to_string());
    }

    #[test]
    fn test_index_error_display() {
        let err = FluxError::IndexOutOfRange {
            array: "r_jph",
            index: 7,
            len: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains("r_jph"));
        assert!(msg.contains('7'));
    }
}
