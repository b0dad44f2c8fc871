//! Error type for the diff engine.

use thiserror::Error;

/// Failures the engine reports before producing any output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffError {
    /// The differencer table for this input would exceed the cell budget.
    #[error("diff table of {len_a}x{len_b} cells exceeds the limit of {limit} cells")]
    CapacityExceeded {
        len_a: usize,
        len_b: usize,
        limit: usize,
    },

    /// Sequence lengths too large to be stored in a packed table cell.
    #[error("sequence lengths {len_a} and {len_b} overflow the diff cost range")]
    CostOverflow { len_a: usize, len_b: usize },

    /// A flat position-change array whose length is not a multiple of 3.
    #[error("position change array has length {0}, expected a multiple of 3")]
    MalformedPositionChanges(usize),
}

impl DiffError {
    /// Return a machine-readable error code string for this error variant.
    pub fn code(&self) -> &str {
        match self {
            Self::CapacityExceeded { .. } => "CAPACITY_EXCEEDED",
            Self::CostOverflow { .. } => "COST_OVERFLOW",
            Self::MalformedPositionChanges(_) => "MALFORMED_POSITION_CHANGES",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_message() {
        let err = DiffError::CapacityExceeded {
            len_a: 10,
            len_b: 20,
            limit: 100,
        };
        assert_eq!(
            err.to_string(),
            "diff table of 10x20 cells exceeds the limit of 100 cells"
        );
        assert_eq!(err.code(), "CAPACITY_EXCEEDED");
    }
}
