//! Errors surfaced by the bag samplers.

/// Errors for bag construction, weight updates, and weighted draws.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BagError {
    /// The item set supplied at construction (or reconfiguration) was empty.
    #[error("item set must be non-empty")]
    EmptyItemSet,
    /// Weight is negative or not finite, and the policy rejects such weights.
    #[error("weight must be finite and >= 0 (got {weight})")]
    InvalidWeight { weight: f64 },
    /// Every item quantized to zero replicas, so a refill produced nothing to draw.
    #[error("no item has a positive replica count; raise a weight to draw again")]
    EmptyCycle,
}

pub type Result<T, E = BagError> = std::result::Result<T, E>;
