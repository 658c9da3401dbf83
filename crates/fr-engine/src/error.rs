//! Error types for ring setup and scope bookkeeping.
//!
//! Bad data never ends up here: unparsable colors, z-indices, and radii
//! resolve to defaults where they are read. These errors are integration
//! bugs that the caller should hear about immediately.

use thiserror::Error;

use crate::registry::ScopeId;

/// Errors surfaced by the ring engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RingError {
    /// A remote focus target was configured without a ring target.
    #[error(
        "focus ring was given a focus target but no ring target; a ring target is required to avoid ambiguity of where the ring will be applied"
    )]
    MissingRingTarget,

    /// Controlled focus was configured without a ring target.
    #[error(
        "focus ring was given a controlled focused value but no ring target; a ring target is required since it cannot be inferred through focus events"
    )]
    ControlledWithoutRingTarget,

    /// The scope does not exist or was removed.
    #[error("unknown focus ring scope {0}")]
    UnknownScope(ScopeId),

    /// The global scope is permanent.
    #[error("the global focus ring scope cannot be removed")]
    GlobalScope,
}

/// Result type for ring operations.
pub type Result<T> = std::result::Result<T, RingError>;
