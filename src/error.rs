//! Error types for layer synchronization.

use crate::engine::EngineError;
use crate::geo::GeometryKind;

/// Result type for layer operations.
pub type LayerResult<T> = Result<T, LayerError>;

/// Errors surfaced to the owner of a [`Layer`](crate::Layer).
///
/// Unsupported shape kinds, stale identities and missing callbacks are not
/// errors; they are skipped where they occur.
#[derive(Debug, thiserror::Error)]
pub enum LayerError {
    #[error("map engine error: {0}")]
    Engine(#[from] EngineError),
    #[error("layer {id} is {state}, cannot {operation}")]
    InvalidState {
        id: String,
        state: &'static str,
        operation: &'static str,
    },
    #[error("{kind:?} geometry needs coordinates nested {expected} deep, found {found}")]
    CoordinateDepth {
        kind: GeometryKind,
        expected: usize,
        found: usize,
    },
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
