//! Error types for the Mosaic engine.

use crate::types::BlockId;
use thiserror::Error;

/// Errors raised by grid operations.
///
/// None of these are fatal to the editor: the orchestrator turns every one of
/// them into a no-op that leaves committed state untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("Unknown block: {id}")]
    UnknownBlock { id: BlockId },

    #[error("Duplicate block id: {id}")]
    DuplicateBlock { id: BlockId },

    #[error("Degenerate geometry for block {id}: rendered width {width}px")]
    DegenerateGeometry { id: BlockId, width: f64 },

    #[error("Another gesture is already in progress")]
    GestureInProgress,

    #[error("Gestures are disabled while a block is being edited")]
    EditingInProgress,

    #[error("Column span out of range: {value}")]
    InvalidSpan { value: i64 },
}
