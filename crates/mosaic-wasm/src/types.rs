//! TypeScript-friendly type definitions for WASM bindings.

use serde::{Deserialize, Serialize};
use mosaic_core::{Block, BlockId, ColSpan, GridError};
use mosaic_layout::ResizeHandles;

/// Block record from JavaScript.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockJs {
    pub id: String,
    #[serde(default = "default_col_span")]
    pub col_span: u8,
}

fn default_col_span() -> u8 {
    1
}

impl BlockJs {
    pub fn into_core(self) -> Result<Block, GridError> {
        let col_span = ColSpan::try_from(self.col_span)?;
        Ok(Block::new(BlockId(self.id), col_span))
    }
}

/// Handle visibility for JavaScript.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResizeHandlesJs {
    pub left: bool,
    pub right: bool,
}

impl From<ResizeHandles> for ResizeHandlesJs {
    fn from(handles: ResizeHandles) -> Self {
        Self {
            left: handles.left,
            right: handles.right,
        }
    }
}

/// One block as it should be painted this frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayedBlockJs {
    pub id: String,
    pub col_span: u8,
    /// Measured masonry row span, once known.
    pub row_span: Option<u32>,
    /// The block is lifted and should stay in place but be hidden.
    pub dragging: bool,
    pub can_drag: bool,
    pub handles: ResizeHandlesJs,
}
