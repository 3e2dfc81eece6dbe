//! Transient gesture state.

use mosaic_core::{BlockId, BlockSequence, ColSpan};
use mosaic_layout::{ReorderPreview, ResizeSession};

/// A drag-to-reorder in progress.
#[derive(Debug, Clone)]
pub struct ReorderGesture {
    pub dragged: BlockId,
    pub preview: ReorderPreview,
}

/// An edge-drag resize in progress.
#[derive(Debug, Clone)]
pub struct ResizeGesture {
    pub id: BlockId,
    pub session: ResizeSession,
    pub preview: Option<ColSpan>,
}

/// At most one gesture is active at a time.
#[derive(Debug, Clone, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Reorder(ReorderGesture),
    Resize(ResizeGesture),
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    pub fn is_reordering(&self) -> bool {
        matches!(self, Gesture::Reorder(_))
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self, Gesture::Resize(_))
    }

    /// Block the gesture acts on.
    pub fn subject(&self) -> Option<&BlockId> {
        match self {
            Gesture::Idle => None,
            Gesture::Reorder(g) => Some(&g.dragged),
            Gesture::Resize(g) => Some(&g.id),
        }
    }

    pub fn reorder_preview(&self) -> Option<&BlockSequence> {
        match self {
            Gesture::Reorder(g) => g.preview.get(),
            _ => None,
        }
    }

    /// Drop any preview while keeping the gesture itself.
    pub(crate) fn discard_preview(&mut self) {
        match self {
            Gesture::Idle => {}
            Gesture::Reorder(g) => g.preview.clear(),
            Gesture::Resize(g) => g.preview = None,
        }
    }
}
