//! Mutations emitted when a gesture completes.

use mosaic_core::{BlockId, ColSpan};

/// The single mutation a completed gesture commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCommit {
    /// New order of every block id.
    Reorder(Vec<BlockId>),
    /// New column span for one block.
    Span { id: BlockId, span: ColSpan },
}

/// Callback form of [`GridCommit`].
pub trait GridObserver {
    fn on_reorder_committed(&mut self, _order: &[BlockId]) {}

    fn on_span_committed(&mut self, _id: &BlockId, _span: ColSpan) {}
}

impl GridCommit {
    pub(crate) fn notify(&self, observer: &mut dyn GridObserver) {
        match self {
            GridCommit::Reorder(order) => observer.on_reorder_committed(order),
            GridCommit::Span { id, span } => observer.on_span_committed(id, *span),
        }
    }
}
