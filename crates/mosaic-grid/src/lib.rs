//! Grid orchestration for the Mosaic block editor.
//!
//! [`Grid`] is the single owner of the committed block order. It decides what
//! sequence is displayed each frame (committed, reorder preview or resize
//! preview), drives row-span measurement and FLIP planning for whatever is
//! displayed, and turns a finished gesture into at most one committed
//! mutation.

mod commit;
mod config;
mod gesture;
mod grid;

pub use commit::{GridCommit, GridObserver};
pub use config::GridConfig;
pub use gesture::{Gesture, ReorderGesture, ResizeGesture};
pub use grid::Grid;

pub use mosaic_animate::{FlipPlan, FramePlayer, StyleSink, StyleWrite};
pub use mosaic_core::{Block, BlockId, BlockSequence, ColSpan, GridError, LayoutKey, Rect};
pub use mosaic_layout::{ContentMetrics, ResizeDirection, ResizeHandles};
