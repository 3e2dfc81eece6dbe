//! Layout computation for Mosaic grids.
//!
//! This crate holds the pure parts of the interactive grid engine.
//!
//! # Architecture
//!
//! 1. **Measurement**: converts rendered content heights into masonry row spans
//! 2. **Reorder simulation**: proposes a live reordering while a block is dragged
//! 3. **Resize simulation**: proposes a live column span while an edge is dragged
//!
//! Nothing here mutates committed state; every function derives its answer
//! from the committed sequence it is handed.
//!
//! # Example
//!
//! ```ignore
//! use mosaic_layout::{compute_row_span, propose_reorder};
//!
//! let span = compute_row_span(100.0, 10.0, 8.0);
//! assert_eq!(span, 6);
//!
//! let preview = propose_reorder(&committed, &dragged, &target, pointer_y, target_rect);
//! ```

mod config;
mod measure;
mod reorder;
mod resize;

pub use config::{GapLevel, LayoutConfig, PaddingLevel};
pub use measure::{compute_row_span, ContentMetrics, MeasureTrigger, RowSpanMeasurer};
pub use reorder::{propose_reorder, ReorderPreview};
pub use resize::{ResizeDirection, ResizeHandles, ResizeSession};
