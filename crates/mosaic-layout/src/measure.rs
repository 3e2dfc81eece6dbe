//! Masonry row-span measurement.
//!
//! Each block sits in a grid of fixed-height implicit rows. After content is
//! rendered its height is read back and converted into the number of rows the
//! block must span.

use std::collections::HashMap;

use mosaic_core::{BlockId, BlockSequence, LayoutKey};
use tracing::debug;

use crate::config::{GapLevel, PaddingLevel};

/// Number of rows of height `row_height` needed to cover `content_height`.
///
/// A cell spanning `n` rows is `n * row_height + (n - 1) * row_gap` tall, so
/// the minimal covering span is `ceil((h + gap) / (row_height + gap))`.
/// Always at least 1.
pub fn compute_row_span(content_height: f64, row_height: f64, row_gap: f64) -> u32 {
    let height = if content_height.is_finite() { content_height.max(0.0) } else { 0.0 };
    let gap = if row_gap.is_finite() { row_gap.max(0.0) } else { 0.0 };
    let unit = row_height + gap;
    if !(unit.is_finite() && unit > 0.0) {
        return 1;
    }
    let span = ((height + gap) / unit).ceil();
    if span < 1.0 {
        1
    } else if span > u32::MAX as f64 {
        u32::MAX
    } else {
        span as u32
    }
}

/// Source of rendered content heights.
pub trait ContentMetrics {
    /// Height in pixels of the block's rendered body, or `None` if it is not
    /// mounted yet.
    fn content_height(&self, id: &BlockId) -> Option<f64>;
}

impl ContentMetrics for HashMap<BlockId, f64> {
    fn content_height(&self, id: &BlockId) -> Option<f64> {
        self.get(id).copied()
    }
}

/// Inputs whose change invalidates every measured span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasureTrigger {
    pub key: LayoutKey,
    pub padding: PaddingLevel,
    pub gap: GapLevel,
}

/// Keeps the last measured row span per block.
#[derive(Debug, Clone)]
pub struct RowSpanMeasurer {
    row_height: f64,
    spans: HashMap<BlockId, u32>,
    last_trigger: Option<MeasureTrigger>,
    // false while some block could not be measured on the last pass
    complete: bool,
}

impl RowSpanMeasurer {
    pub fn new(row_height: f64) -> Self {
        Self {
            row_height,
            spans: HashMap::new(),
            last_trigger: None,
            complete: true,
        }
    }

    pub fn row_height(&self) -> f64 {
        self.row_height
    }

    /// Whether a pass is due for `trigger`. Records the trigger when it is.
    ///
    /// A pass is also due when the previous one skipped unmounted blocks.
    pub fn needs_measure(&mut self, trigger: &MeasureTrigger) -> bool {
        if self.complete && self.last_trigger.as_ref() == Some(trigger) {
            return false;
        }
        self.last_trigger = Some(trigger.clone());
        true
    }

    /// Force the next `needs_measure` to report true.
    pub fn invalidate(&mut self) {
        self.last_trigger = None;
    }

    /// Last measured span for a block.
    pub fn span(&self, id: &BlockId) -> Option<u32> {
        self.spans.get(id).copied()
    }

    /// Run one measurement pass over `blocks`.
    ///
    /// Blocks without a measurable body are skipped and picked up on a later
    /// pass. Returns only the spans that changed.
    pub fn measure<M>(&mut self, blocks: &BlockSequence, gap: GapLevel, metrics: &M) -> Vec<(BlockId, u32)>
    where
        M: ContentMetrics + ?Sized,
    {
        self.spans.retain(|id, _| blocks.contains(id));

        let gap_px = gap.px();
        let mut changed = Vec::new();
        self.complete = true;
        for block in blocks {
            let Some(height) = metrics.content_height(&block.id) else {
                debug!(block = %block.id, "content not mounted, skipping row span");
                self.complete = false;
                continue;
            };
            let span = compute_row_span(height, self.row_height, gap_px);
            if self.spans.insert(block.id.clone(), span) != Some(span) {
                changed.push((block.id.clone(), span));
            }
        }
        changed
    }
}
