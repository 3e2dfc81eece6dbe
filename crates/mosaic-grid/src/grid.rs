//! The grid orchestrator.

use std::borrow::Cow;
use std::collections::HashSet;

use mosaic_animate::{FlipAnimator, FlipPlan};
use mosaic_core::{Block, BlockId, BlockSequence, ColSpan, GridError, LayoutKey, Rect};
use mosaic_layout::{
    propose_reorder, ContentMetrics, MeasureTrigger, ReorderPreview, ResizeDirection,
    ResizeHandles, ResizeSession, RowSpanMeasurer,
};
use tracing::{debug, info, warn};

use crate::commit::{GridCommit, GridObserver};
use crate::config::GridConfig;
use crate::gesture::{Gesture, ReorderGesture, ResizeGesture};

/// Owner of the committed block order and the active gesture.
///
/// Every preview is derived from committed state on each event, so an invalid
/// reference or a cancelled gesture simply falls back to what is committed.
pub struct Grid {
    committed: BlockSequence,
    gesture: Gesture,
    config: GridConfig,
    editing: bool,
    measurer: RowSpanMeasurer,
    animator: FlipAnimator,
    // boxes may have moved without a key change since the last FLIP cycle
    reflow: bool,
    observer: Option<Box<dyn GridObserver>>,
}

impl Grid {
    /// Create a grid over `blocks`. Ids must be unique.
    pub fn new(blocks: Vec<Block>, config: GridConfig) -> Result<Self, GridError> {
        let committed = BlockSequence::new(blocks)?;
        Ok(Self {
            committed,
            gesture: Gesture::Idle,
            measurer: RowSpanMeasurer::new(config.layout.row_height_px),
            animator: FlipAnimator::new(config.flip.clone()),
            config,
            editing: false,
            reflow: false,
            observer: None,
        })
    }

    /// Install the callback that receives gesture commits.
    pub fn set_observer(&mut self, observer: impl GridObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Replace the configuration; row spans are remeasured on the next pass.
    pub fn set_config(&mut self, config: GridConfig) {
        if config.layout.row_height_px != self.config.layout.row_height_px {
            self.measurer = RowSpanMeasurer::new(config.layout.row_height_px);
        }
        self.measurer.invalidate();
        self.animator.set_config(config.flip.clone());
        if config.layout != self.config.layout {
            self.reflow = true;
        }
        self.config = config;
    }

    // --- Read views ------------------------------------------------------

    pub fn committed(&self) -> &BlockSequence {
        &self.committed
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Sequence to paint this frame.
    ///
    /// A resize preview wins over everything, then a reorder preview, then
    /// the committed order.
    pub fn displayed(&self) -> Cow<'_, BlockSequence> {
        match &self.gesture {
            Gesture::Resize(ResizeGesture { id, preview: Some(span), .. }) => {
                Cow::Owned(self.committed.with_span(id, *span))
            }
            Gesture::Reorder(ReorderGesture { preview, .. }) => match preview.get() {
                Some(sequence) => Cow::Borrowed(sequence),
                None => Cow::Borrowed(&self.committed),
            },
            _ => Cow::Borrowed(&self.committed),
        }
    }

    /// Structural key of the displayed sequence.
    pub fn layout_key(&self) -> LayoutKey {
        self.displayed().layout_key()
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Whether a block may be lifted for reordering right now.
    pub fn can_drag(&self, id: &BlockId) -> bool {
        !self.editing && !self.gesture.is_resizing() && self.committed.contains(id)
    }

    /// Whether `id` is the block currently lifted.
    pub fn is_dragging(&self, id: &BlockId) -> bool {
        matches!(&self.gesture, Gesture::Reorder(g) if &g.dragged == id)
    }

    /// Handles to show on a block.
    ///
    /// None while dragging or editing, and only the resizing block's handles
    /// while a resize is active.
    pub fn resize_handles(&self, id: &BlockId) -> ResizeHandles {
        if self.editing || self.gesture.is_reordering() {
            return ResizeHandles::none();
        }
        if let Gesture::Resize(g) = &self.gesture {
            if &g.id != id {
                return ResizeHandles::none();
            }
        }
        match self.displayed().get(id) {
            Some(block) => ResizeHandles::for_span(block.col_span),
            None => ResizeHandles::none(),
        }
    }

    /// Last measured row span of a block.
    pub fn row_span(&self, id: &BlockId) -> Option<u32> {
        self.measurer.span(id)
    }

    // --- Reorder gesture -------------------------------------------------

    /// Lift `id` to start a reorder.
    pub fn begin_drag(&mut self, id: &BlockId) -> Result<(), GridError> {
        if self.editing {
            return Err(GridError::EditingInProgress);
        }
        if self.gesture.is_resizing() {
            return Err(GridError::GestureInProgress);
        }
        if !self.committed.contains(id) {
            return Err(GridError::UnknownBlock { id: id.clone() });
        }
        debug!(block = %id, "drag started");
        self.gesture = Gesture::Reorder(ReorderGesture {
            dragged: id.clone(),
            preview: ReorderPreview::new(),
        });
        Ok(())
    }

    /// Pointer moved over `target`. Returns true when the preview changed.
    pub fn drag_over(&mut self, target: &BlockId, pointer_y: f64, target_rect: Rect) -> bool {
        let Gesture::Reorder(gesture) = &mut self.gesture else {
            return false;
        };
        if !self.committed.contains(&gesture.dragged) {
            warn!(block = %gesture.dragged, "dragged block no longer exists, ending drag");
            self.gesture = Gesture::Idle;
            return false;
        }
        if &gesture.dragged == target || !self.committed.contains(target) {
            return false;
        }

        let candidate =
            propose_reorder(&self.committed, &gesture.dragged, target, pointer_y, target_rect);
        let changed = gesture.preview.offer(candidate);
        if changed {
            debug!(block = %gesture.dragged, over = %target, "reorder preview updated");
        }
        changed
    }

    /// Pointer left the grid: show the committed order again.
    pub fn drag_leave_grid(&mut self) {
        if let Gesture::Reorder(gesture) = &mut self.gesture {
            gesture.preview.clear();
        }
    }

    /// Drop: commit the preview, if any, verbatim.
    pub fn drop_block(&mut self) -> Option<GridCommit> {
        if !self.gesture.is_reordering() {
            return None;
        }
        let Gesture::Reorder(mut gesture) = std::mem::take(&mut self.gesture) else {
            return None;
        };
        let preview = gesture.preview.take()?;
        let order: Vec<BlockId> = preview.ids().cloned().collect();
        self.committed = preview;
        info!(block = %gesture.dragged, "reorder committed");
        Some(self.emit(GridCommit::Reorder(order)))
    }

    /// Drag ended without a drop: discard the preview.
    pub fn end_drag(&mut self) {
        if self.gesture.is_reordering() {
            self.gesture = Gesture::Idle;
        }
    }

    // --- Resize gesture --------------------------------------------------

    /// Start dragging one edge of `id`.
    ///
    /// A block that has not been measured (`rendered_width` of zero) cannot be
    /// resized; its span is left as committed.
    pub fn begin_resize(
        &mut self,
        id: &BlockId,
        direction: ResizeDirection,
        pointer_x: f64,
        rendered_width: f64,
    ) -> Result<(), GridError> {
        if self.editing {
            return Err(GridError::EditingInProgress);
        }
        if !self.gesture.is_idle() {
            return Err(GridError::GestureInProgress);
        }
        let block = self
            .committed
            .get(id)
            .ok_or_else(|| GridError::UnknownBlock { id: id.clone() })?;

        let session = ResizeSession::begin(id, block.col_span, direction, pointer_x, rendered_width)
            .map_err(|err| {
                debug!(block = %id, %err, "resize cancelled");
                err
            })?;
        debug!(block = %id, ?direction, "resize started");
        self.gesture = Gesture::Resize(ResizeGesture {
            id: id.clone(),
            session,
            preview: None,
        });
        Ok(())
    }

    /// Pointer moved during a resize. Returns true when the preview changed.
    pub fn update_resize(&mut self, pointer_x: f64) -> bool {
        let Gesture::Resize(gesture) = &mut self.gesture else {
            return false;
        };
        if !self.committed.contains(&gesture.id) {
            warn!(block = %gesture.id, "resized block no longer exists, ending resize");
            self.gesture = Gesture::Idle;
            return false;
        }
        match gesture.session.update(pointer_x) {
            Some(span) if gesture.preview != Some(span) => {
                debug!(block = %gesture.id, %span, "resize preview updated");
                gesture.preview = Some(span);
                true
            }
            _ => false,
        }
    }

    /// Release the edge. Commits a span update only if the final span differs
    /// from the committed one.
    pub fn end_resize(&mut self, pointer_x: Option<f64>) -> Option<GridCommit> {
        if !self.gesture.is_resizing() {
            return None;
        }
        let Gesture::Resize(gesture) = std::mem::take(&mut self.gesture) else {
            return None;
        };
        let final_span = gesture.session.finish(pointer_x);
        let Some(block) = self.committed.get(&gesture.id) else {
            warn!(block = %gesture.id, "resized block no longer exists");
            return None;
        };
        if block.col_span == final_span {
            return None;
        }
        self.committed.set_span(&gesture.id, final_span).ok()?;
        info!(block = %gesture.id, span = %final_span, "span committed");
        Some(self.emit(GridCommit::Span {
            id: gesture.id,
            span: final_span,
        }))
    }

    /// Abandon a resize, restoring the committed span.
    pub fn cancel_resize(&mut self) {
        if self.gesture.is_resizing() {
            self.gesture = Gesture::Idle;
        }
    }

    // --- Committed-state mutations from the host UI ----------------------

    /// Block editing mode; gestures are refused while it is on.
    pub fn set_editing(&mut self, editing: bool) {
        self.editing = editing;
    }

    /// Append a block.
    pub fn add_block(&mut self, block: Block) -> Result<(), GridError> {
        self.committed.push(block)?;
        self.gesture.discard_preview();
        Ok(())
    }

    /// Delete a block. A gesture acting on it ends.
    pub fn remove_block(&mut self, id: &BlockId) -> Result<Block, GridError> {
        let removed = self.committed.remove(id)?;
        if self.gesture.subject() == Some(id) {
            self.gesture = Gesture::Idle;
        } else {
            self.gesture.discard_preview();
        }
        Ok(removed)
    }

    /// Set a block's span directly. Returns whether it changed.
    pub fn set_span(&mut self, id: &BlockId, span: ColSpan) -> Result<bool, GridError> {
        let current = self
            .committed
            .get(id)
            .map(|b| b.col_span)
            .ok_or_else(|| GridError::UnknownBlock { id: id.clone() })?;
        if current == span {
            return Ok(false);
        }
        self.committed.set_span(id, span)?;
        self.gesture.discard_preview();
        Ok(true)
    }

    /// Grow or shrink a block by `delta` columns, clamped to the valid range.
    pub fn step_span(&mut self, id: &BlockId, delta: i64) -> Result<ColSpan, GridError> {
        let current = self
            .committed
            .get(id)
            .map(|b| b.col_span)
            .ok_or_else(|| GridError::UnknownBlock { id: id.clone() })?;
        let next = current.step(delta);
        self.set_span(id, next)?;
        Ok(next)
    }

    // --- Measurement and animation ---------------------------------------

    /// Recompute row spans for the displayed sequence if the arrangement,
    /// padding or gap changed since the last complete pass.
    ///
    /// Returns the spans that changed.
    pub fn measure_rows<M>(&mut self, metrics: &M) -> Vec<(BlockId, u32)>
    where
        M: ContentMetrics + ?Sized,
    {
        let displayed = self.displayed().into_owned();
        let trigger = MeasureTrigger {
            key: displayed.layout_key(),
            padding: self.config.layout.padding,
            gap: self.config.layout.gap,
        };
        if !self.measurer.needs_measure(&trigger) {
            return Vec::new();
        }
        let known: HashSet<BlockId> = displayed
            .ids()
            .filter(|id| self.measurer.span(id).is_some())
            .cloned()
            .collect();
        let changed = self.measurer.measure(&displayed, self.config.layout.gap, metrics);
        // First spans of a block settle it in place; later changes move neighbours.
        if changed.iter().any(|(id, _)| known.contains(id)) {
            self.reflow = true;
        }
        changed
    }

    /// Force a re-measure on the next pass, e.g. after a block's content was
    /// edited.
    pub fn invalidate_measurements(&mut self) {
        self.measurer.invalidate();
    }

    /// Seed the animator with the boxes of the first paint.
    pub fn record_layout<I>(&mut self, measured: I)
    where
        I: IntoIterator<Item = (BlockId, Rect)>,
    {
        let key = self.layout_key();
        self.animator.record(&key, measured);
    }

    /// Plan the FLIP transition after the displayed arrangement was painted.
    ///
    /// Returns `None` when neither the arrangement nor the row spans, gap or
    /// padding changed since the last call. The measured boxes become the
    /// baseline either way.
    pub fn animate_layout<I>(&mut self, measured: I) -> Option<FlipPlan>
    where
        I: IntoIterator<Item = (BlockId, Rect)>,
    {
        let key = self.layout_key();
        let reflow = std::mem::take(&mut self.reflow);
        if reflow && self.animator.key() == Some(&key) {
            return Some(self.animator.on_reflow(&key, measured));
        }
        self.animator.on_layout(&key, measured)
    }

    /// Whether the displayed arrangement differs from the one last animated.
    pub fn layout_changed(&self) -> bool {
        self.animator.key() != Some(&self.layout_key())
    }

    fn emit(&mut self, commit: GridCommit) -> GridCommit {
        if let Some(observer) = self.observer.as_mut() {
            commit.notify(&mut **observer);
        }
        commit
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("committed", &self.committed)
            .field("gesture", &self.gesture)
            .field("config", &self.config)
            .field("editing", &self.editing)
            .field("reflow", &self.reflow)
            .finish_non_exhaustive()
    }
}
