//! WebAssembly bindings for the Mosaic grid engine.
//!
//! The host renders one child element per block inside a CSS grid container,
//! tagging each with `data-flip-id`, and forwards pointer events to the
//! engine. After every paint it calls `afterPaint()`, which measures the
//! painted items, writes their row spans and runs the FLIP transition.
//!
//! ## Example
//!
//! ```js
//! import { GridEngine } from 'mosaic-wasm';
//!
//! const engine = new GridEngine(
//!   [{ id: 'a', colSpan: 1 }, { id: 'b', colSpan: 2 }],
//!   { gap: 2, padding: 1 },
//! );
//! engine.onReorderCommitted((ids) => save(ids));
//! engine.onSpanCommitted((id, span) => saveSpan(id, span));
//! engine.mount(document.getElementById('grid'));
//!
//! item.addEventListener('dragover', (e) => {
//!   if (engine.dragOver(item.dataset.flipId, e.clientY, item)) render();
//! });
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use mosaic_core::{BlockId, ColSpan, GridError};
use mosaic_grid::{FramePlayer, Grid, GridCommit, GridConfig, ResizeDirection};
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement};

mod callbacks;
mod dom;
mod frame;
mod types;

pub use callbacks::*;
pub use dom::*;
pub use types::*;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(debug_assertions)]
    console_error_panic_hook::set_once();
}

/// Parse a resize direction name (`"left"` or `"right"`).
pub fn parse_direction(direction: &str) -> Option<ResizeDirection> {
    match direction {
        "left" => Some(ResizeDirection::Left),
        "right" => Some(ResizeDirection::Right),
        _ => None,
    }
}

fn grid_error(err: GridError) -> JsError {
    JsError::new(&err.to_string())
}

/// The main grid engine interface for JavaScript.
#[wasm_bindgen]
pub struct GridEngine {
    grid: Grid,
    callbacks: Rc<RefCell<JsCallbacks>>,
    container: Option<HtmlElement>,
    sink: Rc<RefCell<DomStyleSink>>,
    player: Rc<RefCell<FramePlayer>>,
    // bumped per played plan; a queued release only lands for its own plan
    release_generation: Rc<Cell<u64>>,
}

impl GridEngine {
    fn build(grid: Grid) -> Self {
        let callbacks = Rc::new(RefCell::new(JsCallbacks::default()));
        let mut grid = grid;
        grid.set_observer(JsObserver::new(Rc::clone(&callbacks)));
        Self {
            grid,
            callbacks,
            container: None,
            sink: Rc::new(RefCell::new(DomStyleSink::default())),
            player: Rc::new(RefCell::new(FramePlayer::new())),
            release_generation: Rc::new(Cell::new(0)),
        }
    }

    fn container(&self) -> Result<&HtmlElement, JsError> {
        self.container
            .as_ref()
            .ok_or_else(|| JsError::new("No container mounted. Call mount() first."))
    }

    /// Queue the release phase of the running FLIP plan two frames out, so
    /// the pinned transform is painted before it is cleared.
    fn schedule_release(&self) {
        let generation = self.release_generation.get().wrapping_add(1);
        self.release_generation.set(generation);

        let current = Rc::clone(&self.release_generation);
        let player = Rc::clone(&self.player);
        let sink = Rc::clone(&self.sink);
        let scheduled = frame::request_second_frame(move || {
            if current.get() != generation {
                return;
            }
            let written = player.borrow_mut().tick(&mut *sink.borrow_mut());
            tracing::trace!(written, "flip release phase");
        });
        if !scheduled {
            // No frame available; release now rather than leave items pinned.
            self.release_now();
        }
    }

    fn release_now(&self) {
        self.release_generation
            .set(self.release_generation.get().wrapping_add(1));
        self.player
            .borrow_mut()
            .tick(&mut *self.sink.borrow_mut());
    }
}

#[wasm_bindgen]
impl GridEngine {
    /// Create an engine from an array of `{ id, colSpan }` records and an
    /// optional config object.
    #[wasm_bindgen(constructor)]
    pub fn new(blocks: JsValue, config: JsValue) -> Result<GridEngine, JsError> {
        let blocks: Vec<BlockJs> = serde_wasm_bindgen::from_value(blocks)
            .map_err(|e| JsError::new(&format!("Invalid blocks: {}", e)))?;
        let config: GridConfig = if config.is_undefined() || config.is_null() {
            GridConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsError::new(&format!("Invalid config: {}", e)))?
        };
        let blocks = blocks
            .into_iter()
            .map(BlockJs::into_core)
            .collect::<Result<Vec<_>, _>>()
            .map_err(grid_error)?;
        let grid = Grid::new(blocks, config).map_err(grid_error)?;
        Ok(Self::build(grid))
    }

    /// Get the version of the engine.
    #[wasm_bindgen(js_name = version)]
    pub fn version() -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    /// Replace the committed blocks from a JSON string.
    ///
    /// Any gesture in flight is dropped.
    #[wasm_bindgen(js_name = loadBlocksFromString)]
    pub fn load_blocks_from_string(&mut self, json: &str) -> Result<(), JsError> {
        let blocks: Vec<BlockJs> = serde_json::from_str(json)
            .map_err(|e| JsError::new(&format!("Invalid JSON: {}", e)))?;
        let blocks = blocks
            .into_iter()
            .map(BlockJs::into_core)
            .collect::<Result<Vec<_>, _>>()
            .map_err(grid_error)?;
        let editing = self.grid.is_editing();
        let mut grid = Grid::new(blocks, self.grid.config().clone()).map_err(grid_error)?;
        grid.set_editing(editing);
        grid.set_observer(JsObserver::new(Rc::clone(&self.callbacks)));
        self.grid = grid;
        Ok(())
    }

    /// Apply a config object (`{ gap, padding, rowHeightPx, flip: {...} }`).
    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&mut self, config: JsValue) -> Result<(), JsError> {
        let config: GridConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsError::new(&format!("Invalid config: {}", e)))?;
        self.grid.set_config(config);
        Ok(())
    }

    /// Apply a config from a JSON string.
    #[wasm_bindgen(js_name = loadConfigFromString)]
    pub fn load_config_from_string(&mut self, json: &str) -> Result<(), JsError> {
        let config: GridConfig = serde_json::from_str(json)
            .map_err(|e| JsError::new(&format!("Invalid JSON: {}", e)))?;
        self.grid.set_config(config);
        Ok(())
    }

    /// Current config as a plain object.
    #[wasm_bindgen(js_name = getConfig)]
    pub fn get_config(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(self.grid.config())
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    /// Attach the grid container and record its current layout as the
    /// baseline for the first transition.
    pub fn mount(&mut self, container: HtmlElement) {
        let items = dom::grid_items(&container);
        self.grid.record_layout(dom::read_boxes(&items));
        *self.sink.borrow_mut() = DomStyleSink::new(items);
        self.container = Some(container);
    }

    /// Detach the container, landing any pending transition first.
    pub fn unmount(&mut self) {
        self.release_now();
        *self.sink.borrow_mut() = DomStyleSink::default();
        self.container = None;
    }

    /// Blocks to paint this frame, in display order.
    pub fn displayed(&self) -> Result<JsValue, JsError> {
        let displayed: Vec<DisplayedBlockJs> = self
            .grid
            .displayed()
            .iter()
            .map(|block| DisplayedBlockJs {
                id: block.id.to_string(),
                col_span: block.col_span.get(),
                row_span: self.grid.row_span(&block.id),
                dragging: self.grid.is_dragging(&block.id),
                can_drag: self.grid.can_drag(&block.id),
                handles: self.grid.resize_handles(&block.id).into(),
            })
            .collect();
        serde_wasm_bindgen::to_value(&displayed)
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    /// Committed block ids, in order.
    #[wasm_bindgen(js_name = committedOrder)]
    pub fn committed_order(&self) -> Vec<String> {
        self.grid
            .committed()
            .iter()
            .map(|block| block.id.to_string())
            .collect()
    }

    /// Identity of the displayed arrangement (ids and spans).
    #[wasm_bindgen(js_name = layoutKey)]
    pub fn layout_key(&self) -> String {
        self.grid.layout_key().to_string()
    }

    #[wasm_bindgen(js_name = canDrag)]
    pub fn can_drag(&self, id: &str) -> bool {
        self.grid.can_drag(&BlockId::from(id))
    }

    #[wasm_bindgen(js_name = resizeHandles)]
    pub fn resize_handles(&self, id: &str) -> Result<JsValue, JsError> {
        let handles = ResizeHandlesJs::from(self.grid.resize_handles(&BlockId::from(id)));
        serde_wasm_bindgen::to_value(&handles)
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    // --- Reorder ---------------------------------------------------------

    /// Lift a block. Returns false when a drag cannot start now.
    #[wasm_bindgen(js_name = beginDrag)]
    pub fn begin_drag(&mut self, id: &str) -> bool {
        match self.grid.begin_drag(&BlockId::from(id)) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(%err, id, "drag refused");
                false
            }
        }
    }

    /// Hover over `target`. Returns true when the preview changed and the
    /// host should re-render.
    #[wasm_bindgen(js_name = dragOver)]
    pub fn drag_over(&mut self, target_id: &str, client_y: f64, target: &Element) -> bool {
        let rect = dom::element_rect(target);
        self.grid
            .drag_over(&BlockId::from(target_id), client_y, rect)
    }

    /// The pointer left the grid container.
    #[wasm_bindgen(js_name = dragLeaveGrid)]
    pub fn drag_leave_grid(&mut self) {
        self.grid.drag_leave_grid();
    }

    /// Drop the lifted block. Returns true when an order was committed.
    #[wasm_bindgen(js_name = drop)]
    pub fn drop_block(&mut self) -> bool {
        matches!(self.grid.drop_block(), Some(GridCommit::Reorder(_)))
    }

    #[wasm_bindgen(js_name = endDrag)]
    pub fn end_drag(&mut self) {
        self.grid.end_drag();
    }

    // --- Resize ----------------------------------------------------------

    /// Press a resize handle of `id`. `block` is the block element whose
    /// rendered width defines one column step.
    #[wasm_bindgen(js_name = beginResize)]
    pub fn begin_resize(
        &mut self,
        id: &str,
        direction: &str,
        client_x: f64,
        block: &Element,
    ) -> Result<bool, JsError> {
        let direction = parse_direction(direction)
            .ok_or_else(|| JsError::new(&format!("Unknown resize direction: {}", direction)))?;
        let width = dom::element_rect(block).width;
        match self
            .grid
            .begin_resize(&BlockId::from(id), direction, client_x, width)
        {
            Ok(()) => Ok(true),
            Err(err) => {
                tracing::debug!(%err, id, "resize refused");
                Ok(false)
            }
        }
    }

    /// Pointer moved during a resize. Returns true when the previewed span
    /// changed.
    #[wasm_bindgen(js_name = updateResize)]
    pub fn update_resize(&mut self, client_x: f64) -> bool {
        self.grid.update_resize(client_x)
    }

    /// Release the handle. Returns the committed span, if it changed.
    #[wasm_bindgen(js_name = endResize)]
    pub fn end_resize(&mut self, client_x: Option<f64>) -> Option<u8> {
        match self.grid.end_resize(client_x) {
            Some(GridCommit::Span { span, .. }) => Some(span.get()),
            _ => None,
        }
    }

    #[wasm_bindgen(js_name = cancelResize)]
    pub fn cancel_resize(&mut self) {
        self.grid.cancel_resize();
    }

    // --- Host mutations --------------------------------------------------

    #[wasm_bindgen(js_name = setEditing)]
    pub fn set_editing(&mut self, editing: bool) {
        self.grid.set_editing(editing);
    }

    #[wasm_bindgen(js_name = addBlock)]
    pub fn add_block(&mut self, block: JsValue) -> Result<(), JsError> {
        let block: BlockJs = serde_wasm_bindgen::from_value(block)
            .map_err(|e| JsError::new(&format!("Invalid block: {}", e)))?;
        let block = block.into_core().map_err(grid_error)?;
        self.grid.add_block(block).map_err(grid_error)
    }

    #[wasm_bindgen(js_name = removeBlock)]
    pub fn remove_block(&mut self, id: &str) -> Result<(), JsError> {
        self.grid
            .remove_block(&BlockId::from(id))
            .map(|_| ())
            .map_err(grid_error)
    }

    /// Set a block's span directly. Returns true when it changed.
    #[wasm_bindgen(js_name = setSpan)]
    pub fn set_span(&mut self, id: &str, span: u8) -> Result<bool, JsError> {
        let span = ColSpan::try_from(span).map_err(grid_error)?;
        self.grid
            .set_span(&BlockId::from(id), span)
            .map_err(grid_error)
    }

    /// Keyboard step (`+1` / `-1`), clamped to the column range.
    #[wasm_bindgen(js_name = stepSpan)]
    pub fn step_span(&mut self, id: &str, delta: i32) -> Result<u8, JsError> {
        self.grid
            .step_span(&BlockId::from(id), i64::from(delta))
            .map(ColSpan::get)
            .map_err(grid_error)
    }

    // --- Callbacks -------------------------------------------------------

    /// Called with the full id order after a drop.
    #[wasm_bindgen(js_name = onReorderCommitted)]
    pub fn on_reorder_committed(&mut self, callback: Option<js_sys::Function>) {
        self.callbacks.borrow_mut().reorder = callback;
    }

    /// Called with `(id, span)` after a resize changed a span.
    #[wasm_bindgen(js_name = onSpanCommitted)]
    pub fn on_span_committed(&mut self, callback: Option<js_sys::Function>) {
        self.callbacks.borrow_mut().span = callback;
    }

    // --- Paint -----------------------------------------------------------

    /// Run after the host rendered the displayed blocks.
    ///
    /// Measures content heights and writes changed row spans, then reads the
    /// resulting item boxes and starts the FLIP transition when the
    /// arrangement, row spans, gap or padding changed. Returns true when a
    /// transition was started.
    #[wasm_bindgen(js_name = afterPaint)]
    pub fn after_paint(&mut self) -> Result<bool, JsError> {
        let items = dom::grid_items(self.container()?);

        // Land the previous transition before the new items replace the sink.
        self.release_now();
        *self.sink.borrow_mut() = DomStyleSink::new(items.clone());

        let heights = dom::read_content_heights(&items);
        let spans = self.grid.measure_rows(&heights);
        {
            let sink = self.sink.borrow();
            for (id, span) in &spans {
                sink.set_row_span(id, *span);
            }
        }

        let plan = self.grid.animate_layout(dom::read_boxes(&items));
        let Some(plan) = plan.filter(|plan| !plan.is_empty()) else {
            return Ok(false);
        };
        tracing::debug!(moves = plan.moves().count(), "flip transition");
        self.player
            .borrow_mut()
            .play(plan, &mut *self.sink.borrow_mut());
        self.schedule_release();
        Ok(true)
    }

    /// Re-measure every row span on the next `afterPaint`, e.g. after the
    /// host changed a block's content.
    #[wasm_bindgen(js_name = invalidateMeasurements)]
    pub fn invalidate_measurements(&mut self) {
        self.grid.invalidate_measurements();
    }

    /// Measured row span of every displayed block, keyed by id.
    #[wasm_bindgen(js_name = rowSpans)]
    pub fn row_spans(&self) -> Result<JsValue, JsError> {
        let spans: HashMap<String, u32> = self
            .grid
            .displayed()
            .iter()
            .filter_map(|block| {
                self.grid
                    .row_span(&block.id)
                    .map(|span| (block.id.to_string(), span))
            })
            .collect();
        serde_wasm_bindgen::to_value(&spans)
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_direction() {
        assert_eq!(parse_direction("left"), Some(ResizeDirection::Left));
        assert_eq!(parse_direction("right"), Some(ResizeDirection::Right));
        assert_eq!(parse_direction("up"), None);
    }
}
