//! JavaScript commit callbacks.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use mosaic_core::{BlockId, ColSpan};
use mosaic_grid::GridObserver;
use wasm_bindgen::JsValue;

/// Host functions registered through `onReorderCommitted` / `onSpanCommitted`.
#[derive(Debug, Default)]
pub struct JsCallbacks {
    pub reorder: Option<Function>,
    pub span: Option<Function>,
}

/// Forwards grid commits to the registered host functions.
///
/// Shares the callback slots with the engine so functions registered after
/// the grid was built are still reached.
#[derive(Debug, Clone, Default)]
pub struct JsObserver {
    callbacks: Rc<RefCell<JsCallbacks>>,
}

impl JsObserver {
    pub fn new(callbacks: Rc<RefCell<JsCallbacks>>) -> Self {
        Self { callbacks }
    }
}

impl GridObserver for JsObserver {
    fn on_reorder_committed(&mut self, order: &[BlockId]) {
        let callbacks = self.callbacks.borrow();
        let Some(callback) = callbacks.reorder.as_ref() else {
            return;
        };
        let ids: Vec<&str> = order.iter().map(BlockId::as_str).collect();
        match serde_wasm_bindgen::to_value(&ids) {
            Ok(ids) => {
                if let Err(err) = callback.call1(&JsValue::NULL, &ids) {
                    tracing::warn!(?err, "reorder callback threw");
                }
            }
            Err(err) => tracing::warn!(%err, "could not serialize committed order"),
        }
    }

    fn on_span_committed(&mut self, id: &BlockId, span: ColSpan) {
        let callbacks = self.callbacks.borrow();
        let Some(callback) = callbacks.span.as_ref() else {
            return;
        };
        let id = JsValue::from_str(id.as_str());
        let span = JsValue::from(span.get());
        if let Err(err) = callback.call2(&JsValue::NULL, &id, &span) {
            tracing::warn!(?err, "span callback threw");
        }
    }
}
