//! `requestAnimationFrame` scheduling.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Run `callback` on the next animation frame.
///
/// Returns false when no frame could be requested (no window, or the call
/// was rejected); the callback is then never run.
pub fn request_frame<F>(callback: F) -> bool
where
    F: FnOnce() + 'static,
{
    let Some(window) = web_sys::window() else {
        return false;
    };
    let cb = Closure::once_into_js(move |_ts: f64| callback());
    window.request_animation_frame(cb.unchecked_ref()).is_ok()
}

/// Run `callback` on the frame after next.
///
/// Styles written before this call are resolved by the browser in the next
/// frame, so whatever `callback` writes starts a transition from them. When
/// the second frame cannot be requested the callback runs at the first.
/// Returns false when not even the first frame could be requested; the
/// callback is then never run.
pub fn request_second_frame<F>(callback: F) -> bool
where
    F: FnOnce() + 'static,
{
    let slot = Rc::new(RefCell::new(Some(callback)));
    request_frame(move || {
        let pending = Rc::clone(&slot);
        if !request_frame(move || run_once(&pending)) {
            run_once(&slot);
        }
    })
}

fn run_once<F: FnOnce()>(slot: &Rc<RefCell<Option<F>>>) {
    let callback = slot.borrow_mut().take();
    if let Some(callback) = callback {
        callback();
    }
}
