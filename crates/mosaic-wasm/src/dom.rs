//! DOM reads and writes for the grid container.
//!
//! A paint pass runs two read/write rounds: content heights, then row spans;
//! item boxes, then transforms. Reads are batched ahead of the writes of
//! their round.

use std::collections::HashMap;

use mosaic_animate::{StyleSink, StyleWrite};
use mosaic_core::{BlockId, Rect};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

/// Attribute carrying the block id on each grid item.
pub const FLIP_ID_ATTR: &str = "data-flip-id";

fn rect_of(element: &Element) -> Rect {
    let r = element.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.width(), r.height())
}

/// Direct children of `container` that carry a block id.
pub fn grid_items(container: &Element) -> Vec<(BlockId, HtmlElement)> {
    let children = container.children();
    (0..children.length())
        .filter_map(|i| children.item(i))
        .filter_map(|element| {
            let id = element.get_attribute(FLIP_ID_ATTR)?;
            let element = element.dyn_into::<HtmlElement>().ok()?;
            Some((BlockId(id), element))
        })
        .collect()
}

/// Height of each item's content body (its last element child).
pub fn read_content_heights(items: &[(BlockId, HtmlElement)]) -> HashMap<BlockId, f64> {
    items
        .iter()
        .filter_map(|(id, element)| {
            let content = element.last_element_child()?;
            Some((id.clone(), content.get_bounding_client_rect().height()))
        })
        .collect()
}

/// Laid-out box of each item, in DOM order.
///
/// Offsets are relative to the offset parent and ignore transforms, so an
/// item still gliding or a scrolled page does not read as a layout change.
pub fn read_boxes(items: &[(BlockId, HtmlElement)]) -> Vec<(BlockId, Rect)> {
    items
        .iter()
        .map(|(id, element)| {
            let rect = Rect::new(
                f64::from(element.offset_left()),
                f64::from(element.offset_top()),
                f64::from(element.offset_width()),
                f64::from(element.offset_height()),
            );
            (id.clone(), rect)
        })
        .collect()
}

/// Block rectangle used as the reference for drop-position and resize math.
pub fn element_rect(element: &Element) -> Rect {
    rect_of(element)
}

/// Writes inline styles onto grid items.
#[derive(Debug, Default)]
pub struct DomStyleSink {
    items: HashMap<BlockId, HtmlElement>,
}

impl DomStyleSink {
    pub fn new(items: Vec<(BlockId, HtmlElement)>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    /// Make the item span `span` implicit rows.
    pub fn set_row_span(&self, id: &BlockId, span: u32) {
        if let Some(element) = self.items.get(id) {
            let _ = element
                .style()
                .set_property("grid-row-end", &format!("span {}", span));
        }
    }
}

impl StyleSink for DomStyleSink {
    fn apply(&mut self, write: &StyleWrite) {
        // Element may have been removed since the plan was made.
        let Some(element) = self.items.get(&write.id) else {
            return;
        };
        let style = element.style();
        let _ = style.set_property("transform", &write.style.transform_css());
        let _ = style.set_property("transition", &write.style.transition_css());
    }
}
