//! The FLIP state machine.

use glam::DVec2;
use indexmap::IndexMap;
use mosaic_core::{BlockId, LayoutKey, Rect};
use tracing::debug;

use crate::style::{ElementStyle, FlipConfig, StyleWrite};

/// Style writes for one layout change, split across two frames.
///
/// `first_frame` pins moved elements at their old position without a
/// transition; `second_frame` clears the transform under an eased transition.
/// The two batches must land in different frames or the jump back to the old
/// position would itself animate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlipPlan {
    pub first_frame: Vec<StyleWrite>,
    pub second_frame: Vec<StyleWrite>,
}

impl FlipPlan {
    pub fn is_empty(&self) -> bool {
        self.first_frame.is_empty()
    }

    /// Moved elements and the offset each one is pinned at.
    pub fn moves(&self) -> impl Iterator<Item = (&BlockId, DVec2)> + '_ {
        self.first_frame
            .iter()
            .filter_map(|w| w.style.transform.map(|t| (&w.id, t.0)))
    }
}

/// Tracks the last measured box of every keyed element.
#[derive(Debug, Clone, Default)]
pub struct FlipAnimator {
    config: FlipConfig,
    boxes: IndexMap<BlockId, Rect>,
    key: Option<LayoutKey>,
}

impl FlipAnimator {
    pub fn new(config: FlipConfig) -> Self {
        Self {
            config,
            boxes: IndexMap::new(),
            key: None,
        }
    }

    pub fn config(&self) -> &FlipConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: FlipConfig) {
        self.config = config;
    }

    /// Boxes recorded by the last cycle.
    pub fn snapshot(&self) -> &IndexMap<BlockId, Rect> {
        &self.boxes
    }

    pub fn key(&self) -> Option<&LayoutKey> {
        self.key.as_ref()
    }

    /// Seed the baseline without animating (first paint).
    pub fn record<I>(&mut self, key: &LayoutKey, measured: I)
    where
        I: IntoIterator<Item = (BlockId, Rect)>,
    {
        self.boxes = measured.into_iter().collect();
        self.key = Some(key.clone());
    }

    /// Run one cycle after the DOM reflects the arrangement for `key`.
    ///
    /// The measured boxes always replace the baseline. Returns `None` when
    /// `key` matches the previous cycle; otherwise the returned plan moves
    /// every element present in both snapshots whose origin changed.
    /// Elements appearing for the first time are not animated; vanished ones
    /// are dropped.
    pub fn on_layout<I>(&mut self, key: &LayoutKey, measured: I) -> Option<FlipPlan>
    where
        I: IntoIterator<Item = (BlockId, Rect)>,
    {
        if self.key.as_ref() == Some(key) {
            self.boxes = measured.into_iter().collect();
            return None;
        }
        Some(self.replace(key, measured.into_iter().collect()))
    }

    /// Run a cycle for a reflow that left the key unchanged (row spans, gap
    /// or padding changed).
    pub fn on_reflow<I>(&mut self, key: &LayoutKey, measured: I) -> FlipPlan
    where
        I: IntoIterator<Item = (BlockId, Rect)>,
    {
        self.replace(key, measured.into_iter().collect())
    }

    fn replace(&mut self, key: &LayoutKey, new_boxes: IndexMap<BlockId, Rect>) -> FlipPlan {
        let plan = self.invert(&new_boxes);
        debug!(moved = plan.first_frame.len(), tracked = new_boxes.len(), "flip cycle");

        self.boxes = new_boxes;
        self.key = Some(key.clone());
        plan
    }

    /// Drop all recorded state.
    pub fn reset(&mut self) {
        self.boxes.clear();
        self.key = None;
    }

    fn invert(&self, new_boxes: &IndexMap<BlockId, Rect>) -> FlipPlan {
        let mut plan = FlipPlan::default();
        for (id, new_box) in new_boxes {
            let Some(old_box) = self.boxes.get(id) else {
                continue;
            };
            let offset = new_box.offset_from(old_box);
            if offset == DVec2::ZERO {
                continue;
            }
            plan.first_frame.push(StyleWrite {
                id: id.clone(),
                style: ElementStyle::pinned(offset),
            });
            plan.second_frame.push(StyleWrite {
                id: id.clone(),
                style: ElementStyle::released(&self.config),
            });
        }
        plan
    }
}
