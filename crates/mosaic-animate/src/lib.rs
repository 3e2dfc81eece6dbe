//! FLIP (First, Last, Invert, Play) transitions for keyed grid items.
//!
//! Layout changes are animated without animating layout: after the DOM has
//! moved an element to its new slot, a transform pins it back at its old
//! position for one frame, then the transform is cleared under a finite
//! transition so the element glides into place.
//!
//! The animator is host-agnostic. It consumes measured rectangles keyed by
//! [`BlockId`](mosaic_core::BlockId) and produces a [`FlipPlan`] of style
//! writes split across two frames. A [`StyleSink`] applies the writes and a
//! [`FramePlayer`] sequences the two frames.

mod flip;
mod frame;
mod style;

pub use flip::{FlipAnimator, FlipPlan};
pub use frame::FramePlayer;
pub use style::{ElementStyle, FlipConfig, StyleSink, StyleWrite, Transition, Translate};
