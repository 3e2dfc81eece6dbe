//! Two-frame playback of a [`FlipPlan`].

use std::mem;

use crate::flip::FlipPlan;
use crate::style::{StyleSink, StyleWrite};

/// Sequences the two phases of a plan across frame boundaries.
///
/// `play` writes the first phase synchronously and holds the second phase
/// until the host's next animation frame calls `tick`. The browser binding
/// drives `tick` from `requestAnimationFrame`; tests drive it by hand.
#[derive(Debug, Default)]
pub struct FramePlayer {
    pending: Vec<StyleWrite>,
}

impl FramePlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a second phase is waiting for the next frame.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Apply the plan's first phase now and queue its second phase.
    ///
    /// A second phase still queued from an earlier plan is flushed first so
    /// no element is left pinned.
    pub fn play<S>(&mut self, plan: FlipPlan, sink: &mut S)
    where
        S: StyleSink + ?Sized,
    {
        self.tick(sink);
        for write in &plan.first_frame {
            sink.apply(write);
        }
        self.pending = plan.second_frame;
    }

    /// Apply the queued second phase. Returns the number of writes.
    pub fn tick<S>(&mut self, sink: &mut S) -> usize
    where
        S: StyleSink + ?Sized,
    {
        let pending = mem::take(&mut self.pending);
        for write in &pending {
            sink.apply(write);
        }
        pending.len()
    }

    /// Hand the queued second phase to a host scheduler.
    pub fn take_pending(&mut self) -> Vec<StyleWrite> {
        mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flip::FlipAnimator;
    use mosaic_core::{Block, BlockId, BlockSequence, ColSpan, Rect};

    fn plan() -> FlipPlan {
        let seq = |ids: &[&str]| {
            BlockSequence::new(ids.iter().map(|id| Block::new(*id, ColSpan::MIN)).collect())
                .unwrap()
                .layout_key()
        };
        let mut animator = FlipAnimator::default();
        animator.record(&seq(&["a", "b"]), [
            (BlockId::from("a"), Rect::new(0.0, 0.0, 10.0, 10.0)),
            (BlockId::from("b"), Rect::new(20.0, 0.0, 10.0, 10.0)),
        ]);
        animator
            .on_layout(&seq(&["b", "a"]), [
                (BlockId::from("a"), Rect::new(20.0, 0.0, 10.0, 10.0)),
                (BlockId::from("b"), Rect::new(0.0, 0.0, 10.0, 10.0)),
            ])
            .unwrap()
    }

    #[test]
    fn test_first_phase_then_second_on_tick() {
        let mut sink: Vec<StyleWrite> = Vec::new();
        let mut player = FramePlayer::new();
        player.play(plan(), &mut sink);

        assert_eq!(sink.len(), 2);
        assert_eq!(sink[0].style.transform_css(), "translate(-20px, 0px)");
        assert!(player.has_pending());

        assert_eq!(player.tick(&mut sink), 2);
        assert_eq!(sink[2].style.transform_css(), "");
        assert_eq!(sink[2].style.transition_css(), "transform 300ms ease-in-out");
        assert!(!player.has_pending());
        assert_eq!(player.tick(&mut sink), 0);
    }

    #[test]
    fn test_replay_flushes_previous_second_phase() {
        let mut sink: Vec<StyleWrite> = Vec::new();
        let mut player = FramePlayer::new();
        player.play(plan(), &mut sink);
        player.play(plan(), &mut sink);
        // first pins, flushed releases, second pins
        assert_eq!(sink.len(), 6);
        assert!(sink[2].style.transform.is_none());
        assert!(sink[4].style.transform.is_some());
    }

    #[test]
    fn test_empty_plan_writes_nothing() {
        let mut sink: Vec<StyleWrite> = Vec::new();
        let mut player = FramePlayer::new();
        player.play(FlipPlan::default(), &mut sink);
        assert!(sink.is_empty());
        assert!(!player.has_pending());
    }
}
