//! Drag-to-reorder simulation.
//!
//! While a block is lifted, every hover over another block proposes a full
//! candidate order. Candidates are always derived from the committed order,
//! never from an earlier candidate, so repeated hover events during one
//! gesture cannot drift or oscillate.

use mosaic_core::{BlockId, BlockSequence, Rect};
use tracing::debug;

/// Propose the order that results from dropping `dragged` next to `target`.
///
/// The dragged block goes immediately after the target when `pointer_y` is
/// below the target's vertical midpoint, otherwise immediately before it.
/// Returns `committed` unchanged when `dragged == target` or either id is not
/// in `committed`.
pub fn propose_reorder(
    committed: &BlockSequence,
    dragged: &BlockId,
    target: &BlockId,
    pointer_y: f64,
    target_rect: Rect,
) -> BlockSequence {
    if dragged == target {
        return committed.clone();
    }
    let (Some(source_index), Some(target_index)) =
        (committed.position(dragged), committed.position(target))
    else {
        debug!(%dragged, %target, "reorder references unknown block");
        return committed.clone();
    };

    let insert_after = pointer_y > target_rect.mid_y();

    // Target index once the dragged block has been taken out.
    let target_after_removal = if source_index < target_index {
        target_index - 1
    } else {
        target_index
    };
    let insert_at = target_after_removal + usize::from(insert_after);

    match committed.moved(source_index, insert_at) {
        Some(reordered) => reordered,
        None => committed.clone(),
    }
}

/// The candidate order currently shown during a drag.
#[derive(Debug, Clone, Default)]
pub struct ReorderPreview {
    current: Option<BlockSequence>,
}

impl ReorderPreview {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&BlockSequence> {
        self.current.as_ref()
    }

    /// Replace the preview if `candidate` has a different id order.
    ///
    /// Returns true when the preview changed and a re-render is due.
    pub fn offer(&mut self, candidate: BlockSequence) -> bool {
        let unchanged = self
            .current
            .as_ref()
            .is_some_and(|current| current.same_order(&candidate));
        if unchanged {
            return false;
        }
        self.current = Some(candidate);
        true
    }

    pub fn take(&mut self) -> Option<BlockSequence> {
        self.current.take()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_core::{Block, ColSpan};

    fn seq(ids: &[&str]) -> BlockSequence {
        BlockSequence::new(ids.iter().map(|id| Block::new(*id, ColSpan::MIN)).collect()).unwrap()
    }

    fn order(s: &BlockSequence) -> Vec<&str> {
        s.ids().map(|id| id.as_str()).collect()
    }

    const RECT: Rect = Rect { left: 0.0, top: 100.0, width: 200.0, height: 100.0 };
    const BELOW_MID: f64 = 180.0;
    const ABOVE_MID: f64 = 120.0;

    #[test]
    fn test_drag_first_below_last() {
        let s = seq(&["a", "b", "c"]);
        let r = propose_reorder(&s, &"a".into(), &"c".into(), BELOW_MID, RECT);
        assert_eq!(order(&r), ["b", "c", "a"]);
    }

    #[test]
    fn test_drag_first_above_last() {
        let s = seq(&["a", "b", "c"]);
        let r = propose_reorder(&s, &"a".into(), &"c".into(), ABOVE_MID, RECT);
        assert_eq!(order(&r), ["b", "a", "c"]);
    }

    #[test]
    fn test_drag_last_above_first() {
        let s = seq(&["a", "b", "c"]);
        let r = propose_reorder(&s, &"c".into(), &"a".into(), ABOVE_MID, RECT);
        assert_eq!(order(&r), ["c", "a", "b"]);
    }

    #[test]
    fn test_drag_last_below_first() {
        let s = seq(&["a", "b", "c"]);
        let r = propose_reorder(&s, &"c".into(), &"a".into(), BELOW_MID, RECT);
        assert_eq!(order(&r), ["a", "c", "b"]);
    }

    #[test]
    fn test_pointer_at_midpoint_inserts_before() {
        let s = seq(&["a", "b", "c"]);
        let r = propose_reorder(&s, &"a".into(), &"c".into(), RECT.mid_y(), RECT);
        assert_eq!(order(&r), ["b", "a", "c"]);
    }

    #[test]
    fn test_self_drag_is_noop() {
        let s = seq(&["a", "b", "c"]);
        let r = propose_reorder(&s, &"b".into(), &"b".into(), BELOW_MID, RECT);
        assert_eq!(r, s);
    }

    #[test]
    fn test_unknown_ids_are_noop() {
        let s = seq(&["a", "b"]);
        assert_eq!(propose_reorder(&s, &"x".into(), &"b".into(), BELOW_MID, RECT), s);
        assert_eq!(propose_reorder(&s, &"a".into(), &"x".into(), BELOW_MID, RECT), s);
    }

    #[test]
    fn test_adjacent_neighbour_already_in_place() {
        let s = seq(&["a", "b", "c"]);
        let r = propose_reorder(&s, &"a".into(), &"b".into(), ABOVE_MID, RECT);
        assert_eq!(order(&r), ["a", "b", "c"]);
    }

    #[test]
    fn test_spans_travel_with_blocks() {
        let s = BlockSequence::new(vec![
            Block::new("a", ColSpan::MAX),
            Block::new("b", ColSpan::MIN),
        ])
        .unwrap();
        let r = propose_reorder(&s, &"a".into(), &"b".into(), BELOW_MID, RECT);
        assert_eq!(r.as_slice()[1], Block::new("a", ColSpan::MAX));
    }

    #[test]
    fn test_preview_offer_dedupes_by_order() {
        let s = seq(&["a", "b", "c"]);
        let mut preview = ReorderPreview::new();
        let candidate = propose_reorder(&s, &"a".into(), &"c".into(), BELOW_MID, RECT);
        assert!(preview.offer(candidate.clone()));
        assert!(!preview.offer(candidate));
        let other = propose_reorder(&s, &"a".into(), &"c".into(), ABOVE_MID, RECT);
        assert!(preview.offer(other));
        assert_eq!(order(preview.get().unwrap()), ["b", "a", "c"]);
        preview.clear();
        assert!(preview.get().is_none());
    }
}
