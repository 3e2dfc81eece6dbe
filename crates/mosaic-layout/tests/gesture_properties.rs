//! Property tests for the reorder and resize simulators.
//!
//! Reorder proposals run on every pointer move, so they must be pure,
//! deterministic and must never create or drop blocks.

use mosaic_core::{Block, BlockId, BlockSequence, ColSpan, Rect};
use mosaic_layout::{compute_row_span, propose_reorder, ResizeDirection, ResizeSession};
use proptest::prelude::*;

fn sequence(len: usize, spans: &[u8]) -> BlockSequence {
    let blocks = (0..len)
        .map(|i| {
            let span = ColSpan::clamped(spans.get(i).copied().unwrap_or(1) as i64);
            Block::new(format!("block-{i}"), span)
        })
        .collect();
    BlockSequence::new(blocks).expect("generated ids are unique")
}

fn sorted_ids(s: &BlockSequence) -> Vec<BlockId> {
    let mut ids: Vec<_> = s.ids().cloned().collect();
    ids.sort();
    ids
}

fn arb_case() -> impl Strategy<Value = (BlockSequence, usize, usize, f64)> {
    (1usize..24)
        .prop_flat_map(|len| {
            (
                Just(len),
                prop::collection::vec(1u8..=3, len),
                0..len,
                0..len,
                0.0f64..400.0,
            )
        })
        .prop_map(|(len, spans, dragged, target, y)| (sequence(len, &spans), dragged, target, y))
}

const TARGET_RECT: Rect = Rect { left: 0.0, top: 100.0, width: 120.0, height: 200.0 };

proptest! {
    #[test]
    fn reorder_is_deterministic((seq, d, t, y) in arb_case()) {
        let dragged = seq.as_slice()[d].id.clone();
        let target = seq.as_slice()[t].id.clone();
        let first = propose_reorder(&seq, &dragged, &target, y, TARGET_RECT);
        let second = propose_reorder(&seq, &dragged, &target, y, TARGET_RECT);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn reorder_preserves_id_multiset((seq, d, t, y) in arb_case()) {
        let dragged = seq.as_slice()[d].id.clone();
        let target = seq.as_slice()[t].id.clone();
        let proposed = propose_reorder(&seq, &dragged, &target, y, TARGET_RECT);
        prop_assert_eq!(sorted_ids(&proposed), sorted_ids(&seq));
        // spans travel with their block
        for block in &proposed {
            prop_assert_eq!(seq.get(&block.id).map(|b| b.col_span), Some(block.col_span));
        }
    }

    #[test]
    fn reorder_self_drag_is_identity((seq, d, _t, y) in arb_case()) {
        let dragged = seq.as_slice()[d].id.clone();
        let proposed = propose_reorder(&seq, &dragged, &dragged, y, TARGET_RECT);
        prop_assert_eq!(proposed, seq);
    }

    #[test]
    fn reorder_places_dragged_next_to_target((seq, d, t, y) in arb_case()) {
        prop_assume!(d != t);
        let dragged = seq.as_slice()[d].id.clone();
        let target = seq.as_slice()[t].id.clone();
        let proposed = propose_reorder(&seq, &dragged, &target, y, TARGET_RECT);
        let di = proposed.position(&dragged).unwrap();
        let ti = proposed.position(&target).unwrap();
        if y > TARGET_RECT.mid_y() {
            prop_assert_eq!(di, ti + 1);
        } else {
            prop_assert_eq!(di + 1, ti);
        }
    }

    #[test]
    fn resize_span_always_in_range(
        start in 1u8..=3,
        left in any::<bool>(),
        width in 1.0f64..2000.0,
        from in -5000.0f64..5000.0,
        to in -5000.0f64..5000.0,
    ) {
        let direction = if left { ResizeDirection::Left } else { ResizeDirection::Right };
        let session = ResizeSession::begin(
            &"a".into(),
            ColSpan::new(start).unwrap(),
            direction,
            from,
            width,
        ).unwrap();
        let span = session.span_at(to).get();
        prop_assert!((1..=3).contains(&span));
        prop_assert_eq!(session.span_at(from).get(), start);
    }

    #[test]
    fn row_span_is_minimal_cover(
        height in 0.0f64..5000.0,
        row in 1.0f64..50.0,
        gap in 0.0f64..40.0,
    ) {
        let span = compute_row_span(height, row, gap) as f64;
        prop_assert!(span >= 1.0);
        let covered = span * row + (span - 1.0) * gap;
        prop_assert!(covered + 1e-6 >= height);
        if span > 1.0 {
            let smaller = (span - 1.0) * row + (span - 2.0) * gap;
            prop_assert!(smaller < height + 1e-6);
        }
    }
}
