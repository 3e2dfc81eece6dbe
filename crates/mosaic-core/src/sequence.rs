//! The ordered block sequence and its structural key.

use std::collections::HashSet;
use std::fmt;

use crate::errors::GridError;
use crate::types::{Block, BlockId, ColSpan};

/// An ordered sequence of blocks with unique ids.
///
/// Order is reading/visual order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockSequence {
    blocks: Vec<Block>,
}

impl BlockSequence {
    /// Build a sequence, rejecting duplicate ids.
    pub fn new(blocks: Vec<Block>) -> Result<Self, GridError> {
        let mut seen = HashSet::with_capacity(blocks.len());
        for block in &blocks {
            if !seen.insert(&block.id) {
                return Err(GridError::DuplicateBlock { id: block.id.clone() });
            }
        }
        Ok(Self { blocks })
    }

    /// Wrap blocks already known to be unique (output of a permutation).
    pub(crate) fn from_unique(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn as_slice(&self) -> &[Block] {
        &self.blocks
    }

    pub fn ids(&self) -> impl Iterator<Item = &BlockId> + '_ {
        self.blocks.iter().map(|b| &b.id)
    }

    pub fn position(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| &b.id == id)
    }

    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.get(id).is_some()
    }

    /// Compare id order only; spans and other fields are ignored.
    pub fn same_order(&self, other: &BlockSequence) -> bool {
        self.len() == other.len() && self.ids().eq(other.ids())
    }

    /// Copy of this sequence with one block's span substituted.
    pub fn with_span(&self, id: &BlockId, col_span: ColSpan) -> BlockSequence {
        let blocks = self
            .blocks
            .iter()
            .map(|b| if &b.id == id { b.with_span(col_span) } else { b.clone() })
            .collect();
        Self::from_unique(blocks)
    }

    /// Move the block at `from` so it ends up at `to` (indices after removal).
    ///
    /// Returns `None` when `from` is out of range.
    pub fn moved(&self, from: usize, to: usize) -> Option<BlockSequence> {
        let mut blocks = self.blocks.clone();
        if from >= blocks.len() {
            return None;
        }
        let removed = blocks.remove(from);
        let to = to.min(blocks.len());
        blocks.insert(to, removed);
        Some(Self::from_unique(blocks))
    }

    /// Append a block; its id must be new.
    pub fn push(&mut self, block: Block) -> Result<(), GridError> {
        if self.contains(&block.id) {
            return Err(GridError::DuplicateBlock { id: block.id });
        }
        self.blocks.push(block);
        Ok(())
    }

    /// Remove a block by id.
    pub fn remove(&mut self, id: &BlockId) -> Result<Block, GridError> {
        let index = self
            .position(id)
            .ok_or_else(|| GridError::UnknownBlock { id: id.clone() })?;
        Ok(self.blocks.remove(index))
    }

    /// Replace a block's span in place.
    pub fn set_span(&mut self, id: &BlockId, col_span: ColSpan) -> Result<(), GridError> {
        let block = self
            .blocks
            .iter_mut()
            .find(|b| &b.id == id)
            .ok_or_else(|| GridError::UnknownBlock { id: id.clone() })?;
        block.col_span = col_span;
        Ok(())
    }

    /// Structural key of this arrangement.
    pub fn layout_key(&self) -> LayoutKey {
        LayoutKey(self.blocks.iter().map(|b| (b.id.clone(), b.col_span)).collect())
    }
}

impl<'a> IntoIterator for &'a BlockSequence {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

/// Structural key of a rendered arrangement: the ordered `(id, span)` pairs.
///
/// Any change to order or span changes the key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LayoutKey(Vec<(BlockId, ColSpan)>);

impl LayoutKey {
    pub fn entries(&self) -> &[(BlockId, ColSpan)] {
        &self.0
    }
}

impl fmt::Display for LayoutKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, span) in &self.0 {
            write!(f, "{}{}", id, span)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(items: &[(&str, u8)]) -> BlockSequence {
        BlockSequence::new(
            items
                .iter()
                .map(|(id, span)| Block::new(*id, ColSpan::new(*span).unwrap()))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_duplicates() {
        let blocks = vec![
            Block::new("a", ColSpan::MIN),
            Block::new("a", ColSpan::MAX),
        ];
        assert_eq!(
            BlockSequence::new(blocks),
            Err(GridError::DuplicateBlock { id: "a".into() })
        );
    }

    #[test]
    fn test_same_order_ignores_spans() {
        let a = seq(&[("a", 1), ("b", 2)]);
        let b = seq(&[("a", 3), ("b", 1)]);
        let c = seq(&[("b", 2), ("a", 1)]);
        assert!(a.same_order(&b));
        assert!(!a.same_order(&c));
    }

    #[test]
    fn test_with_span_substitutes_one_block() {
        let s = seq(&[("a", 1), ("b", 1)]);
        let resized = s.with_span(&"b".into(), ColSpan::MAX);
        assert_eq!(resized.get(&"a".into()).unwrap().col_span, ColSpan::MIN);
        assert_eq!(resized.get(&"b".into()).unwrap().col_span, ColSpan::MAX);
        // source sequence unchanged
        assert_eq!(s.get(&"b".into()).unwrap().col_span, ColSpan::MIN);
    }

    #[test]
    fn test_moved() {
        let s = seq(&[("a", 1), ("b", 1), ("c", 1)]);
        let m = s.moved(0, 2).unwrap();
        let ids: Vec<_> = m.ids().map(|id| id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "a"]);
        assert!(s.moved(3, 0).is_none());
    }

    #[test]
    fn test_mutations() {
        let mut s = seq(&[("a", 1)]);
        s.push(Block::new("b", ColSpan::MIN)).unwrap();
        assert!(s.push(Block::new("b", ColSpan::MIN)).is_err());
        s.set_span(&"b".into(), ColSpan::MAX).unwrap();
        assert_eq!(s.get(&"b".into()).unwrap().col_span, ColSpan::MAX);
        assert!(s.remove(&"zzz".into()).is_err());
        s.remove(&"a".into()).unwrap();
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_layout_key_tracks_order_and_span() {
        let s = seq(&[("a", 1), ("b", 2)]);
        assert_eq!(s.layout_key().to_string(), "a1b2");
        assert_ne!(s.layout_key(), s.with_span(&"a".into(), ColSpan::MAX).layout_key());
        assert_ne!(s.layout_key(), s.moved(0, 1).unwrap().layout_key());
        assert_eq!(s.layout_key(), s.clone().layout_key());
    }
}
