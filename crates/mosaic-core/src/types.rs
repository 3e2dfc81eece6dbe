//! Core value types for blocks.

use std::fmt;

/// Stable, opaque identifier of a block.
///
/// Unique within a grid and immutable for the block's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BlockId(pub String);

impl BlockId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        BlockId(s.to_string())
    }
}

impl From<String> for BlockId {
    fn from(s: String) -> Self {
        BlockId(s)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Number of grid columns a block occupies on wide viewports (1 to 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct ColSpan(u8);

impl ColSpan {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(3);

    /// Create a span, returning `None` outside `1..=3`.
    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN.0 && value <= Self::MAX.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Create a span from any integer, clamping into `1..=3`.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN.0 as i64, Self::MAX.0 as i64) as u8)
    }

    /// Grow or shrink by `delta` columns, saturating at the bounds.
    pub fn step(self, delta: i64) -> Self {
        Self::clamped(self.0 as i64 + delta)
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub fn is_min(self) -> bool {
        self == Self::MIN
    }

    pub fn is_max(self) -> bool {
        self == Self::MAX
    }
}

impl Default for ColSpan {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<u8> for ColSpan {
    type Error = crate::GridError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(crate::GridError::InvalidSpan { value: value as i64 })
    }
}

impl From<ColSpan> for u8 {
    fn from(span: ColSpan) -> Self {
        span.0
    }
}

impl fmt::Display for ColSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unit of content in the grid.
///
/// Display attributes (text, image, colors) live with the host, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Block {
    pub id: BlockId,
    pub col_span: ColSpan,
}

impl Block {
    pub fn new(id: impl Into<BlockId>, col_span: ColSpan) -> Self {
        Self { id: id.into(), col_span }
    }

    /// Copy of this block with a different span.
    pub fn with_span(&self, col_span: ColSpan) -> Self {
        Self { id: self.id.clone(), col_span }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_col_span_range() {
        assert!(ColSpan::new(0).is_none());
        assert_eq!(ColSpan::new(1), Some(ColSpan::MIN));
        assert_eq!(ColSpan::new(3), Some(ColSpan::MAX));
        assert!(ColSpan::new(4).is_none());
    }

    #[test]
    fn test_col_span_clamped() {
        assert_eq!(ColSpan::clamped(-7), ColSpan::MIN);
        assert_eq!(ColSpan::clamped(2).get(), 2);
        assert_eq!(ColSpan::clamped(99), ColSpan::MAX);
    }

    #[test]
    fn test_col_span_step_saturates() {
        let two = ColSpan::clamped(2);
        assert_eq!(two.step(1), ColSpan::MAX);
        assert_eq!(ColSpan::MAX.step(1), ColSpan::MAX);
        assert_eq!(ColSpan::MIN.step(-1), ColSpan::MIN);
        assert_eq!(two.step(-1), ColSpan::MIN);
    }

    #[test]
    fn test_col_span_try_from() {
        assert!(ColSpan::try_from(2u8).is_ok());
        assert_eq!(
            ColSpan::try_from(5u8),
            Err(crate::GridError::InvalidSpan { value: 5 })
        );
    }

    #[test]
    fn test_block_id_display() {
        let id = BlockId::from("block-1");
        assert_eq!(id.to_string(), "block-1");
        assert_eq!(id.as_str(), "block-1");
    }
}
