//! Grid metrics configuration.

use mosaic_core::ColSpan;

/// Spacing presets in pixels, indexed by [`GapLevel`].
pub const GAP_VALUES_PX: [f64; 5] = [0.0, 8.0, 16.0, 24.0, 32.0];

/// Inner block padding presets in pixels, indexed by [`PaddingLevel`].
pub const PADDING_VALUES_PX: [f64; 4] = [8.0, 16.0, 24.0, 32.0];

/// Index into [`GAP_VALUES_PX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "u8", into = "u8"))]
pub struct GapLevel(u8);

impl GapLevel {
    /// Create a level, clamping to the last preset.
    pub fn new(level: u8) -> Self {
        Self(level.min((GAP_VALUES_PX.len() - 1) as u8))
    }

    pub fn level(self) -> u8 {
        self.0
    }

    pub fn px(self) -> f64 {
        GAP_VALUES_PX[self.0 as usize]
    }
}

impl Default for GapLevel {
    fn default() -> Self {
        Self(2)
    }
}

impl From<u8> for GapLevel {
    fn from(level: u8) -> Self {
        Self::new(level)
    }
}

impl From<GapLevel> for u8 {
    fn from(level: GapLevel) -> Self {
        level.0
    }
}

/// Index into [`PADDING_VALUES_PX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "u8", into = "u8"))]
pub struct PaddingLevel(u8);

impl PaddingLevel {
    /// Create a level, clamping to the last preset.
    pub fn new(level: u8) -> Self {
        Self(level.min((PADDING_VALUES_PX.len() - 1) as u8))
    }

    pub fn level(self) -> u8 {
        self.0
    }

    pub fn px(self) -> f64 {
        PADDING_VALUES_PX[self.0 as usize]
    }
}

impl Default for PaddingLevel {
    fn default() -> Self {
        Self(1)
    }
}

impl From<u8> for PaddingLevel {
    fn from(level: u8) -> Self {
        Self::new(level)
    }
}

impl From<PaddingLevel> for u8 {
    fn from(level: PaddingLevel) -> Self {
        level.0
    }
}

/// Metrics that shape the masonry grid.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct LayoutConfig {
    /// Height of one implicit grid row
    pub row_height_px: f64,
    /// Row and column gap preset
    pub gap: GapLevel,
    /// Block padding preset
    pub padding: PaddingLevel,
    /// Viewports narrower than this render every block at one column
    pub narrow_breakpoint_px: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            row_height_px: 10.0,
            gap: GapLevel::default(),
            padding: PaddingLevel::default(),
            narrow_breakpoint_px: 640.0,
        }
    }
}

impl LayoutConfig {
    pub fn gap_px(&self) -> f64 {
        self.gap.px()
    }

    /// Span actually rendered at `viewport_width`.
    pub fn effective_span(&self, span: ColSpan, viewport_width: f64) -> ColSpan {
        if viewport_width < self.narrow_breakpoint_px {
            ColSpan::MIN
        } else {
            span
        }
    }
}
