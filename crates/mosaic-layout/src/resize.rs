//! Edge-drag column-span resize simulation.

use mosaic_core::{BlockId, ColSpan, GridError};

/// Which edge of the block is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ResizeDirection {
    Left,
    Right,
}

/// Visibility of the two resize handles for a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResizeHandles {
    pub left: bool,
    pub right: bool,
}

impl ResizeHandles {
    /// A handle is shown only when dragging it can change the span.
    pub fn for_span(span: ColSpan) -> Self {
        Self {
            left: !span.is_min(),
            right: !span.is_max(),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn shows(&self, direction: ResizeDirection) -> bool {
        match direction {
            ResizeDirection::Left => self.left,
            ResizeDirection::Right => self.right,
        }
    }
}

/// State captured when an edge drag starts.
///
/// The block is anchored at the edge opposite the dragged one, so pulling the
/// left edge leftward grows the block.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    start_x: f64,
    start_span: ColSpan,
    unit_width: f64,
    direction: ResizeDirection,
    last_x: f64,
}

impl ResizeSession {
    /// Start a session from the block's current rendered width.
    ///
    /// A width that is zero, negative or not finite means the element has not
    /// been measured; the gesture cannot start.
    pub fn begin(
        id: &BlockId,
        span: ColSpan,
        direction: ResizeDirection,
        pointer_x: f64,
        rendered_width: f64,
    ) -> Result<Self, GridError> {
        if !(rendered_width.is_finite() && rendered_width > 0.0) {
            return Err(GridError::DegenerateGeometry {
                id: id.clone(),
                width: rendered_width,
            });
        }
        Ok(Self {
            start_x: pointer_x,
            start_span: span,
            unit_width: rendered_width / span.get() as f64,
            direction,
            last_x: pointer_x,
        })
    }

    pub fn direction(&self) -> ResizeDirection {
        self.direction
    }

    pub fn start_span(&self) -> ColSpan {
        self.start_span
    }

    pub fn unit_width(&self) -> f64 {
        self.unit_width
    }

    /// Span for a pointer at `pointer_x`.
    pub fn span_at(&self, pointer_x: f64) -> ColSpan {
        // Halves round toward +inf in both directions, so -1.5 columns is -1.
        let columns = ((pointer_x - self.start_x) / self.unit_width + 0.5).floor();
        let signed = match self.direction {
            ResizeDirection::Right => columns,
            ResizeDirection::Left => -columns,
        };
        let candidate = self.start_span.get() as f64 + signed;
        ColSpan::clamped(candidate.clamp(i64::MIN as f64, i64::MAX as f64) as i64)
    }

    /// Feed a pointer sample; returns the candidate span.
    ///
    /// Browsers emit a trailing drag event at `clientX == 0`; such samples,
    /// non-finite samples and repeats of the last sample are ignored.
    pub fn update(&mut self, pointer_x: f64) -> Option<ColSpan> {
        if !pointer_x.is_finite() || pointer_x == 0.0 || pointer_x == self.last_x {
            return None;
        }
        self.last_x = pointer_x;
        Some(self.span_at(pointer_x))
    }

    /// Final span, recomputed from the final pointer rather than the last
    /// preview. Falls back to the last accepted sample when the end event has
    /// no usable coordinate.
    pub fn finish(&self, pointer_x: Option<f64>) -> ColSpan {
        let x = pointer_x
            .filter(|x| x.is_finite() && *x != 0.0)
            .unwrap_or(self.last_x);
        self.span_at(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(n: u8) -> ColSpan {
        ColSpan::new(n).unwrap()
    }

    fn session(start: u8, direction: ResizeDirection, width: f64) -> ResizeSession {
        ResizeSession::begin(&"a".into(), span(start), direction, 500.0, width).unwrap()
    }

    #[test]
    fn test_zero_delta_keeps_span() {
        for start in 1..=3 {
            let s = session(start, ResizeDirection::Right, 300.0);
            assert_eq!(s.span_at(500.0), span(start));
            assert_eq!(s.finish(None), span(start));
        }
    }

    #[test]
    fn test_right_handle_grows_rightward() {
        // span 2 at 200px -> 100px per column
        let mut s = session(2, ResizeDirection::Right, 200.0);
        assert_eq!(s.update(600.0), Some(span(3)));
        assert_eq!(s.finish(Some(600.0)), span(3));
        assert_eq!(s.span_at(400.0), span(1));
    }

    #[test]
    fn test_left_handle_is_inverted() {
        let s = session(2, ResizeDirection::Left, 200.0);
        // 1.5 columns leftward rounds to 1 column of growth
        assert_eq!(s.span_at(350.0), span(3));
        assert_eq!(s.span_at(600.0), span(1));
    }

    #[test]
    fn test_left_handle_single_column_leftward() {
        let s = session(1, ResizeDirection::Left, 100.0);
        assert_eq!(s.span_at(400.0), span(2));
    }

    #[test]
    fn test_rounding_half_column() {
        let s = session(1, ResizeDirection::Right, 100.0);
        assert_eq!(s.span_at(549.0), span(1));
        assert_eq!(s.span_at(550.0), span(2));
    }

    #[test]
    fn test_rounding_negative_half_column() {
        // -1.5 columns rounds up to -1 rather than away from zero
        let left = session(1, ResizeDirection::Left, 100.0);
        assert_eq!(left.span_at(350.0), span(2));
        let right = session(3, ResizeDirection::Right, 100.0);
        assert_eq!(right.span_at(350.0), span(2));
        assert_eq!(right.span_at(349.0), span(1));
    }

    #[test]
    fn test_clamped_to_range() {
        let s = session(2, ResizeDirection::Right, 200.0);
        assert_eq!(s.span_at(10_000.0), ColSpan::MAX);
        assert_eq!(s.span_at(-10_000.0), ColSpan::MIN);
    }

    #[test]
    fn test_update_ignores_zero_and_repeats() {
        let mut s = session(1, ResizeDirection::Right, 100.0);
        assert_eq!(s.update(0.0), None);
        assert_eq!(s.update(500.0), None);
        assert_eq!(s.update(610.0), Some(span(2)));
        assert_eq!(s.update(610.0), None);
        // end event with clientX == 0 falls back to the last real sample
        assert_eq!(s.finish(Some(0.0)), span(2));
    }

    #[test]
    fn test_degenerate_width_rejected() {
        for width in [0.0, -4.0, f64::NAN] {
            let err = ResizeSession::begin(&"a".into(), span(2), ResizeDirection::Right, 1.0, width);
            assert!(matches!(err, Err(GridError::DegenerateGeometry { .. })));
        }
    }

    #[test]
    fn test_handles_for_span() {
        assert_eq!(ResizeHandles::for_span(span(1)), ResizeHandles { left: false, right: true });
        assert_eq!(ResizeHandles::for_span(span(2)), ResizeHandles { left: true, right: true });
        assert_eq!(ResizeHandles::for_span(span(3)), ResizeHandles { left: true, right: false });
        assert!(!ResizeHandles::none().shows(ResizeDirection::Left));
    }
}
