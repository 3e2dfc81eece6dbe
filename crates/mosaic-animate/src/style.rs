//! Style values written to animated elements.

use std::fmt;

use glam::DVec2;
use mosaic_core::BlockId;

/// Timing of the glide from old to new position.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct FlipConfig {
    pub duration_ms: u32,
    pub easing: String,
}

impl Default for FlipConfig {
    fn default() -> Self {
        Self {
            duration_ms: 300,
            easing: "ease-in-out".to_string(),
        }
    }
}

/// A pure translation transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Translate(pub DVec2);

impl fmt::Display for Translate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "translate({}px, {}px)", self.0.x, self.0.y)
    }
}

/// Transition applied to the `transform` property.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Jump without animating.
    Instant,
    /// Animate over `duration_ms` with a CSS easing function.
    Eased { duration_ms: u32, easing: String },
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Instant => f.write_str("transform 0s"),
            Transition::Eased { duration_ms, easing } => {
                write!(f, "transform {}ms {}", duration_ms, easing)
            }
        }
    }
}

/// Inline style for one element. `transform: None` clears the transform.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementStyle {
    pub transform: Option<Translate>,
    pub transition: Transition,
}

impl ElementStyle {
    /// Pin the element at `offset` from its laid-out position.
    pub fn pinned(offset: DVec2) -> Self {
        Self {
            transform: Some(Translate(offset)),
            transition: Transition::Instant,
        }
    }

    /// Release the element so it animates back to its laid-out position.
    pub fn released(config: &FlipConfig) -> Self {
        Self {
            transform: None,
            transition: Transition::Eased {
                duration_ms: config.duration_ms,
                easing: config.easing.clone(),
            },
        }
    }

    /// Value for `style.transform` (empty string clears it).
    pub fn transform_css(&self) -> String {
        self.transform.map(|t| t.to_string()).unwrap_or_default()
    }

    /// Value for `style.transition`.
    pub fn transition_css(&self) -> String {
        self.transition.to_string()
    }
}

/// A style assignment for one element.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleWrite {
    pub id: BlockId,
    pub style: ElementStyle,
}

/// Destination for style writes (the DOM, or a recorder in tests).
pub trait StyleSink {
    fn apply(&mut self, write: &StyleWrite);
}

impl StyleSink for Vec<StyleWrite> {
    fn apply(&mut self, write: &StyleWrite) {
        self.push(write.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pinned_css() {
        let style = ElementStyle::pinned(DVec2::new(12.0, -40.0));
        insta::assert_snapshot!(style.transform_css(), @"translate(12px, -40px)");
        insta::assert_snapshot!(style.transition_css(), @"transform 0s");
    }

    #[test]
    fn test_released_css() {
        let style = ElementStyle::released(&FlipConfig::default());
        assert_eq!(style.transform_css(), "");
        insta::assert_snapshot!(style.transition_css(), @"transform 300ms ease-in-out");
    }

    #[test]
    fn test_fractional_offsets() {
        let style = ElementStyle::pinned(DVec2::new(0.5, 3.25));
        assert_eq!(style.transform_css(), "translate(0.5px, 3.25px)");
    }
}
