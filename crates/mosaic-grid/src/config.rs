//! Grid configuration.

use mosaic_animate::FlipConfig;
use mosaic_layout::LayoutConfig;

/// Everything that tunes a [`Grid`](crate::Grid).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct GridConfig {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub layout: LayoutConfig,
    pub flip: FlipConfig,
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_flattened() {
        let config: GridConfig = serde_json::from_str(
            r#"{ "rowHeightPx": 8, "gap": 0, "flip": { "durationMs": 120 } }"#,
        )
        .unwrap();
        assert_eq!(config.layout.row_height_px, 8.0);
        assert_eq!(config.layout.gap_px(), 0.0);
        assert_eq!(config.flip.duration_ms, 120);
        assert_eq!(config.flip.easing, "ease-in-out");
    }

    #[test]
    fn test_empty_object_is_default() {
        let config: GridConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GridConfig::default());
    }
}
