use crate::error::MapError;
use macroquad::prelude::FilterMode;
use serde::Deserialize;
use std::path::PathBuf;

/// Sampling used for tileset textures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextureFilter {
    /// Crisp pixels, the usual choice for pixel art.
    #[default]
    Nearest,
    /// Bilinear.
    Linear,
}

impl From<TextureFilter> for FilterMode {
    fn from(f: TextureFilter) -> Self {
        match f {
            TextureFilter::Nearest => FilterMode::Nearest,
            TextureFilter::Linear => FilterMode::Linear,
        }
    }
}

/// Render options for a [`crate::Map`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Texture filter for [`crate::MacroquadGraphics`].
    pub filter: TextureFilter,
    /// Draw layers marked invisible in the map file.
    pub draw_hidden_layers: bool,
}

impl MapConfig {
    /// Parses options from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, MapError> {
        serde_json::from_str(json).map_err(|source| MapError::Json {
            path: PathBuf::from("<config>"),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let cfg = MapConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, MapConfig::default());
        assert_eq!(cfg.filter, TextureFilter::Nearest);
        assert!(!cfg.draw_hidden_layers);
    }

    #[test]
    fn parses_all_fields() {
        let cfg = MapConfig::from_json_str(r#"{"filter":"linear","draw_hidden_layers":true}"#).unwrap();
        assert_eq!(cfg.filter, TextureFilter::Linear);
        assert!(cfg.draw_hidden_layers);
    }

    #[test]
    fn rejects_unknown_filter() {
        let err = MapConfig::from_json_str(r#"{"filter":"cubic"}"#).unwrap_err();
        assert!(matches!(err, MapError::Json { .. }));
    }
}
