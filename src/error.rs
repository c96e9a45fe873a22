use std::{io, path::PathBuf};

/// Errors raised while loading a map and its tileset images.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// A map or tileset file could not be read.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// A map or tileset file is not valid Tiled JSON.
    #[error("failed to parse {path}: {source}")]
    Json {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },
    /// A tileset image is missing or cannot be decoded.
    #[error("failed to load image '{source_path}': {reason}")]
    AssetLoad {
        /// Image source as written in the tileset.
        source_path: String,
        /// What went wrong.
        reason: String,
    },
    /// The map description is structurally unusable.
    #[error("invalid map: {0}")]
    InvalidMap(String),
    /// A layer references a GID no tileset covers.
    #[error("layer '{layer}' references gid {gid}, but the highest tileset gid is {max_gid}")]
    InvalidTileGid {
        /// Layer name.
        layer: String,
        /// Offending GID with flip bits removed.
        gid: u32,
        /// Highest GID covered by the tilesets.
        max_gid: u32,
    },
    /// A layer does not hold exactly one GID per map cell.
    #[error("layer '{layer}' has {actual} tiles, expected {expected}")]
    InvalidLayerSize {
        /// Layer name.
        layer: String,
        /// `width * height` of the map.
        expected: usize,
        /// Length of the layer data.
        actual: usize,
    },
    /// A tileset uses a layout the atlas arithmetic does not handle.
    #[error("unsupported tileset '{source_path}': {reason}")]
    UnsupportedTileset {
        /// Tileset file or image source.
        source_path: String,
        /// What is unsupported.
        reason: String,
    },
}
