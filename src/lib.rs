#![warn(missing_docs)]

//! Tiled JSON map renderer for Macroquad, drawing one batch per tileset image.

mod batch;
mod camera;
mod config;
pub mod coords;
mod error;
mod graphics;
mod ir_map;
pub mod loader {
    //! Tile-map file decoding.
    pub mod json_loader;
}
mod map;
mod registry;
pub mod tile;

pub use batch::{Batch, BatchManager};
pub use camera::Camera;
pub use config::{MapConfig, TextureFilter};
pub use error::MapError;
pub use graphics::{FileImageLoader, Graphics, ImageLoader, MacroquadGraphics, MemoryImageLoader, Quad};
pub use ir_map::{IrLayer, IrMap, IrTileset};
pub use map::{teleport_character, FrameStats, Map, Sprite};
pub use registry::TilesetRegistry;
