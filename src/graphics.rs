//! Seams between the renderer and the outside world: image decoding and
//! the surface batches are drawn to.

use crate::config::TextureFilter;
use crate::error::MapError;
use macroquad::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// One textured tile queued in a batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    /// Source rectangle in bottom-left-origin image pixels.
    pub source: Rect,
    /// Destination centre in world pixels.
    pub center: Vec2,
    /// Mirror horizontally.
    pub flip_h: bool,
    /// Mirror vertically.
    pub flip_v: bool,
}

/// A render surface able to own textures and draw them.
pub trait Graphics {
    /// Texture handle shared between the registry and its batch.
    type Texture: Clone;

    /// Uploads decoded pixels.
    fn create_texture(&mut self, image: &Image) -> Self::Texture;

    /// Draws every quad of one batch. Called once per batch per frame.
    fn draw_batch(&mut self, texture: &Self::Texture, quads: &[Quad]);

    /// Draws a single sprite centred on `center`, outside any batch.
    fn draw_sprite(&mut self, texture: &Self::Texture, source: Rect, center: Vec2);
}

/// Supplies decoded pixels for a tileset image source.
pub trait ImageLoader {
    /// Decodes the image named `source` as written in the tileset.
    fn load_image(&mut self, source: &str) -> Result<Image, MapError>;
}

/// Reads images from disk relative to a base directory.
pub struct FileImageLoader {
    base_dir: PathBuf,
}

impl FileImageLoader {
    /// Resolves image sources against `base_dir`, usually the map directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Directory image sources are resolved against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl ImageLoader for FileImageLoader {
    fn load_image(&mut self, source: &str) -> Result<Image, MapError> {
        let path = self.base_dir.join(source);
        let bytes = std::fs::read(&path).map_err(|e| MapError::AssetLoad {
            source_path: source.to_owned(),
            reason: format!("reading {}: {e}", path.display()),
        })?;
        Image::from_file_with_format(&bytes, None).map_err(|e| MapError::AssetLoad {
            source_path: source.to_owned(),
            reason: format!("decoding {}: {e}", path.display()),
        })
    }
}

/// Serves images decoded ahead of time, keyed by image source.
#[derive(Default)]
pub struct MemoryImageLoader {
    images: HashMap<String, Image>,
}

impl MemoryImageLoader {
    /// An empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `image` under `source`, replacing any previous one.
    pub fn insert(&mut self, source: impl Into<String>, image: Image) {
        self.images.insert(source.into(), image);
    }

    /// Builder form of [`MemoryImageLoader::insert`].
    pub fn with(mut self, source: impl Into<String>, image: Image) -> Self {
        self.insert(source, image);
        self
    }
}

impl ImageLoader for MemoryImageLoader {
    fn load_image(&mut self, source: &str) -> Result<Image, MapError> {
        self.images
            .get(source)
            .cloned()
            .ok_or_else(|| MapError::AssetLoad {
                source_path: source.to_owned(),
                reason: "no such image".into(),
            })
    }
}

/// Draws through macroquad's immediate-mode API.
///
/// Expects a y-up camera such as [`crate::Camera::to_camera2d`]. Quads
/// drawn back to back with one texture end up in one GPU draw call.
pub struct MacroquadGraphics {
    filter: FilterMode,
}

impl MacroquadGraphics {
    /// Uploads textures with the given sampling filter.
    pub fn new(filter: TextureFilter) -> Self {
        Self {
            filter: filter.into(),
        }
    }
}

impl Default for MacroquadGraphics {
    fn default() -> Self {
        Self::new(TextureFilter::default())
    }
}

impl Graphics for MacroquadGraphics {
    type Texture = Texture2D;

    fn create_texture(&mut self, image: &Image) -> Texture2D {
        let tex = Texture2D::from_image(image);
        tex.set_filter(self.filter);
        tex
    }

    fn draw_batch(&mut self, texture: &Texture2D, quads: &[Quad]) {
        for q in quads {
            draw_centered(texture, q.source, q.center, q.flip_h, q.flip_v);
        }
    }

    fn draw_sprite(&mut self, texture: &Texture2D, source: Rect, center: Vec2) {
        draw_centered(texture, source, center, false, false);
    }
}

fn draw_centered(tex: &Texture2D, source: Rect, center: Vec2, flip_h: bool, flip_v: bool) {
    // macroquad addresses images from the top row down.
    let src = Rect::new(
        source.x,
        tex.height() - source.y - source.h,
        source.w,
        source.h,
    );
    draw_texture_ex(
        tex,
        center.x - source.w / 2.0,
        center.y - source.h / 2.0,
        WHITE,
        DrawTextureParams {
            source: Some(src),
            flip_x: flip_h,
            // the y-up camera already mirrors the image once
            flip_y: !flip_v,
            ..Default::default()
        },
    );
}
