use crate::error::MapError;
use crate::graphics::{Graphics, ImageLoader};
use crate::ir_map::IrTileset;
use std::collections::HashMap;

/// Loaded tileset images, one entry per distinct image source.
///
/// Entry order is batch order: the n-th distinct source owns batch `n`.
pub struct TilesetRegistry<T> {
    textures: HashMap<String, T>,
    batch_indices: HashMap<String, usize>,
    sources: Vec<String>,
}

impl<T: Clone> TilesetRegistry<T> {
    /// Loads every distinct image referenced by `tilesets`.
    ///
    /// Fails on the first image that cannot be loaded; nothing is kept.
    pub fn load<L, G>(tilesets: &[IrTileset], loader: &mut L, graphics: &mut G) -> Result<Self, MapError>
    where
        L: ImageLoader + ?Sized,
        G: Graphics<Texture = T> + ?Sized,
    {
        let mut registry = Self {
            textures: HashMap::new(),
            batch_indices: HashMap::new(),
            sources: Vec::new(),
        };

        for ts in tilesets {
            if registry.batch_indices.contains_key(&ts.image) {
                log::debug!("tileset gid {} reuses image '{}'", ts.first_gid, ts.image);
                continue;
            }

            let image = loader.load_image(&ts.image)?;
            let tex = graphics.create_texture(&image);
            let index = registry.sources.len();
            log::debug!(
                "loaded '{}' ({}x{}) as batch {}",
                ts.image,
                image.width,
                image.height,
                index
            );

            registry.textures.insert(ts.image.clone(), tex);
            registry.batch_indices.insert(ts.image.clone(), index);
            registry.sources.push(ts.image.clone());
        }

        Ok(registry)
    }

    /// Batch owning the image `source`.
    #[inline]
    pub fn batch_index(&self, source: &str) -> Option<usize> {
        self.batch_indices.get(source).copied()
    }

    /// Texture loaded for the image `source`.
    #[inline]
    pub fn texture(&self, source: &str) -> Option<&T> {
        self.textures.get(source)
    }

    /// Image sources in batch order.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Distinct images loaded.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// True when the map has no tilesets.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Textures in batch order.
    pub fn textures_in_order(&self) -> impl Iterator<Item = &T> + '_ {
        self.sources.iter().map(move |s| &self.textures[s])
    }
}
