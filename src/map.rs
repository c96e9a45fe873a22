use crate::batch::BatchManager;
use crate::camera::Camera;
use crate::config::MapConfig;
use crate::coords::{atlas_cell, atlas_rect, feet_anchor, world_position};
use crate::error::MapError;
use crate::graphics::{FileImageLoader, Graphics, ImageLoader, MacroquadGraphics, Quad};
use crate::ir_map::IrMap;
use crate::loader::json_loader::decode_map_file_to_ir;
use crate::registry::TilesetRegistry;
use crate::tile::{GidLookup, TileId};
use macroquad::prelude::*;

/// Counters for one [`Map::render`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Layers iterated.
    pub layers: usize,
    /// Tiles appended to a batch.
    pub tiles: usize,
    /// Empty cells skipped.
    pub skipped: usize,
    /// Batches submitted to the target.
    pub draw_calls: usize,
}

/// A character sprite: texture plus its frame in bottom-left image pixels.
#[derive(Debug, Clone)]
pub struct Sprite<T> {
    /// Texture the frame is cut from.
    pub texture: T,
    /// Source rectangle; its size is the sprite size.
    pub frame: Rect,
}

/// A loaded map with one draw batch per tileset image and a camera.
pub struct Map<T> {
    ir: IrMap,
    gids: GidLookup,
    registry: TilesetRegistry<T>,
    batches: BatchManager<T>,
    camera: Camera,
    /// Bottom-left rendering margin: one tile in each direction.
    origin: IVec2,
    config: MapConfig,
}

impl Map<Texture2D> {
    /// Loads a Tiled JSON map and its images from disk.
    ///
    /// Needs a live macroquad context to upload textures.
    pub fn load(path: &str) -> Result<Self, MapError> {
        Self::load_with_config(path, MapConfig::default())
    }

    /// [`Map::load`] with explicit render options.
    pub fn load_with_config(path: &str, config: MapConfig) -> Result<Self, MapError> {
        let (ir, base) = decode_map_file_to_ir(path)?;
        let mut loader = FileImageLoader::new(base);
        let mut graphics = MacroquadGraphics::new(config.filter);
        Self::create_with_config(ir, &mut loader, &mut graphics, config)
    }
}

impl<T: Clone> Map<T> {
    /// [`Map::create_with_config`] with default options.
    pub fn create<L, G>(ir: IrMap, loader: &mut L, graphics: &mut G) -> Result<Self, MapError>
    where
        L: ImageLoader + ?Sized,
        G: Graphics<Texture = T> + ?Sized,
    {
        Self::create_with_config(ir, loader, graphics, MapConfig::default())
    }

    /// Validates `ir`, loads every distinct tileset image and allocates
    /// one batch per image. Any failure leaves nothing behind.
    pub fn create_with_config<L, G>(
        ir: IrMap,
        loader: &mut L,
        graphics: &mut G,
        config: MapConfig,
    ) -> Result<Self, MapError>
    where
        L: ImageLoader + ?Sized,
        G: Graphics<Texture = T> + ?Sized,
    {
        ir.validate()?;

        let registry = TilesetRegistry::load(&ir.tilesets, loader, graphics)?;
        let batches = BatchManager::new(registry.textures_in_order().cloned());
        let gids = GidLookup::new(ir.tilesets.iter().map(|t| (t.first_gid, t.usable_tiles())));

        log::info!(
            "map {}x{} ({}x{} px tiles): {} layers, {} tilesets, {} batches",
            ir.width,
            ir.height,
            ir.tile_w,
            ir.tile_h,
            ir.layers.len(),
            ir.tilesets.len(),
            batches.len()
        );

        Ok(Self {
            origin: ivec2(ir.tile_w as i32, ir.tile_h as i32),
            ir,
            gids,
            registry,
            batches,
            camera: Camera::new(),
            config,
        })
    }

    /// Rebuilds every batch from the layers and draws them to `graphics`.
    ///
    /// # Panics
    ///
    /// If a tile's GID has no tileset or image batch. Cannot happen for maps
    /// built through [`Map::create`]: [`IrMap::validate`] only accepts GIDs
    /// that land on a full atlas row of an existing tileset.
    pub fn render<G>(&mut self, graphics: &mut G) -> FrameStats
    where
        G: Graphics<Texture = T> + ?Sized,
    {
        let mut stats = FrameStats::default();
        self.batches.clear_all();

        for layer in &self.ir.layers {
            if !layer.visible && !self.config.draw_hidden_layers {
                continue;
            }
            stats.layers += 1;

            for (index, &raw) in layer.data.iter().enumerate() {
                let id = TileId(raw);
                if id.is_empty() {
                    stats.skipped += 1;
                    continue;
                }

                let ts = match self.gids.tileset_for(id) {
                    Some(i) => &self.ir.tilesets[i],
                    None => panic!(
                        "layer '{}' cell {index}: gid {} belongs to no tileset",
                        layer.name,
                        id.clean()
                    ),
                };
                let Some(batch) = self.registry.batch_index(&ts.image) else {
                    panic!("layer '{}' cell {index}: image '{}' has no batch", layer.name, ts.image);
                };

                let cell = atlas_cell(id.clean() - ts.first_gid, ts.columns, ts.rows());
                let source = atlas_rect(cell, ts.tile_w, ts.tile_h);
                let world = world_position(index, self.ir.width, self.ir.height);

                self.batches.append_tile(
                    batch,
                    Quad {
                        source,
                        center: world.as_vec2() * vec2(ts.tile_w as f32, ts.tile_h as f32),
                        flip_h: id.flip_h(),
                        flip_v: id.flip_v(),
                    },
                );
                stats.tiles += 1;
            }
        }

        stats.draw_calls = self.batches.draw_all(graphics);
        log::trace!("frame: {stats:?}");
        stats
    }
}

impl<T> Map<T> {
    /// Centres the camera on a tile.
    pub fn goto_tile(&mut self, x: i32, y: i32) {
        self.camera.goto_tile(x, y, self.ir.tile_w, self.ir.tile_h);
    }

    /// Moves the camera to a world pixel position.
    pub fn goto_pixel(&mut self, x: f32, y: f32) {
        self.camera.goto_pixel(x, y);
    }

    /// Current camera state.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Pixel position of a `sprite_w` x `sprite_h` character standing on a tile.
    pub fn tile_position_at_feet(&self, tile_x: i32, tile_y: i32, sprite_w: f32, sprite_h: f32) -> Vec2 {
        feet_anchor(
            ivec2(tile_x, tile_y),
            self.ir.height as i32,
            self.origin,
            self.ir.tile_w,
            self.ir.tile_h,
            vec2(sprite_w, sprite_h),
        )
    }

    /// Map width in tiles.
    pub fn width(&self) -> usize {
        self.ir.width
    }

    /// Map height in tiles.
    pub fn height(&self) -> usize {
        self.ir.height
    }

    /// Map tile size in pixels.
    pub fn tile_size(&self) -> UVec2 {
        uvec2(self.ir.tile_w, self.ir.tile_h)
    }

    /// The validated map description.
    pub fn description(&self) -> &IrMap {
        &self.ir
    }

    /// Loaded tileset images.
    pub fn registry(&self) -> &TilesetRegistry<T> {
        &self.registry
    }

    /// Batches as filled by the last [`Map::render`].
    pub fn batches(&self) -> &BatchManager<T> {
        &self.batches
    }

    /// Render options in effect.
    pub fn config(&self) -> &MapConfig {
        &self.config
    }
}

/// Draws `sprite` immediately with its feet on tile `(tile_x, tile_y)`.
///
/// Bypasses the batches; returns where the sprite was drawn.
pub fn teleport_character<T, G>(
    tile_x: i32,
    tile_y: i32,
    map: &Map<T>,
    sprite: &Sprite<T>,
    graphics: &mut G,
) -> Vec2
where
    G: Graphics<Texture = T> + ?Sized,
{
    let pos = map.tile_position_at_feet(tile_x, tile_y, sprite.frame.w, sprite.frame.h);
    graphics.draw_sprite(&sprite.texture, sprite.frame, pos);
    pos
}
