#![allow(dead_code)]

use macroquad::prelude::{Image, Rect, Vec2, WHITE};
use macroquad_tiled_batch::{Graphics, IrLayer, IrMap, IrTileset, MemoryImageLoader, Quad};

/// Texture handle: the image size it was created from plus a serial.
#[derive(Debug, Clone, PartialEq)]
pub struct FakeTexture {
    pub serial: usize,
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Batch { texture: usize, quads: Vec<Quad> },
    Sprite { texture: usize, source: Rect, center: Vec2 },
}

/// Records everything instead of touching a GPU.
#[derive(Default)]
pub struct Recorder {
    pub created: usize,
    pub calls: Vec<Call>,
}

impl Recorder {
    pub fn batch_calls(&self) -> Vec<(usize, usize)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Batch { texture, quads } => Some((*texture, quads.len())),
                Call::Sprite { .. } => None,
            })
            .collect()
    }

    pub fn quads_for(&self, texture: usize) -> Vec<Quad> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Batch { texture: t, quads } if *t == texture => Some(quads.clone()),
                _ => None,
            })
            .flatten()
            .collect()
    }
}

impl Graphics for Recorder {
    type Texture = FakeTexture;

    fn create_texture(&mut self, image: &Image) -> FakeTexture {
        self.created += 1;
        FakeTexture {
            serial: self.created,
            width: image.width,
            height: image.height,
        }
    }

    fn draw_batch(&mut self, texture: &FakeTexture, quads: &[Quad]) {
        self.calls.push(Call::Batch {
            texture: texture.serial,
            quads: quads.to_vec(),
        });
    }

    fn draw_sprite(&mut self, texture: &FakeTexture, source: Rect, center: Vec2) {
        self.calls.push(Call::Sprite {
            texture: texture.serial,
            source,
            center,
        });
    }
}

pub fn tileset(first_gid: u32, image: &str, tile: u32, columns: u32, tilecount: u32) -> IrTileset {
    IrTileset {
        first_gid,
        image: image.into(),
        tile_w: tile,
        tile_h: tile,
        tilecount,
        columns,
    }
}

pub fn layer(name: &str, data: Vec<u32>) -> IrLayer {
    IrLayer {
        name: name.into(),
        visible: true,
        data,
    }
}

pub fn map(width: usize, height: usize, tile: u32, tilesets: Vec<IrTileset>, layers: Vec<IrLayer>) -> IrMap {
    IrMap {
        width,
        height,
        tile_w: tile,
        tile_h: tile,
        tilesets,
        layers,
    }
}

/// A loader holding a blank image for each source.
pub fn images(sources: &[(&str, u16, u16)]) -> MemoryImageLoader {
    let mut loader = MemoryImageLoader::new();
    for &(src, w, h) in sources {
        loader.insert(src, Image::gen_image_color(w, h, WHITE));
    }
    loader
}
