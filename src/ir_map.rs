// src/ir_map.rs
use crate::error::MapError;
use crate::tile::{TileId, GID_MASK};

/// Canonical, format-agnostic map.
#[derive(Debug, Clone)]
pub struct IrMap {
    /// Width in tiles.
    pub width: usize,
    /// Height in tiles.
    pub height: usize,
    /// Tile width in pixels.
    pub tile_w: u32,
    /// Tile height in pixels.
    pub tile_h: u32,
    /// Tilesets in GID order.
    pub tilesets: Vec<IrTileset>,
    /// Draw order: array order.
    pub layers: Vec<IrLayer>,
}

/// One image atlas sliced into a regular grid.
#[derive(Debug, Clone, PartialEq)]
pub struct IrTileset {
    /// First GID covered by this tileset.
    pub first_gid: u32,
    /// Image source, relative to the map directory.
    pub image: String,
    /// Tile width in pixels.
    pub tile_w: u32,
    /// Tile height in pixels.
    pub tile_h: u32,
    /// Number of tiles in the atlas.
    pub tilecount: u32,
    /// Atlas columns.
    pub columns: u32,
}

impl IrTileset {
    /// Atlas rows. A partial last row is not counted.
    #[inline]
    pub fn rows(&self) -> u32 {
        self.tilecount / self.columns
    }

    /// Tiles addressable through the atlas grid: full rows only.
    #[inline]
    pub fn usable_tiles(&self) -> u32 {
        self.rows() * self.columns
    }

    /// Highest GID this tileset covers, `None` if the range overflows.
    #[inline]
    pub fn last_gid(&self) -> Option<u32> {
        self.first_gid.checked_add(self.tilecount.saturating_sub(1))
    }

    /// True if the clean `gid` names a tile inside the atlas grid.
    #[inline]
    pub fn contains(&self, gid: u32) -> bool {
        gid >= self.first_gid && gid - self.first_gid < self.usable_tiles()
    }
}

/// A grid of raw GIDs, one per map cell in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct IrLayer {
    /// Layer name.
    pub name: String,
    /// Hidden layers are skipped unless configured otherwise.
    pub visible: bool,
    /// Raw GIDs including flip flags, `0` for empty.
    pub data: Vec<u32>,
}

impl IrMap {
    /// Highest GID covered by any tileset, `0` when there are none.
    pub fn max_gid(&self) -> u32 {
        self.tilesets
            .iter()
            .filter_map(IrTileset::last_gid)
            .max()
            .unwrap_or(0)
    }

    /// Checks everything the renderer relies on but does not re-check per frame.
    pub fn validate(&self) -> Result<(), MapError> {
        if self.width == 0 || self.height == 0 {
            return Err(MapError::InvalidMap(format!(
                "map dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.tile_w == 0 || self.tile_h == 0 {
            return Err(MapError::InvalidMap(format!(
                "tile size must be positive, got {}x{}",
                self.tile_w, self.tile_h
            )));
        }

        for ts in &self.tilesets {
            if ts.columns == 0 || ts.tile_w == 0 || ts.tile_h == 0 {
                return Err(MapError::InvalidMap(format!(
                    "tileset '{}' (first gid {}) has zero columns or tile size",
                    ts.image, ts.first_gid
                )));
            }
            if ts.first_gid == 0 {
                return Err(MapError::InvalidMap(format!(
                    "tileset '{}' starts at gid 0, which is reserved for empty cells",
                    ts.image
                )));
            }
            match ts.last_gid() {
                Some(last) if last <= GID_MASK => {}
                _ => {
                    return Err(MapError::InvalidMap(format!(
                        "tileset '{}' gid range {} + {} exceeds the 29-bit gid space",
                        ts.image, ts.first_gid, ts.tilecount
                    )));
                }
            }
        }

        let mut sorted: Vec<&IrTileset> = self.tilesets.iter().collect();
        sorted.sort_unstable_by_key(|t| t.first_gid);
        for pair in sorted.windows(2) {
            if pair[0].tilecount > 0 && pair[0].last_gid() >= Some(pair[1].first_gid) {
                return Err(MapError::InvalidMap(format!(
                    "tilesets '{}' and '{}' have overlapping gid ranges",
                    pair[0].image, pair[1].image
                )));
            }
        }

        let Some(cells) = self.width.checked_mul(self.height) else {
            return Err(MapError::InvalidMap(format!(
                "map of {}x{} tiles is too large",
                self.width, self.height
            )));
        };
        let max_gid = self.max_gid();
        for layer in &self.layers {
            if layer.data.len() != cells {
                return Err(MapError::InvalidLayerSize {
                    layer: layer.name.clone(),
                    expected: cells,
                    actual: layer.data.len(),
                });
            }
            for &raw in &layer.data {
                let id = TileId(raw);
                if id.is_empty() {
                    continue;
                }
                let gid = id.clean();
                // ids in a partial last atlas row have no cell to draw from
                if !self.tilesets.iter().any(|t| t.contains(gid)) {
                    return Err(MapError::InvalidTileGid {
                        layer: layer.name.clone(),
                        gid,
                        max_gid,
                    });
                }
            }
        }
        Ok(())
    }
}
