//! Tile/pixel coordinate arithmetic.
//!
//! World space has its origin in the bottom-left corner with y pointing up,
//! while Tiled authors layer data and tile IDs from the top-left. Every flip
//! between the two conventions lives here.

use macroquad::math::{ivec2, uvec2, vec2, IVec2, Rect, UVec2, Vec2};

/// Column and row of `tile_id` inside an atlas of `columns` x `rows` tiles.
///
/// Rows are counted from the bottom of the image while tile IDs run from the
/// top, hence `row = rows - id / columns - 1`.
///
/// # Panics
///
/// If `columns` is zero or `tile_id` lies outside the atlas.
#[inline]
pub fn atlas_cell(tile_id: u32, columns: u32, rows: u32) -> UVec2 {
    assert!(columns > 0, "atlas has zero columns");
    let row_from_top = tile_id / columns;
    assert!(
        row_from_top < rows,
        "tile {tile_id} lies outside a {columns}x{rows} atlas"
    );
    uvec2(tile_id % columns, rows - row_from_top - 1)
}

/// Source rectangle of an atlas cell in bottom-left-origin image pixels.
#[inline]
pub fn atlas_rect(cell: UVec2, tile_w: u32, tile_h: u32) -> Rect {
    Rect::new(
        (cell.x * tile_w) as f32,
        (cell.y * tile_h) as f32,
        tile_w as f32,
        tile_h as f32,
    )
}

/// World position, in tiles, of the cell at `index` in a row-major layer.
///
/// `x` is shifted one tile left and `y` is flipped against `map_height`
/// without a matching `- 1`. Rendered output depends on both offsets.
#[inline]
pub fn world_position(index: usize, map_width: usize, map_height: usize) -> IVec2 {
    ivec2(
        (index % map_width) as i32 - 1,
        map_height as i32 - (index / map_width) as i32,
    )
}

/// Pixel centre of tile `(x, y)`, rounded down like integer tile halves.
#[inline]
pub fn tile_center(tile: IVec2, tile_w: u32, tile_h: u32) -> IVec2 {
    let (tw, th) = (tile_w as i32, tile_h as i32);
    ivec2(tile.x * tw + tw / 2, tile.y * th + th / 2)
}

/// Pixel position of a character's feet standing on `tile`.
///
/// `origin` is the map's bottom-left rendering margin (one tile in each
/// direction). The sprite width is subtracted fully and half its height,
/// anchoring the sprite bottom-centre.
#[inline]
pub fn feet_anchor(
    tile: IVec2,
    map_height: i32,
    origin: IVec2,
    tile_w: u32,
    tile_h: u32,
    sprite_size: Vec2,
) -> Vec2 {
    let x = tile.x - 1;
    let y = map_height - tile.y;
    vec2(
        (origin.x + x * tile_w as i32) as f32 - sprite_size.x,
        (origin.y + y * tile_h as i32) as f32 - sprite_size.y / 2.0,
    )
}
