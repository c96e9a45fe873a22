mod common;

use common::*;
use macroquad::prelude::{vec2, Rect};
use macroquad_tiled_batch::tile::{FLIP_H, FLIP_V};
use macroquad_tiled_batch::{teleport_character, FrameStats, Map, MapConfig, MapError, Sprite};

#[test]
fn renders_worked_example_tile() {
    let mut data = vec![0; 100];
    data[0] = 8; // first_gid 1, local id 7
    let ir = map(10, 10, 16, vec![tileset(1, "tiles.png", 16, 5, 25)], vec![layer("ground", data)]);

    let mut gfx = Recorder::default();
    let mut m = Map::create(ir, &mut images(&[("tiles.png", 80, 80)]), &mut gfx).unwrap();
    let stats = m.render(&mut gfx);

    assert_eq!(
        stats,
        FrameStats {
            layers: 1,
            tiles: 1,
            skipped: 99,
            draw_calls: 1
        }
    );

    let quads = gfx.quads_for(1);
    assert_eq!(quads.len(), 1);
    assert_eq!(quads[0].source, Rect::new(32.0, 48.0, 16.0, 16.0));
    // index 0 sits at world tile (-1, 10)
    assert_eq!(quads[0].center, vec2(-16.0, 160.0));
    assert!(!quads[0].flip_h && !quads[0].flip_v);
}

#[test]
fn empty_cells_never_reach_a_batch() {
    let ir = map(3, 3, 8, vec![tileset(1, "a.png", 8, 2, 4)], vec![layer("blank", vec![0; 9])]);

    let mut gfx = Recorder::default();
    let mut m = Map::create(ir, &mut images(&[("a.png", 16, 16)]), &mut gfx).unwrap();
    let stats = m.render(&mut gfx);

    assert_eq!(stats.tiles, 0);
    assert_eq!(stats.skipped, 9);
    assert_eq!(gfx.batch_calls(), vec![(1, 0)]);
    assert_eq!(m.batches().total_quads(), 0);
}

#[test]
fn shared_image_gets_one_texture_and_one_batch() {
    let ir = map(
        2,
        2,
        8,
        vec![tileset(1, "a.png", 8, 2, 4), tileset(5, "a.png", 8, 2, 4)],
        vec![layer("ground", vec![1, 5, 0, 8])],
    );

    let mut gfx = Recorder::default();
    let mut m = Map::create(ir, &mut images(&[("a.png", 16, 16)]), &mut gfx).unwrap();

    assert_eq!(gfx.created, 1);
    assert_eq!(m.batches().len(), 1);
    assert_eq!(m.registry().batch_index("a.png"), Some(0));

    m.render(&mut gfx);
    assert_eq!(gfx.batch_calls(), vec![(1, 3)]);
}

#[test]
fn tiles_route_to_their_image_batch_in_layer_order() {
    let ir = map(
        2,
        1,
        8,
        vec![tileset(1, "a.png", 8, 2, 4), tileset(5, "b.png", 8, 1, 2)],
        vec![layer("bottom", vec![5, 1]), layer("top", vec![2, 6])],
    );

    let mut gfx = Recorder::default();
    let mut m = Map::create(ir, &mut images(&[("a.png", 16, 16), ("b.png", 8, 16)]), &mut gfx).unwrap();
    let stats = m.render(&mut gfx);

    assert_eq!(stats.layers, 2);
    assert_eq!(stats.tiles, 4);
    assert_eq!(gfx.batch_calls(), vec![(1, 2), (2, 2)]);

    // "a.png": gid 1 from the bottom layer (cell 1), then gid 2 from the top (cell 0)
    let a = gfx.quads_for(1);
    assert_eq!(a[0].source, Rect::new(0.0, 8.0, 8.0, 8.0));
    assert_eq!(a[0].center, vec2(0.0, 8.0));
    assert_eq!(a[1].source, Rect::new(8.0, 8.0, 8.0, 8.0));
    assert_eq!(a[1].center, vec2(-8.0, 8.0));

    // "b.png" is one column, two rows: gid 6 is the bottom row
    let b = gfx.quads_for(2);
    assert_eq!(b[0].source, Rect::new(0.0, 8.0, 8.0, 8.0));
    assert_eq!(b[1].source, Rect::new(0.0, 0.0, 8.0, 8.0));
}

#[test]
fn batches_are_rebuilt_not_accumulated() {
    let ir = map(2, 2, 8, vec![tileset(1, "a.png", 8, 2, 4)], vec![layer("ground", vec![1, 2, 3, 4])]);

    let mut gfx = Recorder::default();
    let mut m = Map::create(ir, &mut images(&[("a.png", 16, 16)]), &mut gfx).unwrap();
    let first = m.render(&mut gfx);
    let second = m.render(&mut gfx);

    assert_eq!(first, second);
    assert_eq!(gfx.batch_calls(), vec![(1, 4), (1, 4)]);
    assert_eq!(m.batches().quad_count(0), 4);
}

#[test]
fn hidden_layers_follow_config() {
    let mut hidden = layer("hidden", vec![1]);
    hidden.visible = false;
    let ir = map(1, 1, 8, vec![tileset(1, "a.png", 8, 1, 1)], vec![hidden]);

    let mut gfx = Recorder::default();
    let mut m = Map::create(ir.clone(), &mut images(&[("a.png", 8, 8)]), &mut gfx).unwrap();
    assert_eq!(m.render(&mut gfx).tiles, 0);

    let config = MapConfig {
        draw_hidden_layers: true,
        ..MapConfig::default()
    };
    let mut m = Map::create_with_config(ir, &mut images(&[("a.png", 8, 8)]), &mut gfx, config).unwrap();
    assert_eq!(m.render(&mut gfx).tiles, 1);
}

#[test]
fn flip_flags_are_carried_on_quads() {
    let ir = map(
        2,
        1,
        8,
        vec![tileset(1, "a.png", 8, 1, 1)],
        vec![layer("ground", vec![1 | FLIP_H, 1 | FLIP_V])],
    );

    let mut gfx = Recorder::default();
    let mut m = Map::create(ir, &mut images(&[("a.png", 8, 8)]), &mut gfx).unwrap();
    m.render(&mut gfx);

    let quads = gfx.quads_for(1);
    assert!(quads[0].flip_h && !quads[0].flip_v);
    assert!(!quads[1].flip_h && quads[1].flip_v);
    assert_eq!(quads[0].source, quads[1].source);
}

#[test]
fn missing_image_aborts_creation() {
    let ir = map(1, 1, 8, vec![tileset(1, "gone.png", 8, 1, 1)], vec![layer("ground", vec![1])]);

    let mut gfx = Recorder::default();
    let err = Map::create(ir, &mut images(&[]), &mut gfx).err().expect("creation should fail");
    assert!(matches!(err, MapError::AssetLoad { ref source_path, .. } if source_path == "gone.png"));
}

#[test]
fn invalid_description_is_rejected_before_loading_images() {
    let ir = map(2, 1, 8, vec![tileset(1, "a.png", 8, 1, 1)], vec![layer("ground", vec![1, 7])]);

    let mut gfx = Recorder::default();
    let err = Map::create(ir, &mut images(&[("a.png", 8, 8)]), &mut gfx).err().expect("creation should fail");
    assert!(matches!(err, MapError::InvalidTileGid { gid: 7, .. }));
    assert_eq!(gfx.created, 0);
}

#[test]
fn gid_in_partial_atlas_row_is_rejected() {
    // 3 columns, 7 tiles: the seventh has no full row to live in
    let ir = map(1, 1, 8, vec![tileset(1, "a.png", 8, 3, 7)], vec![layer("ground", vec![7])]);

    let mut gfx = Recorder::default();
    let err = Map::create(ir, &mut images(&[("a.png", 24, 24)]), &mut gfx).err().expect("creation should fail");
    assert!(matches!(err, MapError::InvalidTileGid { gid: 7, .. }));
    assert_eq!(gfx.created, 0);
}

#[test]
fn sparse_high_first_gid_renders() {
    let ir = map(1, 1, 8, vec![tileset(400_000_000, "a.png", 8, 1, 1)], vec![layer("ground", vec![400_000_000])]);

    let mut gfx = Recorder::default();
    let mut m = Map::create(ir, &mut images(&[("a.png", 8, 8)]), &mut gfx).expect("create");
    let stats = m.render(&mut gfx);
    assert_eq!(stats.tiles, 1);
}

#[test]
fn goto_tile_centres_camera() {
    let ir = map(10, 10, 32, vec![tileset(1, "a.png", 32, 1, 1)], vec![layer("ground", vec![0; 100])]);

    let mut gfx = Recorder::default();
    let mut m = Map::create(ir, &mut images(&[("a.png", 32, 32)]), &mut gfx).unwrap();

    m.goto_tile(3, 4);
    assert_eq!(m.camera().position(), vec2(112.0, 144.0));

    m.goto_pixel(1.5, -2.0);
    assert_eq!(m.camera().position(), vec2(1.5, -2.0));
}

#[test]
fn teleport_draws_sprite_at_feet_anchor() {
    let ir = map(10, 10, 16, vec![tileset(1, "a.png", 16, 1, 1)], vec![layer("ground", vec![0; 100])]);

    let mut gfx = Recorder::default();
    let m = Map::create(ir, &mut images(&[("a.png", 16, 16), ("hero.png", 12, 20)]), &mut gfx).unwrap();

    let expected = m.tile_position_at_feet(3, 2, 12.0, 20.0);
    // origin (16, 16) + (2*16, 8*16) - (12, 10)
    assert_eq!(expected, vec2(36.0, 134.0));

    let hero = Sprite {
        texture: FakeTexture {
            serial: 99,
            width: 12,
            height: 20,
        },
        frame: Rect::new(0.0, 0.0, 12.0, 20.0),
    };
    let pos = teleport_character(3, 2, &m, &hero, &mut gfx);
    assert_eq!(pos, expected);
    assert_eq!(
        gfx.calls,
        vec![Call::Sprite {
            texture: 99,
            source: hero.frame,
            center: expected
        }]
    );
}
