use anyhow::Context;
use macroquad::prelude::*;
use macroquad_tiled_batch::{Map, MacroquadGraphics, MapConfig};

fn window_conf() -> Conf {
    Conf {
        window_title: "Basic Map".into(),
        window_width: 1280,
        window_height: 720,
        ..Default::default()
    }
}

async fn run() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "assets/map.json".to_owned());
    let config = match std::env::args().nth(2) {
        Some(cfg) => {
            let txt = std::fs::read_to_string(&cfg).with_context(|| format!("Reading config {cfg}"))?;
            MapConfig::from_json_str(&txt)?
        }
        None => MapConfig::default(),
    };

    let mut gfx = MacroquadGraphics::new(config.filter);
    let mut map = Map::load_with_config(&path, config).with_context(|| format!("Loading map {path}"))?;

    // start centred on the middle of the map
    let (mut tx, mut ty) = (map.width() as i32 / 2, map.height() as i32 / 2);
    map.goto_tile(tx, ty);

    loop {
        if is_key_pressed(KeyCode::Escape) {
            return Ok(());
        }
        let before = (tx, ty);
        if is_key_pressed(KeyCode::Left) {
            tx -= 1;
        }
        if is_key_pressed(KeyCode::Right) {
            tx += 1;
        }
        if is_key_pressed(KeyCode::Up) {
            ty += 1;
        }
        if is_key_pressed(KeyCode::Down) {
            ty -= 1;
        }
        if (tx, ty) != before {
            map.goto_tile(tx, ty);
        }

        clear_background(BLACK);

        set_camera(&map.camera().to_camera2d(vec2(screen_width(), screen_height())));
        let stats = map.render(&mut gfx);

        set_default_camera();
        draw_text(
            &format!("FPS: {}  tiles: {}  batches: {}", get_fps(), stats.tiles, stats.draw_calls),
            20.0,
            30.0,
            30.0,
            RED,
        );

        next_frame().await;
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();
    if let Err(e) = run().await {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
