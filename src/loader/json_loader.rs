//! Tiled JSON maps and tilesets.
use crate::error::MapError;
use crate::ir_map::*;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::path::{Component, Path, PathBuf};

#[derive(Deserialize)]
struct JsonLayer {
    #[serde(default)]
    data: Vec<u32>,
    #[serde(default = "default_true")]
    visible: bool,
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    kind: Option<String>, // "tilelayer" expected here
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
struct JsonTilesetRef {
    firstgid: u32,
    #[serde(default)]
    source: Option<String>,
    // embedded tilesets carry their fields inline
    #[serde(flatten)]
    inline: JsonValue,
}

#[derive(Deserialize)]
struct JsonMap {
    width: usize,
    height: usize,
    tilewidth: u32,
    tileheight: u32,
    #[serde(default)]
    infinite: bool,
    layers: Vec<JsonLayer>,
    #[serde(default)]
    tilesets: Vec<JsonTilesetRef>,
}

#[derive(Deserialize)]
struct JsonTileset {
    tilewidth: u32,
    tileheight: u32,
    tilecount: u32,
    columns: u32,
    image: String,
    #[serde(default)]
    spacing: u32,
    #[serde(default)]
    margin: u32,
}

/// Joins `dir` and `file` and folds `.`/`..` lexically, `/`-separated.
///
/// `..` that climbs above the map directory is kept.
fn image_key(dir: &Path, file: &str) -> String {
    let mut parts: Vec<String> = Vec::new();
    for comp in dir.join(file).components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match parts.last().map(String::as_str) {
                // nothing above the root
                Some("") => {}
                Some("..") | None => parts.push("..".into()),
                Some(_) => {
                    parts.pop();
                }
            },
            Component::RootDir => parts.push(String::new()),
            other => parts.push(other.as_os_str().to_string_lossy().replace('\\', "/")),
        }
    }
    parts.join("/")
}

fn tileset_to_ir(
    ts: JsonTileset,
    first_gid: u32,
    image_dir: &Path,
    origin: &str,
) -> Result<IrTileset, MapError> {
    if ts.spacing != 0 || ts.margin != 0 {
        return Err(MapError::UnsupportedTileset {
            source_path: origin.to_owned(),
            reason: format!(
                "spacing {} / margin {} (only tightly packed atlases are supported)",
                ts.spacing, ts.margin
            ),
        });
    }

    // (image path is made relative to the map dir so the registry dedupes on one spelling)
    let image = image_key(image_dir, &ts.image);

    Ok(IrTileset {
        first_gid,
        image,
        tile_w: ts.tilewidth,
        tile_h: ts.tileheight,
        tilecount: ts.tilecount,
        columns: ts.columns,
    })
}

fn load_tileset(
    ts: JsonTilesetRef,
    map_dir: &Path,
    map_path: &Path,
) -> Result<IrTileset, MapError> {
    match ts.source {
        Some(source) => {
            if !source.ends_with(".json") {
                return Err(MapError::InvalidMap(format!(
                    "External tileset must be JSON: {source}"
                )));
            }
            let ts_path = map_dir.join(&source);
            let ext_txt = std::fs::read_to_string(&ts_path).map_err(|e| MapError::Io {
                path: ts_path.clone(),
                source: e,
            })?;
            let ext: JsonTileset =
                serde_json::from_str(&ext_txt).map_err(|e| MapError::Json {
                    path: ts_path,
                    source: e,
                })?;
            let image_dir = Path::new(&source).parent().unwrap_or(Path::new(""));
            tileset_to_ir(ext, ts.firstgid, image_dir, &source)
        }
        None => {
            let embedded: JsonTileset =
                serde_json::from_value(ts.inline).map_err(|source| MapError::Json {
                    path: map_path.to_path_buf(),
                    source,
                })?;
            let origin = embedded.image.clone();
            tileset_to_ir(embedded, ts.firstgid, Path::new(""), &origin)
        }
    }
}

fn decode_map_json(txt: &str, map_path: &Path, map_dir: &Path) -> Result<IrMap, MapError> {
    let j: JsonMap = serde_json::from_str(txt).map_err(|source| MapError::Json {
        path: map_path.to_path_buf(),
        source,
    })?;

    if j.infinite {
        return Err(MapError::InvalidMap(
            "infinite (chunked) maps are not supported".into(),
        ));
    }

    let mut tilesets = Vec::with_capacity(j.tilesets.len());
    for ts in j.tilesets {
        tilesets.push(load_tileset(ts, map_dir, map_path)?);
    }
    tilesets.sort_by_key(|t| t.first_gid);

    let mut layers = Vec::with_capacity(j.layers.len());
    for l in j.layers {
        match l.kind.as_deref().unwrap_or("tilelayer") {
            "tilelayer" => layers.push(IrLayer {
                name: l.name,
                visible: l.visible,
                data: l.data,
            }),
            other => log::warn!("skipping {other} layer '{}'", l.name),
        }
    }

    let ir = IrMap {
        width: j.width,
        height: j.height,
        tile_w: j.tilewidth,
        tile_h: j.tileheight,
        tilesets,
        layers,
    };
    ir.validate()?;
    Ok(ir)
}

/// Decodes a Tiled JSON map held in memory. External tilesets and images
/// resolve against `base_dir`.
pub fn decode_map_str(json: &str, base_dir: &Path) -> Result<IrMap, MapError> {
    decode_map_json(json, Path::new("<inline map>"), base_dir)
}

/// Decodes a Tiled JSON map file. Returns the map and its directory.
pub fn decode_map_file_to_ir(path: &str) -> Result<(IrMap, PathBuf), MapError> {
    let p = Path::new(path);
    if p.extension().and_then(|e| e.to_str()) != Some("json") {
        return Err(MapError::InvalidMap(format!(
            "Map file must be a JSON file: {path}"
        )));
    }

    let txt = std::fs::read_to_string(p).map_err(|source| MapError::Io {
        path: p.to_path_buf(),
        source,
    })?;

    let map_dir = p
        .parent()
        .map(|d| d.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./"));

    let ir = decode_map_json(&txt, p, &map_dir)?;
    Ok((ir, map_dir))
}
