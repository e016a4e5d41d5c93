//! Facet shape model file loader.
//!
//! Format, per object file:
//!
//! ```text
//! offsetX offsetY offsetZ modelScale name        <- header
//! count band color class visMode polyScale name  <- polygon spec
//! x y z                                          <- `count` vertex lines
//! x y z                                          <- per-polygon offset
//! ...repeated polygon records until EOF
//! ```
//!
//! Vertex and offset coordinates are scaled by `polyScale * modelScale`; the
//! per-polygon offset is additionally shifted by the header offset.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::config::PlaybackConfig;
use crate::foundation::math::Vec3;
use crate::render::surface::ColorId;
use crate::scene::{DrawMode, ObjectClass, Polygon, Scene, SceneError};

/// Errors raised while loading model files.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The header line is missing or unreadable; nothing can be loaded.
    #[error("malformed model header: {0}")]
    MalformedHeader(String),
    /// Scene construction failure (degenerate polygon that slipped past
    /// field validation, or a full scene)
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),
}

struct Header {
    offset: Vec3,
    scale: f64,
}

struct PolygonSpec {
    vertex_count: usize,
    priority_band: i64,
    color: ColorId,
    class: ObjectClass,
    mode: DrawMode,
    scale: f64,
}

/// Load every polygon record from `reader` into `scene`.
///
/// Returns the number of polygons added. Malformed records are skipped with
/// a warning; loading stops early when the scene reaches capacity.
pub fn load_model<R: BufRead>(reader: R, scene: &mut Scene) -> Result<usize, ModelError> {
    let mut lines = reader.lines();

    let header_line = lines
        .next()
        .ok_or_else(|| ModelError::MalformedHeader("empty file".into()))??;
    let header = parse_header(&header_line)
        .ok_or_else(|| ModelError::MalformedHeader(header_line.clone()))?;

    let mut added = 0;
    while let Some(line) = lines.next() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let Some(spec) = parse_spec(&line) else {
            log::warn!("skipping malformed polygon spec: {line:?}");
            continue;
        };

        match read_polygon(&mut lines, &header, &spec)? {
            Some(polygon) => {
                if scene.is_full() {
                    log::warn!("scene full, ignoring remaining polygon records");
                    break;
                }
                scene.push(polygon)?;
                added += 1;
            }
            None => log::warn!("skipping polygon record with malformed vertex data"),
        }
    }

    log::debug!("loaded {added} polygons");
    Ok(added)
}

/// Load a model file from disk into `scene`.
pub fn load_model_file<P: AsRef<Path>>(path: P, scene: &mut Scene) -> Result<usize, ModelError> {
    let file = File::open(&path)?;
    log::info!("loading polygons from {}", path.as_ref().display());
    load_model(BufReader::new(file), scene)
}

/// Build the whole scene from the configured model files, ground first.
///
/// A missing model file is skipped with a warning, mirroring a replay with
/// that object simply absent.
pub fn load_scene(config: &PlaybackConfig) -> Result<Scene, ModelError> {
    let mut scene = Scene::new();
    for path in [
        &config.ground_model,
        &config.target_model,
        &config.missile_model,
    ] {
        if Path::new(path).exists() {
            load_model_file(path, &mut scene)?;
        } else {
            log::warn!("model file {path} not found, skipping");
        }
    }
    Ok(scene)
}

fn parse_header(line: &str) -> Option<Header> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 5 {
        return None;
    }
    let x = fields[0].parse().ok()?;
    let y = fields[1].parse().ok()?;
    let z = fields[2].parse().ok()?;
    let scale = fields[3].parse().ok()?;
    Some(Header {
        offset: Vec3::new(x, y, z),
        scale,
    })
}

fn parse_spec(line: &str) -> Option<PolygonSpec> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 7 {
        return None;
    }
    let vertex_count: usize = fields[0].parse().ok()?;
    if vertex_count < 3 {
        return None;
    }
    let priority_band: i64 = fields[1].parse().ok()?;
    let color_index: i32 = fields[2].parse().ok()?;
    let class = match fields[3].parse::<i32>().ok()? {
        0 => ObjectClass::Ground,
        1 => ObjectClass::Target,
        2 => ObjectClass::Missile,
        _ => return None,
    };
    let mode = match fields[4].parse::<i32>().ok()? {
        0 => DrawMode::Outline,
        1 => DrawMode::Filled,
        2 => DrawMode::FilledCulled,
        _ => return None,
    };
    let scale: f64 = fields[5].parse().ok()?;

    // Out-of-table color indices fall back to black rather than failing the
    // record.
    let color = if (0..i32::from(ColorId::TABLE_LEN)).contains(&color_index) {
        ColorId(color_index as u8)
    } else {
        ColorId::BLACK
    };

    Some(PolygonSpec {
        vertex_count,
        priority_band,
        color,
        class,
        mode,
        scale,
    })
}

fn parse_point(line: &str, scale: f64) -> Option<Vec3> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 3 {
        return None;
    }
    let x: f64 = fields[0].parse().ok()?;
    let y: f64 = fields[1].parse().ok()?;
    let z: f64 = fields[2].parse().ok()?;
    Some(Vec3::new(x, y, z) * scale)
}

/// Read one polygon's vertex and offset lines. Returns `Ok(None)` when the
/// record is malformed (the lines are consumed either way).
fn read_polygon<I>(
    lines: &mut I,
    header: &Header,
    spec: &PolygonSpec,
) -> Result<Option<Polygon>, ModelError>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    let scale = spec.scale * header.scale;

    let mut vertices = Vec::with_capacity(spec.vertex_count);
    let mut malformed = false;
    for _ in 0..spec.vertex_count {
        let Some(line) = lines.next() else {
            return Ok(None);
        };
        match parse_point(&line?, scale) {
            Some(v) => vertices.push(v),
            None => malformed = true,
        }
    }

    let Some(offset_line) = lines.next() else {
        return Ok(None);
    };
    let Some(offset) = parse_point(&offset_line?, scale) else {
        return Ok(None);
    };

    if malformed {
        return Ok(None);
    }

    let polygon = Polygon::new(
        &vertices,
        spec.priority_band,
        spec.class,
        spec.mode,
        spec.color,
        offset + header.offset,
    )?;
    Ok(Some(polygon))
}
