//! Headless engagement replay viewer.
//!
//! Drives the replay pipeline end to end against a tracing surface that
//! counts (and at debug level, logs) every draw call instead of
//! rasterizing. Useful for exercising trajectory and model data without a
//! display; a windowed frontend would swap in its own `RenderSurface` and
//! feed `ReplayCommand`s from real input.

use std::fs::File;
use std::io::BufReader;
use std::time::Duration;

use engage_render::prelude::*;

/// Render surface that records call counts instead of drawing.
#[derive(Debug, Default)]
struct TraceSurface {
    filled: u64,
    outlined: u64,
    lines: u64,
    texts: u64,
}

impl RenderSurface for TraceSurface {
    fn fill_polygon(&mut self, points: &[ScreenPoint], color: ColorId) {
        self.filled += 1;
        log::debug!("fill {} pts color {}", points.len(), color.0);
    }

    fn stroke_polygon(&mut self, points: &[ScreenPoint], color: ColorId, line_width: u32) {
        self.outlined += 1;
        log::debug!("stroke {} pts color {} width {line_width}", points.len(), color.0);
    }

    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, _color: ColorId) {
        self.lines += 1;
        log::trace!("line ({},{}) -> ({},{})", from.x, from.y, to.x, to.y);
    }

    fn draw_text(&mut self, at: ScreenPoint, text: &str) {
        self.texts += 1;
        log::trace!("text ({},{}) {text:?}", at.x, at.y);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    engage_render::foundation::logging::init();

    let config = match std::env::args().nth(1) {
        Some(path) => ReplayConfig::load(&path)?,
        None => ReplayConfig::default(),
    };

    let scene = load_scene(&config.playback)?;
    log::info!("scene loaded with {} polygons", scene.len());

    let camera = CameraState::new(
        config.display.width,
        config.display.height,
        config.display.fov_degrees,
    );
    let mut driver = ReplayDriver::new(scene, camera, config.playback.frame_delay_ms);

    let trajectory = File::open(&config.playback.trajectory)?;
    let mut stream = TrajectoryReader::new(BufReader::new(trajectory));
    let mut surface = TraceSurface::default();

    let mut frames = 0_u64;
    loop {
        match driver.advance(&mut stream, &mut surface)? {
            PlaybackState::Running => {
                frames += 1;
                std::thread::sleep(Duration::from_millis(driver.frame_delay_ms()));
            }
            PlaybackState::Paused => unreachable!("no pause source in headless mode"),
            PlaybackState::Stopped | PlaybackState::Quit => break,
        }
    }

    log::info!(
        "replayed {frames} frames: {} fills, {} outlines, {} grid lines, {} text draws",
        surface.filled,
        surface.outlined,
        surface.lines,
        surface.texts
    );
    Ok(())
}
