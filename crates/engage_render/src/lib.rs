//! # Engage Render
//!
//! A 3D missile/target engagement replay renderer. Each trajectory record
//! becomes one frame: rigid transforms pose the target and missile polygon
//! models, a tracking camera is placed from the missile-to-target sight
//! vector, and every polygon is projected, back-face culled, depth-ordered
//! through a priority queue and clipped against the viewing pyramid before
//! being handed to an external drawing surface as 2D points.
//!
//! ## Architecture
//!
//! - **foundation**: double-precision math types and the logging setup
//! - **scene**: fixed-capacity polygon storage; index identity
//! - **transform**: direction-cosine matrices and rigid polygon moves
//! - **render**: visibility/culling, depth queue, frustum clipper, camera
//! - **assets**: model-file and trajectory-stream parsers
//! - **playback**: the per-record frame driver and session state machine
//! - **config**: serde-backed replay configuration
//!
//! ## Design Notes
//!
//! Depth ordering is a painter's algorithm over a binary max-heap, not a
//! z-buffer: polygons draw back to front, coarse per-object priority bands
//! first, camera range within a band. The windowing surface, input handling
//! and frame pacing all live outside this crate behind small interfaces.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use engage_render::prelude::*;
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # struct MySurface;
//! # impl RenderSurface for MySurface {
//! #     fn fill_polygon(&mut self, _: &[ScreenPoint], _: ColorId) {}
//! #     fn stroke_polygon(&mut self, _: &[ScreenPoint], _: ColorId, _: u32) {}
//! #     fn draw_line(&mut self, _: ScreenPoint, _: ScreenPoint, _: ColorId) {}
//! #     fn draw_text(&mut self, _: ScreenPoint, _: &str) {}
//! # }
//! let config = ReplayConfig::default();
//! let scene = load_scene(&config.playback)?;
//! let camera = CameraState::new(
//!     config.display.width,
//!     config.display.height,
//!     config.display.fov_degrees,
//! );
//! let mut driver = ReplayDriver::new(scene, camera, config.playback.frame_delay_ms);
//! let mut stream = TrajectoryReader::new(BufReader::new(File::open(
//!     &config.playback.trajectory,
//! )?));
//! let mut surface = MySurface;
//! while driver.advance(&mut stream, &mut surface)? == PlaybackState::Running {
//!     // pace by driver.frame_delay_ms(), feed commands...
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod config;
pub mod foundation;
pub mod playback;
pub mod render;
pub mod scene;
pub mod transform;

/// Common imports for replay consumers
pub mod prelude {
    pub use crate::{
        assets::{load_scene, TrajectoryReader},
        config::ReplayConfig,
        foundation::math::Vec3,
        playback::{CameraMode, PlaybackState, ReplayCommand, ReplayDriver},
        render::{camera::CameraState, ColorId, RenderSurface, ScreenPoint},
        scene::{DrawMode, ObjectClass, Polygon, Scene},
    };
}
