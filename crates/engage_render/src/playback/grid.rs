//! Ground plane reference grid.
//!
//! A fixed square centered on the world origin, rendered as 41 lines per
//! axis interpolated between its transformed corner points. Lines are
//! clipped through the same frustum clipper as polygons (a two-point ring)
//! and drawn in white.

use crate::foundation::math::Vec3;
use crate::render::camera::CameraState;
use crate::render::clip::clip_ring;
use crate::render::surface::{ColorId, RenderSurface};

/// Half-extent of the grid square in world units.
const GRID_EXTENT: f64 = 2000.0;
/// Lines drawn per axis.
const GRID_LINES: usize = 41;
/// Fractional spacing between adjacent lines.
const GRID_STEP: f64 = 0.025;

/// Which world axis the drawn lines run parallel to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAxis {
    /// Lines parallel to the world X axis
    X,
    /// Lines parallel to the world Y axis
    Y,
}

/// The grid's corner points in world space and their per-frame view-space
/// transforms.
#[derive(Debug)]
pub struct GroundGrid {
    world: [Vec3; 4],
    view: [Vec3; 4],
}

impl Default for GroundGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl GroundGrid {
    /// Grid square on the ground plane (z = 0).
    pub fn new() -> Self {
        let world = [
            Vec3::new(GRID_EXTENT, -GRID_EXTENT, 0.0),
            Vec3::new(GRID_EXTENT, GRID_EXTENT, 0.0),
            Vec3::new(-GRID_EXTENT, GRID_EXTENT, 0.0),
            Vec3::new(-GRID_EXTENT, -GRID_EXTENT, 0.0),
        ];
        Self {
            world,
            view: [Vec3::zeros(); 4],
        }
    }

    /// Transform the corner points into view space for this frame.
    pub fn transform(&mut self, camera: &CameraState) {
        let rotation = camera.rotation();
        for (view, world) in self.view.iter_mut().zip(&self.world) {
            *view = camera.to_view(&rotation, *world);
        }
    }

    /// Draw one axis' grid lines, each clipped to the viewing pyramid.
    ///
    /// Lines whose base endpoints both sit behind the minimum focal distance
    /// are skipped before clipping.
    pub fn draw<S: RenderSurface>(&self, axis: GridAxis, camera: &CameraState, surface: &mut S) {
        let (i10, i11, i20, i21) = match axis {
            GridAxis::X => (3, 2, 0, 1),
            GridAxis::Y => (3, 0, 2, 1),
        };

        let d1 = GRID_STEP * (self.view[i11] - self.view[i10]);
        let d2 = GRID_STEP * (self.view[i21] - self.view[i20]);

        for k in 0..GRID_LINES {
            let k = k as f64;
            let a = self.view[i10] + k * d1;
            let b = self.view[i20] + k * d2;
            if a.x <= camera.fl_min() && b.x <= camera.fl_min() {
                continue;
            }

            let clipped = clip_ring(&[a, b, a]);
            if clipped.len() > 2 {
                surface.draw_line(
                    camera.project(clipped[0]),
                    camera.project(clipped[1]),
                    ColorId::WHITE,
                );
            }
        }
    }
}
