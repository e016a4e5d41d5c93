//! Visibility and range evaluation.
//!
//! Projects polygons into view space, culls back faces, and assigns the
//! depth sort key that orders the frame's draw calls. The key combines the
//! polygon's coarse priority band with its camera range quantized to
//! millimeters, so band dominates and range breaks ties within a band.

use thiserror::Error;

use crate::foundation::math::{magnitude, round_half_away_from_zero};
use crate::scene::{Polygon, Scene};

use super::camera::CameraState;
use super::queue::{DepthQueue, QueueEntry};

/// Range quantization: world units to millimeters.
const RANGE_SCALE: f64 = 1000.0;

/// Broken-invariant errors surfaced by the evaluator.
#[derive(Error, Debug)]
pub enum VisibilityError {
    /// Priority bands and ranges are both non-negative, so a negative sort
    /// key means depth ordering is corrupt for the rest of the frame.
    #[error("negative sort key {key} for polygon {polygon}")]
    NegativeSortKey {
        /// The corrupt key
        key: i64,
        /// Scene index of the offending polygon
        polygon: usize,
    },
}

/// Outcome of projecting one polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Back face; nothing projected, polygon skipped
    Culled,
    /// Every vertex is behind the view point
    Behind,
    /// At least one vertex ahead; carries camera-space centroid range
    Visible {
        /// Range from camera to centroid in view space
        range: f64,
    },
}

/// Project a polygon into view space and set its visibility flag.
///
/// Back-face test first (only for modes that cull): the world normal rotated
/// into view axes against the centroid eye vector. Otherwise every vertex is
/// written to the polygon's view snapshot, and the polygon is visible when
/// any vertex has a non-negative forward coordinate — vertices outside the
/// lateral bounds still count, the clipper handles those.
pub fn project_polygon(polygon: &mut Polygon, camera: &CameraState) -> Projection {
    let rotation = camera.rotation();
    let eye = rotation.world_to_view(polygon.world_centroid() - camera.position);

    if polygon.mode().culls_back_faces() {
        let normal = rotation.world_to_view(polygon.world_normal());
        if normal.dot(&eye) > 0.0 {
            polygon.set_visible(false);
            return Projection::Culled;
        }
    }

    let mut in_front = false;
    for i in 0..polygon.vertex_count() {
        let view = camera.to_view(&rotation, polygon.world_vertices()[i]);
        polygon.set_view_vertex(i, view);
        if view.x >= 0.0 {
            in_front = true;
        }
    }

    polygon.set_visible(in_front);
    if in_front {
        Projection::Visible {
            range: magnitude(eye),
        }
    } else {
        Projection::Behind
    }
}

/// Project one scene polygon and enqueue it for depth-ordered drawing.
///
/// Skips the enqueue for culled/behind polygons and for a full queue (the
/// polygon is simply absent from this frame — a visually incomplete frame,
/// not an error). A negative quantized range or sort key is a fatal
/// consistency error: the entry is still enqueued so the frame can finish,
/// but the caller must halt playback.
pub fn evaluate_polygon(
    scene: &mut Scene,
    index: usize,
    camera: &CameraState,
    queue: &mut DepthQueue,
) -> Result<(), VisibilityError> {
    let Some(polygon) = scene.get_mut(index) else {
        return Ok(());
    };

    let range = match project_polygon(polygon, camera) {
        Projection::Visible { range } => range,
        Projection::Culled | Projection::Behind => return Ok(()),
    };

    if queue.is_full() {
        log::debug!("depth queue full, dropping polygon {index} this frame");
        return Ok(());
    }

    let scaled_range = round_half_away_from_zero(range * RANGE_SCALE);
    let key = polygon.priority() + scaled_range;
    queue.enqueue(QueueEntry {
        key,
        polygon: index,
    });

    if scaled_range < 0 || key < 0 {
        return Err(VisibilityError::NegativeSortKey {
            key,
            polygon: index,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::render::surface::ColorId;
    use crate::scene::{DrawMode, ObjectClass, PRIORITY_BAND_SCALE};
    use approx::assert_relative_eq;

    fn camera_at_origin() -> CameraState {
        CameraState::new(800, 600, 90.0)
    }

    fn facing_square(mode: DrawMode) -> Polygon {
        // In the world frame (+x forward from the origin camera), a square
        // at x = 50 wound so its normal points back at the camera (-x).
        Polygon::new(
            &[
                Vec3::new(50.0, -5.0, 5.0),
                Vec3::new(50.0, 5.0, 5.0),
                Vec3::new(50.0, 5.0, -5.0),
                Vec3::new(50.0, -5.0, -5.0),
            ],
            1,
            ObjectClass::Target,
            mode,
            ColorId::GREEN,
            Vec3::zeros(),
        )
        .unwrap()
    }

    fn away_square(mode: DrawMode) -> Polygon {
        // Same square wound the other way: normal points +x, away from the
        // camera.
        Polygon::new(
            &[
                Vec3::new(50.0, -5.0, -5.0),
                Vec3::new(50.0, 5.0, -5.0),
                Vec3::new(50.0, 5.0, 5.0),
                Vec3::new(50.0, -5.0, 5.0),
            ],
            1,
            ObjectClass::Target,
            mode,
            ColorId::GREEN,
            Vec3::zeros(),
        )
        .unwrap()
    }

    #[test]
    fn test_facing_polygon_is_visible() {
        let camera = camera_at_origin();
        let mut poly = facing_square(DrawMode::FilledCulled);
        let result = project_polygon(&mut poly, &camera);
        assert!(matches!(result, Projection::Visible { .. }));
        assert!(poly.is_visible());
        if let Projection::Visible { range } = result {
            assert_relative_eq!(range, 50.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_back_face_is_culled_and_never_enqueued() {
        let mut scene = Scene::new();
        let index = scene.push(away_square(DrawMode::FilledCulled)).unwrap();
        let camera = camera_at_origin();
        let mut queue = DepthQueue::new();

        evaluate_polygon(&mut scene, index, &camera, &mut queue).unwrap();

        assert!(queue.is_empty());
        assert!(!scene.get(index).unwrap().is_visible());
    }

    #[test]
    fn test_two_sided_mode_skips_back_face_test() {
        let camera = camera_at_origin();
        let mut poly = away_square(DrawMode::Filled);
        assert!(matches!(
            project_polygon(&mut poly, &camera),
            Projection::Visible { .. }
        ));
        assert!(poly.is_visible());
    }

    #[test]
    fn test_polygon_behind_camera_not_enqueued() {
        let mut scene = Scene::new();
        let mut poly = facing_square(DrawMode::Filled);
        // Move it behind the camera.
        crate::transform::move_polygon(
            &mut poly,
            &crate::transform::RotationMatrix::from_euler(0.0, 0.0, 0.0),
            Vec3::new(-100.0, 0.0, 0.0),
        );
        let index = scene.push(poly).unwrap();
        let camera = camera_at_origin();
        let mut queue = DepthQueue::new();

        evaluate_polygon(&mut scene, index, &camera, &mut queue).unwrap();

        assert!(queue.is_empty());
        assert!(!scene.get(index).unwrap().is_visible());
    }

    #[test]
    fn test_sort_key_combines_band_and_range() {
        let mut scene = Scene::new();
        let index = scene.push(facing_square(DrawMode::Filled)).unwrap();
        let camera = camera_at_origin();
        let mut queue = DepthQueue::new();

        evaluate_polygon(&mut scene, index, &camera, &mut queue).unwrap();

        let entry = queue.dequeue().unwrap();
        assert_eq!(entry.polygon, index);
        assert_eq!(entry.key, PRIORITY_BAND_SCALE + 50_000);
    }

    #[test]
    fn test_full_queue_drops_polygon() {
        let mut scene = Scene::new();
        let a = scene.push(facing_square(DrawMode::Filled)).unwrap();
        let b = scene.push(facing_square(DrawMode::Filled)).unwrap();
        let camera = camera_at_origin();
        let mut queue = DepthQueue::with_capacity(1);

        evaluate_polygon(&mut scene, a, &camera, &mut queue).unwrap();
        evaluate_polygon(&mut scene, b, &camera, &mut queue).unwrap();

        assert_eq!(queue.len(), 1);
        // The dropped polygon still carries its visibility flag.
        assert!(scene.get(b).unwrap().is_visible());
    }

    #[test]
    fn test_view_vertices_are_scaled() {
        let camera = camera_at_origin();
        let mut poly = facing_square(DrawMode::Filled);
        project_polygon(&mut poly, &camera);
        let view = poly.view_vertices();
        assert_relative_eq!(view[0].x, 50.0, epsilon = 1e-9);
        assert_relative_eq!(view[0].y, -5.0 * camera.sfac_y_ar(), epsilon = 1e-9);
        assert_relative_eq!(view[0].z, 5.0 * camera.sfac_z(), epsilon = 1e-9);
    }
}
