//! # Transform Engine
//!
//! Builds direction-cosine rotation matrices from yaw/pitch/roll Euler
//! angles and applies rigid transforms to polygons.
//!
//! The matrix algebra is the load-bearing part of this module: the
//! visibility pass, depth keys and camera placement all assume the same
//! right-handed, yaw-then-pitch-then-roll composition with these exact sign
//! conventions. Do not swap it for a generic Euler helper with different
//! axis ordering.

use crate::foundation::math::{Mat3, Vec3};
use crate::scene::Polygon;

/// A world-to-view direction cosine matrix built from Euler angles.
///
/// The same matrix serves both directions of the transform: [`world_to_view`]
/// applies it directly (used when projecting world geometry into camera
/// axes), [`body_to_world`] applies its transpose, which for a rotation is
/// the inverse (used when posing an object's model geometry in world space).
///
/// [`world_to_view`]: RotationMatrix::world_to_view
/// [`body_to_world`]: RotationMatrix::body_to_world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationMatrix(Mat3);

impl RotationMatrix {
    /// Build the rotation matrix for right-handed yaw (psi), pitch (theta),
    /// roll (phi), all in radians, composed yaw then pitch then roll.
    pub fn from_euler(yaw: f64, pitch: f64, roll: f64) -> Self {
        let (sin_yaw, cos_yaw) = yaw.sin_cos();
        let (sin_pitch, cos_pitch) = pitch.sin_cos();
        let (sin_roll, cos_roll) = roll.sin_cos();

        Self(Mat3::new(
            cos_pitch * cos_yaw,
            cos_pitch * sin_yaw,
            -sin_pitch,
            sin_roll * sin_pitch * cos_yaw - cos_roll * sin_yaw,
            sin_roll * sin_pitch * sin_yaw + cos_roll * cos_yaw,
            sin_roll * cos_pitch,
            cos_roll * sin_pitch * cos_yaw + sin_roll * sin_yaw,
            cos_roll * sin_pitch * sin_yaw - sin_roll * cos_yaw,
            cos_roll * cos_pitch,
        ))
    }

    /// Rotate a world-frame vector into view axes.
    pub fn world_to_view(&self, v: Vec3) -> Vec3 {
        self.0 * v
    }

    /// Rotate a body-frame vector into world axes (transpose application).
    pub fn body_to_world(&self, v: Vec3) -> Vec3 {
        self.0.transpose() * v
    }
}

/// Pose a polygon in world space: rotate its model geometry by `rotation`
/// (body to world) and translate by `translation`.
///
/// The world centroid and every world vertex are rewritten; the world normal
/// is recomputed from the transformed vertices rather than rotated. Called
/// once per frame for each polygon of a moving object; ground polygons are
/// never moved.
pub fn move_polygon(polygon: &mut Polygon, rotation: &RotationMatrix, translation: Vec3) {
    let centroid = rotation.body_to_world(polygon.model_centroid()) + translation;
    polygon.set_world_centroid(centroid);

    for i in 0..polygon.vertex_count() {
        let vertex = rotation.body_to_world(polygon.model_vertices()[i]) + translation;
        polygon.set_world_vertex(i, vertex);
    }

    polygon.refresh_world_normal();
}
