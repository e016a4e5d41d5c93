//! Camera state and view-space scaling.
//!
//! [`CameraState`] carries the camera pose plus every constant derived from
//! the field of view, zoom and viewport shape. The derived values are
//! recomputed only when zoom changes, never per frame, and all projection
//! math reads them from here — there is no global scale state.
//!
//! # Coordinate frames
//!
//! World space is right-handed with +Z down (heights are negative Z). View
//! space keeps +x as the forward axis; the lateral (y) and vertical (z)
//! axes are pre-scaled by the zoom/aspect factors so the clipping pyramid
//! becomes the symmetric `|y| <= x`, `|z| <= x` cone. Screen mapping divides
//! those factors back out and applies the focal length.

use crate::foundation::math::{round_half_away_from_zero, Vec3, RADIANS_PER_DEGREE};
use crate::transform::RotationMatrix;

use super::surface::ScreenPoint;

/// Zoom multiplier applied per zoom-in/zoom-out command.
pub const ZOOM_STEP: f64 = 1.25;

/// Camera pose, optics and the scale constants derived from them.
#[derive(Debug, Clone)]
pub struct CameraState {
    /// Camera position in world space
    pub position: Vec3,
    /// Yaw (psi) in radians
    pub yaw: f64,
    /// Pitch (theta) in radians
    pub pitch: f64,
    /// Roll (phi) in radians
    pub roll: f64,

    fov_degrees: f64,
    zoom: f64,
    fov_size: f64,
    ratio: f64,
    center_x: f64,
    center_y: f64,

    focal_length: f64,
    fl_min: f64,
    sfac_y: f64,
    sfac_y_ar: f64,
    sfac_z: f64,
}

impl CameraState {
    /// Create a camera for a viewport of `width`×`height` pixels with the
    /// given whole field-of-view angle in degrees, at zoom 1.
    ///
    /// The vertical viewport extent doubles as the clipping-frustum base
    /// size; the aspect ratio only stretches the lateral scale factor.
    pub fn new(width: u32, height: u32, fov_degrees: f64) -> Self {
        let fov_size = f64::from(height);
        let ratio = f64::from(width) / f64::from(height);
        let mut camera = Self {
            position: Vec3::zeros(),
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
            fov_degrees,
            zoom: 1.0,
            fov_size,
            ratio,
            center_x: (fov_size * ratio) / 2.0,
            center_y: fov_size / 2.0,
            focal_length: 0.0,
            fl_min: 0.0,
            sfac_y: 0.0,
            sfac_y_ar: 0.0,
            sfac_z: 0.0,
        };
        camera.recompute_optics();
        camera
    }

    /// Set the camera pose for this frame.
    pub fn set_pose(&mut self, position: Vec3, yaw: f64, pitch: f64, roll: f64) {
        self.position = position;
        self.yaw = yaw;
        self.pitch = pitch;
        self.roll = roll;
    }

    /// Rotation matrix for the current pose.
    pub fn rotation(&self) -> RotationMatrix {
        RotationMatrix::from_euler(self.yaw, self.pitch, self.roll)
    }

    /// Current zoom factor.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Reset zoom to 1.
    pub fn zoom_reset(&mut self) {
        self.set_zoom(1.0);
    }

    /// Narrow the field of view by one zoom step.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP);
    }

    /// Widen the field of view by one zoom step.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP);
    }

    /// Set the zoom factor and rebuild the derived optics.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
        self.recompute_optics();
    }

    /// Focal length in pixels.
    pub fn focal_length(&self) -> f64 {
        self.focal_length
    }

    /// Forward distance below which grid lines are not worth clipping.
    pub fn fl_min(&self) -> f64 {
        self.fl_min
    }

    /// Aspect-scaled lateral scale factor.
    pub fn sfac_y_ar(&self) -> f64 {
        self.sfac_y_ar
    }

    /// Vertical scale factor.
    pub fn sfac_z(&self) -> f64 {
        self.sfac_z
    }

    /// Transform a world-space point into scaled view (clip) space.
    ///
    /// Translate into camera-relative coordinates, rotate into view axes,
    /// then scale the lateral and vertical axes; the forward axis is left
    /// unscaled.
    pub fn to_view(&self, rotation: &RotationMatrix, world: Vec3) -> Vec3 {
        let v = rotation.world_to_view(world - self.position);
        Vec3::new(v.x, v.y * self.sfac_y_ar, v.z * self.sfac_z)
    }

    /// Map a clipped view-space point to surface pixels.
    ///
    /// The scale factors applied by [`to_view`](Self::to_view) are divided
    /// back out; the focal length over the forward coordinate gives the
    /// perspective scale.
    pub fn project(&self, view: Vec3) -> ScreenPoint {
        let ys = view.y / self.sfac_y_ar;
        let zs = view.z / self.sfac_z;
        let sf = self.focal_length / view.x;
        ScreenPoint::new(
            (round_half_away_from_zero(sf * ys) + self.center_x.floor() as i64) as i32,
            (round_half_away_from_zero(sf * zs) + self.center_y.floor() as i64) as i32,
        )
    }

    // Effective fov shrinks with zoom: fov_eff = 2*atan(tan(fov/2)/zoom).
    fn recompute_optics(&mut self) {
        let half_fov = 0.5 * self.fov_degrees * RADIANS_PER_DEGREE;
        let zoomed = 2.0 * (half_fov.tan() / self.zoom).atan();
        let tan_half = (zoomed / 2.0).tan();
        self.focal_length = (self.fov_size / 2.0) / tan_half;
        self.fl_min = 0.1 * self.focal_length;
        self.sfac_y = 1.0 / tan_half;
        self.sfac_y_ar = self.sfac_y / self.ratio;
        self.sfac_z = 1.0 / tan_half;
    }
}
