//! Polygon storage and construction.
//!
//! Each polygon keeps three coordinate snapshots per vertex in parallel
//! arrays: the immutable model-space ring, the world-space ring rewritten by
//! the transform engine every frame, and the view-space ring rewritten by the
//! visibility pass and consumed by the clipper. The rings are stored open
//! (no closing duplicate); closure is added where the clipper needs it.

use crate::foundation::math::{normalize_or_zero, Vec3};
use crate::render::surface::ColorId;

use super::SceneError;

/// Multiplier that turns a coarse priority band into the high digits of a
/// depth sort key. Range in millimeters occupies the low digits.
pub const PRIORITY_BAND_SCALE: i64 = 100_000_000;

/// Which engagement object a polygon belongs to.
///
/// Target and missile polygons are re-posed from every trajectory record;
/// ground polygons stay fixed in world space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectClass {
    /// Static ground plane and ground-fixed structures
    Ground,
    /// The target aircraft
    Target,
    /// The interceptor missile
    Missile,
}

/// How a polygon is rasterized, and whether it is subject to back-face
/// culling.
///
/// The culling variant is kept as an explicit mode rather than being inferred
/// from any other field: one-sided surfaces (fuselage facets) use
/// [`DrawMode::FilledCulled`], two-sided sheets (fins, wings) use
/// [`DrawMode::Filled`] so both sides render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// Stroke the ring outline only
    Outline,
    /// Fill, visible from both sides
    Filled,
    /// Fill, back faces culled against the view direction
    FilledCulled,
}

impl DrawMode {
    /// Whether this mode fills the polygon interior.
    pub fn fills(self) -> bool {
        !matches!(self, Self::Outline)
    }

    /// Whether back-facing polygons in this mode are dropped before
    /// projection.
    pub fn culls_back_faces(self) -> bool {
        matches!(self, Self::FilledCulled)
    }
}

/// A convex polygon with per-frame world and view snapshots.
///
/// Invariant (assumed from the model files, checked only for vertex count):
/// vertices are coplanar and wound counter-clockwise when viewed from the
/// outward side, so the first two centroid-relative edges define the outward
/// normal.
#[derive(Debug, Clone)]
pub struct Polygon {
    model: Vec<Vec3>,
    world: Vec<Vec3>,
    view: Vec<Vec3>,
    visible: bool,
    priority: i64,
    class: ObjectClass,
    mode: DrawMode,
    color: ColorId,
    model_centroid: Vec3,
    world_centroid: Vec3,
    model_normal: Vec3,
    world_normal: Vec3,
}

impl Polygon {
    /// Build a polygon from model vertices offset by `offset`.
    ///
    /// The centroid is the arithmetic mean of the offset vertices; the normal
    /// is the normalized cross product of the first two centroid-relative
    /// edge vectors. World snapshots start equal to the model snapshots so a
    /// static polygon is valid without ever being moved.
    pub fn new(
        vertices: &[Vec3],
        priority_band: i64,
        class: ObjectClass,
        mode: DrawMode,
        color: ColorId,
        offset: Vec3,
    ) -> Result<Self, SceneError> {
        if vertices.len() < 3 {
            return Err(SceneError::DegeneratePolygon {
                count: vertices.len(),
            });
        }

        let model: Vec<Vec3> = vertices.iter().map(|v| v + offset).collect();
        let centroid = model.iter().sum::<Vec3>() / model.len() as f64;
        let normal = ring_normal(model[0], model[1], centroid);

        Ok(Self {
            world: model.clone(),
            view: vec![Vec3::zeros(); model.len()],
            model,
            visible: false,
            priority: priority_band * PRIORITY_BAND_SCALE,
            class,
            mode,
            color,
            model_centroid: centroid,
            world_centroid: centroid,
            model_normal: normal,
            world_normal: normal,
        })
    }

    /// Number of distinct vertices in the ring.
    pub fn vertex_count(&self) -> usize {
        self.model.len()
    }

    /// Model-space vertex ring (immutable after load).
    pub fn model_vertices(&self) -> &[Vec3] {
        &self.model
    }

    /// Current world-space vertex ring.
    pub fn world_vertices(&self) -> &[Vec3] {
        &self.world
    }

    /// Current view-space vertex ring.
    pub fn view_vertices(&self) -> &[Vec3] {
        &self.view
    }

    /// The view-space ring closed with a duplicate of its first vertex, as
    /// the frustum clipper consumes it.
    pub fn closed_view_ring(&self) -> Vec<Vec3> {
        let mut ring = self.view.clone();
        ring.push(self.view[0]);
        ring
    }

    /// Depth sort key contribution of this polygon's priority band.
    pub fn priority(&self) -> i64 {
        self.priority
    }

    /// Object class this polygon belongs to.
    pub fn class(&self) -> ObjectClass {
        self.class
    }

    /// Draw mode.
    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    /// Color identifier handed to the render surface.
    pub fn color(&self) -> ColorId {
        self.color
    }

    /// Whether the polygon was projected in front of the camera this frame.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Record this frame's visibility outcome.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Model-space centroid.
    pub fn model_centroid(&self) -> Vec3 {
        self.model_centroid
    }

    /// Current world-space centroid.
    pub fn world_centroid(&self) -> Vec3 {
        self.world_centroid
    }

    /// Current world-space outward normal.
    pub fn world_normal(&self) -> Vec3 {
        self.world_normal
    }

    pub(crate) fn set_world_centroid(&mut self, centroid: Vec3) {
        self.world_centroid = centroid;
    }

    pub(crate) fn set_world_vertex(&mut self, index: usize, vertex: Vec3) {
        self.world[index] = vertex;
    }

    pub(crate) fn set_view_vertex(&mut self, index: usize, vertex: Vec3) {
        self.view[index] = vertex;
    }

    /// Recompute the world normal from the first two transformed edges.
    ///
    /// Recomputed rather than rotated so the normal stays consistent with
    /// the vertices however they were produced.
    pub(crate) fn refresh_world_normal(&mut self) {
        self.world_normal = ring_normal(self.world[0], self.world[1], self.world_centroid);
    }
}

/// Outward normal of a CCW ring given its first two vertices and centroid.
fn ring_normal(first: Vec3, second: Vec3, centroid: Vec3) -> Vec3 {
    let v0 = first - centroid;
    let v1 = second - centroid;
    normalize_or_zero(v0.cross(&v1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(2.0, 2.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
        ]
    }

    #[test]
    fn test_centroid_is_vertex_mean() {
        let poly = Polygon::new(
            &square(),
            1,
            ObjectClass::Target,
            DrawMode::Filled,
            ColorId::RED,
            Vec3::zeros(),
        )
        .unwrap();
        let centroid = poly.model_centroid();
        assert_relative_eq!(centroid.x, 1.0);
        assert_relative_eq!(centroid.y, 1.0);
        assert_relative_eq!(centroid.z, 0.0);
    }

    #[test]
    fn test_offset_applies_to_vertices_and_centroid() {
        let poly = Polygon::new(
            &square(),
            1,
            ObjectClass::Target,
            DrawMode::Filled,
            ColorId::RED,
            Vec3::new(10.0, 0.0, -5.0),
        )
        .unwrap();
        assert_relative_eq!(poly.model_vertices()[0].x, 10.0);
        assert_relative_eq!(poly.model_centroid().x, 11.0);
        assert_relative_eq!(poly.model_centroid().z, -5.0);
    }

    #[test]
    fn test_normal_follows_ccw_winding() {
        // CCW in the xy plane viewed from +z: normal points along +z.
        let poly = Polygon::new(
            &square(),
            1,
            ObjectClass::Target,
            DrawMode::Filled,
            ColorId::RED,
            Vec3::zeros(),
        )
        .unwrap();
        let n = poly.world_normal();
        assert_relative_eq!(n.x, 0.0);
        assert_relative_eq!(n.y, 0.0);
        assert_relative_eq!(n.z, 1.0);
    }

    #[test]
    fn test_priority_band_scaling() {
        let poly = Polygon::new(
            &square(),
            3,
            ObjectClass::Missile,
            DrawMode::FilledCulled,
            ColorId::BLUE,
            Vec3::zeros(),
        )
        .unwrap();
        assert_eq!(poly.priority(), 3 * PRIORITY_BAND_SCALE);
    }

    #[test]
    fn test_two_vertices_is_an_error() {
        let result = Polygon::new(
            &[Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0)],
            1,
            ObjectClass::Target,
            DrawMode::Filled,
            ColorId::RED,
            Vec3::zeros(),
        );
        assert!(matches!(
            result,
            Err(SceneError::DegeneratePolygon { count: 2 })
        ));
    }

    #[test]
    fn test_closed_ring_duplicates_first_vertex() {
        let poly = Polygon::new(
            &square(),
            1,
            ObjectClass::Target,
            DrawMode::Filled,
            ColorId::RED,
            Vec3::zeros(),
        )
        .unwrap();
        let ring = poly.closed_view_ring();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring[0], ring[4]);
    }
}
