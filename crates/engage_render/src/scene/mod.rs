//! # Scene Model
//!
//! Fixed-capacity polygon storage for the engagement scene. A polygon's index
//! in the [`Scene`] is its stable identity for the lifetime of a replay; the
//! depth queue and the frame driver refer to polygons by index only.
//!
//! The whole scene is rebuilt from the model files when a replay restarts.
//! Polygons are never removed individually.

mod polygon;

pub use polygon::{DrawMode, ObjectClass, Polygon, PRIORITY_BAND_SCALE};

use thiserror::Error;

/// Maximum number of polygons a scene can hold.
pub const MAX_POLYGONS: usize = 1024;

/// Errors raised while building scene geometry.
#[derive(Error, Debug)]
pub enum SceneError {
    /// A polygon needs at least 3 distinct vertices to have a well-defined
    /// centroid and normal.
    #[error("polygon has {count} vertices, need at least 3")]
    DegeneratePolygon {
        /// Number of vertices supplied
        count: usize,
    },
    /// The scene's fixed polygon capacity is exhausted.
    #[error("scene is full ({MAX_POLYGONS} polygons)")]
    CapacityExceeded,
}

/// Ordered, fixed-capacity list of polygons.
///
/// By convention the first polygon loaded is the ground plane; the frame
/// driver draws it outside the depth queue.
#[derive(Debug, Default)]
pub struct Scene {
    polygons: Vec<Polygon>,
}

impl Scene {
    /// Index of the ground plane polygon, by loading convention.
    pub const GROUND: usize = 0;

    /// Create an empty scene.
    pub fn new() -> Self {
        Self {
            polygons: Vec::with_capacity(MAX_POLYGONS),
        }
    }

    /// Append a polygon, returning its index (the polygon's identity).
    pub fn push(&mut self, polygon: Polygon) -> Result<usize, SceneError> {
        if self.polygons.len() == MAX_POLYGONS {
            return Err(SceneError::CapacityExceeded);
        }
        self.polygons.push(polygon);
        Ok(self.polygons.len() - 1)
    }

    /// Number of polygons in the scene.
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    /// Whether the scene holds no polygons.
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Whether the scene is at capacity.
    pub fn is_full(&self) -> bool {
        self.polygons.len() == MAX_POLYGONS
    }

    /// Borrow a polygon by index.
    pub fn get(&self, index: usize) -> Option<&Polygon> {
        self.polygons.get(index)
    }

    /// Mutably borrow a polygon by index.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Polygon> {
        self.polygons.get_mut(index)
    }

    /// Iterate over the polygons in identity order.
    pub fn iter(&self) -> impl Iterator<Item = &Polygon> {
        self.polygons.iter()
    }

    /// Iterate mutably over the polygons in identity order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Polygon> {
        self.polygons.iter_mut()
    }
}
