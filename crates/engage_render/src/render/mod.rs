//! # Rendering Pipeline
//!
//! The per-frame pipeline from world-space polygons to draw calls on an
//! external surface:
//!
//! 1. [`visibility`] projects polygons into view space, culls back faces and
//!    fills the depth queue with sort keys.
//! 2. [`queue`] orders visible polygons farthest-first (painter's algorithm;
//!    there is no depth buffer).
//! 3. [`clip`] cuts each dequeued polygon's vertex ring against the six
//!    planes of the viewing pyramid.
//! 4. [`camera`] holds the view pose and the scale/focal-length constants
//!    that map clipped view-space points to surface pixels.
//!
//! The surface itself ([`surface::RenderSurface`]) is a consumer-supplied
//! trait object; this crate never rasterizes.

pub mod camera;
pub mod clip;
pub mod queue;
pub mod surface;
pub mod visibility;

pub use camera::CameraState;
pub use queue::{DepthQueue, QueueEntry};
pub use surface::{ColorId, RenderSurface, ScreenPoint};
