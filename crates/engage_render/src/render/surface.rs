//! Render surface interface.
//!
//! The core produces already-projected 2D pixel coordinates and is agnostic
//! to how they are rasterized; a windowing backend implements
//! [`RenderSurface`] and receives draw calls in painter's order.

/// A point in surface pixel coordinates, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenPoint {
    /// Horizontal pixel coordinate
    pub x: i32,
    /// Vertical pixel coordinate
    pub y: i32,
}

impl ScreenPoint {
    /// Create a screen point.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Index into the surface's color table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorId(pub u8);

impl ColorId {
    /// White
    pub const WHITE: Self = Self(0);
    /// Black
    pub const BLACK: Self = Self(1);
    /// Red
    pub const RED: Self = Self(2);
    /// Green
    pub const GREEN: Self = Self(3);
    /// Blue
    pub const BLUE: Self = Self(4);
    /// Cyan
    pub const CYAN: Self = Self(5);
    /// Yellow
    pub const YELLOW: Self = Self(6);
    /// Brown
    pub const BROWN: Self = Self(7);

    /// Number of colors in the standard table.
    pub const TABLE_LEN: u8 = 8;
}

/// Primitive drawing operations the frame driver issues each frame.
///
/// Implementations rasterize however they like (X11, framebuffer, SVG, a
/// test recorder); points arrive fully projected.
pub trait RenderSurface {
    /// Fill a convex polygon given its closed outline.
    fn fill_polygon(&mut self, points: &[ScreenPoint], color: ColorId);

    /// Stroke a polygon outline with the given line width.
    fn stroke_polygon(&mut self, points: &[ScreenPoint], color: ColorId, line_width: u32);

    /// Draw a single line segment.
    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, color: ColorId);

    /// Draw a text string with its anchor at `at`.
    fn draw_text(&mut self, at: ScreenPoint, text: &str);
}
