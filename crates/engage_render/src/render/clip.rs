//! Six-plane pyramidal frustum clipper.
//!
//! Clips a closed vertex ring in scaled view space against the symmetric
//! viewing pyramid: four slope planes at 45 degrees (the lateral and
//! vertical axes are pre-scaled so the pyramid is `|lat| <= fwd`,
//! `|vert| <= fwd`) plus the near and far depth planes. One
//! Sutherland–Hodgman pass per plane, in a fixed order; each pass classifies
//! every vertex with a signed code and inserts exact interpolated points
//! where edges cross the plane.
//!
//! The intercepts are solved algebraically per plane — each plane equation
//! is linear in two view axes, so the segment parameter has a closed form
//! and no generic ray-plane solve is needed.
//!
//! Derived from the line/polygon clipping treatment in chapter 3 of
//! Rogers, "Procedural Elements for Computer Graphics" (McGraw-Hill, 1985).

use crate::foundation::math::Vec3;

/// Minimum forward clipping distance.
pub const NEAR_CLIP: f64 = 0.1;
/// Maximum forward clipping distance.
pub const FAR_CLIP: f64 = 10_000.0;
/// Upper bound on vertices in a clipped ring (closing duplicate included).
pub const MAX_RING_VERTICES: usize = 32;

/// The six frustum planes in their fixed pass order.
const PASS_ORDER: [Plane; 6] = [
    Plane::Left,
    Plane::Right,
    Plane::Bottom,
    Plane::Top,
    Plane::Far,
    Plane::Near,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Plane {
    Left,
    Right,
    Bottom,
    Top,
    Far,
    Near,
}

/// A view-space point loaded into plane-test axes: `x` lateral, `y` vertical
/// (up positive), `z` forward.
#[derive(Clone, Copy)]
struct PyramidPoint {
    x: f64,
    y: f64,
    z: f64,
}

impl PyramidPoint {
    fn load(p: Vec3) -> Self {
        Self {
            x: p.y,
            y: -p.z,
            z: p.x,
        }
    }

    fn store(self) -> Vec3 {
        Vec3::new(self.z, self.x, -self.y)
    }
}

impl Plane {
    /// Signed classification code: 0 exactly on the plane, positive inside,
    /// negative outside.
    fn code(self, p: Vec3) -> i32 {
        let p = PyramidPoint::load(p);
        match self {
            Self::Left => match p.x {
                x if x == -p.z => 0,
                x if x < -p.z => -1,
                _ => 1,
            },
            Self::Right => match p.x {
                x if x == p.z => 0,
                x if x > p.z => -2,
                _ => 2,
            },
            Self::Bottom => match p.y {
                y if y == -p.z => 0,
                y if y < -p.z => -4,
                _ => 4,
            },
            Self::Top => match p.y {
                y if y == p.z => 0,
                y if y > p.z => -8,
                _ => 8,
            },
            Self::Far => match p.z {
                z if z == FAR_CLIP => 0,
                z if z > FAR_CLIP => -16,
                _ => 16,
            },
            Self::Near => match p.z {
                z if z == NEAR_CLIP => 0,
                z if z < NEAR_CLIP => -32,
                _ => 32,
            },
        }
    }

    /// Exact intersection of segment `start`..`end` with this plane.
    ///
    /// Each slope plane's equation is linear in one lateral axis and the
    /// forward axis, so the parameter t comes out of a single division; the
    /// depth planes interpolate on the forward axis alone. Callers order the
    /// endpoints so the same segment always interpolates in the same
    /// direction regardless of winding.
    fn intercept(self, start: Vec3, end: Vec3) -> Vec3 {
        let s = PyramidPoint::load(start);
        let e = PyramidPoint::load(end);
        let clipped = match self {
            Self::Left => {
                let k = e.x - s.x;
                let t = (s.z + s.x) / (s.z - e.z - k);
                let x = k * t + s.x;
                PyramidPoint {
                    x,
                    y: (e.y - s.y) * t + s.y,
                    z: -x,
                }
            }
            Self::Right => {
                let k = e.x - s.x;
                let t = (s.z - s.x) / (s.z - e.z + k);
                let x = k * t + s.x;
                PyramidPoint {
                    x,
                    y: (e.y - s.y) * t + s.y,
                    z: x,
                }
            }
            Self::Bottom => {
                let k = e.y - s.y;
                let t = (s.z + s.y) / (s.z - e.z - k);
                let y = k * t + s.y;
                PyramidPoint {
                    x: (e.x - s.x) * t + s.x,
                    y,
                    z: -y,
                }
            }
            Self::Top => {
                let k = e.y - s.y;
                let t = (s.z - s.y) / (s.z - e.z + k);
                let y = k * t + s.y;
                PyramidPoint {
                    x: (e.x - s.x) * t + s.x,
                    y,
                    z: y,
                }
            }
            Self::Far => {
                let t = (FAR_CLIP - s.z) / (e.z - s.z);
                PyramidPoint {
                    x: (e.x - s.x) * t + s.x,
                    y: (e.y - s.y) * t + s.y,
                    z: FAR_CLIP,
                }
            }
            Self::Near => {
                let t = (NEAR_CLIP - s.z) / (e.z - s.z);
                PyramidPoint {
                    x: (e.x - s.x) * t + s.x,
                    y: (e.y - s.y) * t + s.y,
                    z: NEAR_CLIP,
                }
            }
        };
        clipped.store()
    }
}

/// Clip a closed vertex ring against all six frustum planes.
///
/// `ring` must end with a duplicate of its first vertex. The result is a
/// closed ring with input winding preserved, or empty when the polygon lies
/// fully outside. Degenerate two-point rings (clipped grid lines) pass
/// through the same path as polygons.
pub fn clip_ring(ring: &[Vec3]) -> Vec<Vec3> {
    let mut current = ring.to_vec();
    for plane in PASS_ORDER {
        current = clip_pass(plane, &current);
        if current.is_empty() {
            break;
        }
    }
    current
}

/// One Sutherland–Hodgman pass against a single plane.
///
/// Walks consecutive vertex pairs of the closed ring: a crossing edge
/// contributes the interpolated boundary point, an inside (or on-plane)
/// terminal vertex is kept. The closing duplicate participates only as the
/// final edge's endpoint; the surviving ring is re-closed afterwards.
fn clip_pass(plane: Plane, ring: &[Vec3]) -> Vec<Vec3> {
    let mut out: Vec<Vec3> = Vec::with_capacity(MAX_RING_VERTICES);

    let mut start = ring[0];
    let mut start_code = plane.code(start);
    if start_code >= 0 {
        out.push(start);
    }

    for i in 1..ring.len() {
        let end = ring[i];
        let end_code = plane.code(end);
        if start_code != end_code {
            // Interpolate from the lower code toward the higher so the
            // arithmetic is identical for both traversal directions.
            let boundary = if start_code < end_code {
                plane.intercept(start, end)
            } else {
                plane.intercept(end, start)
            };
            out.push(boundary);
        }
        if i < ring.len() - 1 {
            start = end;
            start_code = end_code;
            if start_code >= 0 {
                out.push(start);
            }
        }
    }

    if let Some(&first) = out.first() {
        out.push(first);
    }
    out
}
