//! Trajectory stream reader.
//!
//! A record is two lines, optionally followed by decoy-state lines the
//! renderer skips:
//!
//! ```text
//! time decoys xm ym zm xt yt zt
//! rollM pitchM yawM rollT pitchT yawT
//! ...decoy lines (when decoys > 0)
//! ```
//!
//! The orientation line comes in two recognized layouts: the plain sextuple
//! above, or a padded layout from older 3-DOF simulation output where two
//! `-9999` sentinel fields precede the six angles. A negative decoy count
//! marks a padded time record appended after intercept; its time field does
//! not advance the true engagement clock.
//!
//! The stream is read strictly forward, one record per frame. Replay reopens
//! the stream from the beginning.

use std::io::BufRead;

use thiserror::Error;

use crate::foundation::math::{Vec3, RADIANS_PER_DEGREE};

/// Sentinel field marking the padded orientation layout.
const PAD_SENTINEL: &str = "-9999";

/// Errors raised while reading a trajectory stream.
#[derive(Error, Debug)]
pub enum TrajectoryError {
    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// An orientation triple as read from the stream, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attitude {
    /// Roll (phi) in degrees
    pub roll: f64,
    /// Pitch (theta) in degrees
    pub pitch: f64,
    /// Yaw (psi) in degrees
    pub yaw: f64,
}

impl Attitude {
    /// Yaw, pitch, roll in radians, ready for the rotation matrix builder.
    pub fn radians(&self) -> (f64, f64, f64) {
        (
            self.yaw * RADIANS_PER_DEGREE,
            self.pitch * RADIANS_PER_DEGREE,
            self.roll * RADIANS_PER_DEGREE,
        )
    }
}

/// One trajectory sample.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryRecord {
    /// Sample time in seconds
    pub time: f64,
    /// Number of active decoys whose state lines follow (negative on padded
    /// records)
    pub decoy_count: i32,
    /// Missile position in world space
    pub missile_position: Vec3,
    /// Target position in world space
    pub target_position: Vec3,
    /// Missile orientation
    pub missile_attitude: Attitude,
    /// Target orientation
    pub target_attitude: Attitude,
}

impl TrajectoryRecord {
    /// Whether this is a padded post-intercept record rather than a true
    /// sample.
    pub fn is_padded(&self) -> bool {
        self.decoy_count < 0
    }
}

/// Forward-only reader over a trajectory stream.
#[derive(Debug)]
pub struct TrajectoryReader<R> {
    reader: R,
    line: String,
}

impl<R: BufRead> TrajectoryReader<R> {
    /// Wrap a buffered reader positioned at the start of the stream.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }

    /// Read the next record. `Ok(None)` signals end of stream (graceful
    /// stop). Malformed records are skipped with a warning.
    pub fn next_record(&mut self) -> Result<Option<TrajectoryRecord>, TrajectoryError> {
        loop {
            let Some(state_line) = self.read_line()? else {
                return Ok(None);
            };

            let Some((time, decoy_count, missile_position, target_position)) =
                parse_state(&state_line)
            else {
                log::warn!("skipping malformed trajectory record: {state_line:?}");
                continue;
            };

            let Some(orient_line) = self.read_line()? else {
                return Ok(None);
            };
            let Some((missile_attitude, target_attitude)) = parse_orientation(&orient_line) else {
                log::warn!("skipping malformed orientation record: {orient_line:?}");
                continue;
            };

            // Decoy position/radiance lines are not rendered.
            for _ in 0..decoy_count.max(0) {
                if self.read_line()?.is_none() {
                    break;
                }
            }

            return Ok(Some(TrajectoryRecord {
                time,
                decoy_count,
                missile_position,
                target_position,
                missile_attitude,
                target_attitude,
            }));
        }
    }

    fn read_line(&mut self) -> Result<Option<String>, TrajectoryError> {
        self.line.clear();
        if self.reader.read_line(&mut self.line)? == 0 {
            return Ok(None);
        }
        Ok(Some(self.line.trim_end().to_owned()))
    }
}

fn parse_state(line: &str) -> Option<(f64, i32, Vec3, Vec3)> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 8 {
        return None;
    }
    let time: f64 = fields[0].parse().ok()?;
    let decoy_count: i32 = fields[1].parse().ok()?;
    let mut coords = [0.0_f64; 6];
    for (value, field) in coords.iter_mut().zip(&fields[2..8]) {
        *value = field.parse().ok()?;
    }
    Some((
        time,
        decoy_count,
        Vec3::new(coords[0], coords[1], coords[2]),
        Vec3::new(coords[3], coords[4], coords[5]),
    ))
}

fn parse_orientation(line: &str) -> Option<(Attitude, Attitude)> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    // Padded layout: two sentinel fields, then the six angles.
    let angles = if fields.len() >= 8 && fields[0] == PAD_SENTINEL && fields[1] == PAD_SENTINEL {
        &fields[2..8]
    } else if fields.len() >= 6 {
        &fields[..6]
    } else {
        return None;
    };

    let mut values = [0.0_f64; 6];
    for (value, field) in values.iter_mut().zip(angles) {
        *value = field.parse().ok()?;
    }
    Some((
        Attitude {
            roll: values[0],
            pitch: values[1],
            yaw: values[2],
        },
        Attitude {
            roll: values[3],
            pitch: values[4],
            yaw: values[5],
        },
    ))
}
