//! Geographic primitives: validated longitude/latitude points, great-circle distances, path
//! lengths, and bounding boxes.

mod distance;
mod gps;
mod polyline;

pub use crate::distance::Distance;
pub use crate::gps::{CoordError, GPSBounds, LonLat, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};
pub use crate::polyline::{path_length, try_path_length};

/// Rounds to 2 decimal places, the precision lengths are presented with.
pub fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
