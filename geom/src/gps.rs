use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Distance;

pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Why a raw position can't be used as a `LonLat`.
#[derive(Clone, Debug, PartialEq)]
pub enum CoordError {
    /// A position needs at least longitude and latitude.
    TooFewComponents(usize),
    NotFinite { longitude: f64, latitude: f64 },
    InvalidLatitude(f64),
    InvalidLongitude(f64),
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CoordError::TooFewComponents(n) => {
                write!(f, "position has {} components, needs at least 2", n)
            }
            CoordError::NotFinite {
                longitude,
                latitude,
            } => write!(f, "position ({}, {}) isn't finite", longitude, latitude),
            CoordError::InvalidLatitude(lat) => {
                write!(f, "latitude {} is outside [{}, {}]", lat, MIN_LAT, MAX_LAT)
            }
            CoordError::InvalidLongitude(lon) => {
                write!(f, "longitude {} is outside [{}, {}]", lon, MIN_LON, MAX_LON)
            }
        }
    }
}

impl std::error::Error for CoordError {}

// longitude is x, latitude is y
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct LonLat {
    pub longitude: f64,
    pub latitude: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> LonLat {
        LonLat {
            longitude: lon,
            latitude: lat,
        }
    }

    /// Like `new`, but rejects anything that isn't a real place on Earth.
    pub fn checked(lon: f64, lat: f64) -> Result<LonLat, CoordError> {
        if !lon.is_finite() || !lat.is_finite() {
            return Err(CoordError::NotFinite {
                longitude: lon,
                latitude: lat,
            });
        }
        if !(MIN_LAT..=MAX_LAT).contains(&lat) {
            return Err(CoordError::InvalidLatitude(lat));
        }
        if !(MIN_LON..=MAX_LON).contains(&lon) {
            return Err(CoordError::InvalidLongitude(lon));
        }
        Ok(LonLat::new(lon, lat))
    }

    /// Interprets a GeoJSON position `[lon, lat, (alt)]`. Any altitude is ignored.
    pub fn from_position(pos: &[f64]) -> Result<LonLat, CoordError> {
        if pos.len() < 2 {
            return Err(CoordError::TooFewComponents(pos.len()));
        }
        LonLat::checked(pos[0], pos[1])
    }

    /// Great-circle distance on a spherical Earth, using the haversine formula.
    pub fn gps_dist_meters(&self, other: LonLat) -> Distance {
        let lon1 = self.longitude.to_radians();
        let lon2 = other.longitude.to_radians();
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();

        let delta_lat = lat2 - lat1;
        let delta_lon = lon2 - lon1;

        let a = (delta_lat / 2.0).sin().powi(2)
            + (delta_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
        // Rounding can push a a hair past 1 for antipodal points
        let a = a.clamp(0.0, 1.0);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        Distance::meters(EARTH_RADIUS_METERS * c)
    }
}

impl fmt::Display for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LonLat({0}, {1})", self.longitude, self.latitude)
    }
}

/// The smallest longitude/latitude box covering some points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GPSBounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl GPSBounds {
    /// An empty box; `update` it with at least one point before using it.
    pub fn new() -> GPSBounds {
        GPSBounds {
            min_lon: f64::MAX,
            min_lat: f64::MAX,
            max_lon: f64::MIN,
            max_lat: f64::MIN,
        }
    }

    pub fn update(&mut self, pt: LonLat) {
        self.min_lon = self.min_lon.min(pt.longitude);
        self.max_lon = self.max_lon.max(pt.longitude);
        self.min_lat = self.min_lat.min(pt.latitude);
        self.max_lat = self.max_lat.max(pt.latitude);
    }

    /// True until the first `update`.
    pub fn is_empty(&self) -> bool {
        self.min_lon > self.max_lon
    }

    pub fn center(&self) -> LonLat {
        LonLat::new(
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }
}

impl Default for GPSBounds {
    fn default() -> GPSBounds {
        GPSBounds::new()
    }
}
