use std::{fmt, ops};

use serde::{Deserialize, Serialize};

use crate::round_2dp;

/// A distance, in meters. Never negative or NaN.
///
/// The full precision is kept; rounding only happens when presenting, via `round_km`. Summing
/// rounded values accumulates error, so always sum `Distance`s and round the total.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Distance(f64);

impl Distance {
    pub const ZERO: Distance = Distance(0.0);

    /// Creates a distance in meters. Non-finite or negative input is a bug in the caller.
    pub fn meters(value: f64) -> Distance {
        if !value.is_finite() || value < 0.0 {
            panic!("Bad Distance {}", value);
        }
        Distance(value)
    }

    /// Creates a distance in kilometers.
    pub fn kilometers(value: f64) -> Distance {
        Distance::meters(value * 1000.0)
    }

    pub fn to_kilometers(self) -> f64 {
        self.0 / 1000.0
    }

    /// Kilometers, rounded to 2 decimal places.
    pub fn round_km(self) -> f64 {
        round_2dp(self.to_kilometers())
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.2} km", self.to_kilometers())
    }
}

impl ops::Add for Distance {
    type Output = Distance;

    fn add(self, other: Distance) -> Distance {
        Distance::meters(self.0 + other.0)
    }
}

impl ops::AddAssign for Distance {
    fn add_assign(&mut self, other: Distance) {
        *self = *self + other;
    }
}

impl std::iter::Sum for Distance {
    fn sum<I>(iter: I) -> Distance
    where
        I: Iterator<Item = Distance>,
    {
        let mut sum = Distance::ZERO;
        for x in iter {
            sum += x;
        }
        sum
    }
}

impl Default for Distance {
    fn default() -> Distance {
        Distance::ZERO
    }
}
