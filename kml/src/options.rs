use serde::{Deserialize, Serialize};

/// Tunes loading and analysis. Can be read from JSON; missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Records nested deeper than this are rejected as malformed, both when loading and when
    /// summarizing a hand-built collection.
    pub max_depth: usize,
    /// How to total the parts of a MultiLineString.
    pub length_rounding: LengthRounding,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            max_depth: 512,
            length_rounding: LengthRounding::SumThenRound,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthRounding {
    /// Sum every part at full precision, then round once when presenting.
    SumThenRound,
    /// Round each part to 2 decimals before summing. This accumulates rounding error; it only
    /// exists to reproduce lengths reported by older tools.
    RoundEachPart,
}
