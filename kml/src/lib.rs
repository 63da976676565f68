//! Analyses over a KML document that's already been converted to GeoJSON: a structural summary
//! counting every kind of element (including nested Documents, Folders, and Placemarks), and a
//! flat list of the top-level features with the length of their paths.
//!
//! Parsing KML itself is out of scope; feed in the converter's output. Besides the usual
//! GeoJSON, any feature's `properties` may carry nested `features`, `folders`, `placemarks`, and
//! `documents` lists, which may nest arbitrarily. The collection's own `properties` may declare
//! `documents` and `folders` beside the features.

#[macro_use]
extern crate log;

mod details;
mod error;
mod model;
mod options;
mod parse;
mod summary;

pub use crate::details::{feature_details, kind_counts, FeatureDetail};
pub use crate::error::Error;
pub use crate::model::{ContainerKind, GeometryCollection, GeometryKind, Node, NodeId, NodeKind};
pub use crate::options::{LengthRounding, Options};
pub use crate::summary::{summarize, ElementCounts, TOTAL};
