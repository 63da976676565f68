use std::{error, fmt};

use geom::CoordError;

use crate::NodeId;

/// Everything that can go wrong loading or analyzing a document.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// The input doesn't have the expected shape. `path` points at the offending JSON value,
    /// like `/features/3/geometry`.
    MalformedInput { path: String, message: String },
    /// A coordinate of a top-level feature can't be measured. Only that feature's length is
    /// lost.
    InvalidCoordinate { feature: usize, error: CoordError },
    /// A node was reached twice while walking containers.
    CyclicStructure { node: NodeId },
}

impl Error {
    pub(crate) fn malformed<P: Into<String>, M: Into<String>>(path: P, message: M) -> Error {
        Error::MalformedInput {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MalformedInput { path, message } => {
                if path.is_empty() {
                    write!(f, "malformed input: {}", message)
                } else {
                    write!(f, "malformed input at {}: {}", path, message)
                }
            }
            Error::InvalidCoordinate { feature, error } => {
                write!(f, "Feature {} has an invalid coordinate: {}", feature + 1, error)
            }
            Error::CyclicStructure { node } => {
                write!(f, "container structure revisits {}", node)
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::InvalidCoordinate { error, .. } => Some(error),
            _ => None,
        }
    }
}
