#![warn(missing_docs)]
//! Gaussbeam specific error structures
use std::{error::Error, fmt::Display};

/// Gaussbeam specific Result type
pub type BeamResult<T> = std::result::Result<T, BeamError>;

/// Errors that can be returned by the various beam propagation functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeamError {
    /// an element type discriminator (e.g. lens or mirror type) is not known
    InvalidConfiguration(String),
    /// a numeric parameter is out of range (e.g. zero focal length or non-positive wavelength)
    InvalidParameter(String),
    /// an operation was called in the wrong order (e.g. reading outputs before propagation)
    InvalidState(String),
    /// errors while rendering a plot
    Plot(String),
    /// errors console io
    Console(String),
    /// errors not falling in one of the categories above
    Other(String),
}

impl Display for BeamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfiguration(m) => {
                write!(f, "InvalidConfiguration:{m}")
            }
            Self::InvalidParameter(m) => {
                write!(f, "InvalidParameter:{m}")
            }
            Self::InvalidState(m) => {
                write!(f, "InvalidState:{m}")
            }
            Self::Plot(m) => {
                write!(f, "Plot:{m}")
            }
            Self::Console(m) => {
                write!(f, "Console:{m}")
            }
            Self::Other(m) => write!(f, "Gaussbeam Error:Other:{m}"),
        }
    }
}
impl Error for BeamError {}

impl std::convert::From<String> for BeamError {
    fn from(msg: String) -> Self {
        Self::Other(msg)
    }
}
