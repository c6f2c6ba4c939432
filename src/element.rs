#![warn(missing_docs)]
//! Idealized optical elements
//!
//! Every [`OpticalElement`] is represented by a single [`RayTransferMatrix`]. The set of elements
//! is closed: free-space gaps, thin and thick lenses, flat and curved mirrors as well as planar
//! interfaces between two media.
use std::{fmt::Display, str::FromStr};

use crate::{
    abcd::RayTransferMatrix,
    error::{BeamError, BeamResult},
};
use num::Zero;
use strum::{EnumIter, IntoEnumIterator};

/// Type of a lens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum LensType {
    /// infinitely thin lens characterized by its focal length only
    #[default]
    Thin,
    /// lens with finite thickness between two media
    Thick,
}
impl FromStr for LensType {
    type Err = BeamError;

    fn from_str(s: &str) -> BeamResult<Self> {
        parse_discriminator(s, "lens")
    }
}

/// Type of a mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum MirrorType {
    /// plane mirror
    #[default]
    Flat,
    /// spherical mirror with a given radius of curvature
    Curved,
}
impl FromStr for MirrorType {
    type Err = BeamError;

    fn from_str(s: &str) -> BeamResult<Self> {
        parse_discriminator(s, "mirror")
    }
}

fn parse_discriminator<T: IntoEnumIterator + Display>(name: &str, kind: &str) -> BeamResult<T> {
    T::iter().find(|t| t.to_string() == name).ok_or_else(|| {
        let valid = T::iter().map(|t| t.to_string()).collect::<Vec<_>>();
        BeamError::InvalidConfiguration(format!(
            "invalid {kind} type '{name}'. Valid types are: {}",
            valid.join(", ")
        ))
    })
}

/// An idealized optical element.
///
/// Curvature convention for mirrors: a positive radius corresponds to a concave (focusing) mirror.
/// A positive focal length corresponds to a focusing lens.
///
/// Elements should be created using the checked constructors (e.g. [`OpticalElement::thin_lens`]).
/// Elements built directly from the variants are validated when they are appended to an
/// [`OpticalSystem`](crate::optical_system::OpticalSystem).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OpticalElement {
    /// propagation through free space over the given distance
    FreeSpace {
        /// propagation distance
        distance: f64,
    },
    /// thin lens
    ThinLens {
        /// focal length
        focal_length: f64,
    },
    /// thick lens
    ThickLens {
        /// focal length
        focal_length: f64,
        /// refractive index of the surrounding medium
        n1: f64,
        /// refractive index of the lens material
        n2: f64,
        /// center thickness
        thickness: f64,
    },
    /// flat mirror
    FlatMirror,
    /// spherical mirror
    CurvedMirror {
        /// radius of curvature
        radius: f64,
    },
    /// planar interface between two media
    Interface {
        /// refractive index of the medium before the interface
        n1: f64,
        /// refractive index of the medium after the interface
        n2: f64,
        /// propagation distance inside the interface region
        distance: f64,
    },
}

impl OpticalElement {
    /// Create a free-space propagation element. A distance of zero is a valid (no-op) element.
    ///
    /// # Errors
    ///
    /// This function will return an error if the distance is not finite.
    pub fn free_space(distance: f64) -> BeamResult<Self> {
        let element = Self::FreeSpace { distance };
        element.validate()?;
        Ok(element)
    }
    /// Create a thin lens with the given focal length.
    ///
    /// # Errors
    ///
    /// This function will return an error if the focal length is zero or NaN.
    pub fn thin_lens(focal_length: f64) -> BeamResult<Self> {
        let element = Self::ThinLens { focal_length };
        element.validate()?;
        Ok(element)
    }
    /// Create a thick lens.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///  - the focal length is zero or NaN.
    ///  - one of the refractive indices is not positive and finite.
    ///  - the thickness is not finite.
    pub fn thick_lens(focal_length: f64, n1: f64, n2: f64, thickness: f64) -> BeamResult<Self> {
        let element = Self::ThickLens {
            focal_length,
            n1,
            n2,
            thickness,
        };
        element.validate()?;
        Ok(element)
    }
    /// Create a lens of the given [`LensType`].
    ///
    /// The parameters `n1`, `n2` and `thickness` are ignored for a thin lens.
    ///
    /// # Errors
    ///
    /// This function will return an error if the parameters are invalid for the given lens type.
    pub fn lens(
        focal_length: f64,
        n1: f64,
        n2: f64,
        thickness: f64,
        lens_type: LensType,
    ) -> BeamResult<Self> {
        match lens_type {
            LensType::Thin => Self::thin_lens(focal_length),
            LensType::Thick => Self::thick_lens(focal_length, n1, n2, thickness),
        }
    }
    /// Create a flat mirror.
    #[must_use]
    pub const fn flat_mirror() -> Self {
        Self::FlatMirror
    }
    /// Create a spherical mirror with the given radius of curvature.
    ///
    /// # Errors
    ///
    /// This function will return an error if the radius is zero or NaN.
    pub fn curved_mirror(radius: f64) -> BeamResult<Self> {
        let element = Self::CurvedMirror { radius };
        element.validate()?;
        Ok(element)
    }
    /// Create a mirror of the given [`MirrorType`]. The `radius` is ignored for a flat mirror.
    ///
    /// # Errors
    ///
    /// This function will return an error if a curved mirror with a zero (or NaN) radius is requested.
    pub fn mirror(radius: f64, mirror_type: MirrorType) -> BeamResult<Self> {
        match mirror_type {
            MirrorType::Flat => Ok(Self::flat_mirror()),
            MirrorType::Curved => Self::curved_mirror(radius),
        }
    }
    /// Create a planar interface between two media with refractive indices `n1` and `n2`.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///  - one of the refractive indices is not positive and finite.
    ///  - the distance is not finite.
    pub fn interface(n1: f64, n2: f64, distance: f64) -> BeamResult<Self> {
        let element = Self::Interface { n1, n2, distance };
        element.validate()?;
        Ok(element)
    }
    /// Check the parameters of this element.
    ///
    /// # Errors
    ///
    /// This function will return an error if a parameter would lead to a division by zero or to
    /// non-finite matrix entries.
    pub fn validate(&self) -> BeamResult<()> {
        match *self {
            Self::FreeSpace { distance } => check_distance("distance", distance),
            Self::ThinLens { focal_length } => check_power("focal length", focal_length),
            Self::ThickLens {
                focal_length,
                n1,
                n2,
                thickness,
            } => {
                check_power("focal length", focal_length)?;
                check_index("n1", n1)?;
                check_index("n2", n2)?;
                check_distance("thickness", thickness)
            }
            Self::FlatMirror => Ok(()),
            Self::CurvedMirror { radius } => check_power("radius of curvature", radius),
            Self::Interface { n1, n2, distance } => {
                check_index("n1", n1)?;
                check_index("n2", n2)?;
                check_distance("distance", distance)
            }
        }?;
        // subnormal focal lengths or indices overflow to inf / NaN
        if self.matrix().is_finite() {
            Ok(())
        } else {
            Err(BeamError::InvalidParameter(format!(
                "element '{self}' has a non-finite ray transfer matrix"
            )))
        }
    }
    /// Returns the [`RayTransferMatrix`] of this element.
    #[must_use]
    pub fn matrix(&self) -> RayTransferMatrix {
        match *self {
            Self::FreeSpace { distance } => RayTransferMatrix::free_space(distance),
            Self::ThinLens { focal_length } => {
                RayTransferMatrix::new(1.0, 0.0, -1.0 / focal_length, 1.0)
            }
            Self::ThickLens {
                focal_length,
                n1,
                n2,
                thickness,
            } => {
                let entry = RayTransferMatrix::new(1.0, 0.0, (n2 - n1) / n1 / focal_length, n2 / n1);
                let exit = RayTransferMatrix::new(1.0, 0.0, (n1 - n2) / n2 / focal_length, n1 / n2);
                entry * RayTransferMatrix::free_space(thickness) * exit
            }
            Self::FlatMirror => RayTransferMatrix::identity(),
            Self::CurvedMirror { radius } => RayTransferMatrix::new(1.0, 0.0, -2.0 / radius, 1.0),
            Self::Interface { n1, n2, distance } => {
                let initial = RayTransferMatrix::new(1.0, 0.0, 0.0, n1 / n2);
                let last = RayTransferMatrix::new(1.0, 0.0, 0.0, n2 / n1);
                initial * RayTransferMatrix::free_space(distance) * last
            }
        }
    }
}

fn check_distance(name: &str, value: f64) -> BeamResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(BeamError::InvalidParameter(format!("{name} must be finite")))
    }
}
// focal lengths and radii: infinity means "no optical power"
fn check_power(name: &str, value: f64) -> BeamResult<()> {
    if value.is_zero() || value.is_nan() {
        Err(BeamError::InvalidParameter(format!(
            "{name} must not be 0.0 or NaN"
        )))
    } else {
        Ok(())
    }
}
fn check_index(name: &str, value: f64) -> BeamResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(BeamError::InvalidParameter(format!(
            "refractive index {name} must be positive and finite"
        )))
    }
}

fn parse_args(kind: &str, args: Option<&str>, expected: usize) -> BeamResult<Vec<f64>> {
    let values = args
        .map(|a| {
            a.split(',')
                .map(|v| {
                    v.trim().parse::<f64>().map_err(|e| {
                        BeamError::InvalidParameter(format!(
                            "cannot parse '{v}' of element '{kind}': {e}"
                        ))
                    })
                })
                .collect::<BeamResult<Vec<f64>>>()
        })
        .transpose()?
        .unwrap_or_default();
    if values.len() == expected {
        Ok(values)
    } else {
        Err(BeamError::InvalidParameter(format!(
            "element '{kind}' requires {expected} parameter(s) but {} were given",
            values.len()
        )))
    }
}

impl FromStr for OpticalElement {
    type Err = BeamError;

    /// Parse an element from a short textual description.
    ///
    /// Supported forms are `free:<d>`, `thin:<f>`, `thick:<f>,<n1>,<n2>,<d>`, `flat`,
    /// `curved:<radius>` and `interface:<n1>,<n2>,<d>`.
    fn from_str(s: &str) -> BeamResult<Self> {
        let (kind, args) = s
            .trim()
            .split_once(':')
            .map_or((s.trim(), None), |(k, a)| (k, Some(a)));
        match kind {
            "free" => {
                let v = parse_args(kind, args, 1)?;
                Self::free_space(v[0])
            }
            "thin" => {
                let v = parse_args(kind, args, 1)?;
                Self::thin_lens(v[0])
            }
            "thick" => {
                let v = parse_args(kind, args, 4)?;
                Self::thick_lens(v[0], v[1], v[2], v[3])
            }
            "flat" => {
                parse_args(kind, args, 0)?;
                Ok(Self::flat_mirror())
            }
            "curved" => {
                let v = parse_args(kind, args, 1)?;
                Self::curved_mirror(v[0])
            }
            "interface" => {
                let v = parse_args(kind, args, 3)?;
                Self::interface(v[0], v[1], v[2])
            }
            _ => Err(BeamError::InvalidConfiguration(format!(
                "unknown optical element '{kind}'"
            ))),
        }
    }
}
impl Display for OpticalElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FreeSpace { distance } => write!(f, "free:{distance}"),
            Self::ThinLens { focal_length } => write!(f, "thin:{focal_length}"),
            Self::ThickLens {
                focal_length,
                n1,
                n2,
                thickness,
            } => write!(f, "thick:{focal_length},{n1},{n2},{thickness}"),
            Self::FlatMirror => write!(f, "flat"),
            Self::CurvedMirror { radius } => write!(f, "curved:{radius}"),
            Self::Interface { n1, n2, distance } => write!(f, "interface:{n1},{n2},{distance}"),
        }
    }
}
