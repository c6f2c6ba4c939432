#![warn(missing_docs)]
//! Gaussian beam parameters
//!
//! A [`GaussianBeam`] describes the paraxial state of a beam at its reference plane. Its complex
//! beam parameter is initialized as `q = i * pi * w0^2 / lambda`, i.e. the beam always starts at
//! its minimum waist with a flat wavefront. All lengths must be given in the same unit.
use std::f64::consts::PI;

use crate::error::{BeamError, BeamResult};
use log::warn;
use num::{complex::Complex64, Zero};
use uom::si::{f64::Length, length::meter};

/// Initial state of a Gaussian beam.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianBeam {
    wavelength: f64,
    waist: f64,
    z: f64,
    theta: f64,
    radius_of_curvature: f64,
    q: Complex64,
}
impl GaussianBeam {
    /// Creates a new [`GaussianBeam`] located at its minimum `waist` for the given `wavelength`.
    ///
    /// The beam starts at position `z = 0` with an angle `theta = 0`.
    ///
    /// # Errors
    ///
    /// This function will return an error if `wavelength` or `waist` are not positive and finite.
    pub fn new(wavelength: f64, waist: f64) -> BeamResult<Self> {
        if !wavelength.is_finite() || wavelength <= 0.0 {
            return Err(BeamError::InvalidParameter(
                "wavelength must be positive and finite".into(),
            ));
        }
        if !waist.is_finite() || waist <= 0.0 {
            return Err(BeamError::InvalidParameter(
                "waist must be positive and finite".into(),
            ));
        }
        Ok(Self {
            wavelength,
            waist,
            z: 0.0,
            theta: 0.0,
            radius_of_curvature: f64::INFINITY,
            q: Complex64::new(0.0, PI * waist * waist / wavelength),
        })
    }
    /// Creates a new [`GaussianBeam`] from [`Length`]s. All values are converted to meters.
    ///
    /// # Errors
    ///
    /// This function will return an error if `wavelength` or `waist` are not positive and finite.
    pub fn from_lengths(wavelength: Length, waist: Length) -> BeamResult<Self> {
        Self::new(wavelength.get::<meter>(), waist.get::<meter>())
    }
    /// Sets the axial position of the beam. This function can be used with the "builder pattern".
    ///
    /// # Errors
    ///
    /// This function will return an error if the position is not finite.
    pub fn with_position(mut self, z: f64) -> BeamResult<Self> {
        if !z.is_finite() {
            return Err(BeamError::InvalidParameter("position must be finite".into()));
        }
        self.z = z;
        Ok(self)
    }
    /// Sets the (paraxial) ray angle of the beam. This function can be used with the "builder pattern".
    ///
    /// # Errors
    ///
    /// This function will return an error if the angle is not finite.
    pub fn with_angle(mut self, theta: f64) -> BeamResult<Self> {
        if !theta.is_finite() {
            return Err(BeamError::InvalidParameter("angle must be finite".into()));
        }
        self.theta = theta;
        Ok(self)
    }
    /// Sets the radius of curvature of the wavefront.
    ///
    /// **Note**: The radius of curvature is stored but not yet used. The beam is always initialized
    /// at its minimum waist (flat wavefront). A finite radius results in a warning.
    ///
    /// # Errors
    ///
    /// This function will return an error if the radius is zero or NaN.
    pub fn with_radius_of_curvature(mut self, radius: f64) -> BeamResult<Self> {
        if radius.is_zero() || radius.is_nan() {
            return Err(BeamError::InvalidParameter(
                "radius of curvature must not be 0.0 or NaN".into(),
            ));
        }
        if radius.is_finite() {
            warn!("finite radius of curvature is ignored. Beam is initialized at its waist");
        }
        self.radius_of_curvature = radius;
        Ok(self)
    }
    /// Returns the wavelength of this [`GaussianBeam`].
    #[must_use]
    pub const fn wavelength(&self) -> f64 {
        self.wavelength
    }
    /// Returns the waist of this [`GaussianBeam`].
    #[must_use]
    pub const fn waist(&self) -> f64 {
        self.waist
    }
    /// Returns the axial position of this [`GaussianBeam`].
    #[must_use]
    pub const fn z(&self) -> f64 {
        self.z
    }
    /// Returns the ray angle of this [`GaussianBeam`].
    #[must_use]
    pub const fn theta(&self) -> f64 {
        self.theta
    }
    /// Returns the (unused) radius of curvature of this [`GaussianBeam`].
    #[must_use]
    pub const fn radius_of_curvature(&self) -> f64 {
        self.radius_of_curvature
    }
    /// Returns the complex beam parameter `q` of this [`GaussianBeam`].
    #[must_use]
    pub const fn q(&self) -> Complex64 {
        self.q
    }
    /// Returns the Rayleigh range `pi * w0^2 / lambda` of this [`GaussianBeam`].
    #[must_use]
    pub fn rayleigh_range(&self) -> f64 {
        self.q.im
    }
}

/// Calculate the beam waist belonging to the complex beam parameter `q`.
///
/// The minimum waist is derived from the imaginary part (Rayleigh range) and is then scaled with
/// `sqrt(1 + (Re(q) / Im(q))^2)` to account for the distance from the waist. This is exact for
/// `Re(q) = 0` and an approximation otherwise.
///
/// # Errors
///
/// This function will return an error if the imaginary part of `q` is zero or the result is not finite.
pub fn waist_from_q(q: Complex64, wavelength: f64) -> BeamResult<f64> {
    if q.im.is_zero() {
        return Err(BeamError::InvalidParameter(
            "beam parameter has no imaginary part. Cannot calculate waist".into(),
        ));
    }
    let waist = (wavelength * q.im.abs() / PI).sqrt() * (1.0 + (q.re / q.im).powi(2)).sqrt();
    if waist.is_finite() {
        Ok(waist)
    } else {
        Err(BeamError::InvalidParameter(format!(
            "calculated waist is not finite for q = {q}"
        )))
    }
}

/// Beam parameters after propagation through an optical system.
#[derive(Debug, Clone, PartialEq)]
pub struct BeamOutput {
    q: Complex64,
    waist: f64,
    z: f64,
    theta: f64,
    wavelength: f64,
}
impl BeamOutput {
    pub(crate) const fn new(q: Complex64, waist: f64, z: f64, theta: f64, wavelength: f64) -> Self {
        Self {
            q,
            waist,
            z,
            theta,
            wavelength,
        }
    }
    /// Returns the complex beam parameter.
    #[must_use]
    pub const fn q(&self) -> Complex64 {
        self.q
    }
    /// Returns the beam waist.
    #[must_use]
    pub const fn waist(&self) -> f64 {
        self.waist
    }
    /// Returns the ray position.
    #[must_use]
    pub const fn z(&self) -> f64 {
        self.z
    }
    /// Returns the ray angle.
    #[must_use]
    pub const fn theta(&self) -> f64 {
        self.theta
    }
    /// Returns the Rayleigh range belonging to the output waist.
    #[must_use]
    pub fn rayleigh_range(&self) -> f64 {
        PI * self.waist * self.waist / self.wavelength
    }
    /// Returns the far field divergence (half angle) belonging to the output waist.
    #[must_use]
    pub fn divergence(&self) -> f64 {
        self.wavelength / (PI * self.waist)
    }
    /// Returns the wavefront radius of curvature `1 / Re(1/q)`.
    ///
    /// A flat wavefront returns `f64::INFINITY`.
    #[must_use]
    pub fn radius_of_curvature(&self) -> f64 {
        let inv_q = self.q.inv();
        if inv_q.re.is_zero() {
            f64::INFINITY
        } else {
            1.0 / inv_q.re
        }
    }
}
