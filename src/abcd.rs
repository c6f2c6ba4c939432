#![warn(missing_docs)]
//! Paraxial ray transfer (ABCD) matrices
//!
//! A [`RayTransferMatrix`] describes how an optical element transforms a paraxial ray given as
//! column vector `[position; angle]`. The same matrix acts on the complex beam parameter `q` of a
//! Gaussian beam via the bilinear transform `q' = (A q + B) / (C q + D)`.
use std::{fmt::Display, ops::Mul};

use crate::error::{BeamError, BeamResult};
use approx::{AbsDiffEq, RelativeEq};
use nalgebra::{Matrix2, Vector2};
use num::{complex::Complex64, Zero};

/// A 2x2 real ray transfer matrix `[[A, B], [C, D]]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayTransferMatrix(Matrix2<f64>);

impl Default for RayTransferMatrix {
    /// The identity matrix (an element which does not change the beam).
    fn default() -> Self {
        Self::identity()
    }
}
impl RayTransferMatrix {
    /// Create a new [`RayTransferMatrix`] from its four entries (row major).
    #[must_use]
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self(Matrix2::new(a, b, c, d))
    }
    /// Returns the identity matrix.
    #[must_use]
    pub fn identity() -> Self {
        Self(Matrix2::identity())
    }
    /// Returns the matrix of a free-space propagation over the given `distance`.
    ///
    /// This is a pure function. It does not append anything to an optical system and is also
    /// used when composing thick lenses and interfaces.
    #[must_use]
    pub fn free_space(distance: f64) -> Self {
        Self::new(1.0, distance, 0.0, 1.0)
    }
    /// Returns the `A` entry.
    #[must_use]
    pub fn a(&self) -> f64 {
        self.0[(0, 0)]
    }
    /// Returns the `B` entry.
    #[must_use]
    pub fn b(&self) -> f64 {
        self.0[(0, 1)]
    }
    /// Returns the `C` entry.
    #[must_use]
    pub fn c(&self) -> f64 {
        self.0[(1, 0)]
    }
    /// Returns the `D` entry.
    #[must_use]
    pub fn d(&self) -> f64 {
        self.0[(1, 1)]
    }
    /// Returns the underlying [`Matrix2`].
    #[must_use]
    pub const fn as_matrix(&self) -> &Matrix2<f64> {
        &self.0
    }
    /// Returns the determinant `AD - BC`.
    ///
    /// For elements embedded in a single medium the determinant is 1.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.0.determinant()
    }
    /// Check if all entries are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
    /// Returns the matrix of the system consisting of `self` followed by `next`.
    ///
    /// Since the rightmost matrix acts first on a ray, this is `next * self`.
    #[must_use]
    pub fn then(&self, next: &Self) -> Self {
        *next * *self
    }
    /// Apply this matrix to a paraxial ray given by its `position` and `angle`.
    ///
    /// Returns the transformed `(position, angle)` pair.
    #[must_use]
    pub fn apply_to_ray(&self, position: f64, angle: f64) -> (f64, f64) {
        let ray = self.0 * Vector2::new(position, angle);
        (ray.x, ray.y)
    }
    /// Apply this matrix to a complex beam parameter `q` using `q' = (A q + B) / (C q + D)`.
    ///
    /// # Errors
    ///
    /// This function will return an error if the denominator `C q + D` vanishes or if the result is
    /// not finite.
    pub fn transform_q(&self, q: Complex64) -> BeamResult<Complex64> {
        let denominator = q * self.c() + self.d();
        if denominator.is_zero() {
            return Err(BeamError::InvalidParameter(
                "singular ray transfer matrix: C*q + D is zero".into(),
            ));
        }
        let q_out = (q * self.a() + self.b()) / denominator;
        if !q_out.is_finite() {
            return Err(BeamError::InvalidParameter(format!(
                "transformed beam parameter is not finite: {q_out}"
            )));
        }
        Ok(q_out)
    }
}
impl Mul for RayTransferMatrix {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}
impl From<Matrix2<f64>> for RayTransferMatrix {
    fn from(m: Matrix2<f64>) -> Self {
        Self(m)
    }
}
impl Display for RayTransferMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[[{}, {}], [{}, {}]]",
            self.a(),
            self.b(),
            self.c(),
            self.d()
        )
    }
}
impl AbsDiffEq for RayTransferMatrix {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }
    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.0.abs_diff_eq(&other.0, epsilon)
    }
}
impl RelativeEq for RayTransferMatrix {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }
    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.0.relative_eq(&other.0, epsilon, max_relative)
    }
}
