#![warn(missing_docs)]
//! Propagation of a Gaussian beam through an optical system
//!
//! A [`BeamSystem`] combines an initial [`GaussianBeam`] with an [`OpticalSystem`]. Elements are
//! appended in the order the light passes them. Calling [`BeamSystem::propagate`] composes all
//! element matrices into a single ABCD matrix and applies it to the ray vector `[z; theta]` as
//! well as to the complex beam parameter `q`.
//!
//! ```
//! use gaussbeam::BeamSystem;
//!
//! let mut system = BeamSystem::new(1.064e-6, 1e-3).unwrap();
//! system.add_free_space(0.5).unwrap();
//! system.propagate().unwrap();
//! // the beam is now 0.5 m behind its waist
//! assert_eq!(system.q_out().unwrap().re, 0.5);
//! ```
use crate::{
    abcd::RayTransferMatrix,
    beam::{waist_from_q, BeamOutput, GaussianBeam},
    element::{LensType, MirrorType, OpticalElement},
    error::{BeamError, BeamResult},
    optical_system::OpticalSystem,
};
use log::info;
use num::complex::Complex64;
use uom::si::f64::Length;

/// A Gaussian beam together with the optical system it propagates through.
#[derive(Debug, Clone, PartialEq)]
pub struct BeamSystem {
    beam: GaussianBeam,
    optics: OpticalSystem,
    output: Option<BeamOutput>,
}
impl BeamSystem {
    /// Creates a new [`BeamSystem`] with an empty optical system.
    ///
    /// The beam starts at its minimum `waist` at position `z = 0` with angle `theta = 0`. Use
    /// [`BeamSystem::with_position`] and [`BeamSystem::with_angle`] to modify this.
    ///
    /// # Errors
    ///
    /// This function will return an error if `wavelength` or `waist` are not positive and finite.
    pub fn new(wavelength: f64, waist: f64) -> BeamResult<Self> {
        Ok(Self::from_beam(GaussianBeam::new(wavelength, waist)?))
    }
    /// Creates a new [`BeamSystem`] from [`Length`]s. All values are converted to meters.
    ///
    /// # Errors
    ///
    /// This function will return an error if `wavelength` or `waist` are not positive and finite.
    pub fn from_lengths(wavelength: Length, waist: Length) -> BeamResult<Self> {
        Ok(Self::from_beam(GaussianBeam::from_lengths(
            wavelength, waist,
        )?))
    }
    /// Creates a new [`BeamSystem`] for an already configured [`GaussianBeam`].
    #[must_use]
    pub fn from_beam(beam: GaussianBeam) -> Self {
        Self {
            beam,
            optics: OpticalSystem::new(),
            output: None,
        }
    }
    /// Sets the initial axial position of the beam.
    ///
    /// # Errors
    ///
    /// This function will return an error if the position is not finite.
    pub fn with_position(mut self, z: f64) -> BeamResult<Self> {
        self.beam = self.beam.with_position(z)?;
        self.output = None;
        Ok(self)
    }
    /// Sets the initial ray angle of the beam.
    ///
    /// # Errors
    ///
    /// This function will return an error if the angle is not finite.
    pub fn with_angle(mut self, theta: f64) -> BeamResult<Self> {
        self.beam = self.beam.with_angle(theta)?;
        self.output = None;
        Ok(self)
    }
    /// Sets the initial wavefront radius of curvature. See [`GaussianBeam::with_radius_of_curvature`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the radius is zero or NaN.
    pub fn with_radius_of_curvature(mut self, radius: f64) -> BeamResult<Self> {
        self.beam = self.beam.with_radius_of_curvature(radius)?;
        Ok(self)
    }
    /// Returns a reference to the initial [`GaussianBeam`].
    #[must_use]
    pub const fn beam(&self) -> &GaussianBeam {
        &self.beam
    }
    /// Returns the appended elements in propagation order.
    #[must_use]
    pub fn elements(&self) -> &[OpticalElement] {
        self.optics.elements()
    }
    /// Append an [`OpticalElement`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the element has invalid parameters.
    pub fn add_element(&mut self, element: OpticalElement) -> BeamResult<()> {
        self.optics.push(element)
    }
    /// Append a free-space propagation over the distance `d`.
    ///
    /// # Errors
    ///
    /// This function will return an error if `d` is not finite.
    pub fn add_free_space(&mut self, d: f64) -> BeamResult<()> {
        self.add_element(OpticalElement::free_space(d)?)
    }
    /// Append a lens.
    ///
    /// For a [`LensType::Thin`] lens only the focal length `f` is used. A [`LensType::Thick`] lens
    /// additionally needs the refractive indices `n1` (surrounding) and `n2` (lens material) as
    /// well as the thickness `d`.
    ///
    /// # Errors
    ///
    /// This function will return an error if the parameters are invalid for the given lens type.
    pub fn add_lens(
        &mut self,
        f: f64,
        n1: f64,
        n2: f64,
        d: f64,
        lens_type: LensType,
    ) -> BeamResult<()> {
        self.add_element(OpticalElement::lens(f, n1, n2, d, lens_type)?)
    }
    /// Append a lens whose type is given by name (`"thin"` or `"thick"`).
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the lens type is unknown ([`BeamError::InvalidConfiguration`]).
    ///   - the parameters are invalid for the given lens type.
    pub fn add_lens_by_name(
        &mut self,
        f: f64,
        n1: f64,
        n2: f64,
        d: f64,
        lens_type: &str,
    ) -> BeamResult<()> {
        self.add_lens(f, n1, n2, d, lens_type.parse()?)
    }
    /// Append a mirror. The `radius` is only used for a [`MirrorType::Curved`] mirror.
    ///
    /// # Errors
    ///
    /// This function will return an error if a curved mirror with zero radius is requested.
    pub fn add_mirror(&mut self, radius: f64, mirror_type: MirrorType) -> BeamResult<()> {
        self.add_element(OpticalElement::mirror(radius, mirror_type)?)
    }
    /// Append a mirror whose type is given by name (`"flat"` or `"curved"`).
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the mirror type is unknown ([`BeamError::InvalidConfiguration`]).
    ///   - a curved mirror with zero radius is requested.
    pub fn add_mirror_by_name(&mut self, radius: f64, mirror_type: &str) -> BeamResult<()> {
        self.add_mirror(radius, mirror_type.parse()?)
    }
    /// Append a planar interface between two media with refractive indices `n1` and `n2`,
    /// separated by the distance `d`.
    ///
    /// # Errors
    ///
    /// This function will return an error if an index is not positive and finite or `d` is not finite.
    pub fn add_interface(&mut self, n1: f64, n2: f64, d: f64) -> BeamResult<()> {
        self.add_element(OpticalElement::interface(n1, n2, d)?)
    }
    /// Returns the total [`RayTransferMatrix`] of all elements appended so far.
    #[must_use]
    pub fn system_matrix(&self) -> RayTransferMatrix {
        self.optics.system_matrix()
    }
    /// Propagate the beam through all elements appended so far and store the result.
    ///
    /// This function can be called repeatedly (e.g. after appending further elements). Without
    /// intermediate changes, it always yields the same result.
    ///
    /// # Errors
    ///
    /// This function will return an error if the resulting beam parameters are not finite (e.g.
    /// due to a singular system matrix). In this case, a previously stored result is kept.
    pub fn propagate(&mut self) -> BeamResult<&BeamOutput> {
        let abcd = self.system_matrix();
        let (z_out, theta_out) = abcd.apply_to_ray(self.beam.z(), self.beam.theta());
        if !z_out.is_finite() || !theta_out.is_finite() {
            return Err(BeamError::InvalidParameter(
                "propagated ray is not finite".into(),
            ));
        }
        let q_out: Complex64 = abcd.transform_q(self.beam.q())?;
        let waist_out = waist_from_q(q_out, self.beam.wavelength())?;
        info!(
            "propagated beam through {} element(s): waist = {waist_out}, z = {z_out}, theta = {theta_out}",
            self.optics.len()
        );
        Ok(&*self.output.insert(BeamOutput::new(
            q_out,
            waist_out,
            z_out,
            theta_out,
            self.beam.wavelength(),
        )))
    }
    /// Returns the result of the last propagation.
    ///
    /// # Errors
    ///
    /// This function will return an error if [`BeamSystem::propagate`] has not been called yet.
    pub fn output(&self) -> BeamResult<&BeamOutput> {
        self.output.as_ref().ok_or_else(|| {
            BeamError::InvalidState(
                "beam has not been propagated yet. Run propagate() first".into(),
            )
        })
    }
    /// Returns the complex beam parameter after propagation.
    ///
    /// # Errors
    ///
    /// This function will return an error if [`BeamSystem::propagate`] has not been called yet.
    pub fn q_out(&self) -> BeamResult<Complex64> {
        Ok(self.output()?.q())
    }
    /// Returns the beam waist after propagation.
    ///
    /// # Errors
    ///
    /// This function will return an error if [`BeamSystem::propagate`] has not been called yet.
    pub fn waist_out(&self) -> BeamResult<f64> {
        Ok(self.output()?.waist())
    }
    /// Returns the ray position after propagation.
    ///
    /// # Errors
    ///
    /// This function will return an error if [`BeamSystem::propagate`] has not been called yet.
    pub fn z_out(&self) -> BeamResult<f64> {
        Ok(self.output()?.z())
    }
    /// Returns the ray angle after propagation.
    ///
    /// # Errors
    ///
    /// This function will return an error if [`BeamSystem::propagate`] has not been called yet.
    pub fn theta_out(&self) -> BeamResult<f64> {
        Ok(self.output()?.theta())
    }
    /// Returns the Rayleigh range belonging to the propagated waist.
    ///
    /// # Errors
    ///
    /// This function will return an error if [`BeamSystem::propagate`] has not been called yet.
    pub fn rayleigh_range_out(&self) -> BeamResult<f64> {
        Ok(self.output()?.rayleigh_range())
    }
    /// Returns the far field divergence (half angle) belonging to the propagated waist.
    ///
    /// # Errors
    ///
    /// This function will return an error if [`BeamSystem::propagate`] has not been called yet.
    pub fn divergence_out(&self) -> BeamResult<f64> {
        Ok(self.output()?.divergence())
    }
    /// Returns the wavefront radius of curvature after propagation.
    ///
    /// # Errors
    ///
    /// This function will return an error if [`BeamSystem::propagate`] has not been called yet.
    pub fn radius_of_curvature_out(&self) -> BeamResult<f64> {
        Ok(self.output()?.radius_of_curvature())
    }
}
#[cfg(test)]
mod test {
    use super::*;
    use crate::{millimeter, nanometer};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use assert_matches::assert_matches;
    use std::f64::consts::PI;

    fn nd_yag() -> BeamSystem {
        BeamSystem::new(1.064e-6, 1e-3).unwrap()
    }
    #[test]
    fn new() {
        let system = nd_yag();
        assert!(system.elements().is_empty());
        assert_eq!(system.beam().wavelength(), 1.064e-6);
        assert_eq!(system.beam().waist(), 1e-3);
        assert_matches!(system.output(), Err(BeamError::InvalidState(_)));
        assert_matches!(
            BeamSystem::new(0.0, 1e-3),
            Err(BeamError::InvalidParameter(_))
        );
        assert_matches!(
            BeamSystem::new(1e-6, -1e-3),
            Err(BeamError::InvalidParameter(_))
        );
    }
    #[test]
    fn from_lengths() {
        let system = BeamSystem::from_lengths(nanometer!(1064.0), millimeter!(1.0)).unwrap();
        assert_relative_eq!(system.beam().q().im, nd_yag().beam().q().im, max_relative = 1e-12);
    }
    #[test]
    fn accessors_before_propagation() {
        let system = nd_yag();
        assert_matches!(system.q_out(), Err(BeamError::InvalidState(_)));
        assert_matches!(system.waist_out(), Err(BeamError::InvalidState(_)));
        assert_matches!(system.z_out(), Err(BeamError::InvalidState(_)));
        assert_matches!(system.theta_out(), Err(BeamError::InvalidState(_)));
        assert_matches!(system.rayleigh_range_out(), Err(BeamError::InvalidState(_)));
        assert_matches!(system.divergence_out(), Err(BeamError::InvalidState(_)));
        assert_matches!(
            system.radius_of_curvature_out(),
            Err(BeamError::InvalidState(_))
        );
    }
    #[test]
    fn identity_propagation() {
        let mut system = nd_yag().with_position(0.1).unwrap().with_angle(0.02).unwrap();
        system.propagate().unwrap();
        assert_eq!(system.z_out().unwrap(), 0.1);
        assert_eq!(system.theta_out().unwrap(), 0.02);
        assert_eq!(system.q_out().unwrap(), system.beam().q());
        assert_relative_eq!(system.waist_out().unwrap(), 1e-3, max_relative = 1e-12);
    }
    #[test]
    fn idempotent_propagation() {
        let mut system = nd_yag();
        system.add_free_space(0.3).unwrap();
        system.add_lens(0.2, 0.0, 0.0, 0.0, LensType::Thin).unwrap();
        let first = system.propagate().unwrap().clone();
        let second = system.propagate().unwrap().clone();
        assert_eq!(first, second);
    }
    #[test]
    fn repeated_propagation_after_append() {
        let mut system = nd_yag();
        system.add_free_space(0.5).unwrap();
        system.propagate().unwrap();
        assert_eq!(system.q_out().unwrap().re, 0.5);
        system.add_free_space(0.25).unwrap();
        assert_eq!(system.q_out().unwrap().re, 0.5);
        system.propagate().unwrap();
        assert_eq!(system.q_out().unwrap().re, 0.75);
        assert_eq!(system.elements().len(), 2);
    }
    #[test]
    fn tilted_ray_in_free_space() {
        let mut system = nd_yag().with_position(0.001).unwrap().with_angle(0.01).unwrap();
        system.add_free_space(0.5).unwrap();
        system.propagate().unwrap();
        assert_relative_eq!(system.z_out().unwrap(), 0.006, max_relative = 1e-12);
        assert_eq!(system.theta_out().unwrap(), 0.01);
    }
    #[test]
    fn free_space_composition() {
        let mut split = nd_yag();
        split.add_free_space(0.2).unwrap();
        split.add_free_space(0.3).unwrap();
        split.propagate().unwrap();
        let mut single = nd_yag();
        single.add_free_space(0.5).unwrap();
        single.propagate().unwrap();
        assert_abs_diff_eq!(split.z_out().unwrap(), single.z_out().unwrap(), epsilon = 1e-15);
        assert_abs_diff_eq!(split.theta_out().unwrap(), single.theta_out().unwrap());
        assert_abs_diff_eq!(
            split.q_out().unwrap().re,
            single.q_out().unwrap().re,
            epsilon = 1e-15
        );
        assert_abs_diff_eq!(
            split.q_out().unwrap().im,
            single.q_out().unwrap().im,
            epsilon = 1e-15
        );
    }
    #[test]
    fn thin_lens_focal_check() {
        let f = 0.1;
        let z0 = 0.002;
        let mut system = nd_yag().with_position(z0).unwrap();
        system.add_free_space(f).unwrap();
        system.add_lens(f, 0.0, 0.0, 0.0, LensType::Thin).unwrap();
        system.propagate().unwrap();
        // a ray parallel to the axis at height z0 is bent towards the focal point
        assert_relative_eq!(system.theta_out().unwrap(), -z0 / f, max_relative = 1e-9);
        assert_relative_eq!(system.z_out().unwrap(), z0, max_relative = 1e-9);
    }
    #[test]
    fn thin_lens_on_axis() {
        let f = 0.1;
        let mut system = nd_yag();
        system.add_free_space(f).unwrap();
        system.add_lens(f, 0.0, 0.0, 0.0, LensType::Thin).unwrap();
        system.propagate().unwrap();
        assert_eq!(system.theta_out().unwrap(), 0.0);
        assert_eq!(system.z_out().unwrap(), 0.0);
    }
    #[test]
    fn thin_lens_focus() {
        let f = 0.1;
        let mut system = nd_yag();
        system.add_lens(f, 0.0, 0.0, 0.0, LensType::Thin).unwrap();
        system.add_free_space(f).unwrap();
        system.propagate().unwrap();
        // a collimated beam is focused to w0' = lambda f / (pi w0) in the focal plane
        let q_out = system.q_out().unwrap();
        let z_r = system.beam().rayleigh_range();
        let expected_re = f * f * f / (f * f + z_r * z_r);
        assert_relative_eq!(q_out.re, expected_re, max_relative = 1e-9);
        assert_relative_eq!(
            q_out.im,
            f * f * z_r / (f * f + z_r * z_r),
            max_relative = 1e-9
        );
        assert!(system.waist_out().unwrap() < 1e-3);
    }
    #[test]
    fn flat_mirror_is_identity() {
        let mut reference = nd_yag();
        reference.propagate().unwrap();
        let mut system = nd_yag();
        system.add_mirror(0.0, MirrorType::Flat).unwrap();
        system.propagate().unwrap();
        assert_eq!(system.output().unwrap(), reference.output().unwrap());
    }
    #[test]
    fn curved_mirror() {
        let mut system = nd_yag().with_position(0.001).unwrap();
        system.add_mirror(2.0, MirrorType::Curved).unwrap();
        system.propagate().unwrap();
        assert_relative_eq!(system.theta_out().unwrap(), -0.001);
        assert_matches!(
            system.add_mirror(0.0, MirrorType::Curved),
            Err(BeamError::InvalidParameter(_))
        );
        assert_eq!(system.elements().len(), 1);
    }
    #[test]
    fn interface_round_trip() {
        let mut system = nd_yag();
        system.add_interface(1.0, 1.5, 0.0).unwrap();
        system.add_interface(1.5, 1.0, 0.0).unwrap();
        system.propagate().unwrap();
        let q = system.beam().q();
        let q_out = system.q_out().unwrap();
        assert_abs_diff_eq!(q_out.re, q.re, epsilon = 1e-12);
        assert_relative_eq!(q_out.im, q.im, max_relative = 1e-12);
    }
    #[test]
    fn interface_with_distance() {
        let mut system = nd_yag();
        system.add_interface(1.0, 1.5, 0.2).unwrap();
        system.propagate().unwrap();
        assert_relative_eq!(system.q_out().unwrap().re, 0.3, max_relative = 1e-12);
    }
    #[test]
    fn thick_lens() {
        let mut system = nd_yag();
        system.add_lens(0.1, 1.0, 1.5, 0.005, LensType::Thick).unwrap();
        system.propagate().unwrap();
        assert_relative_eq!(system.system_matrix().determinant(), 1.0, epsilon = 1e-12);
        assert!(system.add_lens(0.1, 0.0, 1.5, 0.005, LensType::Thick).is_err());
    }
    #[test]
    fn invalid_type_rejection() {
        let mut system = nd_yag();
        assert_matches!(
            system.add_lens_by_name(10.0, 0.0, 0.0, 0.0, "bogus"),
            Err(BeamError::InvalidConfiguration(_))
        );
        assert_matches!(
            system.add_mirror_by_name(1.0, "bogus"),
            Err(BeamError::InvalidConfiguration(_))
        );
        assert_matches!(
            system.add_mirror_by_name(0.0, "curved"),
            Err(BeamError::InvalidParameter(_))
        );
        assert_matches!(
            system.add_lens_by_name(0.0, 0.0, 0.0, 0.0, "thin"),
            Err(BeamError::InvalidParameter(_))
        );
        assert!(system.elements().is_empty());
        system.add_lens_by_name(10.0, 0.0, 0.0, 0.0, "thin").unwrap();
        system.add_mirror_by_name(0.0, "flat").unwrap();
        assert_eq!(system.elements().len(), 2);
    }
    #[test]
    fn end_to_end() {
        let mut system = nd_yag();
        system.add_free_space(0.5).unwrap();
        system.propagate().unwrap();
        let q = system.beam().q();
        assert_relative_eq!(q.im, 2.9526, max_relative = 1e-4);
        // the ray vector [z; theta] = [0; 0] stays on axis
        assert_eq!(system.z_out().unwrap(), 0.0);
        assert_eq!(system.theta_out().unwrap(), 0.0);
        let q_out = system.q_out().unwrap();
        assert_relative_eq!(q_out.re, 0.5, max_relative = 1e-12);
        assert_relative_eq!(q_out.im, q.im, max_relative = 1e-12);
        let expected = 1e-3 * (1.0 + (0.5 / q.im).powi(2)).sqrt();
        assert_relative_eq!(system.waist_out().unwrap(), expected, max_relative = 1e-9);
    }
    #[test]
    fn derived_outputs() {
        let mut system = nd_yag();
        system.propagate().unwrap();
        assert_relative_eq!(
            system.rayleigh_range_out().unwrap(),
            PI * 1e-6 / 1.064e-6,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            system.divergence_out().unwrap(),
            1.064e-6 / (PI * 1e-3),
            max_relative = 1e-12
        );
        assert!(system.radius_of_curvature_out().unwrap().is_infinite());
        system.add_free_space(1.0).unwrap();
        system.propagate().unwrap();
        let z_r = system.beam().rayleigh_range();
        assert_relative_eq!(
            system.radius_of_curvature_out().unwrap(),
            1.0 + z_r * z_r,
            max_relative = 1e-9
        );
    }
    #[test]
    fn add_raw_element() {
        let mut system = nd_yag();
        assert!(system
            .add_element(OpticalElement::CurvedMirror { radius: 0.0 })
            .is_err());
        system
            .add_element(OpticalElement::CurvedMirror { radius: 1.0 })
            .unwrap();
        assert_eq!(system.elements().len(), 1);
    }
    #[test]
    fn builder_resets_output() {
        let mut system = nd_yag();
        system.propagate().unwrap();
        let system = system.with_position(0.1).unwrap();
        assert!(system.output().is_err());
    }
    #[test]
    fn subnormal_parameters_rejected() {
        let mut system = nd_yag();
        assert_matches!(
            system.add_lens(1e-320, 1.0, 1.0, 0.0, LensType::Thin),
            Err(BeamError::InvalidParameter(_))
        );
        assert_matches!(
            system.add_lens(0.1, 1e-310, 1.5, 0.01, LensType::Thick),
            Err(BeamError::InvalidParameter(_))
        );
        assert!(system.elements().is_empty());
        assert!(system.system_matrix().is_finite());
    }
}
