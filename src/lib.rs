#![allow(clippy::module_name_repetitions)]
//! This is the documentation for the **gaussbeam** package. **gaussbeam** propagates a Gaussian
//! laser beam through a sequence of paraxial optical elements using ABCD ray transfer matrices.
//!
//! A beam is described by its wavelength and minimum waist. The beam enters a
//! [`BeamSystem`](beam_system::BeamSystem), which holds an ordered list of
//! [`OpticalElement`](element::OpticalElement)s (free space, thin and thick lenses, flat and
//! curved mirrors, refractive interfaces). After calling
//! [`propagate`](beam_system::BeamSystem::propagate), the outgoing complex beam parameter, waist
//! and ray coordinates can be queried.
pub mod abcd;
pub mod beam;
pub mod beam_system;
pub mod console;
pub mod element;
pub mod error;
pub mod optical_system;
pub mod plottable;
pub mod utils;

pub use beam_system::BeamSystem;
pub use element::{LensType, MirrorType, OpticalElement};
