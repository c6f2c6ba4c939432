#![warn(missing_docs)]
//! Ordered sequence of optical elements
use crate::{abcd::RayTransferMatrix, element::OpticalElement, error::BeamResult};
use log::debug;

/// An ordered list of [`OpticalElement`]s.
///
/// The elements are stored in the order the light encounters them (entry first). Once appended,
/// elements cannot be modified or removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpticalSystem {
    elements: Vec<OpticalElement>,
}
impl OpticalSystem {
    /// Creates a new, empty [`OpticalSystem`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    /// Append an element at the end of this [`OpticalSystem`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the element has invalid parameters.
    pub fn push(&mut self, element: OpticalElement) -> BeamResult<()> {
        element.validate()?;
        debug!("add element #{}: {element}", self.elements.len());
        self.elements.push(element);
        Ok(())
    }
    /// Returns the elements of this [`OpticalSystem`] in propagation order.
    #[must_use]
    pub fn elements(&self) -> &[OpticalElement] {
        &self.elements
    }
    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }
    /// Returns `true` if this [`OpticalSystem`] does not contain any elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
    /// Returns the total ray transfer matrix of this [`OpticalSystem`].
    ///
    /// The matrices are multiplied in reverse order of their insertion, such that the first element
    /// is the rightmost factor and hence acts first on the ray. An empty system yields the identity.
    #[must_use]
    pub fn system_matrix(&self) -> RayTransferMatrix {
        self.elements
            .iter()
            .rev()
            .fold(RayTransferMatrix::identity(), |total, element| {
                total * element.matrix()
            })
    }
}
