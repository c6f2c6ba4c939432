//! Basic math helper functions

use crate::error::{BeamError, BeamResult};
use nalgebra::DVector;

/// Creates a linearly spaced Vector from `start` to `end` (both included) with `num` entries.
///
/// # Errors
/// This function errors if
/// - `start` or `end` are not finite.
/// - `num` is smaller than two.
pub fn linspace(start: f64, end: f64, num: usize) -> BeamResult<DVector<f64>> {
    if !start.is_finite() || !end.is_finite() {
        return Err(BeamError::InvalidParameter(
            "start and end values must be finite!".into(),
        ));
    }
    if num < 2 {
        return Err(BeamError::InvalidParameter(
            "linspace needs at least two elements".into(),
        ));
    }
    #[allow(clippy::cast_precision_loss)]
    let bin_size = (end - start) / (num - 1) as f64;
    #[allow(clippy::cast_precision_loss)]
    let mut linspace = DVector::<f64>::from_fn(num, |step, _| (step as f64).mul_add(bin_size, start));
    // avoid accumulated rounding at the upper boundary
    linspace[num - 1] = end;
    Ok(linspace)
}
