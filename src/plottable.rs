#![warn(missing_docs)]
//! Visualization of a propagated Gaussian beam
//!
//! A [`BeamProfile`] samples
//!  - the transverse intensity profile `I(x) = exp(-x^2 / w^2)` for `x` in `[-10 w, 10 w]` and
//!  - the beam radius `w(z) = w * sqrt(1 + (z / z_R)^2)` for `z` in `[-2 z_R, 2 z_R]`
//!
//! and renders both curves side by side into a bitmap or svg file.
use std::{f64::consts::PI, path::Path};

use crate::{
    beam_system::BeamSystem,
    error::{BeamError, BeamResult},
    utils::linspace,
};
use log::info;
use nalgebra::MatrixXx2;
use plotters::{
    backend::DrawingBackend,
    chart::{ChartBuilder, SeriesLabelPosition},
    coord::Shift,
    drawing::DrawingAreaErrorKind,
    element::PathElement,
    prelude::{BitMapBackend, DrawingArea, IntoDrawingArea, SVGBackend},
    series::LineSeries,
    style::{Color, IntoFont, RGBColor, BLACK, WHITE},
};

/// Default number of sample points of a profile curve.
pub const DEFAULT_SAMPLES: usize = 100;
const FIG_SIZE: (u32, u32) = (1200, 600);

///Enum to describe which type of plotting backend should be used
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PltBackEnd {
    /// `BitmapBackend`. Used to create .png, .bmp, .jpg
    #[default]
    Bitmap,
    /// `SVGBackend`. Used to create .svg
    SVG,
}
impl PltBackEnd {
    /// Determine the backend from the extension of the given file path.
    ///
    /// # Errors
    ///
    /// This function will return an error if the file extension is missing or not supported.
    pub fn from_path(path: &Path) -> BeamResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "png" | "bmp" | "jpg" | "jpeg" => Ok(Self::Bitmap),
            "svg" => Ok(Self::SVG),
            _ => Err(BeamError::InvalidConfiguration(format!(
                "unsupported plot file extension '{ext}'. Use png, bmp, jpg or svg"
            ))),
        }
    }
}

fn category_color(index: usize) -> RGBColor {
    let c = colorous::CATEGORY10[index % colorous::CATEGORY10.len()];
    RGBColor(c.r, c.g, c.b)
}

/// Sampled profile data of a Gaussian beam with a given waist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamProfile {
    waist: f64,
    wavelength: f64,
}
impl BeamProfile {
    /// Creates a new [`BeamProfile`].
    ///
    /// # Errors
    ///
    /// This function will return an error if `waist` or `wavelength` are not positive and finite.
    pub fn new(waist: f64, wavelength: f64) -> BeamResult<Self> {
        if !waist.is_finite() || waist <= 0.0 {
            return Err(BeamError::InvalidParameter(
                "waist must be positive and finite".into(),
            ));
        }
        if !wavelength.is_finite() || wavelength <= 0.0 {
            return Err(BeamError::InvalidParameter(
                "wavelength must be positive and finite".into(),
            ));
        }
        Ok(Self { waist, wavelength })
    }
    /// Returns the waist of this [`BeamProfile`].
    #[must_use]
    pub const fn waist(&self) -> f64 {
        self.waist
    }
    /// Returns the Rayleigh range `pi * w^2 / lambda`.
    #[must_use]
    pub fn rayleigh_range(&self) -> f64 {
        PI * self.waist * self.waist / self.wavelength
    }
    /// Sample the normalized transverse intensity profile.
    ///
    /// Returns a matrix with the positions in the first and the intensities in the second column.
    ///
    /// # Errors
    ///
    /// This function will return an error if less than two samples are requested.
    pub fn intensity(&self, samples: usize) -> BeamResult<MatrixXx2<f64>> {
        let x = linspace(-10.0 * self.waist, 10.0 * self.waist, samples)?;
        let intensity = x.map(|x| (-(x * x) / (self.waist * self.waist)).exp());
        Ok(MatrixXx2::from_columns(&[x, intensity]))
    }
    /// Sample the beam radius as function of the axial distance from the waist.
    ///
    /// Returns a matrix with the axial positions in the first and the beam radii in the second column.
    ///
    /// # Errors
    ///
    /// This function will return an error if less than two samples are requested.
    pub fn caustic(&self, samples: usize) -> BeamResult<MatrixXx2<f64>> {
        let z_r = self.rayleigh_range();
        let z = linspace(-2.0 * z_r, 2.0 * z_r, samples)?;
        let radius = z.map(|z| self.waist * (1.0 + (z / z_r).powi(2)).sqrt());
        Ok(MatrixXx2::from_columns(&[z, radius]))
    }
    /// Render intensity profile and caustic into the given file.
    ///
    /// The backend is chosen from the file extension (see [`PltBackEnd::from_path`]).
    ///
    /// # Errors
    ///
    /// This function will return an error if the file extension is not supported or the plot
    /// could not be drawn.
    pub fn plot(&self, path: &Path) -> BeamResult<()> {
        let backend = PltBackEnd::from_path(path)?;
        info!("Write beam profile plot to {}", path.display());
        match backend {
            PltBackEnd::Bitmap => {
                let root = BitMapBackend::new(path, FIG_SIZE).into_drawing_area();
                self.draw(&root)
            }
            PltBackEnd::SVG => {
                let root = SVGBackend::new(path, FIG_SIZE).into_drawing_area();
                self.draw(&root)
            }
        }
    }
    fn draw<B: DrawingBackend>(&self, root: &DrawingArea<B, Shift>) -> BeamResult<()> {
        let plot_err = |e: DrawingAreaErrorKind<B::ErrorType>| BeamError::Plot(e.to_string());
        root.fill(&WHITE).map_err(plot_err)?;
        let (left, right) = root.split_horizontally(FIG_SIZE.0 / 2);

        let intensity = self.intensity(DEFAULT_SAMPLES)?;
        let x_max = 10.0 * self.waist;
        let mut chart = ChartBuilder::on(&left)
            .caption(
                format!("Gaussian Beam Profile at Waist: {} um", self.waist * 1e6),
                ("sans-serif", 20).into_font(),
            )
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(-x_max..x_max, 0.0..1.05)
            .map_err(plot_err)?;
        chart
            .configure_mesh()
            .x_desc("Position (x)")
            .y_desc("Intensity")
            .draw()
            .map_err(plot_err)?;
        chart
            .draw_series(LineSeries::new(
                intensity.row_iter().map(|r| (r[0], r[1])),
                category_color(0).stroke_width(2),
            ))
            .map_err(plot_err)?;

        let caustic = self.caustic(DEFAULT_SAMPLES)?;
        let z_r = self.rayleigh_range();
        let w_max = caustic.column(1).max();
        let mut chart = ChartBuilder::on(&right)
            .caption("Gaussian Beam Waist vs. Position", ("sans-serif", 20).into_font())
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(-2.0 * z_r..2.0 * z_r, -1.05 * w_max..1.05 * w_max)
            .map_err(plot_err)?;
        chart
            .configure_mesh()
            .x_desc("Position (z)")
            .y_desc("Beam Waist")
            .draw()
            .map_err(plot_err)?;
        let caustic_color = category_color(3);
        for sign in [1.0, -1.0] {
            chart
                .draw_series(LineSeries::new(
                    caustic.row_iter().map(|r| (r[0], sign * r[1])),
                    caustic_color.stroke_width(2),
                ))
                .map_err(plot_err)?;
        }
        let markers = [
            (0.0, self.waist, "waist_out", category_color(0)),
            (
                z_r,
                2.0_f64.sqrt() * self.waist,
                "sqrt(2)*waist_out",
                category_color(2),
            ),
        ];
        for (z, w, label, color) in markers {
            chart
                .draw_series(std::iter::once(PathElement::new(
                    vec![(z, 0.0), (z, w)],
                    color.stroke_width(2),
                )))
                .map_err(plot_err)?
                .label(label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(plot_err)?;
        root.present().map_err(plot_err)?;
        Ok(())
    }
}

impl BeamSystem {
    /// Returns the [`BeamProfile`] of the propagated beam.
    ///
    /// # Errors
    ///
    /// This function will return an error if [`BeamSystem::propagate`] has not been called yet.
    pub fn beam_profile(&self) -> BeamResult<BeamProfile> {
        BeamProfile::new(self.waist_out()?, self.beam().wavelength())
    }
    /// Plot the intensity profile and the caustic of the propagated beam into the given file.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - [`BeamSystem::propagate`] has not been called yet ([`BeamError::InvalidState`]).
    ///   - the file extension is not supported.
    ///   - the plot could not be drawn.
    pub fn plot_beam_profile(&self, path: &Path) -> BeamResult<()> {
        self.beam_profile()?.plot(path)
    }
}
