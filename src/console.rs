//! Handling the gaussbeam CLI
//!
//! This module handles the command line parsing and the formatting of the propagation results.
use std::{
    fmt::{self, Write},
    path::PathBuf,
};

use crate::{
    beam::BeamOutput,
    beam_system::BeamSystem,
    element::OpticalElement,
    error::{BeamError, BeamResult},
    plottable::PltBackEnd,
};
use clap::Parser;
use log::info;

/// Raw command line arguments of the gaussbeam application.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct PartialArgs {
    /// wavelength of the beam. All lengths must be given in the same unit (e.g. meter)
    #[arg(short = 'l', long)]
    wavelength: f64,

    /// minimum waist (radius) of the beam
    #[arg(short, long)]
    waist: f64,

    /// initial axial position of the ray
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    z: f64,

    /// initial (paraxial) ray angle in radians
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    theta: f64,

    /// optical element in propagation order. Can be given multiple times.
    /// Supported: free:<d>, thin:<f>, thick:<f>,<n1>,<n2>,<d>, flat, curved:<radius>, interface:<n1>,<n2>,<d>
    #[arg(short, long = "element", allow_hyphen_values = true)]
    elements: Vec<String>,

    /// file (png, bmp, jpg or svg) for the plot of the propagated beam profile
    #[arg(short, long)]
    plot: Option<String>,
}

/// Validated command line arguments of the gaussbeam application.
#[derive(Debug)]
pub struct Args {
    /// beam and optical system described on the command line
    pub beam_system: BeamSystem,

    /// destination of the beam profile plot, if any
    pub plot_path: Option<PathBuf>,
}

impl TryFrom<PartialArgs> for Args {
    type Error = BeamError;

    fn try_from(part_args: PartialArgs) -> BeamResult<Self> {
        let mut beam_system = BeamSystem::new(part_args.wavelength, part_args.waist)?
            .with_position(part_args.z)?
            .with_angle(part_args.theta)?;
        for element in &part_args.elements {
            beam_system.add_element(element.parse::<OpticalElement>()?)?;
        }
        info!(
            "optical system with {} element(s) created",
            beam_system.elements().len()
        );
        let plot_path = part_args.plot.map(plot_path).transpose()?;
        Ok(Self {
            beam_system,
            plot_path,
        })
    }
}

fn plot_path(path: String) -> BeamResult<PathBuf> {
    let path = PathBuf::from(path);
    PltBackEnd::from_path(&path)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(BeamError::Console(format!(
                "plot directory {} does not exist",
                parent.display()
            )));
        }
    }
    Ok(path)
}

/// Write the propagation results of the given [`BeamSystem`] as a human readable report.
///
/// # Errors
///
/// This function will return an error if
///   - the system has not been propagated yet ([`BeamError::InvalidState`]).
///   - the writer fails ([`BeamError::Other`]).
pub fn write_output<W: Write>(writer: &mut W, beam_system: &BeamSystem) -> BeamResult<()> {
    let output = beam_system.output()?;
    write_report(writer, beam_system, output)
        .map_err(|e| format!("writing of propagation report failed: {e}"))?;
    Ok(())
}

/// Format the propagation results of the given [`BeamSystem`] into a [`String`].
///
/// # Errors
///
/// This function will return an error if the system has not been propagated yet.
pub fn format_output(beam_system: &BeamSystem) -> BeamResult<String> {
    let mut report = String::new();
    write_output(&mut report, beam_system)?;
    Ok(report)
}

fn write_report<W: Write>(w: &mut W, beam_system: &BeamSystem, output: &BeamOutput) -> fmt::Result {
    writeln!(w, "elements:            {}", beam_system.elements().len())?;
    writeln!(w, "system matrix:       {}", beam_system.system_matrix())?;
    writeln!(w, "q_out:               {}", output.q())?;
    writeln!(w, "waist_out:           {:e}", output.waist())?;
    writeln!(w, "z_out:               {}", output.z())?;
    writeln!(w, "theta_out:           {}", output.theta())?;
    writeln!(w, "rayleigh range:      {}", output.rayleigh_range())?;
    writeln!(w, "divergence:          {:e}", output.divergence())?;
    write!(w, "radius of curvature: {}", output.radius_of_curvature())
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    fn parse(args: &[&str]) -> PartialArgs {
        PartialArgs::try_parse_from(std::iter::once("gaussbeam").chain(args.iter().copied()))
            .unwrap()
    }
    #[test]
    fn minimal_args() {
        let args = Args::try_from(parse(&["-l", "1.064e-6", "-w", "1e-3"])).unwrap();
        assert!(args.beam_system.elements().is_empty());
        assert_eq!(args.beam_system.beam().z(), 0.0);
        assert_eq!(args.beam_system.beam().theta(), 0.0);
        assert!(args.plot_path.is_none());
    }
    #[test]
    fn full_args() {
        let args = Args::try_from(parse(&[
            "--wavelength",
            "1.064e-6",
            "--waist",
            "1e-3",
            "-z",
            "-0.5",
            "--theta",
            "0.01",
            "-e",
            "free:0.5",
            "--element",
            "thin:-0.1",
            "-e",
            "interface:1.0,1.5,0.0",
            "--plot",
            "profile.svg",
        ]))
        .unwrap();
        assert_eq!(args.beam_system.beam().z(), -0.5);
        assert_eq!(args.beam_system.beam().theta(), 0.01);
        assert_eq!(
            args.beam_system.elements(),
            &[
                OpticalElement::FreeSpace { distance: 0.5 },
                OpticalElement::ThinLens { focal_length: -0.1 },
                OpticalElement::Interface {
                    n1: 1.0,
                    n2: 1.5,
                    distance: 0.0
                }
            ]
        );
        assert_eq!(args.plot_path, Some(PathBuf::from("profile.svg")));
    }
    #[test]
    fn missing_args() {
        assert!(PartialArgs::try_parse_from(["gaussbeam", "-l", "1e-6"]).is_err());
    }
    #[test]
    fn invalid_args() {
        assert_matches!(
            Args::try_from(parse(&["-l", "0.0", "-w", "1e-3"])),
            Err(BeamError::InvalidParameter(_))
        );
        assert_matches!(
            Args::try_from(parse(&["-l", "1e-6", "-w", "1e-3", "-e", "prism:1"])),
            Err(BeamError::InvalidConfiguration(_))
        );
        assert_matches!(
            Args::try_from(parse(&["-l", "1e-6", "-w", "1e-3", "-e", "curved:0"])),
            Err(BeamError::InvalidParameter(_))
        );
        assert_matches!(
            Args::try_from(parse(&["-l", "1e-6", "-w", "1e-3", "-p", "plot.pdf"])),
            Err(BeamError::InvalidConfiguration(_))
        );
        assert_matches!(
            Args::try_from(parse(&["-l", "1e-6", "-w", "1e-3", "-p", "no_such_dir/plot.png"])),
            Err(BeamError::Console(_))
        );
    }
    #[test]
    fn plot_in_existing_dir() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("plot.png");
        let args = Args::try_from(parse(&[
            "-l",
            "1e-6",
            "-w",
            "1e-3",
            "-p",
            file.to_str().unwrap(),
        ]))
        .unwrap();
        assert_eq!(args.plot_path, Some(file));
    }
    #[test]
    fn format() {
        let mut system = BeamSystem::new(1.064e-6, 1e-3).unwrap();
        assert_matches!(format_output(&system), Err(BeamError::InvalidState(_)));
        system.add_free_space(0.5).unwrap();
        system.propagate().unwrap();
        let report = format_output(&system).unwrap();
        assert!(report.contains("elements:            1\n"));
        assert!(report.contains("z_out:               0\n"));
        assert!(report.contains("theta_out:           0\n"));
        assert!(report.contains("system matrix:       [[1, 0.5], [0, 1]]\n"));
    }
    struct FailingWriter;
    impl Write for FailingWriter {
        fn write_str(&mut self, _: &str) -> fmt::Result {
            Err(fmt::Error)
        }
    }
    #[test]
    fn write_output_failing_writer() {
        let mut system = BeamSystem::new(1.064e-6, 1e-3).unwrap();
        assert_matches!(
            write_output(&mut FailingWriter, &system),
            Err(BeamError::InvalidState(_))
        );
        system.propagate().unwrap();
        assert_matches!(
            write_output(&mut FailingWriter, &system),
            Err(BeamError::Other(_))
        );
    }
}
