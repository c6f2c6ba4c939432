use clap::Parser;
use env_logger::Env;
use gaussbeam::{
    console::{format_output, Args, PartialArgs},
    error::BeamResult,
};

fn main() -> BeamResult<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let mut args = Args::try_from(PartialArgs::parse())?;
    args.beam_system.propagate()?;
    println!("{}", format_output(&args.beam_system)?);
    if let Some(path) = &args.plot_path {
        args.beam_system.plot_beam_profile(path)?;
        println!("beam profile written to {}", path.display());
    }
    Ok(())
}
