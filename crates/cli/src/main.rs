use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use sdos3d_core::io::{ModesFile, SdosConfig};
use sdos3d_core::sdos;

#[derive(Parser, Debug)]
#[command(
    name = "sdos3d",
    about = "Spectral density of states from saved band data"
)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: PathBuf,
    /// Override the output filename prefix from the config
    #[arg(long)]
    save_prefix: Option<String>,
    /// Override the broadening parameter eta
    #[arg(long)]
    eta: Option<f64>,
    /// Suppress progress logs (stderr)
    #[arg(long)]
    quiet: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("sdos error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    if !cli.quiet {
        eprintln!("[cli] loading config {}", cli.config.display());
    }
    let raw = fs::read_to_string(&cli.config)?;
    let mut config: SdosConfig = toml::from_str(&raw)?;
    if let Some(prefix) = cli.save_prefix {
        config.save_prefix = prefix;
    }
    if let Some(eta) = cli.eta {
        config.eta = eta;
    }

    if !cli.quiet {
        eprintln!("[cli] loading modes {}", config.modes.display());
    }
    let modes = ModesFile::load(&config.modes)?;
    let (mut solver, frequencies, lattice, kpoint) = modes.into_parts()?;
    let job = config.job();
    if !cli.quiet {
        eprintln!(
            "[cli] k#{} sweep {}..{} ({} samples) eta={} bands {}..{} nG={}",
            kpoint.index,
            job.freq_min,
            job.freq_max,
            job.freq_num,
            job.eta,
            job.band_min,
            job.band_min + job.n_bands,
            job.g_box.len()
        );
    }

    let path = sdos::run(&mut solver, &frequencies, &lattice, &kpoint, &job)?;
    if !cli.quiet {
        eprintln!("[cli] wrote {}", path.display());
    }
    Ok(())
}
