use blimp_scene::app::{run_cli, run_gui};
use blimp_scene::io::config::Config;
use blimp_scene::scene::state::Control;
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

/// Software-rasterized hierarchical blimp over a ground mesh.
#[derive(Parser, Debug)]
#[command(name = "blimp")]
#[command(about = "Hierarchical blimp scene rendered by a software rasterizer")]
struct Cli {
    /// Configuration file (TOML). Built-in defaults are used when omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Render a single frame to a PNG instead of opening a window.
    #[arg(long)]
    headless: bool,

    /// Output PNG for headless mode (overrides `render.output`).
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Comma-separated controls applied before the headless frame,
    /// e.g. `forward,forward,left,up`.
    #[arg(long, value_name = "LIST", default_value = "")]
    inputs: String,
}

fn run(cli: &Cli) -> blimp_scene::Result<()> {
    let config = match &cli.config {
        Some(path) => {
            info!("Loading config '{}'", path.display());
            Config::load(path)?
        }
        None => {
            info!("No config given, using defaults.");
            Config::default()
        }
    };

    if cli.headless {
        let inputs = Control::parse_list(&cli.inputs)?;
        let output = cli
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.render.output));
        run_cli(&config, &inputs, &output)
    } else {
        run_gui(&config)
    }
}

fn main() -> ExitCode {
    // RUST_LOG still overrides the default level.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("minifb", log::LevelFilter::Warn)
        .format_timestamp(None)
        .format_level(true)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
