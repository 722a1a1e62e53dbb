use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use waypost_cli::commands::discover::{self, DiscoveryConfig};
use waypost_codegen::emit::GENERATED_FILE_NAME;

#[derive(Parser)]
#[command(
    name = "waypost-discover",
    version,
    about = "Generate the controller registry for a waypost target"
)]
struct Cli {
    /// Name of the build target (recorded in the generated file)
    target_name: String,
    /// Directory scanned recursively for controllers
    input_dir: PathBuf,
    /// Directory the registry is written to (created if missing)
    output_dir: PathBuf,
    /// File name of the generated registry
    #[arg(long, default_value = GENERATED_FILE_NAME)]
    output_file: String,
    /// Crate the generated code calls into
    #[arg(long, default_value = "waypost")]
    runtime_crate: String,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let config = DiscoveryConfig {
        output_file_name: cli.output_file,
        runtime_crate: cli.runtime_crate,
        ..DiscoveryConfig::new(cli.target_name, cli.input_dir, cli.output_dir)
    };

    if let Err(e) = discover::run(&config) {
        eprintln!("{}", colored::Colorize::red(format!("Error: {e}").as_str()));
        std::process::exit(1);
    }
}
