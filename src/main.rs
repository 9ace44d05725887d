use std::path::PathBuf;

use anyhow::Context;
use cairn::{AppConfig, CairnApp, Route};
use clap::Parser;

/// Opens the Cairn scene viewer on a route.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// One of /home, /demo, /game or /prime. `/` redirects to /home.
    #[arg(default_value = "/")]
    route: String,

    /// TOML file overriding window and engine defaults
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(
        "info,wgpu_core=warn,wgpu_hal=warn,naga=warn",
    ))
    .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => AppConfig::default(),
    };
    let route = Route::resolve(&args.route)?;
    log::info!("Starting at {route}");

    CairnApp::new(config, route)?.run()
}
