use clap::Parser;
use std::path::PathBuf;

use clusterdeck::config::Config;

/// Terminal dashboard for inspecting a cluster scheduler.
#[derive(Parser)]
#[command(name = "clusterdeck", version, about)]
struct Cli {
    /// Backend base URL (overrides the config file)
    #[arg(long)]
    base_url: Option<String>,

    /// Explicit config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial location, e.g. "/app?cluster=dev&user=alice&app=web"
    #[arg(default_value = "/cluster")]
    location: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    clusterdeck::trace::init_tracing();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let base = match cli.base_url {
        Some(base) => base.trim_end_matches('/').to_string(),
        None => config.base_url(),
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    clusterdeck::ui::runtime::run(base, runtime.handle().clone(), &cli.location)
}
