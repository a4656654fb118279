use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use chunkpad::draw::ImageFormat;
use chunkpad::export::{PrintManager, PrintStatus};
use chunkpad::script::Script;
use chunkpad::{Config, Host};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("CHUNKPAD_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "chunkpad")]
#[command(
    version,
    long_version = LONG_VERSION,
    about = "Chunky pixel-art drawing pad for 576px receipt printers"
)]
struct Cli {
    /// Script of page interactions to replay (TOML [[steps]])
    #[arg(long, short = 's', value_name = "FILE")]
    script: PathBuf,

    /// Write the final drawing as PNG to this path
    #[arg(long, short = 'o', value_name = "PNG")]
    out: Option<PathBuf>,

    /// Config file to use instead of ~/.config/chunkpad/config.toml
    #[arg(long, short = 'c', value_name = "TOML")]
    config: Option<PathBuf>,

    /// Print endpoint, overriding [print] endpoint
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Displayed size of the surface divided by its native size
    #[arg(long, value_name = "FACTOR")]
    scale: Option<f64>,
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(endpoint) = cli.endpoint {
        config.print.endpoint = endpoint;
    }
    if let Some(scale) = cli.scale {
        config.input.scale_factor = scale;
    }
    config.validate_and_clamp();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let printer = PrintManager::new(runtime.handle(), &config.print)
        .context("Failed to set up print submission")?;
    let mut host = Host::new(&config, Some(printer)).context("Failed to create drawing surface")?;

    let script = Script::load(&cli.script)?;
    let printed = script
        .run(&mut host)
        .with_context(|| format!("Failed to replay {}", cli.script.display()))?;
    log::info!("{}", host.status_line());

    if let Some(out) = &cli.out {
        let png = host.input.surface.export_image(ImageFormat::Png)?;
        fs::write(out, png).with_context(|| format!("Failed to write {}", out.display()))?;
        log::info!("Wrote drawing to {}", out.display());
    }

    if let Some(saved) = host.last_saved() {
        println!("Saved drawing to {}", saved.display());
    }

    if printed && let Some(printer) = host.printer() {
        let status = runtime.block_on(printer.wait_until_settled());
        println!("{}", status.message());
        if status != PrintStatus::Printed {
            return Ok(ExitCode::from(2));
        }
    }

    Ok(ExitCode::SUCCESS)
}
