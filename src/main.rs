use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use funcplot::{rasterize_png, Config, GraphRenderer, SvgGraphRenderer};

/// Plot f(x) over [-100, 100) as an SVG line chart.
#[derive(Parser, Debug)]
#[command(name = "funcplot", version)]
struct Args {
    /// Expression in `x`, e.g. `sin(x / 10) * x`.
    #[arg(allow_hyphen_values = true)]
    expression: String,

    /// Number of evenly spaced samples.
    #[arg(default_value_t = 200)]
    steps: usize,

    /// Write a PNG here instead of SVG to stdout.
    #[arg(long)]
    png: Option<PathBuf>,

    /// TOML file overriding canvas size and step limit.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    Ok(Config::from_toml_str(&text)?)
}

fn main() -> anyhow::Result<()> {
    // stdout carries the SVG, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;
    let (width, height) = (config.width, config.height);

    let renderer = SvgGraphRenderer::new(config);
    let mut stream = renderer
        .render(&args.expression, args.steps)
        .with_context(|| format!("render '{}'", args.expression))?;

    match &args.png {
        Some(path) => {
            let png = rasterize_png(&mut stream, width, height)?;
            std::fs::write(path, png).with_context(|| format!("write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote png");
        }
        None => {
            let mut stdout = io::stdout().lock();
            io::copy(&mut stream, &mut stdout)?;
            stdout.flush()?;
        }
    }

    Ok(())
}
