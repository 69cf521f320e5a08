//! Print stint tables for recorded timing scrapes.
//!
//! ```text
//! stintwall-report <config.yaml> <recording.yaml>...
//! ```
//!
//! Log output is controlled through `RUST_LOG`.

use anyhow::{Context, Result, bail};
use stintwall::report::{render_yaml, stint_table_rows};
use stintwall::{AnalysisConfig, LapSource, RecordedSource, StintAnalyser};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(config_path) = args.next() else {
        bail!("usage: stintwall-report <config.yaml> <recording.yaml>...");
    };

    let config = AnalysisConfig::load(&config_path)
        .with_context(|| format!("loading config {config_path}"))?;

    let mut sources: Vec<Box<dyn LapSource>> = Vec::new();
    for path in args {
        let source =
            RecordedSource::open(&path).with_context(|| format!("opening recording {path}"))?;
        sources.push(Box::new(source));
    }
    if sources.is_empty() {
        bail!("no recordings given");
    }

    info!(
        threshold = config.pit_threshold.seconds(),
        sources = sources.len(),
        "Analysing recorded sources"
    );

    let mut analyser = StintAnalyser::new(config);
    let report = analyser.acquire(&mut sources).await;

    for failure in &report.failures {
        warn!("{}", failure);
    }
    if !report.has_data() {
        bail!("no usable lap data in any source");
    }

    let names = analyser.team_names();
    for (source, analysis) in analyser.analyse_all()? {
        let name = names.name(&source).unwrap_or(source.as_str());
        println!("# {name} ({source})");
        println!("{}", render_yaml(&stint_table_rows(&analysis.stints))?);
    }

    Ok(())
}
