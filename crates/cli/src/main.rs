use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let manifest_path = PathBuf::from(
        args.get(1).map(String::as_str).unwrap_or("tokensmith.json"),
    );

    let data = std::fs::read(&manifest_path)
        .with_context(|| format!("reading build manifest `{}`", manifest_path.display()))?;
    let manifest: tokensmith_core::BuildManifest = serde_json::from_slice(&data)
        .with_context(|| format!("parsing build manifest `{}`", manifest_path.display()))?;

    let report = tokensmith_core::run_build(&manifest)?;

    eprintln!("{} files written", report.written.len());
    if report.has_failures() {
        for failure in &report.failures {
            match &failure.destination {
                Some(dest) => {
                    eprintln!("FAILED {} ({dest}): {}", failure.task, failure.error);
                }
                None => eprintln!("FAILED {}: {}", failure.task, failure.error),
            }
        }
        std::process::exit(1);
    }
    Ok(())
}
