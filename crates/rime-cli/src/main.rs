mod cli;

use std::io::Read;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use rime_core::catalog::{Catalog, bundled_collections};
use rime_core::{AppBuilder, JobStatus, RimeConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // ログは stderr へ（stdout は結果の JSON 用）
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => RimeConfig::load_from(path),
        None => RimeConfig::load(),
    }
    .context("loading config")?;

    match cli.command {
        Command::Analyze { input, timeout } => analyze(config, &read_input(input)?, timeout).await,
        Command::Resolve { input } => resolve(config, &read_input(input)?).await,
        Command::Catalog { out, limit } => {
            let json = Catalog::from_collections(&bundled_collections(), limit).to_json_pretty()?;
            match out {
                Some(path) => {
                    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                        std::fs::create_dir_all(dir)
                            .with_context(|| format!("creating {}", dir.display()))?;
                    }
                    std::fs::write(&path, json)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!(path = %path.display(), "catalog written");
                }
                None => println!("{json}"),
            }
            Ok(())
        }
    }
}

/// `-` means stdin.
fn read_input(input: String) -> Result<String> {
    if input != "-" {
        return Ok(input);
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("reading stdin")?;
    Ok(buf)
}

async fn analyze(config: RimeConfig, input: &str, timeout_secs: u64) -> Result<()> {
    let app = AppBuilder::new(config).build()?;

    let submission = app.submit_input(input).await?;
    info!(job_id = %submission.job_id, "submitted");

    let Some(snapshot) = app
        .wait_for(submission.job_id, Duration::from_secs(timeout_secs))
        .await
    else {
        bail!("job {} did not finish within {timeout_secs}s", submission.job_id);
    };

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    app.shutdown().await;

    if snapshot.status != JobStatus::Completed {
        bail!(
            "job {} ended as {}: {}",
            snapshot.job_id,
            snapshot.status,
            snapshot.error.as_deref().unwrap_or("no details")
        );
    }
    Ok(())
}

async fn resolve(config: RimeConfig, input: &str) -> Result<()> {
    let app = AppBuilder::new(config).build()?;
    println!("{}", app.resolver().resolve(input).await);
    app.shutdown().await;
    Ok(())
}
