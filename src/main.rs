use anyhow::{Context, Result};
use chrono::Utc;
use std::env;
use tokio::time::Instant;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, EnvFilter};
use tryreport::{export, fetch, Extractor, ReportConfig, ReportError};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(log_level.parse().unwrap_or(Level::INFO.into())),
        )
        .init();
    info!("startup");

    let start = Instant::now();
    if let Err(e) = run().await {
        error!(stage = e.stage(), error = %e, "try report failed");
        return Err(e).context("try report pipeline");
    }

    info!(elapsed = ?start.elapsed(), "all done");
    Ok(())
}

async fn run() -> Result<(), ReportError> {
    // ─── 2) configuration ────────────────────────────────────────────
    let cfg = ReportConfig::from_env()?;
    info!(
        config = %serde_json::to_string(&cfg).unwrap_or_default(),
        "loaded configuration"
    );

    // ─── 3) fetch the one page ───────────────────────────────────────
    let url = fetch::report_url(&cfg, Utc::now())?;
    let client = fetch::build_client(&cfg)?;
    info!(%url, "fetching try reports");
    let raw = fetch::fetch_report(&client, &url).await?;

    // ─── 4) flatten into a table ─────────────────────────────────────
    let table = Extractor::from_config(&cfg).extract(&raw, url.as_str())?;
    drop(raw);
    info!(
        rows = table.len(),
        columns = table.columns().len(),
        "extracted report table"
    );

    // ─── 5) write outputs ────────────────────────────────────────────
    export::write_spreadsheet(&table, &cfg.output, &cfg.sheet_name)?;
    if let Some(parquet_path) = &cfg.parquet_output {
        export::write_parquet(&table, parquet_path)?;
    }

    Ok(())
}
