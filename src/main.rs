mod catalog;
mod config;
mod export;
mod ipc;
mod plan;

use std::io::{self, BufRead, Write};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    // stdout carries IPC responses, so logs go to stderr.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("plannerd=info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_ansi(false))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = config::Config::load()?;
    tracing::info!(
        period_scheme = config.period_scheme.as_str(),
        export_style = config.export_style.as_str(),
        catalog = config.catalog_label(),
        "plannerd starting"
    );
    let mut state = ipc::AppState::new(config)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "stdin closed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let resp = match serde_json::from_str::<ipc::Request>(&line) {
            Ok(req) => ipc::handle_request(&mut state, req),
            // Can't reply with an id; answer without one.
            Err(e) => ipc::bad_json(e.to_string()),
        };
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }

    tracing::info!("plannerd stopping");
    Ok(())
}
