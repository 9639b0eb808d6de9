use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info};

use riskdash::api;
use riskdash::common::config::AppCfg;
use riskdash::common::log;
use riskdash::inference::ArtifactStore;

/// Credit-risk prediction dashboard.
#[derive(Debug, Parser)]
#[command(name = "riskdash", version, about)]
struct Cli {
    /// Directory holding the model and feature-list artifacts.
    #[arg(long)]
    data_root: Option<PathBuf>,

    /// Address to serve the dashboard on.
    #[arg(long)]
    bind: Option<String>,

    /// Where to download the model from when it is not cached.
    #[arg(long)]
    model_url: Option<String>,

    /// Log filter directive, e.g. `info` or `riskdash=debug`.
    #[arg(long)]
    log: Option<String>,
}

impl Cli {
    fn apply(self, cfg: &mut AppCfg) {
        if let Some(data_root) = self.data_root {
            cfg.data_root = data_root;
        }
        if let Some(bind) = self.bind {
            cfg.bind = bind;
        }
        if let Some(model_url) = self.model_url {
            cfg.model_url = model_url;
        }
        if let Some(log) = self.log {
            cfg.log_level = log;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let mut cfg = AppCfg::load();
    Cli::parse().apply(&mut cfg);
    log::init(&cfg.log_level);

    let addr: SocketAddr = cfg
        .bind
        .parse()
        .with_context(|| format!("invalid bind address `{}`", cfg.bind))?;

    let store = Arc::new(ArtifactStore::new(cfg.clone()));
    if let Err(err) = store.get().await {
        error!(code = err.code() as u32, error = %err, "startup aborted");
        return Err(err).context("loading artifacts");
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, data_root = %cfg.data_root.display(), "riskdash listening");

    axum::serve(listener, api::router(store))
        .with_graceful_shutdown(async {
            let _ = signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await
        .context("serving dashboard")?;

    info!("riskdash stopped");
    Ok(())
}
