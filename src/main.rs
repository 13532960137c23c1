use anyhow::Result;
use machine_dashboard::*;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let config_path = config::AppConfig::path();
    let app_config = config::AppConfig::load()?;
    let config_dir = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let data_root = app_config.data.resolve_root(config_dir);
    tracing::info!(
        environment = ?app_config.data.environment,
        root = %data_root.display(),
        "data root resolved"
    );

    if app_config.data.environment == config::Environment::Debug {
        let root = data_root.clone();
        let seed_config = app_config.seed.clone();
        let today = chrono::Local::now().date_naive();
        tokio::task::spawn_blocking(move || {
            seed::seed_machines(&root, &seed_config.machines, seed_config.days, today)
        })
        .await??;
    }

    let store = Arc::new(state_store::StateStore::new(data_root));
    let sysinfo_repo = Arc::new(sysinfo_repo::SysinfoRepo::new());

    let app = routes::app(store, sysinfo_repo, app_config.clone());
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    tracing::info!("Received shutdown signal");
}
