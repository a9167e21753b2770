use std::sync::Arc;

use tokio::signal;

use lobby::errors::Report;
use lobby::log;
use lobby::overview::Overview;
use lobby::poll::Poller;
use lobby::{Api, ApiConfig, ApiResult};

#[tokio::main]
async fn main() -> Result<(), Report> {
    lobby::log::setup()?;

    let config = ApiConfig::from_env()?;
    log::info!(
        "Watching {} every {}s",
        config.api_base(),
        config.poll_interval().as_secs()
    );
    log::info!("Press Ctrl+C to stop");

    let api = Arc::new(Api::from_config(&config));
    let poller = Poller::spawn(
        config.poll_interval(),
        move || {
            let api = api.clone();
            async move { api.load_overview().await }
        },
        report,
    );

    shutdown_signal().await;
    poller.stop().await;
    log::info!("Monitor stopped");

    Ok(())
}

// Failures were already logged by the interceptor; the next tick retries.
fn report(result: ApiResult<Overview>) {
    match result {
        Ok(overview) => log::info!("{}", summary(&overview)),
        Err(err) => log::warn!("Overview refresh failed: {err}"),
    }
}

fn summary(overview: &Overview) -> String {
    let newest = overview
        .recent_payments
        .first()
        .map(|p| format!("{:.2} ({})", p.amount, p.description))
        .unwrap_or_else(|| "none".to_string());
    let degraded = overview.saas.degraded_components().count();

    format!(
        "earnings {} ({:+.1}%), automations {}/{} active, saas health {}% ({} degraded), newest payment {}",
        overview.stats.today_earnings,
        overview.stats.today_growth,
        overview.active_automations(),
        overview.automations.len(),
        overview.saas.system_health,
        degraded,
        newest,
    )
}

/// Wait for a shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                log::error!("Failed to install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    log::info!("Signal received, stopping monitor");
}
