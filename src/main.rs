use anyhow::Result;
use picksboard::{bootstrap::Dashboard, config::Config};
use reqwest::Client;
use std::env;
use tokio::time::sleep;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("").add_directive(log_level.parse().unwrap_or(Level::INFO.into()))
    });
    fmt::Subscriber::builder().with_env_filter(filter).init();
    info!("startup");

    // ─── 2) configure ────────────────────────────────────────────────
    let cfg = Config::load()?;
    let url = cfg.csv_url()?;
    info!(url = %url, output = %cfg.output.display(), "configured");

    // ─── 3) load → build → write, once or on an interval ─────────────
    let client = Client::new();
    let mut dashboard = Dashboard::new(cfg.page_length).with_csv_path(&cfg.csv_path);
    loop {
        dashboard.refresh(&client, &url).await;
        info!(status = %dashboard.page().status, "refreshed");
        let written = dashboard.write_html(&cfg.output, &cfg.title);

        match cfg.refresh_interval() {
            Some(every) => {
                if let Err(e) = written {
                    error!("failed to write page: {:#}", e);
                }
                sleep(every).await;
            }
            None => {
                written?;
                break;
            }
        }
    }

    info!("all done");
    Ok(())
}
