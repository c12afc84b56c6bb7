// src/fetch/mod.rs
//! CSV loader: cache-bypassing download followed by a header-aware parse.

use reqwest::{
    header::{CACHE_CONTROL, PRAGMA},
    Client,
};
use thiserror::Error;
use tokio::task;
use tracing::{debug, info, instrument};
use url::Url;

pub mod parse;

pub use parse::{parse_csv, ParseWarning, ParsedCsv, Record, WarningKind};

/// The server answered, but not with a success status.
#[derive(Debug, Error)]
#[error("Failed to fetch {path} ({status})")]
pub struct FetchError {
    pub path: String,
    pub status: u16,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("request for {path} failed: {source}")]
    Request {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("CSV header could not be read: {0}")]
    Parse(#[source] csv::Error),

    #[error("CSV parse task failed: {0}")]
    Task(#[from] task::JoinError),
}

/// Download `url` without touching any cache and parse the body as CSV.
///
/// The caller gets either the whole parse or a single error; parse warnings
/// ride along in [`ParsedCsv::warnings`].
#[instrument(level = "info", skip(client, url), fields(url = %url))]
pub async fn load_csv(client: &Client, url: &Url) -> Result<ParsedCsv, LoadError> {
    let path = url.to_string();
    let request_failed = |source| LoadError::Request {
        path: path.clone(),
        source,
    };

    let resp = client
        .get(url.clone())
        .header(CACHE_CONTROL, "no-cache, no-store")
        .header(PRAGMA, "no-cache")
        .send()
        .await
        .map_err(request_failed)?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError {
            path: path.clone(),
            status: status.as_u16(),
        }
        .into());
    }

    let text = resp.text().await.map_err(request_failed)?;
    debug!(bytes = text.len(), "downloaded CSV");

    // parsing is CPU-bound; keep it off the async workers
    let parsed = task::spawn_blocking(move || parse_csv(&text)).await??;
    info!(
        rows = parsed.records.len(),
        warnings = parsed.warnings.len(),
        "parsed CSV"
    );
    Ok(parsed)
}
