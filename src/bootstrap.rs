// src/bootstrap.rs

use anyhow::{Context, Result};
use chrono::Local;
use reqwest::Client;
use std::{fs, path::Path};
use tracing::{error, info, warn};
use url::Url;

use crate::{
    fetch::{self, LoadError},
    render,
    table::{self, Grid, Page, DEFAULT_PAGE_LENGTH},
};

/// Owns the page and whichever grid is currently drawn on it.
pub struct Dashboard {
    page: Page,
    grid: Option<Grid>,
    page_length: usize,
    /// Configured CSV path, named in fetch errors in place of the full URL.
    csv_path: Option<String>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_LENGTH)
    }
}

impl Dashboard {
    pub fn new(page_length: usize) -> Self {
        Self {
            page: Page::default(),
            grid: None,
            page_length,
            csv_path: None,
        }
    }

    pub fn with_csv_path(mut self, csv_path: impl Into<String>) -> Self {
        self.csv_path = Some(csv_path.into());
        self
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    /// Load `url` and rebuild the table.
    ///
    /// Nothing escapes: a failed load is logged, reported as `Error: ...` in the
    /// status line, and the table is left as it was.
    pub async fn refresh(&mut self, client: &Client, url: &Url) {
        if let Err(err) = self.try_refresh(client, url).await {
            error!(url = %url, error = %err, "load failed");
            self.page.status = format!("Error: {err}");
        }
    }

    async fn try_refresh(&mut self, client: &Client, url: &Url) -> Result<(), LoadError> {
        let parsed = match fetch::load_csv(client, url).await {
            Err(LoadError::Fetch(mut e)) => {
                if let Some(path) = &self.csv_path {
                    e.path = path.clone();
                }
                return Err(e.into());
            }
            other => other?,
        };
        for w in &parsed.warnings {
            warn!(row = w.row, kind = ?w.kind, message = %w.message, "CSV parse warning");
        }

        let grid = table::build_table(
            self.grid.take(),
            &mut self.page,
            &parsed.fields,
            &parsed.records,
            self.page_length,
            Local::now(),
        );
        self.grid = Some(grid);
        Ok(())
    }

    pub fn render_html(&self, title: &str) -> String {
        render::render_page(&self.page, self.grid.as_ref(), title)
    }

    pub fn write_html(&self, path: &Path, title: &str) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output directory {}", parent.display()))?;
        }
        fs::write(path, self.render_html(title))
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), status = %self.page.status, "page written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::RowClass;
    use std::{
        net::SocketAddr,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
    };
    use tempfile::tempdir;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    use warp::{http::StatusCode, Filter};

    const FIRST: &str = "home team,away team,model edge,model mean,model P(cover)\n\
                         Lakers,Celtics,7.5,3.21,0.6596\n\
                         Knicks,Nets,-3,1.5,48\n\
                         Bulls,Heat,abc,2,51\n";
    const SECOND: &str = "home team,away team,model edge\nSuns,Jazz,2.5\n";
    const RAGGED: &str = "home team,away team,model edge\n\
                          Lakers,Celtics\n\
                          Knicks,Nets,-3,extra\n\
                          Suns,Jazz,2.5\n";

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,picksboard=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    /// `/data/latest.csv` serves FIRST, then SECOND, then 500s.
    /// `/data/ragged.csv` always serves RAGGED.
    async fn serve_sequence() -> SocketAddr {
        let hits = Arc::new(AtomicUsize::new(0));
        let latest = warp::path!("data" / "latest.csv").map(move || {
            let (status, body) = match hits.fetch_add(1, Ordering::SeqCst) {
                0 => (StatusCode::OK, FIRST),
                1 => (StatusCode::OK, SECOND),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, ""),
            };
            warp::reply::with_status(body, status)
        });
        let ragged = warp::path!("data" / "ragged.csv").map(|| RAGGED);
        let (addr, server) =
            warp::serve(latest.or(ragged)).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);
        addr
    }

    fn csv_url(addr: SocketAddr, path: &str) -> Url {
        Url::parse(&format!("http://{addr}/")).unwrap().join(path).unwrap()
    }

    #[tokio::test]
    async fn load_build_and_reload() {
        init_test_logging();
        let addr = serve_sequence().await;
        let client = Client::new();
        let url = csv_url(addr, "data/latest.csv");
        let mut dash = Dashboard::default();

        dash.refresh(&client, &url).await;
        let page = dash.page();
        assert_eq!(page.body.len(), 3);
        assert_eq!(
            page.body[0].cells,
            vec!["Lakers", "Celtics", "7.50%", "3.21", "0.66%"]
        );
        let classes: Vec<_> = page.body.iter().map(|r| r.class).collect();
        assert_eq!(classes, vec![RowClass::Great, RowClass::Bad, RowClass::None]);
        assert!(page.status.starts_with("Loaded 3 games • "));

        dash.refresh(&client, &url).await;
        let page = dash.page();
        assert_eq!(page.head, vec!["Home", "Away", "Edge"]);
        assert_eq!(page.body.len(), 1);
        assert_eq!(page.body[0].cells, vec!["Suns", "Jazz", "2.50%"]);
        assert_eq!(page.body[0].class, RowClass::Good);
        assert_eq!(dash.grid().map(Grid::row_count), Some(1));

        // a failed reload keeps the table and only replaces the status
        dash.refresh(&client, &url).await;
        let page = dash.page();
        assert_eq!(page.body.len(), 1);
        assert!(page.status.starts_with("Error: Failed to fetch"));
        assert!(page.status.contains("(500)"));
    }

    #[tokio::test]
    async fn missing_csv_reports_error_and_renders_no_rows() {
        init_test_logging();
        let addr = serve_sequence().await;
        let url = csv_url(addr, "data/nope.csv");
        let mut dash = Dashboard::default();

        dash.refresh(&Client::new(), &url).await;

        let page = dash.page();
        assert_eq!(
            page.status,
            format!("Error: Failed to fetch {} (404)", url)
        );
        assert!(page.body.is_empty());
        assert!(dash.grid().is_none());

        let html = dash.render_html("Picks");
        assert!(!html.contains("<tbody><tr"));
        assert!(html.contains("Error: Failed to fetch"));
    }

    #[tokio::test]
    async fn missing_csv_names_the_configured_path() {
        init_test_logging();
        let addr = serve_sequence().await;
        let mut dash = Dashboard::default().with_csv_path("data/nope.csv");

        dash.refresh(&Client::new(), &csv_url(addr, "data/nope.csv")).await;

        assert_eq!(dash.page().status, "Error: Failed to fetch data/nope.csv (404)");
        assert!(dash.page().body.is_empty());
    }

    #[tokio::test]
    async fn ragged_rows_warn_but_still_build() {
        init_test_logging();
        let addr = serve_sequence().await;
        let mut dash = Dashboard::default();

        dash.refresh(&Client::new(), &csv_url(addr, "data/ragged.csv")).await;

        let page = dash.page();
        assert!(page.status.starts_with("Loaded 3 games"), "{}", page.status);
        assert!(!page.status.starts_with("Error:"));
        assert_eq!(page.body.len(), 3);

        let rows: Vec<_> = page
            .body
            .iter()
            .map(|r| (r.cells[0].as_str(), r.cells[2].as_str(), r.class))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("Suns", "2.50%", RowClass::Good),
                ("Knicks", "-3.00%", RowClass::Bad),
                ("Lakers", "", RowClass::None),
            ]
        );
    }

    #[tokio::test]
    async fn writes_page_to_disk() {
        let addr = serve_sequence().await;
        let dir = tempdir().unwrap();
        let out = dir.path().join("site").join("index.html");
        let mut dash = Dashboard::new(2);

        dash.refresh(&Client::new(), &csv_url(addr, "data/latest.csv")).await;
        dash.write_html(&out, "NBA Picks").unwrap();

        let html = fs::read_to_string(&out).unwrap();
        assert!(html.contains("<title>NBA Picks</title>"));
        assert!(html.contains(r#"<tr class="edge-great">"#));
        assert!(html.contains(r#""pageLength":2"#));
        assert_eq!(dash.grid().map(Grid::page_count), Some(2));
    }
}
