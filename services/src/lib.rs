use std::{
    fmt,
    fs,
};

use log::info;
pub use spotify_history_core::*;

mod config;
mod de;
mod error;
pub mod http;
pub mod page;
pub mod service;
pub mod store;

pub use config::*;
pub use error::{
    Error,
    PersistenceSource,
    Result,
};
use http::Transport;
use service::SpotifyClient;
use store::MergeOutcome;


/// Summary of one update run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateReport {
    pub added: usize,
    pub total: usize,
}

impl fmt::Display for UpdateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Added {} new plays. Total: {}.", self.added, self.total)
    }
}

impl From<&MergeOutcome> for UpdateReport {
    fn from(val: &MergeOutcome) -> Self {
        Self {
            added: val.added,
            total: val.total(),
        }
    }
}

/// Fetches plays newer than anything in `existing` and merges them in.
///
/// Touches no files; see [`run_update`] for the version that reads and writes the history.
pub fn update_history<T: Transport>(
    client: &SpotifyClient<T>,
    credentials: &Credentials,
    existing: Vec<PlayRecord>,
    max_pages: usize,
) -> Result<MergeOutcome> {
    let after = store::cursor(&existing);
    let token = client.access_token(credentials)?;
    let fresh = client.fetch_since(&token.access_token, after, max_pages)?;
    let outcome = store::merge(existing, fresh);
    info!("Merged {} new plays into history of {}", outcome.added, outcome.total());
    Ok(outcome)
}

/// Loads the history, fetches and merges new plays, then rewrites the history and latest files.
///
/// # Errors
///
/// Any failure before the write leaves both files as they were.
pub fn run_update<T: Transport>(config: &UpdateConfig, transport: T) -> Result<UpdateReport> {
    let existing = store::load_history(&config.history_path)?;
    let client = SpotifyClient::with_transport(transport, config.endpoints.clone());
    let outcome = update_history(&client, &config.credentials, existing, config.max_pages)?;
    store::save_history(&config.history_path, &config.latest_path, &outcome.history)?;
    Ok(UpdateReport::from(&outcome))
}

/// Renders the history at `config.input` into `config.output`, returning how many plays were rendered
pub fn run_render(config: &RenderConfig) -> Result<usize> {
    let records = store::read_history(&config.input)?;
    let html = page::render_page(&records, config.limit, config.offset_at)?;

    if let Some(dir) = config.output.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| Error::persistence(dir, e))?;
    }
    fs::write(&config.output, html).map_err(|e| Error::persistence(&config.output, e))?;

    let rendered = records.len().min(config.limit);
    info!("Rendered {rendered} plays to {}", config.output.display());
    Ok(rendered)
}
