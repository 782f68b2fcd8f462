use std::path::PathBuf;

use clap::{
    builder::TypedValueParser,
    Args as ClapArgs,
    Parser,
    Subcommand,
};
use spotify_history_services::{
    page,
    service::{
        Endpoints,
        RECENTLY_PLAYED_URL,
        TOKEN_URL,
    },
    Credentials,
    RenderConfig,
    Result,
    UpdateConfig,
    DEFAULT_HISTORY_PATH,
    DEFAULT_LATEST_PATH,
    DEFAULT_MAX_PAGES,
    DEFAULT_OUTPUT_PATH,
};
use time::{
    OffsetDateTime,
    UtcOffset,
};

/// Collect recently played tracks from Spotify into a json history, and render it as a static page
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Args {
    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Fetch new plays and merge them into the history
    Update(UpdateArgs),
    /// Render the history as a static html page
    Render(RenderArgs),
}

#[derive(ClapArgs, Debug)]
pub(crate) struct UpdateArgs {
    /// Spotify app client id
    #[arg(long, env = "SPOTIFY_CLIENT_ID", hide_env_values = true)]
    pub client_id: Option<String>,

    /// Spotify app client secret
    #[arg(long, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Refresh token with the user-read-recently-played scope
    #[arg(long, env = "SPOTIFY_REFRESH_TOKEN", hide_env_values = true)]
    pub refresh_token: Option<String>,

    /// Full listening history, newest first
    #[arg(long, env = "DATA_PATH", default_value = DEFAULT_HISTORY_PATH)]
    pub data_path: PathBuf,

    /// The newest plays of the history
    #[arg(long, env = "LATEST_PATH", default_value = DEFAULT_LATEST_PATH)]
    pub latest_path: PathBuf,

    /// Stop paging after this many requests to the recently-played endpoint
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES, value_parser = clap::value_parser!(u16).range(1..).map(usize::from))]
    pub max_pages: usize,

    /// Token endpoint
    #[arg(long, default_value = TOKEN_URL, hide = true)]
    pub token_url: String,

    /// Recently-played endpoint
    #[arg(long, default_value = RECENTLY_PLAYED_URL, hide = true)]
    pub api_url: String,
}

impl UpdateArgs {
    /// # Errors
    ///
    /// Fails if any of the credentials are missing
    pub fn into_config(self) -> Result<UpdateConfig> {
        let credentials = Credentials::new(self.client_id, self.client_secret, self.refresh_token)?;
        Ok(UpdateConfig {
            credentials,
            history_path: self.data_path,
            latest_path: self.latest_path,
            max_pages: self.max_pages,
            endpoints: Endpoints {
                token_url: self.token_url,
                recently_played_url: self.api_url,
            },
        })
    }
}

#[derive(ClapArgs, Debug)]
pub(crate) struct RenderArgs {
    /// History to render; either the full history or the latest file
    #[arg(long, env = "DATA_PATH", default_value = DEFAULT_HISTORY_PATH)]
    pub input: PathBuf,

    /// Where to write the page
    #[arg(short, long, env = "OUTPUT", default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Most plays to render
    #[arg(long, default_value_t = page::DEFAULT_LIMIT)]
    pub limit: usize,

    /// Render in UTC instead of the local timezone
    #[arg(long)]
    pub utc: bool,
}

impl RenderArgs {
    pub fn into_config(self) -> RenderConfig {
        let offset_at: fn(OffsetDateTime) -> UtcOffset = if self.utc {
            page::utc
        } else {
            if let Err(e) = UtcOffset::current_local_offset() {
                log::warn!("Could not determine local offset, using UTC: {e}");
            }
            local_offset_at
        };
        RenderConfig {
            input: self.input,
            output: self.output,
            limit: self.limit,
            offset_at,
        }
    }
}

/// Local offset in effect at `at`, so plays on either side of a daylight saving change each get their own
fn local_offset_at(at: OffsetDateTime) -> UtcOffset { UtcOffset::local_offset_at(at).unwrap_or(UtcOffset::UTC) }
