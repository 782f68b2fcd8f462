use std::{
    fmt,
    path::PathBuf,
};

use base64::{
    engine::general_purpose,
    Engine as _,
};
use time::{
    OffsetDateTime,
    UtcOffset,
};

use crate::{
    page,
    service::Endpoints,
    Error,
    Result,
};

pub const DEFAULT_HISTORY_PATH: &str = "data/listening-history.json";
pub const DEFAULT_LATEST_PATH: &str = "data/latest.json";
pub const DEFAULT_OUTPUT_PATH: &str = "spotify-history.html";
pub const DEFAULT_MAX_PAGES: usize = 20;


/// Client credentials plus the long lived refresh token obtained through the authorization flow
#[derive(Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
    refresh_token: String,
}

impl Credentials {
    /// # Errors
    ///
    /// [`Error::Config`] naming the first value that is missing or empty.
    pub fn new(client_id: Option<String>, client_secret: Option<String>, refresh_token: Option<String>) -> Result<Self> {
        fn required(value: Option<String>, name: &str) -> Result<String> {
            value
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| Error::Config(format!("missing {name}")))
        }

        Ok(Self {
            client_id: required(client_id, "client id")?,
            client_secret: required(client_secret, "client secret")?,
            refresh_token: required(refresh_token, "refresh token")?,
        })
    }

    #[inline]
    pub fn refresh_token(&self) -> &str { self.refresh_token.as_str() }

    pub(crate) fn basic_authorization(&self) -> String {
        let pair = format!("{}:{}", self.client_id, self.client_secret);
        format!("Basic {}", general_purpose::STANDARD.encode(pair))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// Inputs for [`crate::run_update`]
#[derive(Debug, Clone)]
pub struct UpdateConfig {
    pub credentials: Credentials,
    pub history_path: PathBuf,
    pub latest_path: PathBuf,
    pub max_pages: usize,
    pub endpoints: Endpoints,
}

impl UpdateConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            history_path: DEFAULT_HISTORY_PATH.into(),
            latest_path: DEFAULT_LATEST_PATH.into(),
            max_pages: DEFAULT_MAX_PAGES,
            endpoints: Endpoints::default(),
        }
    }
}

/// Inputs for [`crate::run_render`]
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub limit: usize,
    /// Offset in effect at a given instant, used for day grouping and times of day
    pub offset_at: fn(OffsetDateTime) -> UtcOffset,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            input: DEFAULT_HISTORY_PATH.into(),
            output: DEFAULT_OUTPUT_PATH.into(),
            limit: page::DEFAULT_LIMIT,
            offset_at: page::utc,
        }
    }
}
