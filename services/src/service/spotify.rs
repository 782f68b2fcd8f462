use log::{
    debug,
    info,
    warn,
};
use spotify_history_core::PlayRecord;

use crate::{
    http::{
        HttpTransport,
        Method,
        Request,
        Transport,
    },
    Credentials,
    Error,
    Result,
};

mod api;
pub use api::AccessToken;
use api::RecentlyPlayed;

pub const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const RECENTLY_PLAYED_URL: &str = "https://api.spotify.com/v1/me/player/recently-played";

/// Largest page the recently-played endpoint hands out; anything shorter is the end of the data
pub const PAGE_SIZE: usize = 50;


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub token_url: String,
    pub recently_played_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            token_url: TOKEN_URL.to_owned(),
            recently_played_url: RECENTLY_PLAYED_URL.to_owned(),
        }
    }
}

pub struct SpotifyClient<T = HttpTransport> {
    transport: T,
    endpoints: Endpoints,
}

impl SpotifyClient {
    pub fn new() -> Result<Self> { Ok(Self::with_transport(HttpTransport::new()?, Endpoints::default())) }
}

impl<T: Transport> SpotifyClient<T> {
    pub fn with_transport(transport: T, endpoints: Endpoints) -> Self { Self { transport, endpoints } }

    #[inline]
    pub fn transport(&self) -> &T { &self.transport }

    /// Trades the refresh token for a short lived access token
    ///
    /// # Errors
    ///
    /// [`Error::TokenExchange`] on any non-2xx status. Nothing is retried.
    pub fn access_token(&self, credentials: &Credentials) -> Result<AccessToken> {
        let resp = self.transport.send(&Request {
            method: Method::Post,
            url: self.endpoints.token_url.clone(),
            authorization: credentials.basic_authorization(),
            query: Vec::new(),
            form: vec![
                ("grant_type", "refresh_token".to_owned()),
                ("refresh_token", credentials.refresh_token().to_owned()),
            ],
        })?;

        if !resp.is_success() {
            return Err(Error::TokenExchange {
                status: resp.status,
                body: resp.body,
            });
        }

        let token: AccessToken = serde_json::from_str(&resp.body)?;
        info!("Obtained access token, expires in {}s", token.expires_in);
        if token.refresh_token.is_some() {
            info!("Token endpoint rotated the refresh token; the configured one may stop working");
        }
        Ok(token)
    }

    /// Lazily pages through recently played tracks newer than `after` (epoch ms).
    ///
    /// At most `max_pages` requests are made. Dropping the iterator early stops paging.
    pub fn recent_plays<'c>(&'c self, access_token: &'c str, after: Option<i64>, max_pages: usize) -> RecentPlays<'c, T> {
        RecentPlays {
            client: self,
            access_token,
            after,
            pages_left: max_pages,
            done: false,
        }
    }

    /// Collects every page from [`Self::recent_plays`], failing as a whole if any page fails
    pub fn fetch_since(&self, access_token: &str, after: Option<i64>, max_pages: usize) -> Result<Vec<PlayRecord>> {
        let mut collected = Vec::new();
        for page in self.recent_plays(access_token, after, max_pages) {
            collected.extend(page?);
        }
        info!("Fetched {} recent plays", collected.len());
        Ok(collected)
    }

    fn recently_played_page(&self, access_token: &str, after: Option<i64>) -> Result<RecentlyPlayed> {
        let mut query = vec![("limit", PAGE_SIZE.to_string())];
        if let Some(after) = after {
            query.push(("after", after.to_string()));
        }
        debug!("GET {} after={after:?}", self.endpoints.recently_played_url);

        let resp = self.transport.send(&Request {
            method: Method::Get,
            url: self.endpoints.recently_played_url.clone(),
            authorization: format!("Bearer {access_token}"),
            query,
            form: Vec::new(),
        })?;

        if !resp.is_success() {
            return Err(Error::Fetch {
                status: resp.status,
                body: resp.body,
            });
        }
        Ok(serde_json::from_str(&resp.body)?)
    }
}

/// Iterator over pages of recently played tracks; see [`SpotifyClient::recent_plays`]
pub struct RecentPlays<'c, T> {
    client: &'c SpotifyClient<T>,
    access_token: &'c str,
    after: Option<i64>,
    pages_left: usize,
    done: bool,
}

impl<T> RecentPlays<'_, T> {
    /// Cursor the next request will be sent with
    #[inline]
    pub fn cursor(&self) -> Option<i64> { self.after }
}

impl<T: Transport> Iterator for RecentPlays<'_, T> {
    type Item = Result<Vec<PlayRecord>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.pages_left == 0 {
            warn!("Stopped after reaching the page limit; remaining plays are picked up on the next run");
            self.done = true;
            return None;
        }
        self.pages_left -= 1;

        let page = match self.client.recently_played_page(self.access_token, self.after) {
            Ok(page) => page,
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            },
        };

        if page.items.len() < PAGE_SIZE {
            self.done = true;
        } else if let Some(last) = page.items.last() {
            self.after = Some(last.played_at.unix_millis() + 1);
        }
        debug!("Page of {} plays, next cursor {:?}", page.items.len(), self.after);

        Some(Ok(page.items.into_iter().map(PlayRecord::from).collect()))
    }
}
