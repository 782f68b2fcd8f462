//! Payloads as returned by the Spotify web api, reduced to what the history keeps

use serde::Deserialize;
use spotify_history_core::{
    Album,
    Artist,
    Image,
    PlayContext,
    PlayRecord,
    PlayedAt,
    Track,
};

use crate::de::null_as_default;

#[derive(Debug, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: u64,
    #[serde(default)]
    pub scope: Option<String>,
    /// Only present when the token endpoint rotates the refresh token
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RecentlyPlayed {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<PlayHistory>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PlayHistory {
    pub played_at: PlayedAt,
    pub track: TrackObject,
    #[serde(default)]
    context: Option<ContextObject>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ExternalUrls {
    spotify: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct TrackObject {
    #[serde(deserialize_with = "null_as_default")]
    id: String,
    #[serde(deserialize_with = "null_as_default")]
    name: String,
    #[serde(deserialize_with = "null_as_default")]
    uri: String,
    #[serde(deserialize_with = "null_as_default")]
    external_urls: ExternalUrls,
    #[serde(deserialize_with = "null_as_default")]
    duration_ms: u64,
    #[serde(deserialize_with = "null_as_default")]
    artists: Vec<ArtistObject>,
    #[serde(deserialize_with = "null_as_default")]
    album: AlbumObject,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct ArtistObject {
    #[serde(deserialize_with = "null_as_default")]
    id: String,
    #[serde(deserialize_with = "null_as_default")]
    name: String,
    #[serde(deserialize_with = "null_as_default")]
    uri: String,
    #[serde(deserialize_with = "null_as_default")]
    external_urls: ExternalUrls,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct AlbumObject {
    #[serde(deserialize_with = "null_as_default")]
    id: String,
    #[serde(deserialize_with = "null_as_default")]
    name: String,
    #[serde(deserialize_with = "null_as_default")]
    uri: String,
    #[serde(deserialize_with = "null_as_default")]
    external_urls: ExternalUrls,
    #[serde(deserialize_with = "null_as_default")]
    images: Vec<ImageObject>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ImageObject {
    #[serde(default, deserialize_with = "null_as_default")]
    url: String,
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ContextObject {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    uri: String,
}


impl From<PlayHistory> for PlayRecord {
    fn from(val: PlayHistory) -> Self {
        Self {
            played_at: val.played_at,
            track: val.track.into(),
            context: val.context.map(|c| PlayContext { kind: c.kind, uri: c.uri }),
        }
    }
}

impl From<TrackObject> for Track {
    fn from(val: TrackObject) -> Self {
        Self {
            id: val.id,
            name: val.name,
            uri: val.uri,
            external_url: val.external_urls.spotify,
            duration_ms: val.duration_ms,
            artists: val.artists.into_iter().map(Artist::from).collect(),
            album: val.album.into(),
        }
    }
}

impl From<ArtistObject> for Artist {
    fn from(val: ArtistObject) -> Self {
        Self {
            id: val.id,
            name: val.name,
            uri: val.uri,
            external_url: val.external_urls.spotify,
        }
    }
}

impl From<AlbumObject> for Album {
    fn from(val: AlbumObject) -> Self {
        Self {
            id: val.id,
            name: val.name,
            uri: val.uri,
            external_url: val.external_urls.spotify,
            images: val
                .images
                .into_iter()
                .map(|i| Image {
                    url: i.url,
                    width: i.width,
                    height: i.height,
                })
                .collect(),
        }
    }
}
