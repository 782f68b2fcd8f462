use serde::{
    Deserialize,
    Serialize,
};
use time::{
    format_description::well_known::Rfc3339,
    OffsetDateTime,
};

/// One listening event as persisted in the history file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayRecord {
    pub played_at: PlayedAt,
    pub track: Track,
    #[serde(default)]
    pub context: Option<PlayContext>,
}

impl PlayRecord {
    /// Identity of a play; no two records in a history share one
    pub fn key(&self) -> PlayKey {
        PlayKey {
            played_at: self.played_at.as_str().to_owned(),
            track_id: self.track.id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayKey {
    pub played_at: String,
    pub track_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    pub duration_ms: u64,
    #[serde(default)]
    pub artists: Vec<Artist>,
    pub album: Album,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Image {
    #[inline]
    pub fn area(&self) -> Option<u64> { Some(u64::from(self.width?) * u64::from(self.height?)) }
}

/// Where playback was started from, eg. a playlist or album
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayContext {
    #[serde(rename = "type")]
    pub kind: String,
    pub uri: String,
}

/// RFC 3339 play time that remembers the exact text it was read from.
///
/// The text is what gets written back out and what [`PlayKey`] is built from, so a record
/// round-trips through the history file unchanged. Ordering should go through [`PlayedAt::time`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayedAt {
    raw: String,
    time: OffsetDateTime,
}

impl PlayedAt {
    pub fn parse(raw: impl Into<String>) -> Result<Self, time::error::Parse> {
        let raw = raw.into();
        let time = OffsetDateTime::parse(&raw, &Rfc3339)?;
        Ok(Self { raw, time })
    }

    #[inline]
    pub fn as_str(&self) -> &str { self.raw.as_str() }

    #[inline]
    pub fn time(&self) -> OffsetDateTime { self.time }

    /// Milliseconds since the unix epoch, truncating anything finer
    #[inline]
    pub fn unix_millis(&self) -> i64 { (self.time.unix_timestamp_nanos() / 1_000_000) as i64 }
}

impl TryFrom<String> for PlayedAt {
    type Error = time::error::Parse;

    fn try_from(value: String) -> Result<Self, Self::Error> { Self::parse(value) }
}

impl From<PlayedAt> for String {
    fn from(value: PlayedAt) -> Self { value.raw }
}

impl std::fmt::Display for PlayedAt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(&self.raw) }
}


#[cfg(test)]
mod tests;
