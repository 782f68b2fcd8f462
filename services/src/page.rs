use std::{
    cmp::Reverse,
    collections::HashMap,
    fmt::{
        self,
        Display,
    },
};

use spotify_history_core::{
    Album,
    Image,
    PlayRecord,
};
use time::{
    format_description::FormatItem,
    macros::format_description,
    OffsetDateTime,
    UtcOffset,
};

use crate::Result;

/// Most plays rendered on one page
pub const DEFAULT_LIMIT: usize = 100;

const TITLE: &str = "My Spotify Listening History";
const DATE_FMT: &[FormatItem] = format_description!("[month repr:short] [day padding:none], [year]");
const TIME_FMT: &[FormatItem] = format_description!("[hour repr:12]:[minute] [period]");

const CSS: &str = r#"
:root { color-scheme: light dark; }
* { box-sizing: border-box; }
body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Ubuntu, Cantarell, Noto Sans, sans-serif; margin: 1.5rem; }
header { display: flex; justify-content: center; align-items: baseline; gap: .75rem; }
h1 { margin: 0; font-size: 1.1rem; }
#content { max-width: 640px; margin: 1.25rem auto 2rem; }
.group { margin-top: 1rem; }
.group summary { cursor: pointer; font-weight: 600; margin-bottom: .25rem; }
.group summary small, .artist, .time { color: #6b7280; font-weight: 400; }
.list { list-style: none; margin: 0; padding: 0; display: flex; flex-direction: column; gap: 6px; }
.row { display: flex; align-items: center; gap: 10px; text-decoration: none; }
.thumb { width: 36px; height: 36px; border-radius: 6px; object-fit: cover; flex: none; background: #e5e7eb; }
.line { overflow: hidden; white-space: nowrap; text-overflow: ellipsis; }
.title { font-weight: 600; }
a { color: inherit; text-decoration-thickness: 2px; }
"#;


/// Plays sharing a local calendar day, in input order
#[derive(Debug)]
pub struct DayGroup<'r> {
    pub label: String,
    pub plays: Vec<PlayEntry<'r>>,
}

/// A play with its local time of day already formatted
#[derive(Debug)]
pub struct PlayEntry<'r> {
    pub record: &'r PlayRecord,
    pub time_of_day: String,
}

/// Offset for every instant; for rendering in UTC
#[inline]
pub fn utc(_: OffsetDateTime) -> UtcOffset { UtcOffset::UTC }

/// Buckets `records` by local date; buckets appear in the order their first play is seen.
///
/// `offset_at` is asked for each play separately so plays on either side of a DST change land on their own
/// local day and hour.
pub fn group_by_day(records: &[PlayRecord], offset_at: impl Fn(OffsetDateTime) -> UtcOffset) -> Result<Vec<DayGroup<'_>>> {
    let mut groups: Vec<DayGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let at = record.played_at.time();
        let local = at.to_offset(offset_at(at));
        let label = local.format(DATE_FMT)?;
        let entry = PlayEntry {
            record,
            time_of_day: local.format(TIME_FMT)?,
        };

        match index.get(&label) {
            Some(&i) => groups[i].plays.push(entry),
            None => {
                index.insert(label.clone(), groups.len());
                groups.push(DayGroup {
                    label,
                    plays: vec![entry],
                });
            },
        }
    }
    Ok(groups)
}

/// Smallest image with a url; variants without dimensions lose to sized ones and prefer the later entry,
/// matching Spotify's largest-first ordering
pub fn thumbnail(album: &Album) -> Option<&Image> {
    album
        .images
        .iter()
        .enumerate()
        .filter(|(_, img)| !img.url.is_empty())
        .min_by_key(|&(i, img)| (img.area().unwrap_or(u64::MAX), Reverse(i)))
        .map(|(_, img)| img)
}

/// Renders at most `limit` plays from the front of `records` as a standalone html document
pub fn render_page(records: &[PlayRecord], limit: usize, offset_at: impl Fn(OffsetDateTime) -> UtcOffset) -> Result<String> {
    let records = &records[..records.len().min(limit)];
    let page = Page {
        total: records.len(),
        groups: group_by_day(records, offset_at)?,
    };
    Ok(page.to_string())
}


struct Page<'r> {
    total: usize,
    groups: Vec<DayGroup<'r>>,
}

impl Display for Page<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<!doctype html>")?;
        writeln!(f, r#"<html lang="en">"#)?;
        writeln!(f, "<head>")?;
        writeln!(f, r#"  <meta charset="utf-8">"#)?;
        writeln!(f, r#"  <meta name="viewport" content="width=device-width,initial-scale=1">"#)?;
        writeln!(f, "  <title>{TITLE}</title>")?;
        writeln!(f, "  <style>{CSS}</style>")?;
        writeln!(f, "</head>")?;
        writeln!(f, "<body>")?;
        writeln!(f, "  <header>")?;
        writeln!(f, "    <h1>{TITLE}</h1>")?;
        writeln!(f, "    <small>{} recent plays</small>", self.total)?;
        writeln!(f, "  </header>")?;
        writeln!(f, r#"  <div id="content">"#)?;

        for group in &self.groups {
            writeln!(
                f,
                r#"<details class="group" open><summary>{} <small>({})</small></summary><ul class="list">"#,
                Escaped(&group.label),
                group.plays.len()
            )?;
            for entry in &group.plays {
                write_play(f, entry)?;
            }
            writeln!(f, "</ul></details>")?;
        }

        writeln!(f, "  </div>")?;
        writeln!(f, "</body>")?;
        writeln!(f, "</html>")
    }
}

fn write_play(f: &mut fmt::Formatter<'_>, entry: &PlayEntry) -> fmt::Result {
    let track = &entry.record.track;
    let href = track.external_url.as_deref().unwrap_or("#");
    let artists = track.artists.iter().map(|a| a.name.as_str()).collect::<Vec<_>>().join(", ");

    write!(f, r#"<li><a class="row" href="{}" target="_blank" rel="noopener">"#, Escaped(href))?;
    match thumbnail(&track.album) {
        Some(img) => write!(f, r#"<img class="thumb" src="{}" alt="">"#, Escaped(&img.url))?,
        None => write!(f, r#"<span class="thumb placeholder"></span>"#)?,
    }
    writeln!(
        f,
        r#"<div class="line"><span class="title">{}</span> · <span class="artist">{}</span> · <time class="time" datetime="{}">{}</time></div></a></li>"#,
        Escaped(&track.name),
        Escaped(&artists),
        Escaped(entry.record.played_at.as_str()),
        entry.time_of_day
    )
}

/// Html escapes text for element content and quoted attributes
struct Escaped<'a>(&'a str);

impl Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut last = 0;
        for (i, c) in self.0.char_indices() {
            let rep = match c {
                '&' => "&amp;",
                '<' => "&lt;",
                '>' => "&gt;",
                '"' => "&quot;",
                '\'' => "&#39;",
                _ => continue,
            };
            f.write_str(&self.0[last..i])?;
            f.write_str(rep)?;
            last = i + 1;
        }
        f.write_str(&self.0[last..])
    }
}


#[cfg(test)]
mod tests;
