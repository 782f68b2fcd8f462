use spotify_history_core::{
    Artist,
    PlayedAt,
    Track,
};
use time::macros::{
    datetime,
    offset,
};

use super::*;

fn image(size: u32) -> Image {
    Image {
        url: format!("https://i.scdn.co/image/{size}"),
        width: Some(size),
        height: Some(size),
    }
}

fn play(played_at: &str, name: &str, images: Vec<Image>) -> PlayRecord {
    PlayRecord {
        played_at: PlayedAt::parse(played_at).expect("Invalid timestamp"),
        track: Track {
            id: name.to_lowercase(),
            name: name.to_owned(),
            uri: format!("spotify:track:{name}"),
            external_url: Some(format!("https://open.spotify.com/track/{name}")),
            duration_ms: 200_000,
            artists: vec![
                Artist {
                    id: "1".to_owned(),
                    name: "Simon".to_owned(),
                    uri: "spotify:artist:1".to_owned(),
                    external_url: None,
                },
                Artist {
                    id: "2".to_owned(),
                    name: "Garfunkel".to_owned(),
                    uri: "spotify:artist:2".to_owned(),
                    external_url: None,
                },
            ],
            album: Album {
                id: "album".to_owned(),
                name: "Album".to_owned(),
                uri: "spotify:album:album".to_owned(),
                external_url: None,
                images,
            },
        },
        context: None,
    }
}

#[test]
fn test_group_same_day() {
    let records = vec![
        play("2024-01-05T21:00:00Z", "Later", Vec::new()),
        play("2024-01-05T08:30:00Z", "Earlier", Vec::new()),
        play("2024-01-04T23:00:00Z", "Yesterday", Vec::new()),
    ];
    let groups = group_by_day(&records, utc).unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].label, "Jan 5, 2024");
    let names: Vec<_> = groups[0].plays.iter().map(|p| p.record.track.name.as_str()).collect();
    assert_eq!(names, ["Later", "Earlier"]);
    assert_eq!(groups[0].plays[1].time_of_day, "08:30 AM");
    assert_eq!(groups[1].label, "Jan 4, 2024");
}

#[test]
fn test_group_uses_local_offset() {
    let records = vec![play("2024-01-05T02:00:00Z", "Late Night", Vec::new())];
    let groups = group_by_day(&records, |_| offset!(-5)).unwrap();

    assert_eq!(groups[0].label, "Jan 4, 2024");
    assert_eq!(groups[0].plays[0].time_of_day, "09:00 PM");
}

/// America/New_York for 2024
fn new_york(at: OffsetDateTime) -> UtcOffset {
    let dst = datetime!(2024-03-10 07:00 UTC)..datetime!(2024-11-03 06:00 UTC);
    if dst.contains(&at) { offset!(-4) } else { offset!(-5) }
}

#[test]
fn test_group_offset_per_play_across_dst() {
    let records = vec![
        play("2024-07-05T03:30:00Z", "Summer", Vec::new()),
        play("2024-03-10T07:30:00Z", "After Change", Vec::new()),
        play("2024-03-10T06:30:00Z", "Before Change", Vec::new()),
        play("2024-01-05T04:30:00Z", "Winter", Vec::new()),
    ];
    let groups = group_by_day(&records, new_york).unwrap();

    let labels: Vec<_> = groups.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels, ["Jul 4, 2024", "Mar 10, 2024", "Jan 4, 2024"]);

    assert_eq!(groups[0].plays[0].time_of_day, "11:30 PM");
    assert_eq!(groups[1].plays[0].time_of_day, "03:30 AM");
    assert_eq!(groups[1].plays[1].time_of_day, "01:30 AM");
    assert_eq!(groups[2].plays[0].time_of_day, "11:30 PM");
}

#[test]
fn test_group_first_encounter_order() {
    let records = vec![
        play("2024-01-05T10:00:00Z", "A", Vec::new()),
        play("2024-01-04T10:00:00Z", "B", Vec::new()),
        play("2024-01-05T09:00:00Z", "C", Vec::new()),
    ];
    let groups = group_by_day(&records, utc).unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].plays.len(), 2);
    assert_eq!(groups[0].plays[1].record.track.name, "C");
}

#[test]
fn test_thumbnail_smallest() {
    let album = play("2024-01-05T10:00:00Z", "A", vec![image(640), image(300), image(64)]).track.album;
    assert_eq!(thumbnail(&album).map(|i| i.url.as_str()), Some("https://i.scdn.co/image/64"));
}

#[test]
fn test_thumbnail_fallbacks() {
    let mut missing_small = vec![image(640), image(300), image(64)];
    missing_small[2].url.clear();
    let album = play("2024-01-05T10:00:00Z", "A", missing_small).track.album;
    assert_eq!(thumbnail(&album).map(|i| i.url.as_str()), Some("https://i.scdn.co/image/300"));

    let unsized_images = vec![
        Image {
            url: "https://i.scdn.co/image/big".to_owned(),
            width: None,
            height: None,
        },
        Image {
            url: "https://i.scdn.co/image/small".to_owned(),
            width: None,
            height: None,
        },
    ];
    let album = play("2024-01-05T10:00:00Z", "A", unsized_images).track.album;
    assert_eq!(thumbnail(&album).map(|i| i.url.as_str()), Some("https://i.scdn.co/image/small"));

    let album = play("2024-01-05T10:00:00Z", "A", Vec::new()).track.album;
    assert!(thumbnail(&album).is_none());
}

#[test]
fn test_render_page() {
    let records = vec![
        play("2024-01-05T21:00:00Z", "Cecilia", vec![image(640), image(300), image(64)]),
        play("2024-01-05T20:00:00Z", "Boxer", Vec::new()),
    ];
    let html = render_page(&records, DEFAULT_LIMIT, utc).unwrap();

    assert!(html.starts_with("<!doctype html>\n"));
    assert!(html.contains("<style>"));
    assert!(!html.contains("<script"));
    assert!(html.contains("<small>2 recent plays</small>"));
    assert_eq!(html.matches(r#"<details class="group" open>"#).count(), 1);
    assert!(html.contains("Jan 5, 2024 <small>(2)</small>"));
    assert!(html.contains(r#"<img class="thumb" src="https://i.scdn.co/image/64" alt="">"#));
    assert!(html.contains(r#"<span class="thumb placeholder"></span>"#));
    assert!(html.contains(r#"<span class="artist">Simon, Garfunkel</span>"#));
    assert!(html.contains(r#"<time class="time" datetime="2024-01-05T21:00:00Z">09:00 PM</time>"#));
    assert!(html.find("Cecilia").unwrap() < html.find("Boxer").unwrap());
    assert!(html.ends_with("</html>\n"));
}

#[test]
fn test_render_link_placeholder_and_escaping() {
    let mut record = play("2024-01-05T21:00:00Z", "Rock & <Roll>", Vec::new());
    record.track.external_url = None;
    let html = render_page(&[record], DEFAULT_LIMIT, utc).unwrap();

    assert!(html.contains(r##"<a class="row" href="#" target="_blank" rel="noopener">"##));
    assert!(html.contains("Rock &amp; &lt;Roll&gt;"));
}

#[test]
fn test_render_limit() {
    let records: Vec<_> = (0..5)
        .map(|i| play(&format!("2024-01-05T1{i}:00:00Z"), &format!("T{i}"), Vec::new()))
        .collect();
    let html = render_page(&records, 3, utc).unwrap();

    assert!(html.contains("<small>3 recent plays</small>"));
    assert!(html.contains(">T2<"));
    assert!(!html.contains(">T3<"));
}

#[test]
fn test_render_empty() {
    let html = render_page(&[], DEFAULT_LIMIT, utc).unwrap();
    assert!(html.contains("<small>0 recent plays</small>"));
    assert!(!html.contains("<details"));
}
