use super::*;

const SAMPLE: &str = r#"{
  "played_at": "2024-01-05T21:14:03.512Z",
  "track": {
    "id": "6BUMVGOnIeOIE6YetJGGDT",
    "name": "Burn Brighter",
    "uri": "spotify:track:6BUMVGOnIeOIE6YetJGGDT",
    "external_url": "https://open.spotify.com/track/6BUMVGOnIeOIE6YetJGGDT",
    "duration_ms": 215466,
    "artists": [
      {
        "id": "2tGnqzTQ6AN8yIlmkzmwyn",
        "name": "Lansdowne",
        "uri": "spotify:artist:2tGnqzTQ6AN8yIlmkzmwyn",
        "external_url": "https://open.spotify.com/artist/2tGnqzTQ6AN8yIlmkzmwyn"
      }
    ],
    "album": {
      "id": "1wB7mBVE6bxt1jYOa2XeRB",
      "name": "No Home but the Road",
      "uri": "spotify:album:1wB7mBVE6bxt1jYOa2XeRB",
      "images": [
        {
          "url": "https://i.scdn.co/image/large",
          "width": 640,
          "height": 640
        }
      ]
    }
  },
  "context": null
}"#;

#[test]
fn test_de() {
    let record: PlayRecord = serde_json::from_str(SAMPLE).expect("Failed to parse record");

    assert_eq!(record.played_at.as_str(), "2024-01-05T21:14:03.512Z");
    assert_eq!(record.played_at.unix_millis(), 1_704_489_243_512);
    assert_eq!(record.track.name, "Burn Brighter");
    assert_eq!(record.track.artists.len(), 1);
    assert_eq!(record.track.album.external_url, None);
    assert_eq!(record.track.album.images[0].area(), Some(640 * 640));
    assert_eq!(record.context, None);
}

#[test]
fn test_ser_matches_input() {
    let record: PlayRecord = serde_json::from_str(SAMPLE).expect("Failed to parse record");
    let out = serde_json::to_string_pretty(&record).expect("Failed to serialize record");
    assert_eq!(out, SAMPLE);
}

#[test]
fn test_invalid_played_at() {
    let bad = SAMPLE.replace("2024-01-05T21:14:03.512Z", "yesterday");
    assert!(serde_json::from_str::<PlayRecord>(&bad).is_err());
}

#[test]
fn test_key_uses_raw_text() {
    let record: PlayRecord = serde_json::from_str(SAMPLE).expect("Failed to parse record");
    assert_eq!(record.key(), PlayKey {
        played_at: "2024-01-05T21:14:03.512Z".to_owned(),
        track_id: "6BUMVGOnIeOIE6YetJGGDT".to_owned(),
    });
}

#[test]
fn test_context_type_rename() {
    let ctx: PlayContext =
        serde_json::from_str(r#"{"type": "playlist", "uri": "spotify:playlist:37i9dQZF1DXcBWIGoYBM5M"}"#).expect("Failed to parse context");
    assert_eq!(ctx.kind, "playlist");
}

#[test]
fn test_area_needs_both_dimensions() {
    let img = Image {
        url: "https://i.scdn.co/image/x".to_owned(),
        width: Some(64),
        height: None,
    };
    assert_eq!(img.area(), None);
}
