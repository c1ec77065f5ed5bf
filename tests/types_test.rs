use chrono::{Datelike, Timelike};
use juicewrld::time::FlexibleTime;
use juicewrld::types::*;
use serde_json::json;

#[test]
fn test_flexible_time_accepts_all_layouts() {
    let cases = [
        ("2019-12-08T03:04:05Z", (2019, 12, 8, 3, 4, 5), "2019-12-08T03:04:05Z"),
        ("2019-12-08T03:04:05+02:00", (2019, 12, 8, 3, 4, 5), "2019-12-08T03:04:05+02:00"),
        ("2019-12-08T03:04:05.123456+00:00", (2019, 12, 8, 3, 4, 5), "2019-12-08T03:04:05Z"),
        ("2019-12-08T03:04:05.123", (2019, 12, 8, 3, 4, 5), "2019-12-08T03:04:05Z"),
        ("2019-12-08T03:04:05", (2019, 12, 8, 3, 4, 5), "2019-12-08T03:04:05Z"),
        ("2019-12-08", (2019, 12, 8, 0, 0, 0), "2019-12-08T00:00:00Z"),
        ("2019-12-08 03:04:05", (2019, 12, 8, 3, 4, 5), "2019-12-08T03:04:05Z"),
    ];

    for (raw, (y, mo, d, h, mi, s), canonical) in cases {
        let parsed = FlexibleTime::parse(raw);
        let time = parsed.get().unwrap_or_else(|| panic!("{} should parse", raw));
        assert_eq!(
            (time.year(), time.month(), time.day(), time.hour(), time.minute(), time.second()),
            (y, mo, d, h, mi, s),
            "layout {}",
            raw
        );
        assert_eq!(parsed.to_rfc3339(), canonical, "layout {}", raw);
        assert_eq!(
            serde_json::to_string(&parsed).unwrap(),
            format!("\"{}\"", canonical),
            "layout {}",
            raw
        );
    }
}

#[test]
fn test_flexible_time_unset_values() {
    assert!(!FlexibleTime::parse("").is_set());
    assert!(!FlexibleTime::parse("null").is_set());
    assert!(!FlexibleTime::parse("\"\"").is_set());
    assert!(!FlexibleTime::parse("yesterday").is_set());
    assert!(!FlexibleTime::parse("12/08/2019").is_set());
}

#[test]
fn test_flexible_time_in_json() {
    #[derive(serde::Deserialize)]
    struct Holder {
        at: FlexibleTime,
    }

    let holder: Holder = serde_json::from_value(json!({ "at": "2021-05-01" })).unwrap();
    assert_eq!(holder.at.to_rfc3339(), "2021-05-01T00:00:00Z");

    let holder: Holder = serde_json::from_value(json!({ "at": null })).unwrap();
    assert!(!holder.at.is_set());

    let holder: Holder = serde_json::from_value(json!({ "at": 1620000000 })).unwrap();
    assert!(!holder.at.is_set());

    let holder: Holder = serde_json::from_value(json!({ "at": "not a date" })).unwrap();
    assert!(!holder.at.is_set());
}

#[test]
fn test_public_id_shapes() {
    let numeric: Song = serde_json::from_value(json!({ "id": 1, "public_id": 42 })).unwrap();
    assert_eq!(numeric.public_id, PublicId::Numeric(42.into()));
    assert_eq!(numeric.public_id.to_string(), "42");

    let text: Song = serde_json::from_value(json!({ "id": 2, "public_id": "abc-123" })).unwrap();
    assert_eq!(text.public_id, PublicId::Text("abc-123".to_string()));

    let huge: Song = serde_json::from_value(json!({ "id": 4, "public_id": 18446744073709551615u64 })).unwrap();
    assert_eq!(huge.public_id.to_string(), "18446744073709551615");

    let float: Song = serde_json::from_value(json!({ "id": 5, "name": "Rental", "public_id": 12.5 })).unwrap();
    assert_eq!(float.name, "Rental");
    assert_eq!(float.public_id.to_string(), "12.5");

    let absent: Song = serde_json::from_value(json!({ "id": 3 })).unwrap();
    assert!(absent.public_id.is_absent());
    assert_eq!(absent.public_id.to_string(), "");
}

#[test]
fn test_song_tolerates_nulls_and_missing_fields() {
    let song: Song = serde_json::from_value(json!({
        "id": 7,
        "name": "Lucid Dreams",
        "category": "released",
        "era": { "id": 3, "name": "GBGR", "description": null, "time_frame": "2017-2018" },
        "track_titles": ["Lucid Dreams", "Lucid Dreams (Forget Me)"],
        "producers": null,
        "notes": null,
        "length": "3:59"
    }))
    .unwrap();

    assert_eq!(song.id, 7);
    assert_eq!(song.name, "Lucid Dreams");
    assert_eq!(song.era.name, "GBGR");
    assert_eq!(song.era.description, "");
    assert_eq!(song.track_titles.len(), 2);
    assert_eq!(song.producers, "");
    assert_eq!(song.session_titles, "");

    let row = SongTableRow::from(&song);
    assert_eq!(row.era, "GBGR");
    assert_eq!(row.length, "3:59");
}

#[test]
fn test_album_type_field() {
    let album: Album = serde_json::from_value(json!({
        "id": 1,
        "title": "Death Race for Love",
        "type": "studio",
        "artist": null,
        "release_date": "2019-03-08"
    }))
    .unwrap();

    assert_eq!(album.kind, "studio");
    assert_eq!(album.artist, Artist::default());
    assert_eq!(album.release_date.to_rfc3339(), "2019-03-08T00:00:00Z");
}

#[test]
fn test_file_info_optional_fields() {
    let with_encoding: FileInfo = serde_json::from_value(json!({
        "name": "Rental.mp3",
        "type": "file",
        "size": 4194304,
        "size_human": "4.0 MB",
        "path": "Session Edits/Rental.mp3",
        "extension": ".mp3",
        "mime_type": "audio/mpeg",
        "created": "2023-01-02T10:00:00",
        "modified": "2023-01-03T11:30:00Z",
        "encoding": "utf-8"
    }))
    .unwrap();

    assert_eq!(with_encoding.encoding.as_deref(), Some("utf-8"));
    assert!(with_encoding.created.unwrap().is_set());
    assert!(!with_encoding.is_directory());

    let directory: FileInfo = serde_json::from_value(json!({
        "name": "Snippets",
        "type": "directory",
        "path": "Snippets",
        "created": null
    }))
    .unwrap();

    assert!(directory.is_directory());
    assert_eq!(directory.encoding, None);
    assert_eq!(directory.created, None);
    assert_eq!(directory.modified, None);

    let row = FileTableRow::from(&directory);
    assert_eq!(row.modified, "");
}

#[test]
fn test_directory_info_keeps_unknown_breadcrumb_keys() {
    let listing: DirectoryInfo = serde_json::from_value(json!({
        "current_path": "Compilation",
        "path_parts": [{ "name": "Compilation", "path": "Compilation", "depth": 1 }],
        "items": [],
        "total_files": 0,
        "total_directories": 2,
        "search_query": null,
        "is_recursive_search": false
    }))
    .unwrap();

    assert_eq!(listing.path_parts[0].name, "Compilation");
    assert_eq!(listing.path_parts[0].extra.get("depth"), Some(&json!(1)));
    assert_eq!(listing.total_directories, 2);
}

#[test]
fn test_open_map_display() {
    let map: OpenMap = serde_json::from_value(json!({
        "title": "Rental",
        "album": null,
        "id": 12,
        "progress": 0.5
    }))
    .unwrap();

    assert_eq!(map.display("title"), "Rental");
    assert_eq!(map.display("album"), "");
    assert_eq!(map.display("missing"), "");
    assert_eq!(map.display("id"), "12");
    assert_eq!(map.get_i64("id"), Some(12));
    assert_eq!(map.get_f64("progress"), Some(0.5));
}

#[test]
fn test_playback_status_wire_names() {
    let value = serde_json::to_value(PlaybackStatus::FileNotFoundButUrlProvided).unwrap();
    assert_eq!(value, json!("file_not_found_but_url_provided"));
    assert_eq!(PlaybackStatus::NoFileInfo.as_str(), "no_file_info");
}
