use std::path::{Path, PathBuf};

use juicewrld::storage::{temp_path, write_atomic};
use juicewrld::utils::*;

#[test]
fn test_page_for_offset() {
    // First page
    assert_eq!(page_for_offset(0, 20), 1);
    assert_eq!(page_for_offset(19, 20), 1);

    // Offsets on and past a page boundary
    assert_eq!(page_for_offset(20, 20), 2);
    assert_eq!(page_for_offset(20, 10), 3);
    assert_eq!(page_for_offset(95, 10), 10);

    // Zero limit never divides
    assert_eq!(page_for_offset(100, 0), 1);
}

#[test]
fn test_join_tags() {
    assert_eq!(join_tags::<&str>(&[]), None);
    assert_eq!(join_tags(&["leak"]), Some("leak".to_string()));
    assert_eq!(
        join_tags(&["leak".to_string(), "snippet".to_string(), "og file".to_string()]),
        Some("leak,snippet,og file".to_string())
    );
}

#[test]
fn test_extract_media_path() {
    let url = "https://juicewrldapi.com/media/Compilation/2. Unreleased Discography/Lean Wit Me.mp3";
    assert_eq!(
        extract_media_path(url),
        Some("Compilation/2. Unreleased Discography/Lean Wit Me.mp3")
    );

    // Only the first marker splits
    assert_eq!(
        extract_media_path("http://x/media/Snippets/media/a.mp4"),
        Some("Snippets/media/a.mp4")
    );

    // No marker
    assert_eq!(extract_media_path("https://juicewrldapi.com/files/a.mp3"), None);
    assert_eq!(extract_media_path(""), None);
}

#[test]
fn test_non_empty() {
    assert_eq!(non_empty(Some("released")), Some("released"));
    assert_eq!(non_empty(Some("")), None);
    assert_eq!(non_empty(None), None);
}

#[test]
fn test_resolve_download_target() {
    let default_dir = Path::new("/tmp/juicewrld-downloads");

    // No destination: file name of the remote path in the default dir
    assert_eq!(
        resolve_download_target("Session Edits/Rental.mp3", None, default_dir),
        default_dir.join("Rental.mp3")
    );

    // Explicit file destination wins
    assert_eq!(
        resolve_download_target("Session Edits/Rental.mp3", Some(PathBuf::from("out.mp3")), default_dir),
        PathBuf::from("out.mp3")
    );

    // Existing directory receives the remote file name
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(
        resolve_download_target("Snippets/Cigarettes/Cigarettes.mp4", Some(dir.path().to_path_buf()), default_dir),
        dir.path().join("Cigarettes.mp4")
    );

    // Trailing slashes are skipped when picking the name
    assert_eq!(
        resolve_download_target("Snippets/Cigarettes/", None, default_dir),
        default_dir.join("Cigarettes")
    );
}

#[test]
fn test_temp_path_is_sibling() {
    let target = Path::new("/music/Rental.mp3");
    let tmp = temp_path(target);
    assert_eq!(tmp.parent(), target.parent());
    assert_eq!(tmp.file_name().unwrap(), "Rental.mp3.tmp");
}

#[tokio::test]
async fn test_write_atomic_replaces_content() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("nested").join("song.mp3");

    write_atomic(&target, b"first").await.unwrap();
    write_atomic(&target, b"second").await.unwrap();

    assert_eq!(std::fs::read(&target).unwrap(), b"second");
    assert!(!temp_path(&target).exists());
}
