use std::path::{Path, PathBuf};

/// Marker that separates the host part of a reported file URL from the storage path.
pub const MEDIA_MARKER: &str = "/media/";

/// Converts an offset/limit pair into a 1-based page number.
pub fn page_for_offset(offset: u32, limit: u32) -> u32 {
    if limit == 0 {
        return 1;
    }
    offset / limit + 1
}

pub fn join_tags<S: AsRef<str>>(tags: &[S]) -> Option<String> {
    if tags.is_empty() {
        return None;
    }
    Some(
        tags.iter()
            .map(|t| t.as_ref())
            .collect::<Vec<_>>()
            .join(","),
    )
}

/// Returns the storage path following the first `/media/` marker of a reported file URL.
pub fn extract_media_path(file_url: &str) -> Option<&str> {
    file_url
        .find(MEDIA_MARKER)
        .map(|idx| &file_url[idx + MEDIA_MARKER.len()..])
}

pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Destination for a download: an explicit path wins, a directory gets the remote file name.
pub fn resolve_download_target(remote_path: &str, dest: Option<PathBuf>, default_dir: &Path) -> PathBuf {
    let file_name = remote_path
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or("download");

    match dest {
        Some(path) if path.is_dir() => path.join(file_name),
        Some(path) => path,
        None => default_dir.join(file_name),
    }
}
