//! Local persistence of downloaded bytes.
//!
//! Writes go to a sibling `.tmp` file which is synced and then renamed over the
//! destination, so a reader sees either the complete prior file or the complete
//! new one, never a truncated mix.

use std::{
    io,
    path::{Path, PathBuf},
};

use futures::AsyncWriteExt;

/// Temporary file suffix used before the atomic rename.
pub const TEMP_SUFFIX: &str = ".tmp";

/// Path for the temp file: appends `.tmp` to the final path (`a.mp3` -> `a.mp3.tmp`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Atomically replaces `path` with `data`.
///
/// Parent directories are created when missing. On failure the temp file is
/// removed and any existing file at `path` is left untouched.
pub async fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        async_fs::create_dir_all(parent).await?;
    }

    let tmp = temp_path(path);
    if let Err(e) = write_and_sync(&tmp, data).await {
        let _ = async_fs::remove_file(&tmp).await;
        return Err(e);
    }

    if let Err(e) = async_fs::rename(&tmp, path).await {
        let _ = async_fs::remove_file(&tmp).await;
        return Err(e);
    }

    tracing::debug!(path = %path.display(), bytes = data.len(), "file written");
    Ok(())
}

async fn write_and_sync(tmp: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = async_fs::File::create(tmp).await?;
    file.write_all(data).await?;
    file.flush().await?;
    file.sync_all().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_appends_suffix() {
        assert_eq!(
            temp_path(Path::new("/music/Lucid Dreams.mp3")),
            PathBuf::from("/music/Lucid Dreams.mp3.tmp")
        );
    }

    #[tokio::test]
    async fn replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("song.mp3");
        std::fs::write(&target, b"old contents").unwrap();

        write_atomic(&target, b"new").await.unwrap();

        assert_eq!(std::fs::read(&target).unwrap(), b"new");
        assert!(!temp_path(&target).exists());
    }

    #[tokio::test]
    async fn writes_large_payload_in_full() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("session.wav");
        let data: Vec<u8> = (0..3 * 1024 * 1024).map(|i| (i % 251) as u8).collect();

        write_atomic(&target, &data).await.unwrap();

        assert_eq!(std::fs::read(&target).unwrap(), data);
    }

    #[tokio::test]
    async fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a/b/c.bin");

        write_atomic(&target, b"xyz").await.unwrap();

        assert_eq!(std::fs::read(&target).unwrap(), b"xyz");
    }

    #[tokio::test]
    async fn failed_write_keeps_prior_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("song.mp3");
        std::fs::write(&target, b"complete prior file").unwrap();
        // A directory squatting on the temp path makes the write fail.
        std::fs::create_dir(temp_path(&target)).unwrap();

        let result = write_atomic(&target, b"new").await;

        assert!(result.is_err());
        assert_eq!(std::fs::read(&target).unwrap(), b"complete prior file");
    }
}
