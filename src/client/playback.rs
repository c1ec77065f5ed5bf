//! Song playback URL resolution.
//!
//! The player endpoint reports a file URL whose path does not match where the
//! file server actually stores the media. [`Client::play_song`] therefore guesses:
//! it renders the configured [`PathTemplates`](super::PathTemplates) for the song
//! and probes each candidate with a one-byte range request, first match wins.
//! When nothing matches it still hands back a URL built from the reported path,
//! tagged as unverified, so the caller can attempt playback anyway.

use reqwest::header::{ACCEPT_RANGES, CONTENT_LENGTH, CONTENT_RANGE, CONTENT_TYPE};
use tokio_util::sync::CancellationToken;

use super::{Client, Probe, files::require_path};
use crate::{
    error::{Error, Result},
    types::{Playback, PlaybackStatus, StreamInfo, StreamStatus},
    utils,
};

impl Playback {
    fn unresolved(song_id: u64, status: PlaybackStatus, error: &str) -> Self {
        Playback {
            status,
            song_id,
            stream_url: None,
            file_path: None,
            content_type: None,
            error: Some(error.to_string()),
            note: None,
        }
    }
}

impl Client {
    /// Resolves a song to a streamable URL.
    ///
    /// # Resolution Steps
    ///
    /// 1. Fetch the player record of the song (failure here is returned as an error)
    /// 2. Read its `file` reference; missing yields [`PlaybackStatus::NoFileInfo`],
    ///    empty or without the `/media/` marker yields [`PlaybackStatus::InvalidUrl`]
    /// 3. Render the path templates with the song's `title` and `album`
    /// 4. Probe each candidate with `Range: bytes=0-0`; the first 200/206 answer
    ///    wins and probing stops
    /// 5. Otherwise return the URL of the reported path as
    ///    [`PlaybackStatus::FileNotFoundButUrlProvided`]
    ///
    /// Network failures of individual probes count as a non-match. Only
    /// cancellation interrupts the probing loop.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let playback = client.play_song(&cancel, 1337).await?;
    /// match playback.status {
    ///     PlaybackStatus::Success => play(playback.stream_url.unwrap()),
    ///     PlaybackStatus::FileNotFoundButUrlProvided => try_play(playback.stream_url.unwrap()),
    ///     _ => eprintln!("{}", playback.error.unwrap_or_default()),
    /// }
    /// ```
    pub async fn play_song(&self, cancel: &CancellationToken, song_id: u64) -> Result<Playback> {
        let song = self.player_song(cancel, song_id).await?;

        let file_url = match song.get("file") {
            Some(value) => value.as_str().unwrap_or_default(),
            None => {
                return Ok(Playback::unresolved(
                    song_id,
                    PlaybackStatus::NoFileInfo,
                    "Song file information not found",
                ));
            }
        };

        let Some(reported_path) = utils::extract_media_path(file_url) else {
            return Ok(Playback::unresolved(
                song_id,
                PlaybackStatus::InvalidUrl,
                "Invalid file URL format",
            ));
        };

        let title = song.display("title");
        let album = song.display("album");

        for candidate in self.templates.candidates(&title, &album) {
            let stream_url = self.download_url(&candidate)?;
            match self.probe(cancel, &stream_url).await {
                Ok(probe) if probe.is_available() => {
                    tracing::debug!(song_id, path = %candidate, "playback candidate matched");
                    return Ok(Playback {
                        status: PlaybackStatus::Success,
                        song_id,
                        stream_url: Some(stream_url),
                        file_path: Some(candidate),
                        content_type: probe.header(CONTENT_TYPE.as_str()),
                        error: None,
                        note: None,
                    });
                }
                Ok(probe) => {
                    tracing::trace!(song_id, path = %candidate, status = probe.status.as_u16(), "candidate rejected");
                }
                Err(Error::Cancelled) => return Err(Error::Cancelled),
                Err(e) => {
                    tracing::warn!(song_id, path = %candidate, error = %e, "candidate probe failed");
                }
            }
        }

        tracing::debug!(song_id, path = reported_path, "no candidate matched, using reported path");
        Ok(Playback {
            status: PlaybackStatus::FileNotFoundButUrlProvided,
            song_id,
            stream_url: Some(self.download_url(reported_path)?),
            file_path: Some(reported_path.to_string()),
            content_type: None,
            error: None,
            note: Some("File may not exist at this path, but streaming URL is provided".to_string()),
        })
    }

    /// Checks whether an explicit storage path can be streamed.
    ///
    /// Every outcome except cancellation and an empty path is reported through
    /// [`StreamStatus`] rather than as an error.
    pub async fn stream_audio_file(&self, cancel: &CancellationToken, file_path: &str) -> Result<StreamInfo> {
        require_path(file_path)?;
        let stream_url = self.download_url(file_path)?;

        let probe = match self.probe(cancel, &stream_url).await {
            Ok(probe) => probe,
            Err(Error::Cancelled) => return Err(Error::Cancelled),
            Err(e) => {
                return Ok(stream_failure(
                    file_path,
                    StreamStatus::RequestError,
                    format!("Request failed: {}", e),
                ));
            }
        };

        if probe.is_available() {
            return Ok(StreamInfo {
                status: StreamStatus::Success,
                file_path: file_path.to_string(),
                stream_url: Some(stream_url),
                content_type: probe.header(CONTENT_TYPE.as_str()),
                content_length: total_length(&probe),
                supports_range: supports_range(&probe),
                error: None,
            });
        }

        if probe.status == reqwest::StatusCode::NOT_FOUND {
            return Ok(stream_failure(
                file_path,
                StreamStatus::FileNotFound,
                "Audio file not found".to_string(),
            ));
        }

        Ok(stream_failure(
            file_path,
            StreamStatus::HttpError,
            format!("HTTP {}", probe.status.as_u16()),
        ))
    }
}

fn stream_failure(file_path: &str, status: StreamStatus, error: String) -> StreamInfo {
    StreamInfo {
        status,
        file_path: file_path.to_string(),
        stream_url: None,
        content_type: None,
        content_length: None,
        supports_range: false,
        error: Some(error),
    }
}

fn supports_range(probe: &Probe) -> bool {
    probe
        .header(ACCEPT_RANGES.as_str())
        .is_some_and(|v| !v.is_empty() && v != "none")
}

// A 206 answer reports the full size in `Content-Range: bytes 0-0/<total>`;
// `Content-Length` would only be the one probed byte.
fn total_length(probe: &Probe) -> Option<u64> {
    probe
        .header(CONTENT_RANGE.as_str())
        .and_then(|range| range.rsplit('/').next().and_then(|t| t.trim().parse().ok()))
        .or_else(|| {
            probe
                .header(CONTENT_LENGTH.as_str())
                .and_then(|len| len.trim().parse().ok())
        })
}
