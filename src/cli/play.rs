use tokio_util::sync::CancellationToken;

use super::{fail, spinner};
use crate::{
    client::Client,
    error, info, success,
    types::{PlaybackStatus, StreamStatus},
    warning,
};

pub async fn play(client: &Client, cancel: &CancellationToken, song_id: u64, open: bool) {
    let pb = spinner(format!("Resolving song {}...", song_id));
    let playback = match client.play_song(cancel, song_id).await {
        Ok(playback) => playback,
        Err(e) => fail(&pb, "Cannot resolve song", e),
    };
    pb.finish_and_clear();

    let url = match playback.stream_url.as_deref() {
        Some(url) => url,
        None => error!(
            "{} ({})",
            playback.error.as_deref().unwrap_or("No stream URL"),
            playback.status.as_str()
        ),
    };

    match playback.status {
        PlaybackStatus::Success => {
            success!("Found {}", playback.file_path.as_deref().unwrap_or_default());
            if let Some(content_type) = &playback.content_type {
                info!("Content type: {}", content_type);
            }
        }
        _ => warning!(
            "{}",
            playback
                .note
                .as_deref()
                .unwrap_or("Stream URL could not be verified")
        ),
    }
    println!("{}", url);

    if open {
        if let Err(e) = webbrowser::open(url) {
            warning!("Cannot open browser. Err: {}", e);
        }
    }
}

pub async fn stream(client: &Client, cancel: &CancellationToken, path: String) {
    let pb = spinner("Probing file...");
    let info = match client.stream_audio_file(cancel, &path).await {
        Ok(info) => info,
        Err(e) => fail(&pb, "Cannot probe file", e),
    };
    pb.finish_and_clear();

    match (info.status, info.stream_url.as_deref()) {
        (StreamStatus::Success, Some(url)) => {
            success!("Streamable: {}", info.file_path);
            if let Some(content_type) = &info.content_type {
                info!("Content type: {}", content_type);
            }
            if let Some(length) = info.content_length {
                info!("Size: {} bytes", length);
            }
            info!("Range requests: {}", if info.supports_range { "yes" } else { "no" });
            println!("{}", url);
        }
        _ => error!(
            "{}",
            info.error.as_deref().unwrap_or("File cannot be streamed")
        ),
    }
}
