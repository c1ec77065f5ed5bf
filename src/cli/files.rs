use std::path::PathBuf;

use colored::Colorize;
use tabled::Table;
use tokio_util::sync::CancellationToken;

use super::{fail, or_dash, spinner};
use crate::{client::Client, config, error::Error, info, storage, success, types::FileTableRow, utils, warning};

pub async fn browse(client: &Client, cancel: &CancellationToken, path: Option<String>, search: Option<String>) {
    let path = path.unwrap_or_default();
    let pb = spinner(format!("Listing /{}...", path));
    let listing = match client.browse_files(cancel, &path, search.as_deref()).await {
        Ok(listing) => listing,
        Err(e) => fail(&pb, "Cannot browse files", e),
    };
    pb.finish_and_clear();

    let breadcrumbs: Vec<&str> = listing.path_parts.iter().map(|p| p.name.as_str()).collect();
    info!("/{}", breadcrumbs.join("/"));

    if listing.items.is_empty() {
        warning!("Directory is empty.");
        return;
    }

    let mut rows: Vec<FileTableRow> = listing.items.iter().map(FileTableRow::from).collect();
    // directories first
    rows.sort_by(|a, b| {
        (a.kind != "directory")
            .cmp(&(b.kind != "directory"))
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    println!("{}", Table::new(rows));

    let summary = format!(
        "{} files, {} directories",
        listing.total_files, listing.total_directories
    );
    match listing.search_query.filter(|q| !q.is_empty()) {
        Some(q) if listing.is_recursive_search => info!("{} matching \"{}\" (recursive)", summary, q),
        Some(q) => info!("{} matching \"{}\"", summary, q),
        None => info!("{}", summary),
    }
}

pub async fn file_info(client: &Client, cancel: &CancellationToken, path: String) {
    let pb = spinner("Fetching file info...");
    let file = match client.file_info(cancel, &path).await {
        Ok(file) => file,
        Err(e) => fail(&pb, "Cannot load file info", e),
    };
    pb.finish_and_clear();

    println!("{}", file.name.bold());
    let created = file.created.map(|t| t.to_rfc3339()).unwrap_or_default();
    let modified = file.modified.map(|t| t.to_rfc3339()).unwrap_or_default();
    let fields = [
        ("Path", file.path.as_str()),
        ("Type", file.kind.as_str()),
        ("Size", file.size_human.as_str()),
        ("MIME type", file.mime_type.as_str()),
        ("Encoding", file.encoding.as_deref().unwrap_or_default()),
        ("Created", created.as_str()),
        ("Modified", modified.as_str()),
    ];
    for (label, value) in fields {
        println!("  {:<12} {}", format!("{}:", label).dimmed(), or_dash(value));
    }
}

pub async fn download(client: &Client, cancel: &CancellationToken, path: String, output: Option<PathBuf>) {
    let target = utils::resolve_download_target(&path, output, &config::download_dir());

    let pb = spinner(format!("Downloading {}...", path));
    match client.download_file_to(cancel, &path, &target).await {
        Ok(saved) => {
            pb.finish_and_clear();
            success!("Saved to {}", saved.display());
        }
        Err(e) => fail(&pb, "Download failed", e),
    }
}

pub async fn cover_art(client: &Client, cancel: &CancellationToken, path: String, output: PathBuf) {
    let pb = spinner("Fetching cover art...");
    let data = match client.cover_art(cancel, &path).await {
        Ok(data) => data,
        Err(e) => fail(&pb, "Cannot load cover art", e),
    };

    if let Err(e) = storage::write_atomic(&output, &data).await {
        fail(&pb, "Cannot save cover art", Error::from(e));
    }
    pb.finish_and_clear();
    success!("Saved {} bytes to {}", data.len(), output.display());
}
