use colored::Colorize;
use tabled::Table;
use tokio_util::sync::CancellationToken;

use super::{fail, or_dash, spinner};
use crate::{
    client::{Client, SearchQuery, SongsQuery},
    info, success,
    types::{CountTableRow, EraTableRow, SongTableRow},
    warning,
};

pub async fn songs(client: &Client, cancel: &CancellationToken, query: SongsQuery) {
    let pb = spinner("Fetching songs...");
    let page = match client.songs(cancel, &query).await {
        Ok(page) => page,
        Err(e) => fail(&pb, "Cannot load songs", e),
    };
    pb.finish_and_clear();

    if page.results.is_empty() {
        warning!("No songs match the given filters.");
        return;
    }

    let rows: Vec<SongTableRow> = page.results.iter().map(SongTableRow::from).collect();
    println!("{}", Table::new(rows));
    info!(
        "Page {} - {} songs in total{}",
        query.page.unwrap_or(1),
        page.count,
        if page.has_next() { ", more available" } else { "" }
    );
}

pub async fn song(client: &Client, cancel: &CancellationToken, song_id: u64) {
    let pb = spinner(format!("Fetching song {}...", song_id));
    let song = match client.song(cancel, song_id).await {
        Ok(song) => song,
        Err(e) => fail(&pb, "Cannot load song", e),
    };
    pb.finish_and_clear();

    println!("{}", song.name.bold());
    let fields = [
        ("ID", song.id.to_string()),
        ("Public ID", song.public_id.to_string()),
        ("Category", song.category.clone()),
        ("Era", song.era.name.clone()),
        ("Length", song.length.clone()),
        ("Track titles", song.track_titles.join(", ")),
        ("Credited artists", song.credited_artists.clone()),
        ("Producers", song.producers.clone()),
        ("Engineers", song.engineers.clone()),
        ("Recorded", song.record_dates.clone()),
        ("Recording locations", song.recording_locations.clone()),
        ("Released", song.release_date.clone()),
        ("Leak type", song.leak_type.clone()),
        ("Leaked", song.date_leaked.clone()),
        ("File names", song.file_names.clone()),
        ("Notes", song.notes.clone()),
    ];
    for (label, value) in fields {
        println!("  {:<20} {}", format!("{}:", label).dimmed(), or_dash(&value));
    }
}

pub async fn search(client: &Client, cancel: &CancellationToken, query: SearchQuery) {
    let pb = spinner(format!("Searching for \"{}\"...", query.query));
    let result = match client.search_songs(cancel, &query).await {
        Ok(result) => result,
        Err(e) => fail(&pb, "Search failed", e),
    };
    pb.finish_and_clear();

    if result.songs.is_empty() {
        warning!("Nothing found for \"{}\".", query.query);
        return;
    }

    let rows: Vec<SongTableRow> = result.songs.iter().map(SongTableRow::from).collect();
    println!("{}", Table::new(rows));
    success!(
        "Showing {} of {} matches (page {})",
        result.songs.len(),
        result.total,
        query.page()
    );
}

pub async fn eras(client: &Client, cancel: &CancellationToken) {
    let pb = spinner("Fetching eras...");
    let eras = match client.eras(cancel).await {
        Ok(eras) => eras,
        Err(e) => fail(&pb, "Cannot load eras", e),
    };
    pb.finish_and_clear();

    let rows: Vec<EraTableRow> = eras
        .into_iter()
        .map(|e| EraTableRow {
            id: e.id,
            name: e.name,
            time_frame: e.time_frame,
        })
        .collect();
    println!("{}", Table::new(rows));
}

pub async fn stats(client: &Client, cancel: &CancellationToken) {
    let pb = spinner("Fetching statistics...");
    let stats = match client.stats(cancel).await {
        Ok(stats) => stats,
        Err(e) => fail(&pb, "Cannot load statistics", e),
    };
    pb.finish_and_clear();

    info!("Total songs: {}", stats.total_songs);

    let to_rows = |counts: &std::collections::BTreeMap<String, u64>| -> Vec<CountTableRow> {
        let mut rows: Vec<CountTableRow> = counts
            .iter()
            .map(|(name, count)| CountTableRow {
                name: name.clone(),
                count: *count,
            })
            .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        rows
    };

    println!("By category:\n{}\n", Table::new(to_rows(&stats.category_stats)));
    println!("By era:\n{}", Table::new(to_rows(&stats.era_stats)));
}

pub async fn categories(client: &Client, cancel: &CancellationToken) {
    let pb = spinner("Fetching categories...");
    let categories = match client.categories(cancel).await {
        Ok(categories) => categories,
        Err(e) => fail(&pb, "Cannot load categories", e),
    };
    pb.finish_and_clear();

    for category in categories {
        let value = category.display("value");
        let label = category.display("label");
        if label.is_empty() || label == value {
            println!("  {}", value.bold());
        } else {
            println!("  {:<24} {}", value.bold(), label);
        }
    }
}

pub async fn overview(client: &Client, cancel: &CancellationToken) {
    let pb = spinner("Fetching API overview...");
    let overview = match client.api_overview(cancel).await {
        Ok(overview) => overview,
        Err(e) => fail(&pb, "Cannot load API overview", e),
    };
    pb.finish_and_clear();

    println!("{} v{}", overview.title.bold(), overview.version);
    println!("{}\n", overview.description);
    println!("Base URL: {}", client.base_url());
    match serde_json::to_string_pretty(&overview.endpoints) {
        Ok(endpoints) => println!("{}", endpoints),
        Err(e) => warning!("Cannot render endpoints. Err: {}", e),
    }
}
