use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tabled::Tabled;

use crate::time::FlexibleTime;

// The API sends `null` for text it has no value for; treat it like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    #[serde(default)]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bio: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artist: Artist,
    #[serde(default)]
    pub release_date: FlexibleTime,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Era {
    #[serde(default)]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub time_frame: String,
}

/// Public identifier of a song. The server sends either a number or a string;
/// numbers are kept as sent, so floats and values past `i64` still decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PublicId {
    Numeric(serde_json::Number),
    Text(String),
    #[default]
    Absent,
}

impl PublicId {
    pub fn is_absent(&self) -> bool {
        matches!(self, PublicId::Absent)
    }
}

impl std::fmt::Display for PublicId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PublicId::Numeric(n) => write!(f, "{}", n),
            PublicId::Text(s) => f.write_str(s),
            PublicId::Absent => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Song {
    #[serde(default)]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub original_key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub era: Era,
    #[serde(default, deserialize_with = "null_as_default")]
    pub track_titles: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub credited_artists: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub producers: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub engineers: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub additional_information: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_names: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub instrumentals: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recording_locations: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub record_dates: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub preview_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dates: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub length: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub leak_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date_leaked: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub session_titles: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub session_tracking: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub instrumental_names: String,
    #[serde(default)]
    pub public_id: PublicId,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub size_human: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub extension: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mime_type: String,
    #[serde(default)]
    pub created: Option<FlexibleTime>,
    #[serde(default)]
    pub modified: Option<FlexibleTime>,
    #[serde(default)]
    pub encoding: Option<String>,
}

impl FileInfo {
    pub fn is_directory(&self) -> bool {
        self.kind == "directory"
    }
}

/// One breadcrumb of a directory listing. Unknown keys are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathPart {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectoryInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub path_parts: Vec<PathPart>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<FileInfo>,
    #[serde(default)]
    pub total_files: u64,
    #[serde(default)]
    pub total_directories: u64,
    #[serde(default)]
    pub search_query: Option<String>,
    #[serde(default)]
    pub is_recursive_search: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaginatedSongsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<Song>,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
}

impl PaginatedSongsResponse {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub songs: Vec<Song>,
    pub total: u64,
    pub category: Option<String>,
    pub query_time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub total_songs: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category_stats: BTreeMap<String, u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub era_stats: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiOverview {
    pub endpoints: Value,
    pub title: String,
    pub description: String,
    pub version: String,
}

/// Open set of fields for responses whose shape the server owns
/// (categories, player songs, zip job status).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpenMap(Map<String, Value>);

impl OpenMap {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.0.get(key).and_then(Value::as_i64)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(Value::as_f64)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    /// Text rendering of a field: strings verbatim, other values as JSON, missing as empty.
    pub fn display(&self, key: &str) -> String {
        match self.0.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}

impl From<Map<String, Value>> for OpenMap {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Server-side archive job handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for JobId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackStatus {
    /// A candidate path answered the range probe.
    Success,
    /// The song record has no `file` field.
    NoFileInfo,
    /// The `file` field is empty or lacks the `/media/` marker.
    InvalidUrl,
    /// No candidate matched; the URL is built from the reported path, unverified.
    FileNotFoundButUrlProvided,
}

impl PlaybackStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackStatus::Success => "success",
            PlaybackStatus::NoFileInfo => "no_file_info",
            PlaybackStatus::InvalidUrl => "invalid_url",
            PlaybackStatus::FileNotFoundButUrlProvided => "file_not_found_but_url_provided",
        }
    }
}

/// Outcome of resolving a song to a streamable URL.
///
/// A successful call does not imply a verified file; inspect `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playback {
    pub status: PlaybackStatus,
    pub song_id: u64,
    pub stream_url: Option<String>,
    pub file_path: Option<String>,
    pub content_type: Option<String>,
    pub error: Option<String>,
    pub note: Option<String>,
}

impl Playback {
    pub fn is_verified(&self) -> bool {
        self.status == PlaybackStatus::Success
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamStatus {
    Success,
    FileNotFound,
    HttpError,
    RequestError,
}

/// Outcome of probing an explicit file path for streaming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamInfo {
    pub status: StreamStatus,
    pub file_path: String,
    pub stream_url: Option<String>,
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub supports_range: bool,
    pub error: Option<String>,
}

#[derive(Tabled)]
pub struct SongTableRow {
    pub id: u64,
    pub name: String,
    pub category: String,
    pub era: String,
    pub length: String,
}

impl From<&Song> for SongTableRow {
    fn from(song: &Song) -> Self {
        SongTableRow {
            id: song.id,
            name: song.name.clone(),
            category: song.category.clone(),
            era: song.era.name.clone(),
            length: song.length.clone(),
        }
    }
}

#[derive(Tabled)]
pub struct EraTableRow {
    pub id: u64,
    pub name: String,
    pub time_frame: String,
}

#[derive(Tabled)]
pub struct FileTableRow {
    pub kind: String,
    pub name: String,
    pub size: String,
    pub modified: String,
}

impl From<&FileInfo> for FileTableRow {
    fn from(file: &FileInfo) -> Self {
        FileTableRow {
            kind: file.kind.clone(),
            name: file.name.clone(),
            size: file.size_human.clone(),
            modified: file
                .modified
                .filter(FlexibleTime::is_set)
                .map(|t| t.to_rfc3339())
                .unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
pub struct CountTableRow {
    pub name: String,
    pub count: u64,
}
