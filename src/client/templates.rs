//! Candidate storage layouts for playback resolution.
//!
//! The metadata endpoint does not expose where a song's media file lives on the
//! file server. These templates encode the known directory layout; when the
//! server reorganises its storage only this list needs to change.
//!
//! Placeholders: `{title}` and `{album}`.

use serde::{Deserialize, Serialize};

/// Default layouts, in probing order: released discography, unreleased
/// discography, snippets, session edits.
pub const DEFAULT_TEMPLATES: [&str; 4] = [
    "Compilation/1. Released Discography/{album}/{title}.mp3",
    "Compilation/2. Unreleased Discography/{title}.mp3",
    "Snippets/{title}/{title}.mp4",
    "Session Edits/{title}.mp3",
];

/// Ordered list of path templates. Order decides which match wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathTemplates(Vec<String>);

impl Default for PathTemplates {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATES)
    }
}

impl PathTemplates {
    pub fn new<I, S>(templates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(templates.into_iter().map(Into::into).collect())
    }

    /// Renders every template for a song, preserving order.
    pub fn candidates(&self, title: &str, album: &str) -> Vec<String> {
        self.0
            .iter()
            .map(|template| render(template, title, album))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Single pass, so a title containing "{album}" is not substituted twice.
fn render(template: &str, title: &str, album: &str) -> String {
    let mut out = String::with_capacity(template.len() + title.len() * 2);
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        if let Some(after) = tail.strip_prefix("{title}") {
            out.push_str(title);
            rest = after;
        } else if let Some(after) = tail.strip_prefix("{album}") {
            out.push_str(album);
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }

    out.push_str(rest);
    out
}
