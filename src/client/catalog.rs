use serde::Deserialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::{Client, Query};
use crate::{
    error::{Error, Result},
    types::{Album, ApiOverview, Artist, Era, OpenMap, PaginatedSongsResponse, Song, Stats},
    utils,
};

/// `{"results": [...]}` list envelope used by most listing endpoints.
#[derive(Debug, Deserialize)]
struct Results<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct Categories {
    #[serde(default)]
    categories: Vec<OpenMap>,
}

/// Filters for the song listing endpoint. Unset or empty fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongsQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub category: Option<String>,
    pub era: Option<String>,
    pub search: Option<String>,
}

impl SongsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn era(mut self, era: impl Into<String>) -> Self {
        self.era = Some(era.into());
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Query parameters in wire order. Zero page numbers and empty strings are dropped.
    pub fn to_params(&self) -> Query {
        let mut params = Query::new();
        if let Some(page) = self.page.filter(|p| *p > 0) {
            params.push(("page", page.to_string()));
        }
        if let Some(page_size) = self.page_size.filter(|p| *p > 0) {
            params.push(("page_size", page_size.to_string()));
        }
        if let Some(category) = utils::non_empty(self.category.as_deref()) {
            params.push(("category", category.to_string()));
        }
        if let Some(era) = utils::non_empty(self.era.as_deref()) {
            params.push(("era", era.to_string()));
        }
        if let Some(search) = utils::non_empty(self.search.as_deref()) {
            params.push(("search", search.to_string()));
        }
        params
    }
}

impl Client {
    /// Retrieves the API's endpoint directory together with descriptive metadata.
    ///
    /// The server only returns the endpoint map; title, description and version
    /// are filled in by the client. The endpoint map is kept as raw JSON because
    /// its shape is owned by the server.
    pub async fn api_overview(&self, cancel: &CancellationToken) -> Result<ApiOverview> {
        let endpoints: Value = self.get(cancel, &[], &[]).await?;
        Ok(ApiOverview {
            endpoints,
            title: "Juice WRLD API".to_string(),
            description: "Comprehensive API for Juice WRLD discography and content".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }

    pub async fn artists(&self, cancel: &CancellationToken) -> Result<Vec<Artist>> {
        let raw: Results<Artist> = self.get(cancel, &["artists"], &[]).await?;
        Ok(raw.results)
    }

    pub async fn artist(&self, cancel: &CancellationToken, artist_id: u64) -> Result<Artist> {
        self.get(cancel, &["artists", &artist_id.to_string()], &[]).await
    }

    pub async fn albums(&self, cancel: &CancellationToken) -> Result<Vec<Album>> {
        let raw: Results<Album> = self.get(cancel, &["albums"], &[]).await?;
        Ok(raw.results)
    }

    pub async fn album(&self, cancel: &CancellationToken, album_id: u64) -> Result<Album> {
        self.get(cancel, &["albums", &album_id.to_string()], &[]).await
    }

    /// Retrieves one page of the song catalog.
    ///
    /// # Arguments
    ///
    /// * `cancel` - Token that aborts the request when cancelled
    /// * `query` - Page selection and server-side filters
    ///
    /// # Returns
    ///
    /// - `Ok(PaginatedSongsResponse)` - The page; `next`/`previous` are `None` at the ends
    /// - `Err(Error::UnexpectedResponse)` - The body has no `results` key. The
    ///   server answers some invalid filters with a 200 and an error object, whose
    ///   raw JSON becomes the error message
    /// - `Err(_)` - Any transport or API error
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let page = client
    ///     .songs(&cancel, &SongsQuery::new().page(2).page_size(50).category("unreleased"))
    ///     .await?;
    /// println!("{} songs in total", page.count);
    /// ```
    pub async fn songs(&self, cancel: &CancellationToken, query: &SongsQuery) -> Result<PaginatedSongsResponse> {
        let raw: Value = self.get(cancel, &["songs"], &query.to_params()).await?;
        if raw.get("results").is_none() {
            return Err(Error::UnexpectedResponse(raw.to_string()));
        }
        Ok(serde_json::from_value(raw)?)
    }

    pub async fn song(&self, cancel: &CancellationToken, song_id: u64) -> Result<Song> {
        self.get(cancel, &["songs", &song_id.to_string()], &[]).await
    }

    pub async fn eras(&self, cancel: &CancellationToken) -> Result<Vec<Era>> {
        let raw: Results<Era> = self.get(cancel, &["eras"], &[]).await?;
        Ok(raw.results)
    }

    pub async fn era(&self, cancel: &CancellationToken, era_id: u64) -> Result<Era> {
        self.get(cancel, &["eras", &era_id.to_string()], &[]).await
    }

    pub async fn stats(&self, cancel: &CancellationToken) -> Result<Stats> {
        self.get(cancel, &["stats"], &[]).await
    }

    /// Category descriptors. Their fields are server-defined, hence [`OpenMap`].
    pub async fn categories(&self, cancel: &CancellationToken) -> Result<Vec<OpenMap>> {
        let raw: Categories = self.get(cancel, &["categories"], &[]).await?;
        Ok(raw.categories)
    }

    /// Player-oriented song listing. The payload is passed through untouched.
    pub async fn player_songs(
        &self,
        cancel: &CancellationToken,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<OpenMap> {
        let mut query = Query::new();
        if let Some(page) = page.filter(|p| *p > 0) {
            query.push(("page", page.to_string()));
        }
        if let Some(page_size) = page_size.filter(|p| *p > 0) {
            query.push(("page_size", page_size.to_string()));
        }
        self.get(cancel, &["player", "songs"], &query).await
    }

    /// Player record of one song, including its `file` reference.
    pub async fn player_song(&self, cancel: &CancellationToken, song_id: u64) -> Result<OpenMap> {
        self.get(cancel, &["player", "songs", &song_id.to_string()], &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn songs_query_skips_empty_filters() {
        let query = SongsQuery::new().page(0).page_size(25).category("").era("DRFL");
        assert_eq!(
            query.to_params(),
            vec![("page_size", "25".to_string()), ("era", "DRFL".to_string())]
        );
    }

    #[test]
    fn songs_query_keeps_wire_order() {
        let query = SongsQuery::new()
            .search("wishing well")
            .category("released")
            .page(2);
        let keys: Vec<&str> = query.to_params().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["page", "category", "search"]);
    }
}
