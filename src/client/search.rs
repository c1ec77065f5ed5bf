use tokio_util::sync::CancellationToken;

use super::{Client, Query, SongsQuery};
use crate::{
    error::Result,
    types::{PaginatedSongsResponse, SearchResult},
    utils,
};

/// Default page size for searches.
pub const DEFAULT_LIMIT: u32 = 20;

/// Free-text search with optional filters, expressed as offset/limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: String,
    pub category: Option<String>,
    pub year: Option<u32>,
    pub tags: Vec<String>,
    pub limit: u32,
    pub offset: u32,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            category: None,
            year: None,
            tags: Vec::new(),
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// 1-based page number covering `offset`.
    pub fn page(&self) -> u32 {
        utils::page_for_offset(self.offset, self.limit)
    }

    /// Query parameters for the song listing endpoint.
    pub fn to_params(&self) -> Query {
        let mut params: Query = vec![
            ("search", self.query.clone()),
            ("page_size", self.limit.to_string()),
            ("page", self.page().to_string()),
        ];
        if let Some(category) = utils::non_empty(self.category.as_deref()) {
            params.push(("category", category.to_string()));
        }
        if let Some(year) = self.year.filter(|y| *y > 0) {
            params.push(("year", year.to_string()));
        }
        if let Some(tags) = utils::join_tags(&self.tags) {
            params.push(("tags", tags));
        }
        params
    }
}

impl Client {
    /// Searches the song catalog.
    ///
    /// Relevance and filtering are entirely server-side; the client only maps
    /// `offset`/`limit` onto `page`/`page_size` (`page = offset / limit + 1`) and
    /// joins tags into one comma-separated value.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let query = SearchQuery::new("robbery").category("released").limit(10).offset(20);
    /// let result = client.search_songs(&cancel, &query).await?; // requests page 3
    /// ```
    pub async fn search_songs(&self, cancel: &CancellationToken, query: &SearchQuery) -> Result<SearchResult> {
        let raw: PaginatedSongsResponse = self.get(cancel, &["songs"], &query.to_params()).await?;
        Ok(SearchResult {
            songs: raw.results,
            total: raw.count,
            category: query.category.clone(),
            query_time: "0ms".to_string(),
        })
    }

    pub async fn songs_by_category(
        &self,
        cancel: &CancellationToken,
        category: &str,
        page: u32,
        page_size: u32,
    ) -> Result<PaginatedSongsResponse> {
        let query = SongsQuery::new()
            .category(category)
            .page(page)
            .page_size(page_size);
        self.songs(cancel, &query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_and_limit_map_to_page() {
        let query = SearchQuery::new("x").limit(10).offset(20);
        assert_eq!(query.page(), 3);

        let params = query.to_params();
        assert!(params.contains(&("page", "3".to_string())));
        assert!(params.contains(&("page_size", "10".to_string())));
    }

    #[test]
    fn tags_are_joined_and_optional_filters_dropped() {
        let params = SearchQuery::new("lean")
            .tags(["leak", "og file"])
            .year(0)
            .category("")
            .to_params();

        assert!(params.contains(&("tags", "leak,og file".to_string())));
        assert!(params.iter().all(|(k, _)| *k != "year" && *k != "category"));
    }

    #[test]
    fn zero_limit_requests_first_page() {
        assert_eq!(SearchQuery::new("x").limit(0).offset(50).page(), 1);
    }
}
