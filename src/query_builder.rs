use crate::{
    query::{build_query, QueryFrame, QueryTemplates, SparqlQuery},
    CategoryKey, Config, EntityId, QueryError,
};
use url::Url;

/// Turns category keys into ready-to-send query service URLs.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryBuilder {
    endpoint: Url,
    templates: QueryTemplates,
}

impl QueryBuilder {
    pub const fn new(endpoint: Url, templates: QueryTemplates) -> Self {
        Self {
            endpoint,
            templates,
        }
    }

    /// Creates a builder from the endpoint and template values of a `Config`.
    /// # Errors
    /// Returns an error if the endpoint URL, an item ID, or the language is invalid.
    pub fn from_config(config: &Config) -> Result<Self, QueryError> {
        let endpoint = Url::parse(config.endpoint())?;
        let templates = QueryTemplates::from_config(config)?;
        Ok(Self::new(endpoint, templates))
    }

    /// Returns the URL for a query; the query text is percent-encoded exactly once.
    pub fn url_for(&self, query: &SparqlQuery) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("query", &query.to_sparql(&self.templates))
            .append_pair("format", "json");
        url
    }

    /// Returns the URL for a key in the given frame.
    pub fn url(&self, key: CategoryKey, frame: &QueryFrame) -> Url {
        self.url_for(&build_query(key, frame))
    }

    /// Parses a key string and returns the URL for it.
    /// # Errors
    /// Returns `QueryError::UnknownCategoryKey` for keys outside the registry.
    pub fn build_url(&self, key: &str, frame: &QueryFrame) -> Result<Url, QueryError> {
        let key = CategoryKey::new(key)?;
        Ok(self.url(key, frame))
    }

    /// URL listing everything of a category.
    pub fn listing_url(&self, key: CategoryKey) -> Url {
        self.url(key, &QueryFrame::Listing)
    }

    /// URL listing the commentaries linked to `entity` via the key's predicate.
    pub fn commentaries_url(&self, entity: &EntityId, key: CategoryKey) -> Url {
        self.url(key, &QueryFrame::CommentariesFor(entity.to_owned()))
    }

    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub const fn templates(&self) -> &QueryTemplates {
        &self.templates
    }
}
