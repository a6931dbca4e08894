use crate::{
    render::{render_categories, render_commentarii, CategoryListing, CommentaryListing},
    CategoryKey, Config, QueryError, QueryResult,
};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use url::Url;

/// The default user agent
const DEFAULT_USER_AGENT: &str = "Rust Noctes Commentarii";

const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Which renderer a response goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplaySelector {
    Results,
    Commentarii,
}

impl DisplaySelector {
    /// The selector used when loading the listing of a key.
    pub const fn for_listing(key: CategoryKey) -> Self {
        match key {
            CategoryKey::Commentarii => DisplaySelector::Commentarii,
            _ => DisplaySelector::Results,
        }
    }
}

/// The output of one of the two renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Categories(CategoryListing),
    Commentarii(CommentaryListing),
}

impl Rendered {
    pub fn to_html(&self) -> String {
        match self {
            Rendered::Categories(listing) => listing.to_html(),
            Rendered::Commentarii(listing) => listing.to_html(),
        }
    }

    /// Number of rendered entries.
    pub fn len(&self) -> usize {
        match self {
            Rendered::Categories(listing) => listing.buttons().len(),
            Rendered::Commentarii(listing) => listing.blocks().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Something that can run a query URL and return the decoded result.
#[async_trait]
pub trait SparqlFetch: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<QueryResult, QueryError>;

    /// Fetches `url` and hands the result to the renderer picked by `display`.
    async fn fetch_and_render(
        &self,
        key: CategoryKey,
        url: &Url,
        display: DisplaySelector,
    ) -> Result<Rendered, QueryError> {
        let result = self.fetch(url).await?;
        match display {
            DisplaySelector::Results => Ok(Rendered::Categories(render_categories(&result, key)?)),
            DisplaySelector::Commentarii => Ok(Rendered::Commentarii(render_commentarii(&result)?)),
        }
    }
}

/// HTTP client for a SPARQL query service.
#[derive(Debug, Clone)]
pub struct QueryService {
    client: reqwest::Client,
    user_agent: String,
}

impl QueryService {
    /// Returns a `QueryServiceBuilder`
    pub fn builder() -> QueryServiceBuilder {
        QueryServiceBuilder::default()
    }

    /// Creates a service using the user agent of a `Config`.
    pub fn from_config(config: &Config) -> Self {
        let mut builder = Self::builder();
        if let Some(user_agent) = config.user_agent() {
            builder = builder.with_user_agent(user_agent);
        }
        builder.build()
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub const fn client(&self) -> &reqwest::Client {
        &self.client
    }

    fn headers(&self) -> Result<HeaderMap, QueryError> {
        let mut headers = HeaderMap::new();
        let user_agent = HeaderValue::from_str(&self.user_agent)
            .map_err(|_| QueryError::InvalidHeader(self.user_agent.to_owned()))?;
        headers.insert(USER_AGENT, user_agent);
        headers.insert(ACCEPT, HeaderValue::from_static(SPARQL_RESULTS_JSON));
        Ok(headers)
    }
}

#[async_trait]
impl SparqlFetch for QueryService {
    async fn fetch(&self, url: &Url) -> Result<QueryResult, QueryError> {
        tracing::debug!(%url, "sending SPARQL query");
        let response = self
            .client
            .get(url.clone())
            .headers(self.headers()?)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(QueryError::from_response(response).await);
        }
        let body = response.text().await?;
        let result = QueryResult::from_json_str(&body)?;
        tracing::debug!(bindings = result.len(), "SPARQL query answered");
        Ok(result)
    }
}

#[derive(Debug, Default)]
pub struct QueryServiceBuilder {
    client: Option<reqwest::Client>,
    user_agent: Option<String>,
}

impl QueryServiceBuilder {
    /// Sets the user agent. By default, the user agent is "Rust Noctes Commentarii; {`package_name`}/{`package_version`}"
    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the `reqwest::Client`. By default, a new `reqwest::Client` is created.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Builds the `QueryService`, consuming the builder.
    pub fn build(self) -> QueryService {
        QueryService {
            client: self.client.unwrap_or_default(),
            user_agent: self.user_agent.unwrap_or_else(Self::default_user_agent),
        }
    }

    /// Returns the default user agent, a versioned string based on `DEFAULT_USER_AGENT`.
    fn default_user_agent() -> String {
        format!(
            "{DEFAULT_USER_AGENT}; {}/{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        )
    }
}
