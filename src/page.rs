use crate::{
    query_service::{DisplaySelector, Rendered, SparqlFetch},
    CategoryKey, Config, EntityId, QueryBuilder, QueryError, QueryService,
};
use futures::prelude::*;
use std::{collections::HashMap, fmt, sync::Arc};
use tokio::sync::RwLock;
use url::Url;

/// The named HTML containers of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerId {
    Keywords,
    Commentarii,
}

impl ContainerId {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ContainerId::Keywords => "keywords",
            ContainerId::Commentarii => "commentarii",
        }
    }

    /// The container a renderer writes into.
    pub const fn for_display(display: DisplaySelector) -> Self {
        match display {
            DisplaySelector::Results => ContainerId::Keywords,
            DisplaySelector::Commentarii => ContainerId::Commentarii,
        }
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The page the listings are rendered into.
/// Each successful load replaces its container in one step; a failed load leaves it untouched.
/// Concurrent loads are not ordered: the response that arrives last wins.
#[derive(Debug, Clone)]
pub struct Page<F: SparqlFetch = QueryService> {
    fetcher: Arc<F>,
    builder: QueryBuilder,
    containers: Arc<RwLock<HashMap<ContainerId, String>>>,
    max_concurrent: usize,
}

impl Page<QueryService> {
    /// Creates a page that talks to the query service of `config`.
    /// # Errors
    /// Returns an error if the endpoint, item IDs, or language in `config` are invalid.
    pub fn from_config(config: &Config) -> Result<Self, QueryError> {
        let builder = QueryBuilder::from_config(config)?;
        let page = Self::new(QueryService::from_config(config), builder);
        Ok(page.with_max_concurrent(config.max_concurrent()))
    }
}

impl<F: SparqlFetch> Page<F> {
    pub fn new(fetcher: F, builder: QueryBuilder) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            builder,
            containers: Arc::new(RwLock::new(HashMap::new())),
            max_concurrent: 1,
        }
    }

    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    pub const fn builder(&self) -> &QueryBuilder {
        &self.builder
    }

    /// Loads the listing of a category into its container.
    /// `commentarii` goes to the commentarii container, every other key to the keywords container.
    /// # Errors
    /// Returns an error for unknown keys and failed requests; no request is sent for unknown keys.
    pub async fn load_json(&self, key: &str) -> Result<Rendered, QueryError> {
        let key = CategoryKey::new(key).inspect_err(|e| tracing::warn!(%e, "not loading"))?;
        let url = self.builder.listing_url(key);
        self.get_json(key, &url, DisplaySelector::for_listing(key))
            .await
    }

    /// Loads the commentaries linked to the entity `uri` via the predicate of `key`.
    /// `uri` may be a bare ID ("Q42") or an entity URI.
    /// # Errors
    /// Returns an error for unknown keys, URIs without an entity ID, and failed requests.
    pub async fn get_commentarii(&self, uri: &str, key: &str) -> Result<Rendered, QueryError> {
        let key = CategoryKey::new(key).inspect_err(|e| tracing::warn!(%e, "not loading"))?;
        let entity_id = EntityId::from_uri(uri).inspect_err(|e| tracing::warn!(%e, "not loading"))?;
        let url = self.builder.commentaries_url(&entity_id, key);
        self.get_json(key, &url, DisplaySelector::Commentarii).await
    }

    /// Loads several listings at once, at most `max_concurrent` at a time.
    /// Results are returned in the order of `keys`.
    pub async fn load_many(&self, keys: &[CategoryKey]) -> Vec<Result<Rendered, QueryError>> {
        futures::stream::iter(keys.iter().map(|key| self.load_json(key.as_str())))
            .buffered(self.max_concurrent)
            .collect()
            .await
    }

    async fn get_json(
        &self,
        key: CategoryKey,
        url: &Url,
        display: DisplaySelector,
    ) -> Result<Rendered, QueryError> {
        let container = ContainerId::for_display(display);
        let rendered = self
            .fetcher
            .fetch_and_render(key, url, display)
            .await
            .inspect_err(|e| tracing::warn!(%key, %container, %e, "query failed, container unchanged"))?;
        self.replace(container, rendered.to_html()).await;
        tracing::info!(%key, %container, entries = rendered.len(), "container replaced");
        Ok(rendered)
    }

    async fn replace(&self, container: ContainerId, html: String) {
        self.containers.write().await.insert(container, html);
    }

    /// Returns the current HTML of a container, if it was ever filled.
    pub async fn container(&self, container: ContainerId) -> Option<String> {
        self.containers.read().await.get(&container).cloned()
    }

    /// Renders a standalone HTML document holding both containers.
    pub async fn to_html_document(&self, title: &str) -> String {
        let keywords = self.container(ContainerId::Keywords).await.unwrap_or_default();
        self.html_document(title, &keywords).await
    }

    /// Loads the listings of `keys` and all commentaries, and renders them as one document.
    /// Every category listing gets its own `data-key` section inside the keywords section,
    /// in the order of `keys`. A failed load is logged and leaves its section empty.
    pub async fn load_document(&self, title: &str, keys: &[CategoryKey]) -> String {
        let mut sections = String::new();
        for (key, result) in keys.iter().zip(self.load_many(keys).await) {
            let html = match result {
                Ok(Rendered::Categories(listing)) => listing.to_html(),
                Ok(Rendered::Commentarii(_)) => continue,
                Err(e) => {
                    tracing::error!(%key, %e, "listing not loaded");
                    if *key == CategoryKey::Commentarii {
                        continue;
                    }
                    String::new()
                }
            };
            sections.push_str(&format!("<section data-key=\"{key}\">{html}</section>"));
        }
        // The commentarii section always shows all commentaries
        if !keys.contains(&CategoryKey::Commentarii) {
            if let Err(e) = self.load_json(CategoryKey::Commentarii.as_str()).await {
                tracing::error!(key = %CategoryKey::Commentarii, %e, "listing not loaded");
            }
        }
        self.html_document(title, &sections).await
    }

    async fn html_document(&self, title: &str, keywords: &str) -> String {
        let commentarii = self
            .container(ContainerId::Commentarii)
            .await
            .unwrap_or_default();
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n\
             <section id=\"{}\">{keywords}</section>\n\
             <section id=\"{}\">{commentarii}</section>\n\
             </body>\n</html>\n",
            html_escape::encode_text(title),
            ContainerId::Keywords,
            ContainerId::Commentarii,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{sparql_result::Binding, QueryResult};
    use async_trait::async_trait;
    use std::{sync::Mutex, time::Duration};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Answers every query with the same result and records the requested URLs.
    #[derive(Debug, Default)]
    struct StubFetch {
        result: QueryResult,
        urls: Mutex<Vec<Url>>,
    }

    #[async_trait]
    impl SparqlFetch for StubFetch {
        async fn fetch(&self, url: &Url) -> Result<QueryResult, QueryError> {
            self.urls.lock().unwrap().push(url.clone());
            Ok(self.result.clone())
        }
    }

    /// Answers each listing URL with its own result after an optional delay; other URLs fail.
    #[derive(Debug, Default)]
    struct KeyedFetch {
        results: HashMap<Url, (QueryResult, Duration)>,
    }

    impl KeyedFetch {
        fn with(mut self, key: CategoryKey, bindings: Vec<Binding>, delay: Duration) -> Self {
            let url = default_builder().listing_url(key);
            self.results
                .insert(url, (QueryResult::from_bindings(bindings), delay));
            self
        }
    }

    #[async_trait]
    impl SparqlFetch for KeyedFetch {
        async fn fetch(&self, url: &Url) -> Result<QueryResult, QueryError> {
            let Some((result, delay)) = self.results.get(url) else {
                return Err(QueryError::ApiError {
                    status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                    status_text: "Service Unavailable".to_owned(),
                    body: String::new(),
                });
            };
            tokio::time::sleep(*delay).await;
            Ok(result.clone())
        }
    }

    fn default_builder() -> QueryBuilder {
        QueryBuilder::from_config(&Config::default()).unwrap()
    }

    fn persons_page() -> Page<StubFetch> {
        let fetcher = StubFetch {
            result: QueryResult::from_bindings(vec![
                Binding::new("http://www.wikidata.org/entity/Q42", "Gaius"),
                Binding::new("http://www.wikidata.org/entity/Q43", "Lucius"),
            ]),
            urls: Mutex::new(vec![]),
        };
        Page::new(fetcher, default_builder())
    }

    fn mock_page(mock_server: &MockServer) -> Page {
        let config = Config::default().with_endpoint(format!("{}/sparql", mock_server.uri()));
        Page::from_config(&config).unwrap()
    }

    fn fixture(name: &str) -> serde_json::Value {
        let s = std::fs::read_to_string(format!("test_data/{name}")).unwrap();
        serde_json::from_str(&s).unwrap()
    }

    #[test]
    fn test_container_ids() {
        assert_eq!(ContainerId::Keywords.to_string(), "keywords");
        assert_eq!(ContainerId::Commentarii.as_str(), "commentarii");
        assert_eq!(
            ContainerId::for_display(DisplaySelector::Results),
            ContainerId::Keywords
        );
    }

    #[tokio::test]
    async fn test_load_json_persons() {
        let page = persons_page();
        let rendered = page.load_json("persons").await.unwrap();
        let Rendered::Categories(listing) = &rendered else {
            panic!("expected a category listing");
        };
        assert_eq!(listing.buttons().len(), 2);
        let html = page.container(ContainerId::Keywords).await.unwrap();
        assert_eq!(
            html,
            "<div>\
             <button onclick='getCommentarii(\"Q42\", \"persons\")'>Gaius</button>\
             <button onclick='getCommentarii(\"Q43\", \"persons\")'>Lucius</button>\
             </div>"
        );
        assert!(page.container(ContainerId::Commentarii).await.is_none());
        let urls = page.fetcher.urls.lock().unwrap().clone();
        assert_eq!(urls, vec![page.builder().listing_url(CategoryKey::Persons)]);
    }

    #[tokio::test]
    async fn test_follow_up_matches_button() {
        let page = persons_page();
        let Rendered::Categories(listing) = page.load_json("persons").await.unwrap() else {
            panic!("expected a category listing");
        };
        for button in listing.buttons() {
            page.get_commentarii(button.entity_id().as_str(), button.key().as_str())
                .await
                .unwrap();
        }
        let urls = page.fetcher.urls.lock().unwrap().clone();
        assert_eq!(urls.len(), 3);
        assert_eq!(urls[1], listing.buttons()[0].follow_up_url(page.builder()));
        assert_eq!(urls[2], listing.buttons()[1].follow_up_url(page.builder()));
        assert!(page.container(ContainerId::Commentarii).await.is_some());
    }

    #[tokio::test]
    async fn test_load_json_commentarii_goes_to_commentarii_container() {
        let page = persons_page();
        let rendered = page.load_json("commentarii").await.unwrap();
        assert!(matches!(rendered, Rendered::Commentarii(_)));
        assert!(page.container(ContainerId::Keywords).await.is_none());
        let html = page.container(ContainerId::Commentarii).await.unwrap();
        assert_eq!(
            html,
            "<div><div data-entity=\"Q42\">Gaius</div><div data-entity=\"Q43\">Lucius</div></div>"
        );
    }

    #[tokio::test]
    async fn test_load_json_unknown_key_sends_nothing() {
        let page = persons_page();
        page.load_json("keywords").await.unwrap();
        let before = page.container(ContainerId::Keywords).await;
        let err = page.load_json("nonexistent").await.unwrap_err();
        assert!(matches!(err, QueryError::UnknownCategoryKey(_)));
        assert_eq!(page.container(ContainerId::Keywords).await, before);
        assert_eq!(page.fetcher.urls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_commentarii_invalid_uri() {
        let page = persons_page();
        let err = page
            .get_commentarii("http://www.wikidata.org/entity/P31", "persons")
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::NoEntityIdInUri(_)));
        assert!(page.fetcher.urls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_result_renders_empty_wrapper() {
        let page = Page::new(StubFetch::default(), default_builder());
        page.load_json("places").await.unwrap();
        page.get_commentarii("Q1", "places").await.unwrap();
        assert_eq!(
            page.container(ContainerId::Keywords).await.unwrap(),
            "<div></div>"
        );
        assert_eq!(
            page.container(ContainerId::Commentarii).await.unwrap(),
            "<div></div>"
        );
    }

    #[tokio::test]
    async fn test_load_many() {
        let page = persons_page().with_max_concurrent(2);
        let results = page
            .load_many(&[CategoryKey::Keywords, CategoryKey::Commentarii])
            .await;
        assert_eq!(results.len(), 2);
        assert!(matches!(results[0], Ok(Rendered::Categories(_))));
        assert!(matches!(results[1], Ok(Rendered::Commentarii(_))));
        assert_eq!(page.fetcher.urls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_http_error_leaves_container_unchanged() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(fixture("persons_response.json")))
            .up_to_n_times(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;
        let page = mock_page(&mock_server);
        page.load_json("persons").await.unwrap();
        let before = page.container(ContainerId::Keywords).await.unwrap();
        assert!(before.contains("Gaius"));

        let err = page.load_json("keywords").await.unwrap_err();
        assert_eq!(err.status(), Some(reqwest::StatusCode::SERVICE_UNAVAILABLE));
        assert_eq!(page.container(ContainerId::Keywords).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_end_to_end_commentarii() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(fixture("commentarii_response.json")),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
        let page = mock_page(&mock_server);
        let rendered = page
            .get_commentarii("http://www.wikidata.org/entity/Q42", "persons")
            .await
            .unwrap();
        assert_eq!(rendered.len(), 3);
        let html = page.container(ContainerId::Commentarii).await.unwrap();
        assert!(html.contains("Gellius &amp; &lt;Favorinus&gt;"));
    }

    #[tokio::test]
    async fn test_to_html_document() {
        let page = persons_page();
        page.load_json("quotes").await.unwrap();
        let doc = page.to_html_document("Noctes & Commentarii").await;
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>Noctes &amp; Commentarii</title>"));
        assert!(doc.contains("<section id=\"keywords\"><div><button"));
        assert!(doc.contains("<section id=\"commentarii\"></section>"));
    }

    #[tokio::test]
    async fn test_load_document_keeps_every_listing() {
        let fetcher = KeyedFetch::default()
            .with(
                CategoryKey::Persons,
                vec![Binding::new("http://www.wikidata.org/entity/Q42", "Gaius")],
                Duration::from_millis(100),
            )
            .with(
                CategoryKey::Places,
                vec![Binding::new("http://www.wikidata.org/entity/Q220", "Roma")],
                Duration::ZERO,
            )
            .with(
                CategoryKey::Commentarii,
                vec![Binding::new("http://www.wikidata.org/entity/Q7", "Commentarius")],
                Duration::ZERO,
            );
        let page = Page::new(fetcher, default_builder()).with_max_concurrent(2);
        let doc = page
            .load_document("Noctes", &[CategoryKey::Persons, CategoryKey::Places])
            .await;
        let persons = doc
            .find("<section data-key=\"persons\"><div><button onclick='getCommentarii(\"Q42\", \"persons\")'>Gaius</button></div></section>")
            .unwrap();
        let places = doc
            .find("<section data-key=\"places\"><div><button onclick='getCommentarii(\"Q220\", \"places\")'>Roma</button></div></section>")
            .unwrap();
        assert!(persons < places);
        assert!(doc.contains(
            "<section id=\"commentarii\"><div><div data-entity=\"Q7\">Commentarius</div></div></section>"
        ));
    }

    #[tokio::test]
    async fn test_load_document_logs_and_continues_on_failure() {
        // Neither quotes nor the commentarii listing have an answer
        let fetcher = KeyedFetch::default().with(
            CategoryKey::Places,
            vec![Binding::new("http://www.wikidata.org/entity/Q220", "Roma")],
            Duration::ZERO,
        );
        let page = Page::new(fetcher, default_builder());
        let doc = page
            .load_document("Noctes", &[CategoryKey::Quotes, CategoryKey::Places])
            .await;
        assert!(doc.contains("<section data-key=\"quotes\"></section><section data-key=\"places\"><div><button"));
        assert!(doc.contains("Roma"));
        assert!(doc.contains("<section id=\"commentarii\"></section>"));
        assert!(page.container(ContainerId::Commentarii).await.is_none());
    }

    #[tokio::test]
    async fn test_load_document_with_commentarii_key() {
        let page = persons_page();
        let doc = page
            .load_document("Noctes", &[CategoryKey::Commentarii, CategoryKey::Keywords])
            .await;
        assert!(!doc.contains("data-key=\"commentarii\""));
        assert!(doc.contains("<section data-key=\"keywords\"><div><button"));
        assert!(doc.contains("<section id=\"commentarii\"><div><div data-entity=\"Q42\">Gaius</div>"));
        // The commentarii listing is not loaded a second time
        assert_eq!(page.fetcher.urls.lock().unwrap().len(), 2);
    }
}
