use crate::QueryError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The public Wikidata query service
pub const WIKIDATA_SPARQL_ENDPOINT: &str = "https://query.wikidata.org/sparql";

/// Noctes Atticae
pub const NOCTES_ATTICAE: &str = "Q660519";

/// Commentary
pub const COMMENTARY_CLASS: &str = "Q1980247";

const DEFAULT_LANGUAGE: &str = "en";
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Settings for the query service and the query templates.
/// Every field is optional in a TOML file; missing fields take the Wikidata defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    endpoint: String,
    root_item: String,
    commentary_class: String,
    language: String,
    user_agent: Option<String>,
    max_concurrent: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: WIKIDATA_SPARQL_ENDPOINT.to_string(),
            root_item: NOCTES_ATTICAE.to_string(),
            commentary_class: COMMENTARY_CLASS.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            user_agent: None,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }
}

impl Config {
    /// Parses a TOML document.
    /// # Errors
    /// Returns an error if the document is not valid TOML for this struct.
    pub fn from_toml_str(s: &str) -> Result<Self, QueryError> {
        Ok(toml::from_str(s)?)
    }

    /// Reads and parses a TOML config file.
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, QueryError> {
        let s = std::fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Sets the SPARQL endpoint URL.
    pub fn with_endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the item all queried works must be part of.
    pub fn with_root_item<S: Into<String>>(mut self, root_item: S) -> Self {
        self.root_item = root_item.into();
        self
    }

    /// Sets the label language.
    pub fn with_language<S: Into<String>>(mut self, language: S) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub const fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn root_item(&self) -> &str {
        &self.root_item
    }

    pub fn commentary_class(&self) -> &str {
        &self.commentary_class
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    /// Maximum number of listings loaded at the same time; never less than 1.
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent.max(1)
    }
}
