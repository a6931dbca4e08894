use crate::QueryError;
use nutype::nutype;
use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::unwrap_used)] // constant pattern
static ENTITY_ID_IN_URI: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Q[0-9]+").unwrap());

/// A Wikidata item ID, e.g. "Q42".
#[nutype(
    sanitize(trim),
    validate(regex = "^Q[0-9]+$"),
    derive(Debug, Display, Clone, PartialEq, Eq, Hash, AsRef)
)]
pub struct EntityId(String);

impl EntityId {
    /// Creates a new entity ID, mapping validation failures to `QueryError`.
    pub fn new<S: Into<String>>(id: S) -> Result<EntityId, QueryError> {
        let id = id.into();
        Self::try_new(id.clone()).map_err(|_| QueryError::InvalidEntityId(id))
    }

    /// Extracts the entity ID from an entity URI such as
    /// `http://www.wikidata.org/entity/Q42`.
    /// If the URI contains several `Q<digits>` tokens, the last one wins.
    pub fn from_uri(uri: &str) -> Result<EntityId, QueryError> {
        let id = ENTITY_ID_IN_URI
            .find_iter(uri)
            .last()
            .ok_or_else(|| QueryError::NoEntityIdInUri(uri.to_owned()))?;
        Self::new(id.as_str())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }
}
