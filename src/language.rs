use crate::QueryError;
use nutype::nutype;

/// A label language code for the `wikibase:label` service, e.g. "en" or "de-ch".
#[nutype(
    sanitize(trim, lowercase),
    validate(regex = "^[a-z]{2}[a-z0-9-]*$"),
    derive(Debug, Display, Clone, PartialEq, AsRef)
)]
pub struct Language(String);

impl Language {
    /// Creates a new language code, mapping validation failures to `QueryError`.
    pub fn new<S: Into<String>>(language: S) -> Result<Language, QueryError> {
        let language = language.into();
        Self::try_new(language.clone()).map_err(|_| QueryError::InvalidLanguage(language))
    }

    /// Returns the language code as a string slice.
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }
}
