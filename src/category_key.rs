use crate::QueryError;
use std::{fmt, str::FromStr};

/// A Wikidata property linking a work to the entities of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Predicate {
    MainSubject,
    SignificantPerson,
    NarrativeLocation,
    CitedWork,
}

impl Predicate {
    /// Returns the property ID
    pub const fn property(&self) -> &'static str {
        match self {
            Predicate::MainSubject => "P921",
            Predicate::SignificantPerson => "P3342",
            Predicate::NarrativeLocation => "P840",
            Predicate::CitedWork => "P2860",
        }
    }
}

/// Selects which relation (and thus which query template) applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryKey {
    Keywords,
    Persons,
    Places,
    Quotes,
    Commentarii,
}

impl CategoryKey {
    pub const ALL: [CategoryKey; 5] = [
        CategoryKey::Keywords,
        CategoryKey::Persons,
        CategoryKey::Places,
        CategoryKey::Quotes,
        CategoryKey::Commentarii,
    ];

    /// Create a new `CategoryKey` from a string
    pub fn new<S: Into<String>>(s: S) -> Result<Self, QueryError> {
        let s = s.into();
        match s.as_str() {
            "keywords" => Ok(CategoryKey::Keywords),
            "persons" => Ok(CategoryKey::Persons),
            "places" => Ok(CategoryKey::Places),
            "quotes" => Ok(CategoryKey::Quotes),
            "commentarii" => Ok(CategoryKey::Commentarii),
            _ => Err(QueryError::UnknownCategoryKey(s)),
        }
    }

    /// Returns the `CategoryKey` as a string
    pub const fn as_str(&self) -> &'static str {
        match self {
            CategoryKey::Keywords => "keywords",
            CategoryKey::Persons => "persons",
            CategoryKey::Places => "places",
            CategoryKey::Quotes => "quotes",
            CategoryKey::Commentarii => "commentarii",
        }
    }

    /// Returns the predicate for this key; `Commentarii` has none.
    pub const fn predicate(&self) -> Option<Predicate> {
        match self {
            CategoryKey::Keywords => Some(Predicate::MainSubject),
            CategoryKey::Persons => Some(Predicate::SignificantPerson),
            CategoryKey::Places => Some(Predicate::NarrativeLocation),
            CategoryKey::Quotes => Some(Predicate::CitedWork),
            CategoryKey::Commentarii => None,
        }
    }
}

impl FromStr for CategoryKey {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
