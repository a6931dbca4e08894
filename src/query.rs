use crate::{CategoryKey, Config, EntityId, Language, Predicate, QueryError};

/// What the caller wants the key's predicate to be used for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryFrame {
    /// All entities the works are linked to via the predicate.
    Listing,
    /// Commentaries linked to the given entity via the predicate.
    CommentariesFor(EntityId),
}

/// A typed SPARQL query, rendered to text by `to_sparql`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SparqlQuery {
    Related {
        predicate: Predicate,
    },
    AllCommentaries,
    CommentariesFor {
        predicate: Predicate,
        entity: EntityId,
    },
}

/// Maps a category key and a frame to a query.
/// `Commentarii` always lists all commentaries, whatever the frame.
pub fn build_query(key: CategoryKey, frame: &QueryFrame) -> SparqlQuery {
    match (key.predicate(), frame) {
        (None, _) => SparqlQuery::AllCommentaries,
        (Some(predicate), QueryFrame::Listing) => SparqlQuery::Related { predicate },
        (Some(predicate), QueryFrame::CommentariesFor(entity)) => SparqlQuery::CommentariesFor {
            predicate,
            entity: entity.to_owned(),
        },
    }
}

/// The validated values substituted into every query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryTemplates {
    root_item: EntityId,
    commentary_class: EntityId,
    language: Language,
}

impl QueryTemplates {
    pub const fn new(root_item: EntityId, commentary_class: EntityId, language: Language) -> Self {
        Self {
            root_item,
            commentary_class,
            language,
        }
    }

    /// Validates the template values of a `Config`.
    /// # Errors
    /// Returns an error if an item ID or the language code is invalid.
    pub fn from_config(config: &Config) -> Result<Self, QueryError> {
        Ok(Self {
            root_item: EntityId::new(config.root_item())?,
            commentary_class: EntityId::new(config.commentary_class())?,
            language: Language::new(config.language())?,
        })
    }

    pub const fn root_item(&self) -> &EntityId {
        &self.root_item
    }

    pub const fn commentary_class(&self) -> &EntityId {
        &self.commentary_class
    }

    pub const fn language(&self) -> &Language {
        &self.language
    }
}

impl SparqlQuery {
    /// Renders the query text.
    pub fn to_sparql(&self, templates: &QueryTemplates) -> String {
        let root = templates.root_item();
        let class = templates.commentary_class();
        let language = templates.language();
        match self {
            SparqlQuery::Related { predicate } => format!(
                "SELECT DISTINCT ?itemLabel ?item WHERE {{\n\
                 ?work wdt:P361* wd:{root}.\n\
                 ?work wdt:{property} ?item.\n\
                 SERVICE wikibase:label {{ bd:serviceParam wikibase:language \"{language}\" }}\n\
                 }}\n\
                 ORDER BY ASC(UCASE(str(?itemLabel)))",
                property = predicate.property()
            ),
            SparqlQuery::AllCommentaries => format!(
                "SELECT ?itemLabel ?item WHERE {{\n\
                 SERVICE wikibase:label {{ bd:serviceParam wikibase:language \"[AUTO_LANGUAGE],{language}\". }}\n\
                 ?item wdt:P361* wd:{root}.\n\
                 ?item wdt:P31 wd:{class}.\n\
                 }}"
            ),
            SparqlQuery::CommentariesFor { predicate, entity } => format!(
                "SELECT ?itemLabel ?item WHERE {{\n\
                 ?item wdt:P31 wd:{class}.\n\
                 ?item wdt:P361* wd:{root}.\n\
                 ?item wdt:{property} wd:{entity}.\n\
                 SERVICE wikibase:label {{ bd:serviceParam wikibase:language \"{language}\". }}\n\
                 }}",
                property = predicate.property()
            ),
        }
    }
}
