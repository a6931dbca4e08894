use crate::{EntityId, QueryError};
use serde::{Deserialize, Serialize};

/// One RDF term of a binding, as in the SPARQL 1.1 JSON results format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    #[serde(rename = "type")]
    term_type: String,
    value: String,
    #[serde(rename = "xml:lang", skip_serializing_if = "Option::is_none")]
    lang: Option<String>,
}

impl Term {
    pub fn new<S1: Into<String>, S2: Into<String>>(term_type: S1, value: S2) -> Self {
        Self {
            term_type: term_type.into(),
            value: value.into(),
            lang: None,
        }
    }

    pub fn term_type(&self) -> &str {
        &self.term_type
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }
}

/// One row of a result: an item and its label. Either may be unbound.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Binding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    item: Option<Term>,
    #[serde(rename = "itemLabel", default, skip_serializing_if = "Option::is_none")]
    item_label: Option<Term>,
}

impl Binding {
    /// Binding of an item URI and a plain literal label.
    pub fn new<S1: Into<String>, S2: Into<String>>(item: S1, label: S2) -> Self {
        Self {
            item: Some(Term::new("uri", item)),
            item_label: Some(Term::new("literal", label)),
        }
    }

    pub const fn item(&self) -> Option<&Term> {
        self.item.as_ref()
    }

    pub const fn item_label(&self) -> Option<&Term> {
        self.item_label.as_ref()
    }

    /// Returns the label of the binding at `index`.
    /// # Errors
    /// Returns `MissingField` if `itemLabel` is unbound.
    pub fn label_at(&self, index: usize) -> Result<&str, QueryError> {
        self.item_label
            .as_ref()
            .map(Term::value)
            .ok_or_else(|| QueryError::MissingField {
                field: "itemLabel".to_string(),
                index,
            })
    }

    /// Returns the entity ID of the item of the binding at `index`.
    /// # Errors
    /// Returns `MissingField` if `item` is unbound, or an error if its URI has no entity ID.
    pub fn entity_id_at(&self, index: usize) -> Result<EntityId, QueryError> {
        let item = self.item.as_ref().ok_or_else(|| QueryError::MissingField {
            field: "item".to_string(),
            index,
        })?;
        EntityId::from_uri(item.value())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Head {
    #[serde(default)]
    vars: Vec<String>,
}

impl Head {
    pub fn vars(&self) -> &[String] {
        &self.vars
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Bindings {
    bindings: Vec<Binding>,
}

/// A decoded SPARQL JSON response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    head: Head,
    results: Bindings,
}

impl QueryResult {
    /// Builds a result from bindings, e.g. for tests or cached data.
    pub fn from_bindings(bindings: Vec<Binding>) -> Self {
        Self {
            head: Head {
                vars: vec!["itemLabel".to_string(), "item".to_string()],
            },
            results: Bindings { bindings },
        }
    }

    /// Parses a SPARQL JSON response body.
    /// # Errors
    /// Returns an error if the body is not a SPARQL JSON result.
    pub fn from_json_str(s: &str) -> Result<Self, QueryError> {
        Ok(serde_json::from_str(s)?)
    }

    pub const fn head(&self) -> &Head {
        &self.head
    }

    /// The bindings, in server order.
    pub fn bindings(&self) -> &[Binding] {
        &self.results.bindings
    }

    pub fn is_empty(&self) -> bool {
        self.results.bindings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.results.bindings.len()
    }
}
