// Traits
pub use crate::query_service::SparqlFetch;

// Structs and enums
pub use crate::category_key::{CategoryKey, Predicate};
pub use crate::config::Config;
pub use crate::entity_id::EntityId;
pub use crate::error::QueryError;
pub use crate::page::{ContainerId, Page};
pub use crate::query::{build_query, QueryFrame, SparqlQuery};
pub use crate::query_builder::QueryBuilder;
pub use crate::query_service::{DisplaySelector, QueryService, Rendered};
pub use crate::render::{CategoryButton, CategoryListing, CommentaryBlock, CommentaryListing};
pub use crate::sparql_result::{Binding, QueryResult};
