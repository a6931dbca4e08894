#![forbid(unsafe_code)]
#![warn(
    clippy::cognitive_complexity,
    clippy::dbg_macro,
    clippy::debug_assert_with_mut_call,
    clippy::doc_link_with_quotes,
    clippy::doc_markdown,
    clippy::empty_line_after_outer_attr,
    clippy::empty_structs_with_brackets,
    clippy::float_cmp,
    clippy::float_cmp_const,
    clippy::float_equality_without_abs,
    keyword_idents,
    clippy::missing_const_for_fn,
    missing_copy_implementations,
    missing_debug_implementations,
    // clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::mod_module_files,
    non_ascii_idents,
    noop_method_call,
    clippy::option_if_let_else,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::semicolon_if_nothing_returned,
    clippy::unseparated_literal_suffix,
    clippy::shadow_unrelated,
    clippy::similar_names,
    clippy::suspicious_operation_groupings,
    unused_extern_crates,
    unused_import_braces,
    unused_crate_dependencies,
    clippy::unused_self,
    clippy::use_debug,
    clippy::used_underscore_binding,
    clippy::useless_let_if_seq,
    clippy::wildcard_dependencies,
    clippy::wildcard_imports
)]

//! **Noctes Commentarii** queries the [Wikidata Query Service](https://query.wikidata.org)
//! for the keywords, persons, places and cited works of the
//! [Noctes Atticae](https://www.wikidata.org/wiki/Q660519), and for the commentaries on it.
//! Results are rendered as HTML fragments: category listings as buttons that
//! trigger a follow-up query, commentaries as plain blocks.

// Used by the `noctes` binary only.
use anyhow as _;
use clap as _;
use tracing_subscriber as _;

pub mod category_key;
pub mod config;
pub mod entity_id;
pub mod error;
pub mod language;
pub mod page;
pub mod prelude;
pub mod query;
pub mod query_builder;
pub mod query_service;
pub mod render;
pub mod sparql_result;

pub use category_key::{CategoryKey, Predicate};
pub use config::Config;
pub use entity_id::EntityId;
pub use error::QueryError;
pub use language::Language;
pub use page::{ContainerId, Page};
pub use query::{build_query, QueryFrame, QueryTemplates, SparqlQuery};
pub use query_builder::QueryBuilder;
pub use query_service::{DisplaySelector, QueryService, QueryServiceBuilder, Rendered, SparqlFetch};
pub use sparql_result::QueryResult;
