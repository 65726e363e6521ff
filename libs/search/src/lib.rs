//! Full-text search index used as a secondary read model.
//!
//! MongoDB stays the source of truth. Every write is mirrored into an
//! index via [`SearchMirror`]; list endpoints query the index and then load
//! the matching records from the database.

pub mod config;
pub mod elasticsearch;
pub mod error;
pub mod index;
pub mod memory;
pub mod mirror;
pub mod query;

pub use config::SearchConfig;
pub use elasticsearch::ElasticsearchClient;
pub use error::{SearchError, SearchResult};
pub use index::{SearchHit, SearchHits, SearchIndex, order_by_ids};
pub use memory::{InMemorySearchIndex, SearchCall};
pub use mirror::SearchMirror;
pub use query::{SearchQuery, TermFilter};
