//! Resolution policy for new memory items.
//!
//! Given a new piece of text and the nearest stored candidates, the
//! [`Resolver`] derives exactly one storage decision: insert it, drop it as
//! a duplicate or redundant subset, supersede what it extends, or flag a
//! contradiction for manual resolution. Embedding and classification are
//! injected capability services; storage is an injected [`MemoryStore`].
//!
//! One run walks the state machine
//! `Start -> EmbeddingComputed -> Classifying(candidate_i)* -> Decided`:
//! candidates are classified most-similar first, each at most once, and the
//! run terminates at the first decisive label or after exhausting the list.
//!
//! ```no_run
//! use std::sync::Arc;
//! use classify::{ClassificationService, HeuristicRelationshipProvider};
//! use embedding::{EmbeddingService, StubEmbeddingProvider};
//! use resolver::{Resolver, ResolveRequest, ResolverConfig};
//! use store::InMemoryStore;
//!
//! # #[tokio::main] async fn main() -> Result<(), resolver::ResolveError> {
//! let resolver = Resolver::new(
//!     EmbeddingService::new(Arc::new(StubEmbeddingProvider::default())),
//!     ClassificationService::new(Arc::new(HeuristicRelationshipProvider)),
//!     Arc::new(InMemoryStore::new()),
//!     ResolverConfig::default(),
//! )?;
//!
//! let outcome = resolver
//!     .resolve_and_commit(&ResolveRequest::new("the deploy runs on fridays"))
//!     .await?;
//! println!("decision: {:?}", outcome.decision);
//! # Ok(()) }
//! ```

mod engine;
mod types;

pub use crate::engine::{Resolver, EMBED_STAGE, SEARCH_STAGE};
pub use crate::types::{Decision, Resolution, ResolveError, ResolveRequest, ResolverConfig};

// Re-exported so callers can name every stage that may appear in a
// resolution's timing summary without importing the classify crate.
pub use classify::CLASSIFY_STAGE;
