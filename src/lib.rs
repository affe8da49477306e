//! VenueLens: smart search for coworking spaces and startup incubators
//!
//! VenueLens turns free-text queries into structured facet filters and runs
//! them over an in-memory venue catalog, returning a deterministically
//! ranked result list.
//!
//! # Architecture
//!
//! - **Parser**: query understanding as a strategy; a deterministic
//!   rule-based grammar is always available, and an optional LLM provider
//!   can sit in front of it with the rules as guaranteed fallback
//! - **Resolver**: merges explicit caller filters with parsed filters under
//!   explicit-wins precedence into one canonical filter set
//! - **Search**: applies the filter set as an ordered predicate conjunction
//!   over a catalog snapshot
//! - **Ranker**: stable sort by trust score or price
//!
//! # Example Usage
//!
//! ```no_run
//! use venuelens::{ParsedFilters, RuleParser, SortKey, VenueCatalog};
//! use venuelens::{rank, resolve, search};
//!
//! let catalog = VenueCatalog::demo();
//! let parser = RuleParser::new();
//!
//! let query = "coworking space in mumbai with 20 seats";
//! let parsed = parser.parse(query);
//! let filters = resolve(query, &ParsedFilters::default(), &parsed).unwrap();
//!
//! let results = rank(search(&catalog.snapshot(), &filters), SortKey::Trust);
//! for venue in &results {
//!     println!("{} ({:.1})", venue.name, venue.trust_score);
//! }
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod engine;
pub mod filters;
pub mod models;
pub mod normalize;
pub mod output;
pub mod parser;
pub mod rank;
pub mod schemes;
pub mod search;

// Re-export commonly used types
pub use catalog::VenueCatalog;
pub use engine::{SearchRequest, VenueSearch};
pub use filters::{ParsedFilters, SearchFilters, resolve};
pub use models::{SortKey, Venue, VenueKind};
pub use parser::{LlmParser, QueryParser, RuleParser, SmartParser};
pub use rank::rank;
pub use search::search;
