//! Search orchestration
//!
//! Wires the pipeline together: query understanding → filter resolution →
//! predicate conjunction → ranking. Each request runs against one catalog
//! snapshot, so concurrent searches need no locking and a concurrent catalog
//! reload never produces a partially updated view.

use anyhow::Result;

use crate::catalog::VenueCatalog;
use crate::filters::{ParsedFilters, resolve};
use crate::models::{SortKey, Venue};
use crate::parser::QueryParser;
use crate::rank::rank;
use crate::search::search;

/// A caller-facing search request
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    /// Free-text query; may be empty
    pub query: String,
    /// Explicit filters, which take precedence over anything parsed from the
    /// query text
    pub filters: ParsedFilters,
    /// Sort key applied after filtering
    pub sort: SortKey,
    /// Optional cap on the number of results
    pub limit: Option<usize>,
}

/// The assembled search pipeline
pub struct VenueSearch<P> {
    catalog: VenueCatalog,
    parser: P,
}

impl<P: QueryParser> VenueSearch<P> {
    pub fn new(catalog: VenueCatalog, parser: P) -> Self {
        Self { catalog, parser }
    }

    pub fn catalog(&self) -> &VenueCatalog {
        &self.catalog
    }

    /// Execute one search request, returning the ordered result list.
    ///
    /// The only error this can produce is a malformed explicit filter; an
    /// empty result is a successful outcome, and a failing LLM collaborator
    /// is absorbed by the parser strategy.
    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<Venue>> {
        let parsed = if request.query.trim().is_empty() {
            ParsedFilters::default()
        } else {
            self.parser.parse(&request.query).await?
        };

        let filters = resolve(&request.query, &request.filters, &parsed)?;
        log::debug!("resolved filters: {filters:?}");

        let snapshot = self.catalog.snapshot();
        let mut results = rank(search(&snapshot, &filters), request.sort);

        if let Some(limit) = request.limit {
            results.truncate(limit);
        }

        log::info!(
            "query {:?} returned {} venue(s) via {} parser",
            request.query,
            results.len(),
            self.parser.name()
        );
        Ok(results)
    }
}
