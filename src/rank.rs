//! Result ranking
//!
//! A stable sort over one of the fixed sort keys. Stability is the only
//! tie-break: venues with equal key values keep their relative input order,
//! which keeps ordering deterministic without a secondary key.

use crate::models::{SortKey, Venue};

/// Order filtered venues by the given sort key.
pub fn rank(mut venues: Vec<Venue>, key: SortKey) -> Vec<Venue> {
    match key {
        SortKey::Trust => {
            venues.sort_by(|a, b| b.trust_score.total_cmp(&a.trust_score));
        }
        SortKey::PriceLow => {
            venues.sort_by(|a, b| a.pricing.amount.cmp(&b.pricing.amount));
        }
        SortKey::PriceHigh => {
            venues.sort_by(|a, b| b.pricing.amount.cmp(&a.pricing.amount));
        }
    }
    venues
}
