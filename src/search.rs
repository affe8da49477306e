//! Faceted search over the venue catalog
//!
//! Applies the resolved filter set as an ordered conjunction: a venue is
//! included only if it satisfies every active predicate. Predicate order
//! does not affect the result, it is just the canonical sequence. Absent
//! filter fields impose no constraint, so empty filters return the whole
//! catalog in catalog order.

use crate::filters::SearchFilters;
use crate::models::Venue;
use crate::schemes;

/// Filter the catalog snapshot down to venues matching every active
/// predicate.
pub fn search(venues: &[Venue], filters: &SearchFilters) -> Vec<Venue> {
    let mut results: Vec<Venue> = venues.to_vec();

    // 1. Raw-query text match against name, area, city, and address. Only
    //    set when parsing extracted nothing structured from the query.
    if let Some(query) = &filters.raw_query {
        let q = query.to_lowercase();
        results.retain(|v| {
            v.name.to_lowercase().contains(&q)
                || v.location.area.to_lowercase().contains(&q)
                || v.location.city.to_lowercase().contains(&q)
                || v.location.address.as_ref().is_some_and(|a| a.to_lowercase().contains(&q))
        });
    }

    // 2. Kind equality
    if let Some(kind) = filters.kind {
        results.retain(|v| v.kind == kind);
    }

    // 3. City equality: exact case-insensitive match, unlike the substring
    //    predicates.
    if let Some(city) = &filters.city {
        let city = city.to_lowercase();
        results.retain(|v| v.location.city.to_lowercase() == city);
    }

    // 4. WiFi: substring match on free-text amenity names. "Wi-Fi" spelled
    //    with a hyphen will not match; a closed amenity tag set would change
    //    search results, so the substring behavior stands.
    if filters.wifi {
        results.retain(|v| has_amenity(v, "wifi"));
    }

    // 5. Meeting rooms: same amenity substring mechanism
    if filters.meeting_rooms {
        results.retain(|v| has_amenity(v, "meeting"));
    }

    // 6. Zero equity: equity terms must be present and explicitly
    //    equity-free; venues without equity terms are excluded.
    if filters.zero_equity {
        results.retain(|v| v.equity_terms.as_ref().is_some_and(|e| !e.takes_equity));
    }

    // 7. Capacity floor: capacity must be present
    if let Some(min) = filters.min_capacity {
        results.retain(|v| v.capacity.as_ref().is_some_and(|c| i64::from(c.total) >= min));
    }

    // 8. Price ceiling
    if let Some(max) = filters.max_price {
        results.retain(|v| i64::from(v.pricing.amount) <= max);
    }

    // 9. Government scheme: category synonyms shared with the parser
    if let Some(category) = &filters.government_scheme {
        results.retain(|v| {
            v.government_scheme.as_ref().is_some_and(|tag| schemes::tag_matches(tag, category))
        });
    }

    // 10. Residual keyword match against name, area, equity description, and
    //     address; skipped when identical to the step-1 predicate.
    if let Some(text) = &filters.free_text {
        let t = text.to_lowercase();
        let same_as_raw = filters.raw_query.as_ref().is_some_and(|r| r.to_lowercase() == t);
        if !same_as_raw {
            results.retain(|v| {
                v.name.to_lowercase().contains(&t)
                    || v.location.area.to_lowercase().contains(&t)
                    || v.equity_terms
                        .as_ref()
                        .and_then(|e| e.description.as_ref())
                        .is_some_and(|d| d.to_lowercase().contains(&t))
                    || v.location.address.as_ref().is_some_and(|a| a.to_lowercase().contains(&t))
            });
        }
    }

    log::debug!("search matched {} of {} venues", results.len(), venues.len());
    results
}

fn has_amenity(venue: &Venue, needle: &str) -> bool {
    venue.amenities.iter().any(|a| a.name.to_lowercase().contains(needle))
}
