//! Filter types and the explicit/parsed precedence merge
//!
//! `ParsedFilters` is what query understanding produces (rule-based or LLM);
//! `SearchFilters` is the single resolved filter set the search engine
//! consumes. The resolver is a pure function over plain values: no ambient
//! request state feeds into it.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::models::VenueKind;

/// Structured output of query understanding
///
/// Every field is optional: presence means "constrain on this", absence means
/// "no constraint from parsing". Also used as the explicit caller filter set,
/// since callers supply the same partial shape.
///
/// Deserializes from the LLM response format, which uses the wire names
/// `type`, `minCapacity`, `maxPrice`, `zeroEquity`, `meeting`,
/// `governmentScheme`, and `textSearch`. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsedFilters {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<VenueKind>,
    /// Canonical city name (e.g. "Mumbai", never "bombay")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(rename = "minCapacity", skip_serializing_if = "Option::is_none")]
    pub min_capacity: Option<i64>,
    #[serde(rename = "maxPrice", skip_serializing_if = "Option::is_none")]
    pub max_price: Option<i64>,
    #[serde(rename = "zeroEquity", skip_serializing_if = "is_false")]
    pub zero_equity: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub wifi: bool,
    #[serde(rename = "meeting", skip_serializing_if = "is_false")]
    pub meeting_rooms: bool,
    #[serde(rename = "governmentScheme", skip_serializing_if = "Option::is_none")]
    pub government_scheme: Option<String>,
    /// Leftover keywords not mapped to a structured field
    #[serde(rename = "textSearch", skip_serializing_if = "Option::is_none")]
    pub free_text: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !value
}

impl ParsedFilters {
    /// Whether any structured field (everything except the free-text
    /// residual) is set.
    pub fn has_structured(&self) -> bool {
        self.kind.is_some()
            || self.city.is_some()
            || self.min_capacity.is_some()
            || self.max_price.is_some()
            || self.zero_equity
            || self.wifi
            || self.meeting_rooms
            || self.government_scheme.is_some()
    }

    /// Whether nothing at all was extracted.
    pub fn is_empty(&self) -> bool {
        !self.has_structured() && self.free_text.is_none()
    }
}

/// The canonical, resolved filter set consumed by the search engine
///
/// Built once per search request by [`resolve`] and immutable thereafter.
/// The engine has no knowledge of where individual fields came from.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchFilters {
    pub kind: Option<VenueKind>,
    pub city: Option<String>,
    pub min_capacity: Option<i64>,
    pub max_price: Option<i64>,
    pub zero_equity: bool,
    pub wifi: bool,
    pub meeting_rooms: bool,
    pub government_scheme: Option<String>,
    /// Residual keyword predicate (name/area/equity-description/address)
    pub free_text: Option<String>,
    /// Full original query text, set only when parsing produced no structured
    /// filter; matched against name/area/city/address
    pub raw_query: Option<String>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Merge explicit caller filters with parsed filters into one canonical set.
///
/// Precedence, per field: an explicitly supplied filter always wins over a
/// parsed one; a parsed filter fills the gaps. Boolean flags follow
/// "true wins".
///
/// Text handling: when parsing extracted any structured filter, the raw query
/// is NOT also applied as a text predicate (the words it contains were
/// already consumed structurally) and only the parsed residual carries over.
/// When parsing extracted nothing structured, the full raw query becomes the
/// text predicate. This keeps a city name like "Mumbai" from being required
/// twice, once as a city filter and once as a substring match.
///
/// Explicit `min_capacity`/`max_price` must be non-negative; a negative value
/// is rejected with an error naming the field. This is the only
/// caller-visible error class in the core.
pub fn resolve(
    raw_query: &str,
    explicit: &ParsedFilters,
    parsed: &ParsedFilters,
) -> Result<SearchFilters> {
    if let Some(n) = explicit.min_capacity
        && n < 0
    {
        bail!("invalid filter: min_capacity must be non-negative (got {n})");
    }
    if let Some(n) = explicit.max_price
        && n < 0
    {
        bail!("invalid filter: max_price must be non-negative (got {n})");
    }

    let raw_query = raw_query.trim();
    let raw_query = if parsed.has_structured() || raw_query.is_empty() {
        None
    } else {
        Some(raw_query.to_string())
    };

    Ok(SearchFilters {
        kind: explicit.kind.or(parsed.kind),
        city: explicit.city.clone().or_else(|| parsed.city.clone()),
        min_capacity: explicit.min_capacity.or(parsed.min_capacity),
        max_price: explicit.max_price.or(parsed.max_price),
        zero_equity: explicit.zero_equity || parsed.zero_equity,
        wifi: explicit.wifi || parsed.wifi,
        meeting_rooms: explicit.meeting_rooms || parsed.meeting_rooms,
        government_scheme: explicit
            .government_scheme
            .clone()
            .or_else(|| parsed.government_scheme.clone()),
        free_text: explicit.free_text.clone().or_else(|| parsed.free_text.clone()),
        raw_query,
    })
}
