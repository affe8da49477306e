//! Deterministic rule-based query parser
//!
//! Maps free text to [`ParsedFilters`] through an ordered keyword/pattern
//! grammar. Always available, no external dependency, and total: unmatched
//! text yields an empty-but-valid result. This parser is also the ground
//! truth fallback for the LLM strategy.

use regex::Regex;

use crate::filters::ParsedFilters;
use crate::models::VenueKind;
use crate::normalize::normalize;
use crate::schemes;

/// Alias → canonical city table, scanned in order; the first substring hit
/// wins and only one city is ever assigned.
const CITY_ALIASES: &[(&str, &str)] = &[
    ("mumbai", "Mumbai"),
    ("bombay", "Mumbai"),
    ("bangalore", "Bangalore"),
    ("bengaluru", "Bangalore"),
    ("delhi", "Delhi"),
    ("new delhi", "Delhi"),
    ("hyderabad", "Hyderabad"),
    ("pune", "Pune"),
    ("chennai", "Chennai"),
    ("madras", "Chennai"),
    ("ahmedabad", "Ahmedabad"),
    ("kolkata", "Kolkata"),
    ("calcutta", "Kolkata"),
    ("jaipur", "Jaipur"),
    ("kochi", "Kochi"),
    ("cochin", "Kochi"),
    ("goa", "Goa"),
    ("lucknow", "Lucknow"),
    ("noida", "Noida"),
    ("gurugram", "Gurugram"),
    ("gurgaon", "Gurugram"),
    ("chandigarh", "Chandigarh"),
    ("indore", "Indore"),
    ("nagpur", "Nagpur"),
    ("bhopal", "Bhopal"),
    ("patna", "Patna"),
    ("varanasi", "Varanasi"),
    ("bhubaneswar", "Bhubaneswar"),
    ("coimbatore", "Coimbatore"),
    ("surat", "Surat"),
    ("kanpur", "Kanpur"),
    ("thiruvananthapuram", "Thiruvananthapuram"),
    ("trivandrum", "Thiruvananthapuram"),
    ("kozhikode", "Kozhikode"),
    ("guwahati", "Guwahati"),
    ("raipur", "Raipur"),
    ("mohali", "Mohali"),
    ("visakhapatnam", "Visakhapatnam"),
    ("vizag", "Visakhapatnam"),
];

/// Price ceiling applied for "cheap"/"affordable" phrasing without an
/// explicit number.
const CHEAP_PRICE_CEILING: i64 = 5000;

/// Capacity floor applied for "large"/"big" phrasing without an explicit
/// number.
const LARGE_CAPACITY_FLOOR: i64 = 100;

/// Rule-based query parser with pre-compiled pattern classes.
pub struct RuleParser {
    coworking: Regex,
    incubator: Regex,
    capacity: Regex,
    price: Regex,
    cheap: Regex,
    large: Regex,
    zero_equity: Regex,
    wifi: Regex,
    meeting: Regex,
    residual_strip: Vec<Regex>,
}

impl RuleParser {
    pub fn new() -> Self {
        // Patterns run on normalized (lowercased, whitespace-collapsed) text.
        let compile = |pattern: &str| {
            Regex::new(pattern).unwrap_or_else(|e| panic!("invalid rule pattern {pattern:?}: {e}"))
        };

        Self {
            coworking: compile(r"cowork|co-work|shared\s*office|hot\s*desk|office\s*space"),
            incubator: compile(r"incubat|accelerat|startup\s*hub|innovation"),
            capacity: compile(r"(\d+)\s*(seat|people|person|member|desk|capacity)"),
            price: compile(r"(\d+)\s*(rs|rupee|inr|₹|price|budget)"),
            cheap: compile(r"cheap|affordable|budget|low.?cost"),
            large: compile(r"\b(large|big)\b"),
            zero_equity: compile(r"zero.?equity|no.?equity|equity.?free"),
            wifi: compile(r"wifi|wi-fi|internet"),
            meeting: compile(r"meeting.?room|conference|board.?room"),
            residual_strip: [
                r"cowork\w*",
                r"co-work\w*",
                r"incubat\w*",
                r"accelerat\w*",
                r"\bspaces?\b",
                r"\boffice\b",
                r"\bhub\b",
                r"\bin\b",
                r"\bwith\b",
                r"\band\b",
                r"\bnear\b",
                r"\baround\b",
                r"\bfor\b",
                r"\bthe\b",
                r"\ba\b",
                r"seat\w*",
                r"\bpeople\b",
                r"\bperson\b",
                r"desk\w*",
                r"\bcapacity\b",
                r"\bcheap\b",
                r"\baffordable\b",
                r"\bbudget\b",
                r"meeting\s*rooms?\b",
                r"\bwifi\b",
                r"zero\s*equity",
                r"\bgovernment\b",
                r"\bgovt\b",
                r"\d+",
            ]
            .iter()
            .map(|p| compile(p))
            .collect(),
        }
    }

    /// Parse free text into structured filters.
    ///
    /// Steps run in a fixed order and later steps never overwrite fields set
    /// by earlier ones, so the output is fully deterministic.
    pub fn parse(&self, query: &str) -> ParsedFilters {
        let q = normalize(query);
        let mut parsed = ParsedFilters::default();

        // 1. Kind: coworking patterns are checked first, so text carrying
        //    both signals resolves to coworking.
        if self.coworking.is_match(&q) {
            parsed.kind = Some(VenueKind::Coworking);
        } else if self.incubator.is_match(&q) {
            parsed.kind = Some(VenueKind::Incubator);
        }

        // 2. City: first alias hit in table order, then stop scanning.
        let mut matched_alias = None;
        for (alias, canonical) in CITY_ALIASES {
            if q.contains(alias) {
                parsed.city = Some((*canonical).to_string());
                matched_alias = Some(*alias);
                break;
            }
        }

        // 3. Capacity: first integer followed by a seat-count word.
        if let Some(caps) = self.capacity.captures(&q) {
            parsed.min_capacity = caps[1].parse().ok();
        }

        // 4. Price: first integer followed by a currency/price word, with a
        //    fixed ceiling for "cheap" phrasing when no number was given.
        if let Some(caps) = self.price.captures(&q) {
            parsed.max_price = caps[1].parse().ok();
        }
        if parsed.max_price.is_none() && self.cheap.is_match(&q) {
            parsed.max_price = Some(CHEAP_PRICE_CEILING);
        }

        // 5. "large"/"big" qualifier, unless step 3 already set a floor.
        if parsed.min_capacity.is_none() && self.large.is_match(&q) {
            parsed.min_capacity = Some(LARGE_CAPACITY_FLOOR);
        }

        // 6. Boolean features, tested independently.
        if self.zero_equity.is_match(&q) {
            parsed.zero_equity = true;
        }
        if self.wifi.is_match(&q) {
            parsed.wifi = true;
        }
        if self.meeting.is_match(&q) {
            parsed.meeting_rooms = true;
        }

        // 7. Government scheme category, first match wins.
        parsed.government_scheme = schemes::detect(&q).map(str::to_string);

        // 8. Residual: what's left after stripping consumed tokens becomes
        //    the fallback keyword signal for name/area matching.
        parsed.free_text = self.residual(&q, matched_alias);

        log::debug!("rule parse {query:?} -> {parsed:?}");
        parsed
    }

    fn residual(&self, normalized: &str, matched_alias: Option<&str>) -> Option<String> {
        let mut remaining = normalized.to_string();
        for pattern in &self.residual_strip {
            remaining = pattern.replace_all(&remaining, " ").into_owned();
        }
        if let Some(alias) = matched_alias {
            remaining = remaining.replace(alias, " ");
        }

        let remaining = normalize(&remaining);
        if remaining.len() > 2 { Some(remaining) } else { None }
    }
}

impl Default for RuleParser {
    fn default() -> Self {
        Self::new()
    }
}
