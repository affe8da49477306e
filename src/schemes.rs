//! Government scheme categories
//!
//! One synonym table shared by the query parser (detecting a category in
//! free text) and the search engine (matching a venue's free-text scheme tag
//! against a requested category). Sharing the table keeps the two sides from
//! drifting apart.
//!
//! Category order is significant: the generic `state` category only applies
//! when no specific scheme matched, and reordering changes results for
//! ambiguous tags.

/// Atal Innovation Mission incubation centres
pub const AIM: &str = "AIM";
/// Startup India Seed Fund Scheme
pub const SISFS: &str = "SISFS";
/// Department of Science & Technology incubators (NSTEDB / NIDHI / TBI)
pub const DST: &str = "DST";
/// Generic state or central government backing
pub const STATE: &str = "state";

/// Keywords that identify each specific category, both in query text and in
/// catalog scheme tags.
const AIM_KEYWORDS: &[&str] = &["atal", "aic", "aim"];
const SISFS_KEYWORDS: &[&str] = &["sisfs", "seed fund", "seed-fund", "seedfund"];
const DST_KEYWORDS: &[&str] = &["dst", "nstedb", "nidhi", "tbi"];
const STATE_KEYWORDS: &[&str] = &["government", "govt", "state"];

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Detect a scheme category in normalized query text.
///
/// First matching category wins: AIM, then SISFS, then DST; the generic
/// `state` category applies only when none of the specific ones matched.
pub fn detect(normalized_query: &str) -> Option<&'static str> {
    if contains_any(normalized_query, AIM_KEYWORDS) {
        Some(AIM)
    } else if contains_any(normalized_query, SISFS_KEYWORDS) {
        Some(SISFS)
    } else if contains_any(normalized_query, DST_KEYWORDS) {
        Some(DST)
    } else if contains_any(normalized_query, STATE_KEYWORDS) {
        Some(STATE)
    } else {
        None
    }
}

/// Match a venue's free-text scheme tag against a requested category.
///
/// Categories expand to their synonym sets; the AIM category additionally
/// matches "niti" since AIM centres are tagged under NITI Aayog. An unknown
/// category falls back to a plain substring test.
pub fn tag_matches(tag: &str, category: &str) -> bool {
    let tag = tag.to_lowercase();
    match category.to_lowercase().as_str() {
        "aim" => contains_any(&tag, &["aim", "atal", "niti"]),
        "sisfs" => contains_any(&tag, &["sisfs", "seed"]),
        "dst" => contains_any(&tag, &["dst", "nstedb", "nidhi"]),
        "state" => contains_any(&tag, &["govt", "government", "state"]),
        other => tag.contains(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_specific_categories() {
        assert_eq!(detect("atal incubation centre"), Some(AIM));
        assert_eq!(detect("seed fund incubators"), Some(SISFS));
        assert_eq!(detect("nidhi tbi program"), Some(DST));
    }

    #[test]
    fn test_detect_generic_state_only_when_no_specific_match() {
        assert_eq!(detect("government incubators in hyderabad"), Some(STATE));
        // "government" present alongside "atal": the specific category wins
        assert_eq!(detect("atal government incubator"), Some(AIM));
    }

    #[test]
    fn test_detect_first_category_wins() {
        // Both AIM and DST signals present; AIM is checked first
        assert_eq!(detect("aim and dst incubators"), Some(AIM));
    }

    #[test]
    fn test_detect_none() {
        assert_eq!(detect("coworking in pune"), None);
    }

    #[test]
    fn test_tag_matches_category_synonyms() {
        assert!(tag_matches("Atal Incubation Centre (NITI Aayog)", "AIM"));
        assert!(tag_matches("NITI Aayog supported", "aim"));
        assert!(tag_matches("Startup India Seed Fund", "SISFS"));
        assert!(tag_matches("DST-NIDHI TBI", "DST"));
        assert!(tag_matches("Karnataka State Govt", "state"));
    }

    #[test]
    fn test_tag_matches_negative() {
        assert!(!tag_matches("Atal Incubation Centre", "SISFS"));
        assert!(!tag_matches("", "AIM"));
    }

    #[test]
    fn test_tag_matches_unknown_category_substring() {
        assert!(tag_matches("Maharashtra MSInS program", "msins"));
        assert!(!tag_matches("Maharashtra MSInS program", "biotech"));
    }
}
