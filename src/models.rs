//! Core data models for VenueLens
//!
//! These structures represent the venue catalog records and the fixed set of
//! sort keys the ranker understands. Field names serialize in the camelCase
//! form used by the catalog JSON file and the LLM response format.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Kind of venue listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum VenueKind {
    Coworking,
    Incubator,
}

/// Verification status assigned by the directory
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString, Display)]
pub enum OfficialStatus {
    Verified,
    Unverified,
    Partner,
}

/// Where a venue sits: neighbourhood, city, and optional street address
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    /// Neighbourhood or locality (e.g. "Koramangala")
    pub area: String,
    /// Canonical city name (e.g. "Bangalore")
    pub city: String,
    /// Full street address, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Billing period for a venue's listed price
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PricePeriod {
    Month,
    Day,
    Seat,
}

/// Listed price for a venue
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pricing {
    /// Amount in the venue's currency. Zero is valid (equity-funded incubators).
    pub amount: u32,
    pub period: PricePeriod,
    pub currency: String,
}

/// Seat capacity information
///
/// `available <= total` is an upstream data assumption; the engine reads these
/// values but never validates or mutates them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Capacity {
    pub total: u32,
    pub available: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_rooms: Option<u32>,
}

/// A single amenity offered by a venue
///
/// Amenity names are free text supplied by the catalog ("High-Speed WiFi",
/// "Conference Hall (60+)"), so feature predicates match them by substring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Amenity {
    pub id: String,
    pub name: String,
    pub verified: bool,
}

/// Equity arrangement for incubator programs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EquityTerms {
    pub takes_equity: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A user review attached to a venue
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: String,
    pub user: String,
    pub rating: f64,
    pub text: String,
    pub date: NaiveDate,
}

/// A single coworking space or incubator listing
///
/// Venues are read-only to the search engine; the catalog collaborator owns
/// their lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    /// Opaque unique identifier
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: VenueKind,
    pub location: Location,
    pub pricing: Pricing,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<Capacity>,
    #[serde(default)]
    pub amenities: Vec<Amenity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equity_terms: Option<EquityTerms>,
    /// Directory trust score, 0.0 to 10.0
    pub trust_score: f64,
    pub official_status: OfficialStatus,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    /// Free-text government program tag (e.g. "Atal Incubation Centre (NITI Aayog)")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub government_scheme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl Venue {
    /// Average review rating, if the venue has any reviews
    pub fn average_rating(&self) -> Option<f64> {
        if self.reviews.is_empty() {
            return None;
        }
        let sum: f64 = self.reviews.iter().map(|r| r.rating).sum();
        Some(sum / self.reviews.len() as f64)
    }
}

/// Sort key for ranking search results
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SortKey {
    /// Descending trust score (default)
    #[default]
    Trust,
    /// Ascending price
    PriceLow,
    /// Descending price
    PriceHigh,
}
