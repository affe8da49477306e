//! CLI argument parsing and command handlers

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;

use crate::catalog::VenueCatalog;
use crate::config::load_default_llm_config;
use crate::engine::{SearchRequest, VenueSearch};
use crate::filters::ParsedFilters;
use crate::models::{SortKey, Venue, VenueKind};
use crate::parser::SmartParser;

/// VenueLens: smart search for coworking spaces and startup incubators
#[derive(Parser, Debug)]
#[command(
    name = "vlx",
    version,
    about = "A smart-search directory for coworking spaces and incubators",
    long_about = "VenueLens turns free-text queries like \"cheap coworking in pune with \
                  meeting rooms\" into structured facet filters and runs them over a venue \
                  catalog. Parsing is deterministic and rule-based by default; configure an \
                  LLM provider in ~/.venuelens/config.toml to use one as the primary \
                  strategy, with the rule-based parser always available as fallback."
)]
pub struct Cli {
    /// Enable verbose logging (can be repeated for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search the venue catalog
    ///
    /// Free text and explicit flags combine; explicit flags always win over
    /// anything parsed from the query text.
    ///
    /// Examples:
    ///   vlx search "coworking in mumbai with 20 seats"
    ///   vlx search "zero equity incubators" --city Delhi --sort trust
    ///   vlx search "" --kind coworking --max-price 8000 --sort price_low
    Search {
        /// Free-text query (may be empty when using explicit flags)
        #[arg(default_value = "")]
        query: String,

        /// Filter by venue kind (coworking, incubator)
        #[arg(short, long)]
        kind: Option<String>,

        /// Filter by city (exact, case-insensitive)
        #[arg(short, long)]
        city: Option<String>,

        /// Minimum total seat capacity
        #[arg(long)]
        min_capacity: Option<i64>,

        /// Maximum price
        #[arg(long)]
        max_price: Option<i64>,

        /// Only incubators that take no equity
        #[arg(long)]
        zero_equity: bool,

        /// Only venues with a WiFi amenity
        #[arg(long)]
        wifi: bool,

        /// Only venues with meeting rooms
        #[arg(long)]
        meeting_rooms: bool,

        /// Government scheme category (AIM, SISFS, DST, state)
        #[arg(long)]
        scheme: Option<String>,

        /// Sort key: trust, price_low, price_high
        #[arg(short, long, default_value = "trust")]
        sort: String,

        /// Maximum number of results
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Skip the LLM strategy and parse with rules only
        #[arg(long)]
        rules_only: bool,

        /// Catalog JSON file (defaults to data/venues.json, then the demo set)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Output format as JSON
        #[arg(long)]
        json: bool,

        /// Pretty-print JSON output (only with --json)
        #[arg(long)]
        pretty: bool,
    },

    /// Show the structured filters a query parses to, without searching
    ///
    /// Examples:
    ///   vlx parse "cheap office space in pune with meeting rooms"
    ///   vlx parse "atal incubation centre" --json
    Parse {
        /// Free-text query
        query: String,

        /// Skip the LLM strategy and parse with rules only
        #[arg(long)]
        rules_only: bool,

        /// Output format as JSON
        #[arg(long)]
        json: bool,

        /// Pretty-print JSON output (only with --json)
        #[arg(long)]
        pretty: bool,
    },

    /// Show a single venue by id
    Show {
        /// Venue id
        id: String,

        /// Catalog JSON file (defaults to data/venues.json, then the demo set)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Output format as JSON
        #[arg(long)]
        json: bool,

        /// Pretty-print JSON output (only with --json)
        #[arg(long)]
        pretty: bool,
    },

    /// List the distinct cities in the catalog
    Cities {
        /// Catalog JSON file (defaults to data/venues.json, then the demo set)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Output format as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        // Setup logging based on verbosity
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .init();

        match self.command {
            Command::Search {
                query,
                kind,
                city,
                min_capacity,
                max_price,
                zero_equity,
                wifi,
                meeting_rooms,
                scheme,
                sort,
                limit,
                rules_only,
                data,
                json,
                pretty,
            } => handle_search(
                query,
                ExplicitArgs {
                    kind,
                    city,
                    min_capacity,
                    max_price,
                    zero_equity,
                    wifi,
                    meeting_rooms,
                    scheme,
                },
                &sort,
                limit,
                rules_only,
                data,
                json,
                pretty,
            ),
            Command::Parse { query, rules_only, json, pretty } => {
                handle_parse(&query, rules_only, json, pretty)
            }
            Command::Show { id, data, json, pretty } => handle_show(&id, data, json, pretty),
            Command::Cities { data, json } => handle_cities(data, json),
        }
    }
}

/// Explicit filter flags from the command line
struct ExplicitArgs {
    kind: Option<String>,
    city: Option<String>,
    min_capacity: Option<i64>,
    max_price: Option<i64>,
    zero_equity: bool,
    wifi: bool,
    meeting_rooms: bool,
    scheme: Option<String>,
}

impl ExplicitArgs {
    fn into_filters(self) -> Result<ParsedFilters> {
        let kind = match self.kind {
            Some(k) => Some(
                VenueKind::from_str(&k)
                    .map_err(|_| anyhow::anyhow!("invalid kind '{k}' (coworking, incubator)"))?,
            ),
            None => None,
        };

        Ok(ParsedFilters {
            kind,
            city: self.city,
            min_capacity: self.min_capacity,
            max_price: self.max_price,
            zero_equity: self.zero_equity,
            wifi: self.wifi,
            meeting_rooms: self.meeting_rooms,
            government_scheme: self.scheme,
            free_text: None,
        })
    }
}

fn open_catalog(data: Option<PathBuf>) -> VenueCatalog {
    match data {
        Some(path) => VenueCatalog::load(path),
        None => {
            let default = PathBuf::from("data/venues.json");
            if default.exists() { VenueCatalog::load(default) } else { VenueCatalog::demo() }
        }
    }
}

fn build_parser(rules_only: bool) -> SmartParser {
    if rules_only {
        SmartParser::rules_only()
    } else {
        SmartParser::from_config(&load_default_llm_config())
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_search(
    query: String,
    explicit: ExplicitArgs,
    sort: &str,
    limit: Option<usize>,
    rules_only: bool,
    data: Option<PathBuf>,
    json: bool,
    pretty: bool,
) -> Result<()> {
    let sort = SortKey::from_str(sort)
        .map_err(|_| anyhow::anyhow!("invalid sort key '{sort}' (trust, price_low, price_high)"))?;

    let request = SearchRequest { query, filters: explicit.into_filters()?, sort, limit };
    let engine = VenueSearch::new(open_catalog(data), build_parser(rules_only));

    let runtime = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
    let results = runtime.block_on(engine.search(&request))?;

    if json {
        print_json(&results, pretty)?;
        return Ok(());
    }

    if results.is_empty() {
        println!("No venues matched.");
        return Ok(());
    }

    println!("{} venue(s):\n", results.len());
    for venue in &results {
        print_venue_line(venue);
    }
    Ok(())
}

fn handle_parse(query: &str, rules_only: bool, json: bool, pretty: bool) -> Result<()> {
    let parser = build_parser(rules_only);

    let runtime = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
    let parsed = runtime.block_on(parser.parse(query));

    if json {
        print_json(&parsed, pretty)?;
        return Ok(());
    }

    println!("query: {query:?}");
    if let Some(kind) = parsed.kind {
        println!("  kind:           {kind}");
    }
    if let Some(city) = &parsed.city {
        println!("  city:           {city}");
    }
    if let Some(n) = parsed.min_capacity {
        println!("  min capacity:   {n}");
    }
    if let Some(n) = parsed.max_price {
        println!("  max price:      {n}");
    }
    if parsed.zero_equity {
        println!("  zero equity:    yes");
    }
    if parsed.wifi {
        println!("  wifi:           yes");
    }
    if parsed.meeting_rooms {
        println!("  meeting rooms:  yes");
    }
    if let Some(scheme) = &parsed.government_scheme {
        println!("  scheme:         {scheme}");
    }
    if let Some(text) = &parsed.free_text {
        println!("  keyword:        {text:?}");
    }
    if parsed.is_empty() {
        println!("  (no filters extracted)");
    }
    Ok(())
}

fn handle_show(id: &str, data: Option<PathBuf>, json: bool, pretty: bool) -> Result<()> {
    let catalog = open_catalog(data);
    let Some(venue) = catalog.venue_by_id(id) else {
        bail!("Venue not found: {id}");
    };

    if json {
        print_json(&venue, pretty)?;
        return Ok(());
    }

    println!("{} ({})", venue.name.bold(), venue.kind);
    println!("  {} · {}", venue.location.area, venue.location.city);
    if let Some(address) = &venue.location.address {
        println!("  {address}");
    }
    println!(
        "  {} {}/{} · trust {:.1} · {}",
        venue.pricing.currency,
        venue.pricing.amount,
        venue.pricing.period,
        venue.trust_score,
        venue.official_status
    );
    if let Some(capacity) = &venue.capacity {
        println!("  capacity: {}/{} available", capacity.available, capacity.total);
    }
    if let Some(equity) = &venue.equity_terms {
        let terms = if equity.takes_equity {
            match equity.percentage {
                Some(pct) => format!("takes {pct}% equity"),
                None => "takes equity".to_string(),
            }
        } else {
            "zero equity".to_string()
        };
        println!("  equity: {terms}");
    }
    if let Some(scheme) = &venue.government_scheme {
        println!("  scheme: {scheme}");
    }
    if !venue.amenities.is_empty() {
        let names: Vec<&str> = venue.amenities.iter().map(|a| a.name.as_str()).collect();
        println!("  amenities: {}", names.join(", "));
    }
    if let Some(rating) = venue.average_rating() {
        println!("  rating: {rating:.1} ({} review(s))", venue.reviews.len());
    }
    if let Some(website) = &venue.website {
        println!("  {website}");
    }
    Ok(())
}

fn handle_cities(data: Option<PathBuf>, json: bool) -> Result<()> {
    let catalog = open_catalog(data);
    let cities = catalog.cities();

    if json {
        print_json(&cities, false)?;
        return Ok(());
    }

    for city in cities {
        println!("{city}");
    }
    Ok(())
}

fn print_venue_line(venue: &Venue) {
    let price = if venue.pricing.amount == 0 {
        "free".to_string()
    } else {
        format!("{} {}/{}", venue.pricing.currency, venue.pricing.amount, venue.pricing.period)
    };
    println!(
        "  {}  [{}]  {} · {}  {}  trust {:.1}",
        venue.name.bold(),
        venue.id,
        venue.location.area,
        venue.location.city,
        price,
        venue.trust_score
    );
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    let output = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{output}");
    Ok(())
}
