//! Venue catalog and listing filters.
//!
//! [`FixtureCatalog`] is a fixed, deterministic listing; nothing in pricing
//! or validation depends on it. [`VenueQuery`] implements the venues page
//! filters: free-text search, sport, amenities, price band and sort order.

use crate::error::CatalogError;
use crate::money::Money;
use crate::sport::SportKind;
use crate::types::VenueId;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Venues
// ============================================================================

/// A bookable facility listing
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    /// Venue id
    pub id: VenueId,
    /// Display name
    pub name: String,
    /// Main sport
    pub sport: SportKind,
    /// Area and city
    pub location: String,
    /// Listed hourly price
    pub price_per_hour: Money,
    /// Rating in tenths of a star (48 = 4.8)
    pub rating_tenths: u8,
    /// Amenity labels
    pub amenities: Vec<String>,
    /// Whether the venue is taking bookings
    pub available: bool,
}

impl Venue {
    /// Rating formatted as `"4.8"`
    #[must_use]
    pub fn rating(&self) -> String {
        format!("{}.{}", self.rating_tenths / 10, self.rating_tenths % 10)
    }

    /// Whether the venue lists `amenity` (case-insensitive)
    #[must_use]
    pub fn has_amenity(&self, amenity: &str) -> bool {
        self.amenities
            .iter()
            .any(|listed| listed.eq_ignore_ascii_case(amenity.trim()))
    }

    fn matches_text(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.location.to_lowercase().contains(needle)
            || self.sport.id().contains(needle)
    }
}

/// Read access to the venue listing
pub trait VenueCatalog: Send + Sync {
    /// Every venue, in listing order
    fn venues(&self) -> &[Venue];

    /// One venue by id
    fn venue(&self, id: VenueId) -> Option<&Venue> {
        self.venues().iter().find(|venue| venue.id == id)
    }

    /// Venues matching `query`, in the query's sort order
    fn search(&self, query: &VenueQuery) -> Vec<Venue> {
        query.apply(self.venues())
    }
}

/// The fixed six-venue listing
#[derive(Clone, Debug)]
pub struct FixtureCatalog {
    venues: Vec<Venue>,
}

impl FixtureCatalog {
    /// Build the listing; ids are stable across runs
    #[must_use]
    pub fn new() -> Self {
        let venues = [
            (
                "Elite Sports Complex",
                SportKind::Badminton,
                "Downtown Mumbai, Maharashtra",
                800,
                48,
                ["AC", "Parking", "Lockers", "Changing Rooms"],
                true,
            ),
            (
                "Champions Tennis Club",
                SportKind::Tennis,
                "Bandra West, Mumbai",
                1200,
                47,
                ["Professional Courts", "Coaching", "Equipment", "Cafeteria"],
                true,
            ),
            (
                "Metro Basketball Arena",
                SportKind::Basketball,
                "Andheri East, Mumbai",
                600,
                46,
                ["Indoor", "Sound System", "Scoreboard", "Parking"],
                false,
            ),
            (
                "Royal Badminton Center",
                SportKind::Badminton,
                "Powai, Mumbai",
                700,
                45,
                ["AC", "Premium Courts", "Equipment", "Lockers"],
                true,
            ),
            (
                "Ace Tennis Academy",
                SportKind::Tennis,
                "Juhu, Mumbai",
                1500,
                49,
                ["Clay Courts", "Professional Coaching", "Pro Shop", "Parking"],
                true,
            ),
            (
                "Supreme Football Ground",
                SportKind::Football,
                "Borivali West, Mumbai",
                2000,
                44,
                ["Natural Grass", "Floodlights", "Changing Rooms", "Parking"],
                true,
            ),
        ]
        .into_iter()
        .zip(1u128..)
        .map(
            |((name, sport, location, price, rating_tenths, amenities, available), n)| Venue {
                id: VenueId::from_uuid(Uuid::from_u128(n)),
                name: name.to_string(),
                sport,
                location: location.to_string(),
                price_per_hour: Money::from_rupees(price),
                rating_tenths,
                amenities: amenities.iter().map(ToString::to_string).collect(),
                available,
            },
        )
        .collect();

        Self { venues }
    }

    /// Venue by exact name
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Venue> {
        self.venues.iter().find(|venue| venue.name == name)
    }
}

impl Default for FixtureCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl VenueCatalog for FixtureCatalog {
    fn venues(&self) -> &[Venue] {
        &self.venues
    }
}

// ============================================================================
// Query
// ============================================================================

/// Hourly price filter
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceBand {
    /// Below ₹500
    Under500,
    /// ₹500 up to (not including) ₹1000
    From500To1000,
    /// ₹1000 up to (not including) ₹1500
    From1000To1500,
    /// ₹1500 and above
    Above1500,
}

impl PriceBand {
    /// Whether `price` falls in this band
    #[must_use]
    pub const fn contains(self, price: Money) -> bool {
        let rupees = price.rupees();
        match self {
            Self::Under500 => rupees < 500,
            Self::From500To1000 => rupees >= 500 && rupees < 1000,
            Self::From1000To1500 => rupees >= 1000 && rupees < 1500,
            Self::Above1500 => rupees >= 1500,
        }
    }
}

impl FromStr for PriceBand {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "under-500" => Ok(Self::Under500),
            "500-1000" => Ok(Self::From500To1000),
            "1000-1500" => Ok(Self::From1000To1500),
            "above-1500" => Ok(Self::Above1500),
            other => Err(CatalogError::UnknownPriceBand(other.to_string())),
        }
    }
}

/// Listing order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VenueSort {
    /// Best rated first
    #[default]
    Popularity,
    /// Cheapest first
    PriceLow,
    /// Most expensive first
    PriceHigh,
    /// Best rated first
    Rating,
    /// Alphabetical
    Name,
}

impl FromStr for VenueSort {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "popularity" => Ok(Self::Popularity),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            "rating" => Ok(Self::Rating),
            "name" => Ok(Self::Name),
            other => Err(CatalogError::UnknownSort(other.to_string())),
        }
    }
}

/// Venues page filter state
///
/// Empty filters match everything. Amenities must all be present.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VenueQuery {
    /// Free text over name, location and sport
    pub search: Option<String>,
    /// Allowed sports; empty allows all
    pub sports: Vec<SportKind>,
    /// Required amenities
    pub amenities: Vec<String>,
    /// Price band
    pub price_band: Option<PriceBand>,
    /// Result order
    pub sort: VenueSort,
}

impl VenueQuery {
    /// Match everything, most popular first
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text search
    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Allow a sport
    #[must_use]
    pub fn sport(mut self, sport: SportKind) -> Self {
        self.sports.push(sport);
        self
    }

    /// Require an amenity
    #[must_use]
    pub fn amenity(mut self, amenity: impl Into<String>) -> Self {
        self.amenities.push(amenity.into());
        self
    }

    /// Restrict to a price band
    #[must_use]
    pub fn price_band(mut self, band: PriceBand) -> Self {
        self.price_band = Some(band);
        self
    }

    /// Set the order
    #[must_use]
    pub fn sort(mut self, sort: VenueSort) -> Self {
        self.sort = sort;
        self
    }

    /// Whether `venue` passes every filter
    #[must_use]
    pub fn matches(&self, venue: &Venue) -> bool {
        let text_ok = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .is_none_or(|text| venue.matches_text(&text.to_lowercase()));

        text_ok
            && (self.sports.is_empty() || self.sports.contains(&venue.sport))
            && self.amenities.iter().all(|amenity| venue.has_amenity(amenity))
            && self
                .price_band
                .is_none_or(|band| band.contains(venue.price_per_hour))
    }

    /// Filter and sort `venues`
    #[must_use]
    pub fn apply(&self, venues: &[Venue]) -> Vec<Venue> {
        let mut found: Vec<Venue> = venues
            .iter()
            .filter(|venue| self.matches(venue))
            .cloned()
            .collect();

        match self.sort {
            VenueSort::Popularity | VenueSort::Rating => {
                found.sort_by_key(|venue| Reverse(venue.rating_tenths));
            },
            VenueSort::PriceLow => found.sort_by_key(|venue| venue.price_per_hour),
            VenueSort::PriceHigh => found.sort_by_key(|venue| Reverse(venue.price_per_hour)),
            VenueSort::Name => found.sort_by_key(|venue| venue.name.to_lowercase()),
        }
        found
    }
}
