//! The metrics provider interface and its row types.
//!
//! One method per chart. Implementations guarantee that every borough in
//! scope appears in the result (missing measures coalesce to zero rather
//! than dropping the borough) and that each (borough, group) key appears at
//! most once. Query failures surface as [`ScopeError::DataUnavailable`] so
//! the render layer can substitute a labeled placeholder for the affected
//! chart without touching the selection state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::borough::{Borough, MapPosition};
use crate::error::{Result, ScopeError};
use crate::selection::BoroughFilter;

/// The four derived charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricKind {
    PriceListings,
    RoomPrices,
    CrimeBreakdown,
    TourismCrime,
}

impl MetricKind {
    pub fn title(&self) -> &'static str {
        match self {
            MetricKind::PriceListings => "Average Price and Number of Properties by Borough",
            MetricKind::RoomPrices => "Price Distribution by Room Type and Borough",
            MetricKind::CrimeBreakdown => "Distribution of Crime Types",
            MetricKind::TourismCrime => "Tourism Revenue and Safety Score Comparison",
        }
    }
}

/// Listing room types carried by the room-price chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoomType {
    #[serde(rename = "Private room")]
    PrivateRoom,
    #[serde(rename = "Entire home/apt")]
    EntireHome,
    #[serde(rename = "Hotel room")]
    HotelRoom,
    #[serde(rename = "Shared room")]
    SharedRoom,
}

impl RoomType {
    pub const ALL: [RoomType; 4] = [
        RoomType::PrivateRoom,
        RoomType::EntireHome,
        RoomType::HotelRoom,
        RoomType::SharedRoom,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RoomType::PrivateRoom => "Private room",
            RoomType::EntireHome => "Entire home/apt",
            RoomType::HotelRoom => "Hotel room",
            RoomType::SharedRoom => "Shared room",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RoomType {
    type Err = ScopeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Private room" => Ok(RoomType::PrivateRoom),
            "Entire home/apt" => Ok(RoomType::EntireHome),
            "Hotel room" => Ok(RoomType::HotelRoom),
            "Shared room" => Ok(RoomType::SharedRoom),
            other => Err(ScopeError::Other(format!("unknown room type: {}", other))),
        }
    }
}

/// Crime severity levels recorded in the security table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CrimeLevel {
    Violation,
    Misdemeanor,
    Felony,
}

impl CrimeLevel {
    pub const ALL: [CrimeLevel; 3] = [
        CrimeLevel::Violation,
        CrimeLevel::Misdemeanor,
        CrimeLevel::Felony,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CrimeLevel::Violation => "VIOLATION",
            CrimeLevel::Misdemeanor => "MISDEMEANOR",
            CrimeLevel::Felony => "FELONY",
        }
    }
}

impl FromStr for CrimeLevel {
    type Err = ScopeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "VIOLATION" => Ok(CrimeLevel::Violation),
            "MISDEMEANOR" => Ok(CrimeLevel::Misdemeanor),
            "FELONY" => Ok(CrimeLevel::Felony),
            other => Err(ScopeError::Other(format!("unknown crime level: {}", other))),
        }
    }
}

/// Per-borough average price and listing count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceListingsRow {
    pub borough: Borough,
    pub avg_price: f64,
    pub listings: u64,
}

/// One priced listing, input to the room-type box statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomPriceRow {
    pub borough: Borough,
    pub room_type: RoomType,
    pub price: f64,
}

/// Event count for one (borough, crime level) cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrimeRow {
    pub borough: Borough,
    pub level: CrimeLevel,
    pub count: u64,
}

/// Per-borough tourism revenue and weighted crime score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TourismCrimeRow {
    pub borough: Borough,
    pub tourism: f64,
    pub crime_score: f64,
}

/// One clickable borough marker on the map, including the metrics snapshot
/// the front end attaches to click events.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub borough: Borough,
    pub listings: u64,
    pub tourism: f64,
    pub position: MapPosition,
    pub color: &'static str,
}

/// Read-only aggregation service behind the four charts and the map.
pub trait MetricsProvider {
    fn price_listings(&self, filter: &BoroughFilter) -> Result<Vec<PriceListingsRow>>;
    fn room_prices(&self, filter: &BoroughFilter) -> Result<Vec<RoomPriceRow>>;
    fn crime_breakdown(&self, filter: &BoroughFilter) -> Result<Vec<CrimeRow>>;
    fn tourism_crime(&self, filter: &BoroughFilter) -> Result<Vec<TourismCrimeRow>>;
    fn map_points(&self) -> Result<Vec<MapPoint>>;
}
