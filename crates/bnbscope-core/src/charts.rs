//! Chart dataset construction.
//!
//! Turns provider rows into the render-ready datasets the front end draws:
//! a dual-axis price/listings series, per-room-type box statistics, a
//! stacked crime breakdown, and the tourism-vs-crime comparison with its
//! average reference lines. A provider failure becomes a labeled
//! `Unavailable` placeholder for that chart alone; it never aborts the
//! whole render and never touches the selection.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Result, ScopeError};
use crate::metrics::{
    CrimeRow, MetricKind, MetricsProvider, PriceListingsRow, RoomType, TourismCrimeRow,
};
use crate::selection::BoroughFilter;

/// Five-number summary over a price sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub n: usize,
}

/// Box statistics for one (room type, borough) group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomBox {
    pub room_type: RoomType,
    pub borough: crate::borough::Borough,
    pub stats: BoxStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceChart {
    pub title: &'static str,
    pub rows: Vec<PriceListingsRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomChart {
    pub title: &'static str,
    pub boxes: Vec<RoomBox>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrimeChart {
    pub title: &'static str,
    pub rows: Vec<CrimeRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PotentialChart {
    pub title: &'static str,
    pub rows: Vec<TourismCrimeRow>,
    /// Dashed reference line: mean crime score across the charted boroughs
    pub avg_crime_score: f64,
    /// Dashed reference line: mean tourism revenue across the charted boroughs
    pub avg_tourism: f64,
}

/// One chart, ready to render or explicitly unavailable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Chart {
    Ready {
        #[serde(flatten)]
        dataset: ChartDataset,
    },
    Unavailable {
        kind: MetricKind,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ChartDataset {
    PriceListings(PriceChart),
    RoomPrices(RoomChart),
    CrimeBreakdown(CrimeChart),
    TourismCrime(PotentialChart),
}

/// Build one chart from the provider.
///
/// `DataUnavailable` is recovered into the placeholder; anything else
/// (data drift such as an unknown borough name in the database) aborts the
/// render cycle so the previously rendered state stays visible.
pub fn build_chart<P: MetricsProvider>(
    kind: MetricKind,
    provider: &P,
    filter: &BoroughFilter,
) -> Result<Chart> {
    let built = match kind {
        MetricKind::PriceListings => provider.price_listings(filter).map(|rows| {
            ChartDataset::PriceListings(PriceChart {
                title: kind.title(),
                rows,
            })
        }),
        MetricKind::RoomPrices => provider.room_prices(filter).map(|rows| {
            ChartDataset::RoomPrices(RoomChart {
                title: kind.title(),
                boxes: room_boxes(rows),
            })
        }),
        MetricKind::CrimeBreakdown => provider.crime_breakdown(filter).map(|rows| {
            ChartDataset::CrimeBreakdown(CrimeChart {
                title: kind.title(),
                rows,
            })
        }),
        MetricKind::TourismCrime => provider.tourism_crime(filter).map(potential_chart),
    };

    match built {
        Ok(dataset) => Ok(Chart::Ready { dataset }),
        Err(ScopeError::DataUnavailable { reason }) => Ok(Chart::Unavailable { kind, reason }),
        Err(other) => Err(other),
    }
}

fn potential_chart(rows: Vec<TourismCrimeRow>) -> ChartDataset {
    let n = rows.len() as f64;
    let (avg_crime_score, avg_tourism) = if rows.is_empty() {
        (0.0, 0.0)
    } else {
        (
            rows.iter().map(|r| r.crime_score).sum::<f64>() / n,
            rows.iter().map(|r| r.tourism).sum::<f64>() / n,
        )
    };
    ChartDataset::TourismCrime(PotentialChart {
        title: MetricKind::TourismCrime.title(),
        rows,
        avg_crime_score,
        avg_tourism,
    })
}

/// Group per-listing prices by (room type, borough) and summarize each group.
fn room_boxes(rows: Vec<crate::metrics::RoomPriceRow>) -> Vec<RoomBox> {
    let mut groups: BTreeMap<(RoomType, crate::borough::Borough), Vec<f64>> = BTreeMap::new();
    for row in rows {
        groups
            .entry((row.room_type, row.borough))
            .or_default()
            .push(row.price);
    }

    groups
        .into_iter()
        .map(|((room_type, borough), prices)| RoomBox {
            room_type,
            borough,
            stats: box_stats(prices),
        })
        .collect()
}

/// Five-number summary with linearly interpolated quartiles.
pub fn box_stats(mut sample: Vec<f64>) -> BoxStats {
    sample.sort_by(|a, b| a.total_cmp(b));
    let n = sample.len();
    BoxStats {
        min: sample.first().copied().unwrap_or(0.0),
        q1: percentile(&sample, 0.25),
        median: percentile(&sample, 0.5),
        q3: percentile(&sample, 0.75),
        max: sample.last().copied().unwrap_or(0.0),
        n,
    }
}

/// Linear interpolation between closest ranks; sample must be sorted.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let rank = p * (n - 1) as f64;
            let lo = rank.floor() as usize;
            let hi = rank.ceil() as usize;
            let frac = rank - lo as f64;
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }
    }
}
