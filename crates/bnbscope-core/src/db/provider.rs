//! The SQLite implementation of the metrics provider.
//!
//! Each chart is one aggregate query over the listings/security/tourism
//! tables. Borough filtering parameterizes the WHERE clause; the unfiltered
//! mode runs the query without a restriction. NULL measures coalesce to
//! zero so a borough never drops out of a result set for lack of events.

use std::collections::BTreeMap;

use rusqlite::params_from_iter;

use crate::borough::Borough;
use crate::db::Database;
use crate::error::{Result, ScopeError};
use crate::metrics::{
    CrimeLevel, CrimeRow, MapPoint, MetricsProvider, PriceListingsRow, RoomPriceRow, RoomType,
    TourismCrimeRow,
};
use crate::selection::BoroughFilter;

fn unavailable(err: rusqlite::Error) -> ScopeError {
    ScopeError::DataUnavailable {
        reason: err.to_string(),
    }
}

/// Build an `AND b.borough_name IN (...)` clause plus its parameters.
/// `All` contributes no clause: the default aggregate runs unrestricted.
fn borough_clause(filter: &BoroughFilter) -> (String, Vec<String>) {
    match filter {
        BoroughFilter::All => (String::new(), Vec::new()),
        BoroughFilter::Only(set) => {
            let placeholders = vec!["?"; set.len()].join(", ");
            let clause = format!(" AND b.borough_name IN ({})", placeholders);
            let params = set.iter().map(|b| b.name().to_string()).collect();
            (clause, params)
        }
    }
}

impl MetricsProvider for Database {
    fn price_listings(&self, filter: &BoroughFilter) -> Result<Vec<PriceListingsRow>> {
        let (clause, params) = borough_clause(filter);
        let sql = format!(
            "SELECT b.borough_name, ROUND(AVG(l.price), 2), COUNT(l.listing_id) \
             FROM listings l \
             JOIN locations loc ON l.listing_id = loc.listing_id \
             JOIN borough b ON loc.borough_id = b.borough_id \
             WHERE l.price IS NOT NULL AND l.price > 0{} \
             GROUP BY b.borough_name \
             ORDER BY b.borough_name",
            clause
        );

        let mut stmt = self.conn().prepare(&sql).map_err(unavailable)?;
        let raw = stmt
            .query_map(params_from_iter(params), |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, f64>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            })
            .map_err(unavailable)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(unavailable)?;

        raw.into_iter()
            .map(|(name, avg_price, listings)| {
                Ok(PriceListingsRow {
                    borough: Borough::parse(&name)?,
                    avg_price,
                    listings: listings as u64,
                })
            })
            .collect()
    }

    fn room_prices(&self, filter: &BoroughFilter) -> Result<Vec<RoomPriceRow>> {
        let (clause, params) = borough_clause(filter);
        let sql = format!(
            "SELECT b.borough_name, l.room_type, l.price \
             FROM listings l \
             JOIN locations loc ON l.listing_id = loc.listing_id \
             JOIN borough b ON loc.borough_id = b.borough_id \
             WHERE l.price IS NOT NULL AND l.price > 0 \
               AND l.room_type IN ('Private room', 'Entire home/apt', 'Hotel room', 'Shared room'){} \
             ORDER BY b.borough_name",
            clause
        );

        let mut stmt = self.conn().prepare(&sql).map_err(unavailable)?;
        let raw = stmt
            .query_map(params_from_iter(params), |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, f64>(2)?,
                ))
            })
            .map_err(unavailable)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(unavailable)?;

        raw.into_iter()
            .map(|(name, room_type, price)| {
                Ok(RoomPriceRow {
                    borough: Borough::parse(&name)?,
                    room_type: room_type.parse::<RoomType>()?,
                    price,
                })
            })
            .collect()
    }

    fn crime_breakdown(&self, filter: &BoroughFilter) -> Result<Vec<CrimeRow>> {
        let (clause, params) = borough_clause(filter);
        // LEFT JOIN keeps boroughs with no recorded events; their NULL
        // level rows are discarded below and the full level axis is
        // zero-filled per borough in scope.
        let sql = format!(
            "SELECT b.borough_name, s.crime_level, COUNT(s.event_id) \
             FROM borough b \
             LEFT JOIN security s ON b.borough_id = s.borough_id \
             WHERE 1=1{} \
             GROUP BY b.borough_name, s.crime_level",
            clause
        );

        let mut stmt = self.conn().prepare(&sql).map_err(unavailable)?;
        let raw = stmt
            .query_map(params_from_iter(params), |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            })
            .map_err(unavailable)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(unavailable)?;

        let mut counts: BTreeMap<(Borough, CrimeLevel), u64> = BTreeMap::new();
        for (name, level, count) in raw {
            let borough = Borough::parse(&name)?;
            if let Some(level) = level {
                counts.insert((borough, level.parse::<CrimeLevel>()?), count as u64);
            }
        }

        let mut rows = Vec::new();
        for borough in filter.boroughs() {
            for level in CrimeLevel::ALL {
                rows.push(CrimeRow {
                    borough,
                    level,
                    count: counts.get(&(borough, level)).copied().unwrap_or(0),
                });
            }
        }
        Ok(rows)
    }

    fn tourism_crime(&self, filter: &BoroughFilter) -> Result<Vec<TourismCrimeRow>> {
        let (clause, params) = borough_clause(filter);
        let sql = format!(
            "SELECT b.borough_name, COALESCE(b.tourist_revenue, 0), \
                    COALESCE(SUM(s.crime_level_weight), 0) \
             FROM borough b \
             LEFT JOIN security s ON b.borough_id = s.borough_id \
             WHERE 1=1{} \
             GROUP BY b.borough_id, b.borough_name, b.tourist_revenue \
             ORDER BY b.borough_name",
            clause
        );

        let mut stmt = self.conn().prepare(&sql).map_err(unavailable)?;
        let raw = stmt
            .query_map(params_from_iter(params), |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, f64>(1)?,
                    row.get::<_, f64>(2)?,
                ))
            })
            .map_err(unavailable)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(unavailable)?;

        raw.into_iter()
            .map(|(name, tourism, crime_score)| {
                Ok(TourismCrimeRow {
                    borough: Borough::parse(&name)?,
                    tourism,
                    crime_score,
                })
            })
            .collect()
    }

    fn map_points(&self) -> Result<Vec<MapPoint>> {
        let sql = "SELECT b.borough_name, COUNT(loc.listing_id), COALESCE(b.tourist_revenue, 0) \
                   FROM borough b \
                   LEFT JOIN locations loc ON b.borough_id = loc.borough_id \
                   GROUP BY b.borough_id, b.borough_name \
                   ORDER BY b.borough_name";

        let mut stmt = self.conn().prepare(sql).map_err(unavailable)?;
        let raw = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, f64>(2)?,
                ))
            })
            .map_err(unavailable)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(unavailable)?;

        raw.into_iter()
            .map(|(name, listings, tourism)| {
                let borough = Borough::parse(&name)?;
                Ok(MapPoint {
                    borough,
                    listings: listings as u64,
                    tourism,
                    position: borough.map_position(),
                    color: borough.color(),
                })
            })
            .collect()
    }
}
