//! SQLite schema for the listings/security/tourism database.

use rusqlite::{Connection, Result};

const SCHEMA_SQL: &str = r#"
-- The five boroughs plus their expected tourism revenue (millions USD)
CREATE TABLE IF NOT EXISTS borough (
    borough_id INTEGER PRIMARY KEY,
    borough_name TEXT NOT NULL UNIQUE,
    tourist_revenue REAL
);

CREATE TABLE IF NOT EXISTS hosts (
    host_id INTEGER PRIMARY KEY,
    host_name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS listings (
    listing_id INTEGER PRIMARY KEY,
    host_id INTEGER REFERENCES hosts(host_id),
    room_type TEXT,
    price REAL
);
CREATE INDEX IF NOT EXISTS idx_listings_room_type ON listings(room_type);

-- Listing -> borough placement
CREATE TABLE IF NOT EXISTS locations (
    listing_id INTEGER NOT NULL REFERENCES listings(listing_id),
    borough_id INTEGER NOT NULL REFERENCES borough(borough_id),
    PRIMARY KEY (listing_id, borough_id)
);
CREATE INDEX IF NOT EXISTS idx_locations_borough ON locations(borough_id);

-- Recorded crime events with severity level and weight
CREATE TABLE IF NOT EXISTS security (
    event_id INTEGER PRIMARY KEY,
    borough_id INTEGER NOT NULL REFERENCES borough(borough_id),
    crime_level TEXT NOT NULL,
    crime_level_weight INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_security_borough ON security(borough_id);
"#;

pub fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}

/// Small demonstration dataset: all five boroughs, a spread of room types
/// and prices, and crime events for every borough except Staten Island
/// (which exercises the coalesce-to-zero path).
const DEMO_SQL: &str = r#"
INSERT OR REPLACE INTO borough (borough_id, borough_name, tourist_revenue) VALUES
    (1, 'Manhattan', 2500.0),
    (2, 'Brooklyn', 1200.0),
    (3, 'Queens', 800.0),
    (4, 'Bronx', 350.0),
    (5, 'Staten Island', 150.0);

INSERT OR REPLACE INTO hosts (host_id, host_name) VALUES
    (1, 'Alicia'), (2, 'Ben'), (3, 'Carmen'), (4, 'Dmitri'), (5, 'Elena');

INSERT OR REPLACE INTO listings (listing_id, host_id, room_type, price) VALUES
    (101, 1, 'Entire home/apt', 320.0),
    (102, 1, 'Entire home/apt', 280.0),
    (103, 2, 'Private room', 140.0),
    (104, 2, 'Hotel room', 410.0),
    (105, 3, 'Entire home/apt', 180.0),
    (106, 3, 'Private room', 95.0),
    (107, 3, 'Shared room', 60.0),
    (108, 4, 'Private room', 85.0),
    (109, 4, 'Entire home/apt', 150.0),
    (110, 5, 'Private room', 70.0),
    (111, 5, 'Shared room', 45.0),
    (112, 2, 'Entire home/apt', 210.0),
    (113, 4, 'Private room', 75.0),
    (114, 5, 'Entire home/apt', 130.0);

INSERT OR REPLACE INTO locations (listing_id, borough_id) VALUES
    (101, 1), (102, 1), (103, 1), (104, 1),
    (105, 2), (106, 2), (107, 2), (112, 2),
    (108, 3), (109, 3), (113, 3),
    (110, 4),
    (111, 5), (114, 5);

INSERT OR REPLACE INTO security (event_id, borough_id, crime_level, crime_level_weight) VALUES
    (1, 1, 'FELONY', 3),
    (2, 1, 'MISDEMEANOR', 2),
    (3, 1, 'MISDEMEANOR', 2),
    (4, 1, 'VIOLATION', 1),
    (5, 2, 'VIOLATION', 1),
    (6, 2, 'VIOLATION', 1),
    (7, 2, 'MISDEMEANOR', 2),
    (8, 3, 'MISDEMEANOR', 2),
    (9, 3, 'FELONY', 3),
    (10, 4, 'FELONY', 3),
    (11, 4, 'FELONY', 3),
    (12, 4, 'VIOLATION', 1);
"#;

pub fn seed_demo(conn: &Connection) -> Result<()> {
    conn.execute_batch(DEMO_SQL)
}
