//! Bnbscope Core Library
//!
//! Domain logic for the NYC Airbnb borough analytics tool: the borough
//! enumeration and reference data, the selection store and its derived
//! views, the SQLite metrics provider, and chart dataset construction.

pub mod borough;
pub mod charts;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod ranks;
pub mod selection;
pub mod session;
