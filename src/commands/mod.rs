//! Command implementations for the bnbscope CLI

pub mod chart;
pub mod dispatch;
pub mod init;
pub mod map;
pub mod session;
