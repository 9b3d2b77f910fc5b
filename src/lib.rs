pub mod aggregate;
pub mod board;
pub mod config;
pub mod dataset;
pub mod export;
pub mod percentile;
pub mod profile;
pub mod rankings;
pub mod stat_hub;
pub mod state;
