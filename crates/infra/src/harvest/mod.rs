//! Harvest time-tracking integration

pub mod client;
pub mod oauth;
pub mod types;

pub use client::HarvestClient;
