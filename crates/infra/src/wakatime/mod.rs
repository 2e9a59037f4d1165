//! WakaTime coding-activity integration

pub mod client;
pub mod oauth;

pub use client::WakaTimeClient;
