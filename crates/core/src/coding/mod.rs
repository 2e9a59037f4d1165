//! Coding-time bridge between the coding-activity tracker and timesheets

pub mod ports;
pub mod reconcile;

pub use reconcile::CodingTimeReconciler;
