//! Custody Draw Simulation Framework
//!
//! Seeded, fully deterministic simulation of many depositors drawing against
//! one engine. Exercises all three asset kinds, fee-bearing tokens, shuffled
//! oracle answers and failed payouts, and checks custody conservation.
//!
//! # Modules
//! - `world`: Engine, mock chain and mock oracle with deterministic addresses
//! - `bots`: Seeded depositor bots
//! - `scenarios`: Baseline, fee-on-transfer, mixed assets, out-of-order, stuck payout
//! - `metrics`: Outcome counters and forfeiture rate
//! - `replay`: Event log digests and deterministic replay validation
//! - `export`: Metrics and scenario JSON export

pub mod bots;
pub mod export;
pub mod metrics;
pub mod replay;
pub mod scenarios;
pub mod world;

/// Crate version constant
pub const VERSION: &str = "1.0.0";
