//! Probabilistic Custody Draw Engine
//!
//! A depositor hands over an asset of any standard kind. The engine takes it
//! into custody, asks an external oracle for randomness and, when the oracle
//! answers, rolls a six-sided die: zero keeps the asset forever, any other
//! face returns exactly what was recorded.
//!
//! # Modules
//! - `errors`: Contract-specific error types
//! - `events`: Events emitted on pull and resolution
//! - `security`: Direct-caller and oracle-only checks
//! - `asset`: Asset capability traits and the host `AssetBook`
//! - `classifier`: Fail-open interface probing
//! - `ledger`: Obligation table and request tracker
//! - `custody`: Per-kind intake and release
//! - `resolver`: Die roll and resolution
//! - `oracle`: Randomness request boundary
//! - `config`: Construction-time configuration
//! - `engine`: The `pull` / `fulfill` entry points
//! - `mocks`: In-memory assets, host chain and oracle

pub mod asset;
pub mod classifier;
pub mod config;
pub mod custody;
pub mod engine;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod mocks;
pub mod oracle;
pub mod resolver;
pub mod security;

pub use config::EngineConfig;
pub use engine::{Engine, PullReceipt};
pub use errors::{ConfigError, FulfillError, IntakeError, OracleError, PullError};
pub use events::ContractEvent;
pub use resolver::{DrawOutcome, DrawResolution};
pub use security::CallContext;

/// Contract ABI version, frozen after release
pub const CONTRACT_ABI_VERSION: &str = "1.0.0";
