//! Types library for the probabilistic custody draw engine
//!
//! Shared definitions used by the engine, its reference collaborators and the
//! simulation harness.
//!
//! # Modules
//! - `ids`: Principal addresses and oracle request identifiers
//! - `numeric`: Asset quantities, item ids, 256-bit random words
//! - `asset`: Asset kinds, capability interface ids, receiver tokens
//! - `errors`: External call failure taxonomy

pub mod ids;
pub mod numeric;
pub mod asset;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::asset::*;
    pub use crate::errors::*;
}
