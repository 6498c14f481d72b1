//! Simulated participants

pub mod depositor;

pub use depositor::{DepositorBot, DepositorConfig, Stake};
