//! The staged build sequence: configuration and the orchestrator that drives
//! a [`crate::host::BuildHost`] through it.

pub mod config;
pub mod orchestrator;

pub use config::BuildConfig;
pub use orchestrator::{BuildOrchestrator, BuildReport};
