#![warn(missing_docs)]
#![warn(clippy::all)]

//! Nervix Delegator - capability-based task delegation for a nanobot fleet
//!
//! This library fetches pending tasks from the Nervix task-source API,
//! scores each task's required capability tags against the agents recorded
//! in a local fleet snapshot, claims the best match at the API, and keeps
//! an append-only JSON log of every assignment.
//!
//! ## Usage
//! ```rust,ignore
//! use nervix_delegator::{Delegator, DelegatorConfig};
//!
//! async fn example() -> nervix_delegator::Result<()> {
//!     let config = DelegatorConfig::new("http://localhost:3001/v1");
//!     let mut delegator = Delegator::new(config).await?;
//!     let count = delegator.delegate_tasks(10).await?;
//!     println!("delegated {} tasks", count);
//!     Ok(())
//! }
//! ```

/// HTTP client for the Nervix task-source API
pub mod api;
/// Configuration loading and validation
pub mod config;
/// The delegation cycle orchestrator
pub mod delegator;
/// Error handling types and utilities
pub mod error;
/// Logging configuration and utilities
pub mod logging;
/// Capability scoring and agent selection
pub mod matching;
/// Data model shared across the API and the local stores
pub mod models;
/// JSON file persistence for the fleet snapshot and assignment log
pub mod store;

pub use api::TaskSourceClient;
pub use config::DelegatorConfig;
pub use delegator::Delegator;
pub use error::{DelegatorError, Result};
pub use matching::{find_best_agent, match_score};
pub use models::{Agent, Assignment, AssignmentLog, FleetSnapshot, Task};
pub use store::{AssignmentStore, FleetStore};
