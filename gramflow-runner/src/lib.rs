//! Gramflow Runner
//!
//! Drives one asynchronous scrape run on the actor platform to completion:
//! submit the run, poll its status on a fixed cadence up to a bounded attempt
//! budget, fetch the dataset, project the caller-selected fields, optionally
//! enrich captions, and hand the outcome to the result store.
//!
//! Architecture:
//! - Configuration: polling cadence and attempt budget, from environment or
//!   defaults
//! - Seams: collaborators (platform, enricher, result sink) consumed through
//!   traits so tests can script them
//! - Runner: the linear job lifecycle and its error taxonomy
//!
//! Each run owns its platform handle exclusively; concurrent runs share no
//! mutable state.

pub mod config;
pub mod error;
pub mod platform;
pub mod runner;

pub use config::Config;
pub use error::{Phase, RunError};
pub use platform::{ActorPlatform, Enricher, ResultSink};
pub use runner::{JobRunner, RunOutcome};
