#![forbid(unsafe_code)]

//! Core domain model and business logic for the Setflow workout engine.
//!
//! This crate provides:
//! - Domain types (exercises, plans, logged sets, statistics)
//! - Workout session state machine
//! - Rest timer and its cancellable tick scheduler
//! - Progress aggregation and RPE recommendations
//! - Persistence (set-log WAL, CSV rollup, history loading)

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod session;
pub mod timer;
pub mod ticker;
pub mod setlog;
pub mod csv_rollup;
pub mod history;
pub mod stats;
pub mod recommend;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_plan, get_default_plan};
pub use config::Config;
pub use session::{AdvanceOutcome, SetOutcome, WorkoutSession};
pub use timer::{Alert, RestTimer, SilentAlert, TimerTick};
pub use ticker::Ticker;
pub use setlog::{JsonlSink, SetSink};
pub use history::load_user_history;
pub use stats::compute_stats;
pub use recommend::{recommend_adjustment, Recommendation};
