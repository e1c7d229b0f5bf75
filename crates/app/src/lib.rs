//! `gridwatch-app`: the dashboard shell.
//!
//! This crate composes the session store, the view router, and the four
//! panel providers into one explicitly constructed [`Dashboard`], and gives
//! user actions a single typed entry point: the [`Command`] dispatch.
//! Presentation sits on top of this crate; nothing below it knows about
//! rendering.

pub mod activity;
pub mod command;
pub mod dashboard;
pub mod degraded;
pub mod export;
pub mod map;
pub mod map_loader;
pub mod retry;
pub mod summary;

pub use activity::{ActivityEntry, ActivityKind, ActivityLog};
pub use command::{Command, Outcome};
pub use dashboard::{Dashboard, OptimizeJob, OptimizeOutcome};
pub use degraded::{DegradedMode, Resource};
pub use map::{MapOverlays, MapPoint, MapScene};
pub use map_loader::{CachedMapLoader, MapScriptSource};
pub use retry::RetryPolicy;
pub use summary::TrafficSummary;
