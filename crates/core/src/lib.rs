//! `gridwatch-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! the shared error taxonomy, strongly-typed identifiers, geographic
//! primitives, and the status-lifecycle contract every panel record follows.

pub mod error;
pub mod geo;
pub mod id;
pub mod lifecycle;

pub use error::{DomainError, DomainResult};
pub use geo::GeoPoint;
pub use id::{IdentityId, RecordId};
pub use lifecycle::Lifecycle;
