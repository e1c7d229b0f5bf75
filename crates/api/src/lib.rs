//! `gridwatch-api`: the rover prediction stub endpoint.
//!
//! A deliberately tiny HTTP service preserving the external collaborator
//! contract: one prediction route plus a banner. The linear-extrapolation
//! "model" is part of the contract, not a placeholder to improve here.

pub mod app;

pub use app::build_app;
