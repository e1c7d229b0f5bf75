//! `gridwatch-router`: single-active-view navigation state.
//!
//! Exactly one dashboard panel is active at a time. The router owns which
//! one, how unknown view names are treated, and the staleness tokens that
//! keep late async results from mutating a panel the user has left.

pub mod router;
pub mod view;

pub use router::{NavigationPolicy, ViewRouter, ViewToken};
pub use view::ActiveView;
