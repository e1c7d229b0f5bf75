//! `gridwatch-session`: the authenticated-session boundary.
//!
//! This crate owns the single shared resource of the dashboard: the persisted
//! current identity. It is intentionally decoupled from presentation and from
//! any concrete backend; authentication happens behind the [`Authenticator`]
//! trait, persistence behind the [`StorageVault`] trait.

pub mod identity;
pub mod store;
pub mod vault;

pub use identity::{Identity, Role};
pub use store::{Authenticator, SessionStore, StubAuthenticator};
pub use vault::{FileVault, MemoryVault, StorageVault, SESSION_KEY};
