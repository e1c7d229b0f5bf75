//! Session store: login, signup, logout, and the persisted current identity.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use gridwatch_core::{DomainError, DomainResult};

use crate::identity::{Identity, Role};
use crate::vault::{StorageVault, SESSION_KEY};

/// Backend authentication boundary.
///
/// The store validates input shape before calling this trait, so an
/// implementation only decides whether the credentials are acceptable and
/// which verified identity (including role) they map to. A real deployment
/// substitutes a remote identity provider here.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, email: &str, password: &str) -> DomainResult<Identity>;

    async fn register(&self, email: &str, password: &str, name: &str) -> DomainResult<Identity>;
}

/// Stand-in authenticator reproducing the observed placeholder behavior:
/// login yields an `admin` named after the email's local part, signup yields
/// a `citizen`. Role-by-entry-point is a placeholder policy, not a real one;
/// it lives here, behind the trait, precisely so it can be replaced wholesale.
#[derive(Debug, Clone)]
pub struct StubAuthenticator {
    latency: Duration,
}

impl StubAuthenticator {
    /// Production wiring simulates ~1s of network latency.
    pub fn new() -> Self {
        Self::with_latency(Duration::from_secs(1))
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for StubAuthenticator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Authenticator for StubAuthenticator {
    async fn authenticate(&self, email: &str, _password: &str) -> DomainResult<Identity> {
        tokio::time::sleep(self.latency).await;
        let name = email.split('@').next().unwrap_or(email).to_string();
        Ok(Identity::new(email, name, Role::Admin))
    }

    async fn register(&self, email: &str, _password: &str, name: &str) -> DomainResult<Identity> {
        tokio::time::sleep(self.latency).await;
        Ok(Identity::new(email, name, Role::Citizen))
    }
}

/// Owner of the persisted current identity.
///
/// # Invariants
/// - Zero or one identity is current at any time.
/// - All vault writes under [`SESSION_KEY`] go through this type.
/// - Session existence is necessary and sufficient for dashboard access;
///   callers gate on [`SessionStore::current_identity`].
pub struct SessionStore {
    vault: Arc<dyn StorageVault>,
    authenticator: Arc<dyn Authenticator>,
}

impl SessionStore {
    pub fn new(vault: Arc<dyn StorageVault>, authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            vault,
            authenticator,
        }
    }

    /// Authenticate and persist the resulting identity.
    ///
    /// Empty or absent credentials fail with `InvalidCredentials` before the
    /// authenticator is consulted, and nothing is persisted on any failure.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<Identity> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(DomainError::InvalidCredentials);
        }

        let identity = self.authenticator.authenticate(email, password).await?;
        self.persist(&identity)?;
        tracing::info!(email = %identity.email, role = %identity.role, "session opened");
        Ok(identity)
    }

    /// Register a new identity and persist it.
    ///
    /// Fails with `MissingField` naming the first empty input.
    pub async fn signup(&self, email: &str, password: &str, name: &str) -> DomainResult<Identity> {
        for (field, value) in [("email", email), ("password", password), ("name", name)] {
            if value.trim().is_empty() {
                return Err(DomainError::missing_field(field));
            }
        }

        let identity = self.authenticator.register(email, password, name).await?;
        self.persist(&identity)?;
        tracing::info!(email = %identity.email, role = %identity.role, "account created");
        Ok(identity)
    }

    /// Clear the persisted identity. Idempotent: absent session is a no-op.
    pub fn logout(&self) -> DomainResult<()> {
        self.vault.remove(SESSION_KEY)?;
        tracing::info!("session closed");
        Ok(())
    }

    /// Pure read of the persisted identity.
    ///
    /// Corrupt or unreadable storage degrades to `None`; a broken vault must
    /// never lock the user out of the login flow.
    pub fn current_identity(&self) -> Option<Identity> {
        let raw = match self.vault.read(SESSION_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(error = %e, "session vault unreadable; treating as signed out");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(identity) => Some(identity),
            Err(e) => {
                tracing::warn!(error = %e, "session record corrupt; treating as signed out");
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_identity().is_some()
    }

    fn persist(&self, identity: &Identity) -> DomainResult<()> {
        let raw = serde_json::to_string(identity)
            .map_err(|e| DomainError::storage(format!("session serialize failed: {e}")))?;
        self.vault.write(SESSION_KEY, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::MemoryVault;

    fn store() -> SessionStore {
        SessionStore::new(
            Arc::new(MemoryVault::new()),
            Arc::new(StubAuthenticator::with_latency(Duration::ZERO)),
        )
    }

    #[tokio::test]
    async fn login_returns_identity_with_matching_email() {
        let store = store();
        let identity = store.login("ana@example.com", "secret").await.unwrap();
        assert_eq!(identity.email, "ana@example.com");
        assert_eq!(identity.name, "ana");
        assert_eq!(identity.role, Role::Admin);
    }

    #[tokio::test]
    async fn login_with_empty_field_persists_nothing() {
        let store = store();
        for (email, password) in [("", "secret"), ("ana@example.com", ""), ("", "")] {
            let err = store.login(email, password).await.unwrap_err();
            assert_eq!(err, DomainError::InvalidCredentials);
            assert!(store.current_identity().is_none());
        }
    }

    #[tokio::test]
    async fn signup_names_the_first_missing_field() {
        let store = store();
        let err = store.signup("a@b.c", "", "Ana").await.unwrap_err();
        assert_eq!(err, DomainError::missing_field("password"));

        let err = store.signup("", "pw", "Ana").await.unwrap_err();
        assert_eq!(err, DomainError::missing_field("email"));
    }

    #[tokio::test]
    async fn signup_yields_citizen_role() {
        let store = store();
        let identity = store.signup("cz@example.com", "pw", "Cee").await.unwrap();
        assert_eq!(identity.role, Role::Citizen);
        assert_eq!(identity.name, "Cee");
    }

    #[tokio::test]
    async fn persisted_session_round_trips_field_for_field() {
        let vault = Arc::new(MemoryVault::new());
        let store = SessionStore::new(
            vault.clone(),
            Arc::new(StubAuthenticator::with_latency(Duration::ZERO)),
        );
        let identity = store.login("ana@example.com", "secret").await.unwrap();
        assert_eq!(store.current_identity(), Some(identity));
    }

    #[tokio::test]
    async fn logout_then_read_is_none_and_logout_is_idempotent() {
        let store = store();
        store.login("ana@example.com", "secret").await.unwrap();
        store.logout().unwrap();
        assert!(store.current_identity().is_none());
        store.logout().unwrap();
        assert!(store.current_identity().is_none());
    }

    #[tokio::test]
    async fn corrupt_session_record_reads_as_signed_out() {
        let vault = Arc::new(MemoryVault::new());
        vault.write(SESSION_KEY, "{{{not json").unwrap();
        let store = SessionStore::new(
            vault,
            Arc::new(StubAuthenticator::with_latency(Duration::ZERO)),
        );
        assert!(store.current_identity().is_none());
    }
}
