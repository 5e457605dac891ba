// ============================================================================
// HomeCare Core - Authentication Gate
// File: crates/homecare-core/src/services/auth_service.rs
// ============================================================================
//! Login, logout and session restore over injected credential and session ports

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::domain::TenantContext;
use crate::error::DomainError;
use crate::repositories::{CredentialProvider, PersistedSession, SessionStorage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticated(TenantContext),
}

impl AuthState {
    pub fn context(&self) -> Option<&TenantContext> {
        match self {
            AuthState::Anonymous => None,
            AuthState::Authenticated(ctx) => Some(ctx),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }
}

/// Gate between anonymous and tenant-scoped use
pub struct AuthGate<C: CredentialProvider, S: SessionStorage> {
    credentials: Arc<C>,
    storage: Arc<S>,
    state: RwLock<AuthState>,
}

impl<C: CredentialProvider, S: SessionStorage> AuthGate<C, S> {
    pub fn new(credentials: Arc<C>, storage: Arc<S>) -> Self {
        Self {
            credentials,
            storage,
            state: RwLock::new(AuthState::Anonymous),
        }
    }

    /// Validate credentials and persist the resulting session.
    /// A rejected attempt leaves the current state untouched.
    pub async fn login(&self, username: &str, password: &str) -> Result<TenantContext, DomainError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            warn!("Login rejected: missing username or password");
            return Err(DomainError::InvalidCredentials);
        }

        info!("Login attempt for user: {}", username);

        let context = self.credentials.validate(username, password).await.map_err(|e| {
            warn!("Login failed for {}: {}", username, e);
            e
        })?;

        if let Err(e) = self.storage.save(&PersistedSession::from(&context)) {
            warn!("Session for {} will not survive a restart: {}", username, e);
        }

        *self.state.write() = AuthState::Authenticated(context.clone());
        info!("Login successful for {} (tenant {})", context.username, context.tenant_id);
        Ok(context)
    }

    pub fn logout(&self) -> Result<(), DomainError> {
        let previous = std::mem::replace(&mut *self.state.write(), AuthState::Anonymous);
        if let Some(ctx) = previous.context() {
            info!("Logout for {}", ctx.username);
        }
        self.storage.clear()
    }

    /// Re-enter the persisted session without re-validating it.
    pub fn restore_session(&self) -> Result<Option<TenantContext>, DomainError> {
        let persisted = self.storage.load()?;
        match persisted.to_context() {
            Some(context) => {
                info!("Restored session for {} (tenant {})", context.username, context.tenant_id);
                *self.state.write() = AuthState::Authenticated(context.clone());
                Ok(Some(context))
            }
            None => Ok(None),
        }
    }

    pub fn state(&self) -> AuthState {
        self.state.read().clone()
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::repositories::credential_provider::MockCredentialProvider;
    use crate::repositories::session_storage::MockSessionStorage;

    fn jess() -> TenantContext {
        TenantContext::new("Jess", "Jess", Role::Admin, "Jess - HomeCare Admin")
    }

    #[tokio::test]
    async fn test_login_persists_session() {
        let mut credentials = MockCredentialProvider::new();
        credentials
            .expect_validate()
            .withf(|u, p| u == "Jess" && p == "JessCard2025!")
            .returning(|_, _| Ok(jess()));
        let mut storage = MockSessionStorage::new();
        storage
            .expect_save()
            .withf(|s| s.tenant.as_deref() == Some("Jess") && s.role.as_deref() == Some("admin"))
            .times(1)
            .returning(|_| Ok(()));

        let gate = AuthGate::new(Arc::new(credentials), Arc::new(storage));
        let ctx = gate.login("Jess", "JessCard2025!").await.unwrap();

        assert_eq!(ctx.tenant_id, "Jess");
        assert_eq!(gate.state(), AuthState::Authenticated(jess()));
    }

    #[tokio::test]
    async fn test_rejected_login_stays_anonymous() {
        let mut credentials = MockCredentialProvider::new();
        credentials
            .expect_validate()
            .returning(|_, _| Err(DomainError::InvalidCredentials));
        let mut storage = MockSessionStorage::new();
        storage.expect_save().times(0);

        let gate = AuthGate::new(Arc::new(credentials), Arc::new(storage));
        assert_eq!(gate.login("Jess", "wrong").await.unwrap_err(), DomainError::InvalidCredentials);
        assert_eq!(gate.state(), AuthState::Anonymous);
    }

    #[tokio::test]
    async fn test_empty_input_skips_provider() {
        let mut credentials = MockCredentialProvider::new();
        credentials.expect_validate().times(0);

        let gate = AuthGate::new(Arc::new(credentials), Arc::new(MockSessionStorage::new()));
        assert_eq!(gate.login("", "pw").await.unwrap_err(), DomainError::InvalidCredentials);
        assert_eq!(gate.login("Jess", "").await.unwrap_err(), DomainError::InvalidCredentials);
    }

    #[test]
    fn test_restore_and_logout() {
        let mut storage = MockSessionStorage::new();
        storage.expect_load().returning(|| {
            Ok(PersistedSession {
                user: Some("GBTech".into()),
                tenant: Some("GBTech".into()),
                role: None,
                display_name: None,
            })
        });
        storage.expect_clear().times(1).returning(|| Ok(()));

        let gate = AuthGate::new(Arc::new(MockCredentialProvider::new()), Arc::new(storage));
        let ctx = gate.restore_session().unwrap().unwrap();
        assert_eq!(ctx.role, Role::Caregiver);
        assert_eq!(ctx.display_name, "GBTech");
        assert!(gate.state().is_authenticated());

        gate.logout().unwrap();
        assert_eq!(gate.state(), AuthState::Anonymous);
    }

    #[test]
    fn test_restore_without_tenant() {
        let mut storage = MockSessionStorage::new();
        storage.expect_load().returning(|| Ok(PersistedSession::default()));

        let gate = AuthGate::new(Arc::new(MockCredentialProvider::new()), Arc::new(storage));
        assert_eq!(gate.restore_session().unwrap(), None);
        assert_eq!(gate.state(), AuthState::Anonymous);
    }
}
