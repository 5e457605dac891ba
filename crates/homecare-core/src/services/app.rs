//! Authentication gate paired with at most one live tenant session

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::domain::TenantContext;
use crate::error::DomainError;
use crate::repositories::{CredentialProvider, SessionStorage, TenantStore};

use super::auth_service::{AuthGate, AuthState};
use super::session::HomeCareSession;

pub struct HomeCareApp<C: CredentialProvider, S: SessionStorage> {
    store: Arc<dyn TenantStore>,
    gate: AuthGate<C, S>,
    session: RwLock<Option<Arc<HomeCareSession>>>,
    // Login, restore and logout run one at a time.
    transition: Mutex<()>,
}

impl<C: CredentialProvider, S: SessionStorage> HomeCareApp<C, S> {
    pub fn new(store: Arc<dyn TenantStore>, credentials: Arc<C>, storage: Arc<S>) -> Self {
        Self {
            store,
            gate: AuthGate::new(credentials, storage),
            session: RwLock::new(None),
            transition: Mutex::new(()),
        }
    }

    pub fn state(&self) -> AuthState {
        self.gate.state()
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Arc<HomeCareSession>, DomainError> {
        let _transition = self.transition.lock().await;
        let context = self.gate.login(username, password).await?;
        self.open(context).await
    }

    /// Resume the persisted session, if any.
    pub async fn restore_session(&self) -> Result<Option<Arc<HomeCareSession>>, DomainError> {
        let _transition = self.transition.lock().await;
        match self.gate.restore_session()? {
            Some(context) => self.open(context).await.map(Some),
            None => Ok(None),
        }
    }

    /// Waits for an in-flight login or restore to finish, then ends it.
    pub async fn logout(&self) -> Result<(), DomainError> {
        let _transition = self.transition.lock().await;
        self.close();
        self.gate.logout()
    }

    /// The live session, `NotAuthenticated` while anonymous.
    pub fn session(&self) -> Result<Arc<HomeCareSession>, DomainError> {
        self.session.read().clone().ok_or(DomainError::NotAuthenticated)
    }

    async fn open(&self, context: TenantContext) -> Result<Arc<HomeCareSession>, DomainError> {
        self.close();
        match HomeCareSession::start(self.store.clone(), context).await {
            Ok(session) => {
                let session = Arc::new(session);
                *self.session.write() = Some(session.clone());
                Ok(session)
            }
            Err(e) => {
                error!("Failed to start tenant session: {}", e);
                if let Err(clear_err) = self.gate.logout() {
                    error!("Failed to clear session after start failure: {}", clear_err);
                }
                Err(e)
            }
        }
    }

    fn close(&self) {
        if let Some(previous) = self.session.write().take() {
            info!("Closing session for {}", previous.context().username);
            previous.teardown();
        }
    }
}
