use parking_lot::Mutex;

use homecare_core::repositories::{PersistedSession, SessionStorage};
use homecare_core::DomainError;

/// Process-local session storage, lost on exit.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    inner: Mutex<PersistedSession>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: PersistedSession) -> Self {
        Self {
            inner: Mutex::new(session),
        }
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Result<PersistedSession, DomainError> {
        Ok(self.inner.lock().clone())
    }

    fn save(&self, session: &PersistedSession) -> Result<(), DomainError> {
        *self.inner.lock() = session.clone();
        Ok(())
    }

    fn clear(&self) -> Result<(), DomainError> {
        *self.inner.lock() = PersistedSession::default();
        Ok(())
    }
}
