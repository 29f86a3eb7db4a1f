//! Session Store
//! Mission: Single source of truth for the logged-in token and role

use crate::session::models::{Role, Session};
use crate::session::notifier::{ChangeNotifier, Subscription};
use crate::session::storage::{MemoryStorage, SessionStorage, ROLE_KEY, TOKEN_KEY};
use anyhow::Result;
use tracing::info;

/// Holds the current session in durable storage and announces every change.
///
/// Constructed once at startup and shared as `Arc<SessionStore>`. Reads go
/// back to storage every time, so callers always see the latest write.
pub struct SessionStore {
    storage: Box<dyn SessionStorage>,
    notifier: ChangeNotifier,
}

impl SessionStore {
    pub fn new(storage: impl SessionStorage + 'static) -> Self {
        Self {
            storage: Box::new(storage),
            notifier: ChangeNotifier::new(),
        }
    }

    /// Store backed by a process-local map.
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    /// Store the token/role pair and notify subscribers.
    ///
    /// Subscribers run synchronously after both entries are written, so a
    /// callback that re-reads the store sees the complete pair. A failed
    /// write propagates and fires no notification.
    pub fn set_session(&self, token: &str, role: Role) -> Result<()> {
        debug_assert!(!token.is_empty(), "token must be non-empty");

        self.storage.set(TOKEN_KEY, token)?;
        self.storage.set(ROLE_KEY, role.as_str())?;

        info!("🔐 Session opened ({})", role.as_str());
        self.notifier.notify();
        Ok(())
    }

    /// Remove both entries and notify subscribers. Clearing an already
    /// empty store completes and notifies all the same.
    pub fn clear_session(&self) -> Result<()> {
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(ROLE_KEY)?;

        info!("🚪 Session cleared");
        self.notifier.notify();
        Ok(())
    }

    /// Read the current session fresh from storage.
    ///
    /// A half-present pair or an unknown role string reads as the empty
    /// session; that state only arises from out-of-band edits to the
    /// durable file, and it must not count as logged in.
    pub fn session(&self) -> Session {
        let token = self.storage.get(TOKEN_KEY);
        let role = self
            .storage
            .get(ROLE_KEY)
            .and_then(|raw| Role::from_str(&raw));

        match (token, role) {
            (Some(token), Some(role)) => Session::authenticated(token, role),
            _ => Session::empty(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }

    /// Subscribe to session changes. The callback receives no payload;
    /// re-read the store from inside it.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.notifier.subscribe(callback)
    }

    pub fn subscriber_count(&self) -> usize {
        self.notifier.subscriber_count()
    }
}
