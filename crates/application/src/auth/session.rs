//! Durable session state: the single writer of session storage.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use exjobnet_domain::{
    AuthResult, AuthenticatedUser, ProfileUpdate, Session, SessionMarkers,
};

use crate::ports::{Clock, CredentialService, SessionStorage, StorageError};

/// Storage keys shared with the web client; changing them would sign every
/// existing user out.
pub mod keys {
    /// Bearer token.
    pub const TOKEN: &str = "token";
    /// Serialized [`AuthenticatedUser`](exjobnet_domain::AuthenticatedUser).
    pub const USER: &str = "user";
    /// "This session originated from federated sign-in."
    pub const FEDERATED_SESSION: &str = "google_oauth_session";
    /// "This session should be kept alive by activity."
    pub const PERSISTENT_SESSION: &str = "google_oauth_persistent";
    /// Last renewal acknowledgement, RFC 3339.
    pub const RENEWAL_MARKER: &str = "session_timestamp";
}

/// Owns the current [`Session`] and mirrors it to durable storage.
///
/// Every durable write in the core goes through this type; the other
/// components read the in-memory mirror. The mirror uses synchronous locks
/// so [`AccessGuard`](crate::auth::AccessGuard) predicates stay free of
/// async machinery.
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    service: Arc<dyn CredentialService>,
    clock: Arc<dyn Clock>,
    session: RwLock<Option<Session>>,
    markers: RwLock<SessionMarkers>,
    loading: AtomicBool,
    resolved: AtomicBool,
}

/// Clears the shared loading flag when an operation finishes, error paths
/// included.
pub struct LoadingGuard<'a> {
    loading: &'a AtomicBool,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.loading.store(false, Ordering::SeqCst);
    }
}

fn read<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl SessionStore {
    /// Creates a store over the given storage, backend service and clock.
    #[must_use]
    pub fn new(
        storage: Arc<dyn SessionStorage>,
        service: Arc<dyn CredentialService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            storage,
            service,
            clock,
            session: RwLock::new(None),
            markers: RwLock::new(SessionMarkers::default()),
            loading: AtomicBool::new(false),
            resolved: AtomicBool::new(false),
        }
    }

    /// Restores a session from durable storage. Run once at startup.
    ///
    /// A complete `{token, user}` pair is accepted as-is, without backend
    /// revalidation. A token revoked server-side therefore stays usable
    /// locally until the first rejected request.
    ///
    /// Any read failure, undecodable user record, or half-written pair wipes
    /// storage entirely and resolves to the signed-out state. The user never
    /// sees an error, only "not logged in".
    pub async fn restore(&self) -> Option<Session> {
        let outcome = self.try_restore().await;
        let session = match outcome {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!(error = %err, "session restoration failed; wiping storage");
                if let Err(err) = self.storage.clear().await {
                    tracing::warn!(error = %err, "storage wipe failed");
                }
                None
            }
        };

        if let Some(session) = &session {
            *write(&self.session) = Some(session.clone());
        }
        self.resolved.store(true, Ordering::SeqCst);
        session
    }

    async fn try_restore(&self) -> Result<Option<Session>, StorageError> {
        let token = self.storage.get(keys::TOKEN).await?;
        let user = self.storage.get(keys::USER).await?;

        let (token, user_json) = match (token, user) {
            (Some(token), Some(user)) => (token, user),
            (None, None) => return Ok(None),
            // One half of the pair violates the token/user invariant.
            _ => {
                return Err(StorageError::Corrupted(
                    "token and user must be stored together".to_string(),
                ));
            }
        };

        let user: AuthenticatedUser = serde_json::from_str(&user_json)
            .map_err(|err| StorageError::Corrupted(err.to_string()))?;

        let federated = self.read_flag(keys::FEDERATED_SESSION).await?;
        let persistent = self.read_flag(keys::PERSISTENT_SESSION).await?;
        *write(&self.markers) = SessionMarkers {
            federated,
            persistent,
        };

        Ok(Some(Session::new(token, user)))
    }

    async fn read_flag(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.storage.get(key).await?.as_deref() == Some("true"))
    }

    /// Persists a freshly established session and its origin markers.
    ///
    /// Federated sessions also receive an initial renewal stamp; credential
    /// sessions clear any markers a previous federated session left behind.
    ///
    /// # Errors
    /// Propagates storage failures; the in-memory session is still set so a
    /// flaky medium does not undo a successful login.
    pub async fn establish(&self, session: Session, markers: SessionMarkers) -> AuthResult<()> {
        *write(&self.session) = Some(session.clone());
        *write(&self.markers) = markers;
        self.resolved.store(true, Ordering::SeqCst);

        let user_json = serde_json::to_string(&session.user)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        self.storage.set(keys::TOKEN, &session.token).await?;
        self.storage.set(keys::USER, &user_json).await?;

        if markers.federated {
            self.storage.set(keys::FEDERATED_SESSION, "true").await?;
            self.storage
                .set(keys::PERSISTENT_SESSION, if markers.persistent { "true" } else { "false" })
                .await?;
            self.storage
                .set(keys::RENEWAL_MARKER, &self.clock.now().to_rfc3339())
                .await?;
        } else {
            self.storage.remove(keys::FEDERATED_SESSION).await?;
            self.storage.remove(keys::PERSISTENT_SESSION).await?;
            self.storage.remove(keys::RENEWAL_MARKER).await?;
        }

        Ok(())
    }

    /// Signs out: best-effort backend invalidation, then unconditional local
    /// teardown.
    ///
    /// Always succeeds from the caller's perspective; an unreachable backend
    /// is logged and swallowed.
    pub async fn logout(&self) {
        let token = read(&self.session).as_ref().map(|s| s.token.clone());

        if let Some(token) = token {
            if let Err(err) = self.service.logout(&token).await {
                tracing::debug!(error = %err, "backend logout failed; clearing locally anyway");
            }
        }

        *write(&self.session) = None;
        *write(&self.markers) = SessionMarkers::default();

        for key in [
            keys::TOKEN,
            keys::USER,
            keys::FEDERATED_SESSION,
            keys::PERSISTENT_SESSION,
            keys::RENEWAL_MARKER,
        ] {
            if let Err(err) = self.storage.remove(key).await {
                tracing::warn!(key, error = %err, "failed to clear session key");
            }
        }
    }

    /// Sends a profile patch and replaces the held user record on success.
    ///
    /// # Errors
    /// Backend rejection propagates verbatim; the held record is untouched
    /// on failure. Fails with `Backend` when no session is held.
    pub async fn update_user(&self, patch: &ProfileUpdate) -> AuthResult<AuthenticatedUser> {
        let token = read(&self.session)
            .as_ref()
            .map(|s| s.token.clone())
            .ok_or_else(|| exjobnet_domain::AuthError::backend("not signed in"))?;

        let updated = self.service.update_profile(&token, patch).await?;

        let user_json = serde_json::to_string(&updated)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        self.storage.set(keys::USER, &user_json).await?;

        if let Some(session) = write(&self.session).as_mut() {
            session.user = updated.clone();
        }

        Ok(updated)
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        read(&self.session).clone()
    }

    /// Snapshot of the current user.
    #[must_use]
    pub fn current_user(&self) -> Option<AuthenticatedUser> {
        read(&self.session).as_ref().map(|s| s.user.clone())
    }

    /// The origin markers of the current session.
    #[must_use]
    pub fn markers(&self) -> SessionMarkers {
        *read(&self.markers)
    }

    /// True while a session is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        read(&self.session).is_some()
    }

    /// True once startup restoration has finished, either way.
    #[must_use]
    pub fn restoration_resolved(&self) -> bool {
        self.resolved.load(Ordering::SeqCst)
    }

    /// True while any sign-in operation is in flight.
    ///
    /// Advisory only: the UI disables its triggers on this flag, but the
    /// core does not serialize overlapping operations.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Raises the shared loading flag until the returned guard drops.
    #[must_use]
    pub fn begin_loading(&self) -> LoadingGuard<'_> {
        self.loading.store(true, Ordering::SeqCst);
        LoadingGuard {
            loading: &self.loading,
        }
    }

    /// Reads the renewal marker, `None` when absent or unparseable.
    pub async fn renewal_marker(&self) -> Option<DateTime<Utc>> {
        let value = self.storage.get(keys::RENEWAL_MARKER).await.ok()??;
        DateTime::parse_from_rfc3339(&value)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }

    /// Rewrites the renewal marker to the given instant.
    ///
    /// # Errors
    /// Propagates storage failures; the renewer treats them as best-effort.
    pub async fn write_renewal_marker(&self, when: DateTime<Utc>) -> Result<(), StorageError> {
        self.storage
            .set(keys::RENEWAL_MARKER, &when.to_rfc3339())
            .await
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .field("markers", &self.markers())
            .field("loading", &self.is_loading())
            .field("resolved", &self.restoration_resolved())
            .finish()
    }
}
