//! Shared mock ports for component tests.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use exjobnet_domain::{
    AuthError, AuthResult, AuthenticatedUser, BrokerDecision, FederatedProfile, ProfileUpdate,
    RegistrationRequest, Session, UserRole,
};
use tokio::sync::Mutex;

use crate::ports::{
    Clock, CredentialService, IdentityBrokerService, IdentityProviderClient, SessionStorage,
    StorageError,
};

/// A fixed-size user record for assertions.
pub(crate) fn sample_user(role: UserRole) -> AuthenticatedUser {
    let created = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).single().unwrap();
    AuthenticatedUser {
        id: uuid::Uuid::nil(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        email: "test.user@example.com".to_string(),
        role,
        company: None,
        job_title: None,
        is_active: true,
        created_at: created,
        updated_at: created,
    }
}

pub(crate) fn sample_session(role: UserRole, token: &str) -> Session {
    Session::new(token.to_string(), sample_user(role))
}

pub(crate) fn sample_profile() -> FederatedProfile {
    FederatedProfile {
        first_name: "Grace".to_string(),
        last_name: "Ingabire".to_string(),
        email: "grace@example.com".to_string(),
        provider_id: "provider-123".to_string(),
        avatar: None,
        verified: true,
    }
}

/// In-memory [`SessionStorage`] with failure injection and write counting.
#[derive(Default)]
pub(crate) struct MockStorage {
    map: Mutex<HashMap<String, String>>,
    cleared: AtomicBool,
    writes: AtomicU32,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MockStorage {
    pub(crate) async fn seed(&self, key: &str, value: &str) {
        self.map.lock().await.insert(key.to_string(), value.to_string());
    }

    pub(crate) fn was_cleared(&self) -> bool {
        self.cleared.load(Ordering::SeqCst)
    }

    pub(crate) fn write_count(&self) -> u32 {
        self.writes.load(Ordering::SeqCst)
    }

    pub(crate) fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    pub(crate) fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl SessionStorage for MockStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Io("injected read failure".to_string()));
        }
        Ok(self.map.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Io("injected write failure".to_string()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.map.lock().await.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.map.lock().await.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.cleared.store(true, Ordering::SeqCst);
        self.map.lock().await.clear();
        Ok(())
    }
}

/// Mock [`Clock`] driven by the test.
pub(crate) struct MockClock {
    now: std::sync::Mutex<DateTime<Utc>>,
}

impl Default for MockClock {
    fn default() -> Self {
        Self {
            now: std::sync::Mutex::new(
                Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).single().unwrap(),
            ),
        }
    }
}

impl MockClock {
    pub(crate) fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Scripted [`CredentialService`].
#[derive(Default)]
pub(crate) struct MockCredentialService {
    login_response: Mutex<Option<AuthResult<Session>>>,
    register_response: Mutex<Option<AuthResult<Session>>>,
    completion_response: Mutex<Option<AuthResult<Session>>>,
    profile_response: Mutex<Option<AuthenticatedUser>>,
    logout_fails: AtomicBool,
    logout_calls: AtomicU32,
    completion_calls: AtomicU32,
    forgot_emails: Mutex<Vec<String>>,
}

impl MockCredentialService {
    pub(crate) async fn set_login_response(&self, response: AuthResult<Session>) {
        *self.login_response.lock().await = Some(response);
    }

    pub(crate) async fn set_register_response(&self, response: AuthResult<Session>) {
        *self.register_response.lock().await = Some(response);
    }

    pub(crate) async fn set_completion_response(&self, response: AuthResult<Session>) {
        *self.completion_response.lock().await = Some(response);
    }

    pub(crate) async fn set_profile_response(&self, user: AuthenticatedUser) {
        *self.profile_response.lock().await = Some(user);
    }

    pub(crate) async fn fail_logout(&self) {
        self.logout_fails.store(true, Ordering::SeqCst);
    }

    pub(crate) fn logout_calls(&self) -> u32 {
        self.logout_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn completion_calls(&self) -> u32 {
        self.completion_calls.load(Ordering::SeqCst)
    }

    pub(crate) async fn forgot_emails(&self) -> Vec<String> {
        self.forgot_emails.lock().await.clone()
    }
}

#[async_trait]
impl CredentialService for MockCredentialService {
    async fn login(&self, _email: &str, _password: &str) -> AuthResult<Session> {
        self.login_response
            .lock()
            .await
            .clone()
            .unwrap_or_else(|| Err(AuthError::backend("login not scripted")))
    }

    async fn register(&self, _request: &RegistrationRequest) -> AuthResult<Session> {
        self.register_response
            .lock()
            .await
            .clone()
            .unwrap_or_else(|| Err(AuthError::backend("register not scripted")))
    }

    async fn forgot_password(&self, email: &str) -> AuthResult<()> {
        self.forgot_emails.lock().await.push(email.to_string());
        Ok(())
    }

    async fn logout(&self, _token: &str) -> AuthResult<()> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        if self.logout_fails.load(Ordering::SeqCst) {
            return Err(AuthError::network("backend unreachable"));
        }
        Ok(())
    }

    async fn update_profile(
        &self,
        _token: &str,
        _patch: &ProfileUpdate,
    ) -> AuthResult<AuthenticatedUser> {
        self.profile_response
            .lock()
            .await
            .clone()
            .ok_or_else(|| AuthError::backend("profile update not scripted"))
    }

    async fn complete_registration(
        &self,
        _profile: &FederatedProfile,
        _role: UserRole,
    ) -> AuthResult<Session> {
        self.completion_calls.fetch_add(1, Ordering::SeqCst);
        self.completion_response
            .lock()
            .await
            .clone()
            .unwrap_or_else(|| Err(AuthError::backend("completion not scripted")))
    }
}

/// Scripted [`IdentityBrokerService`].
#[derive(Default)]
pub(crate) struct MockBroker {
    assertion_response: Mutex<Option<AuthResult<BrokerDecision>>>,
    code_response: Mutex<Option<AuthResult<BrokerDecision>>>,
    code_calls: Mutex<Vec<(String, String)>>,
}

impl MockBroker {
    pub(crate) async fn set_assertion_response(&self, response: AuthResult<BrokerDecision>) {
        *self.assertion_response.lock().await = Some(response);
    }

    pub(crate) async fn set_code_response(&self, response: AuthResult<BrokerDecision>) {
        *self.code_response.lock().await = Some(response);
    }

    pub(crate) async fn code_calls(&self) -> Vec<(String, String)> {
        self.code_calls.lock().await.clone()
    }
}

#[async_trait]
impl IdentityBrokerService for MockBroker {
    async fn exchange_assertion(&self, _assertion: &str) -> AuthResult<BrokerDecision> {
        self.assertion_response
            .lock()
            .await
            .clone()
            .unwrap_or_else(|| Err(AuthError::backend("assertion exchange not scripted")))
    }

    async fn exchange_code(&self, code: &str, state: &str) -> AuthResult<BrokerDecision> {
        self.code_calls
            .lock()
            .await
            .push((code.to_string(), state.to_string()));
        self.code_response
            .lock()
            .await
            .clone()
            .unwrap_or_else(|| Err(AuthError::backend("code exchange not scripted")))
    }
}

/// Scripted [`IdentityProviderClient`].
#[derive(Default)]
pub(crate) struct MockProvider {
    load_failure: Mutex<Option<AuthError>>,
    popup_response: Mutex<Option<AuthResult<String>>>,
    button_response: Mutex<Option<AuthResult<String>>>,
    button_containers: Mutex<Vec<String>>,
}

impl MockProvider {
    pub(crate) async fn fail_loading(&self, error: AuthError) {
        *self.load_failure.lock().await = Some(error);
    }

    pub(crate) async fn set_popup_response(&self, response: AuthResult<String>) {
        *self.popup_response.lock().await = Some(response);
    }

    pub(crate) async fn set_button_response(&self, response: AuthResult<String>) {
        *self.button_response.lock().await = Some(response);
    }

    pub(crate) async fn button_containers(&self) -> Vec<String> {
        self.button_containers.lock().await.clone()
    }
}

#[async_trait]
impl IdentityProviderClient for MockProvider {
    async fn ensure_loaded(&self) -> AuthResult<()> {
        match self.load_failure.lock().await.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn prompt_popup(&self) -> AuthResult<String> {
        self.popup_response
            .lock()
            .await
            .clone()
            .unwrap_or_else(|| Err(AuthError::backend("popup not scripted")))
    }

    async fn render_button(&self, container: &str) -> AuthResult<String> {
        self.button_containers
            .lock()
            .await
            .push(container.to_string());
        self.button_response
            .lock()
            .await
            .clone()
            .unwrap_or_else(|| Err(AuthError::backend("button not scripted")))
    }
}
