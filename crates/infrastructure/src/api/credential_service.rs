//! Credential API client over HTTP.

use async_trait::async_trait;
use exjobnet_application::ports::CredentialService;
use exjobnet_domain::{
    AuthError, AuthResult, AuthenticatedUser, FederatedProfile, ProfileUpdate,
    RegistrationRequest, Session, UserRole,
};
use reqwest::StatusCode;
use serde::Serialize;
use url::Url;
use serde_json::json;

use super::types::{Envelope, GoogleUserData, SessionPayload, UserPayload};

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// [`CredentialService`] implementation backed by the ExJobNet REST API.
///
/// Every endpoint speaks the standard response envelope; transport
/// failures map to [`AuthError::Network`] and rejections to the typed
/// variant their wire code selects.
pub struct HttpCredentialService {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpCredentialService {
    /// Creates a client for the API rooted at `base_url`.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            base_url,
        }
    }

    /// Creates a client reusing an existing connection pool.
    #[must_use]
    pub const fn with_client(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    fn endpoint(&self, path: &str) -> AuthResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| AuthError::backend(format!("invalid endpoint {path}: {e}")))
    }

    async fn post<T, B>(
        &self,
        path: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> AuthResult<(StatusCode, Envelope<T>)>
    where
        T: serde::de::DeserializeOwned,
        B: Serialize + Sync,
    {
        let mut request = self.client.post(self.endpoint(path)?).json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .map_err(|e| AuthError::network(e.to_string()))?;
        let status = response.status();
        let envelope = response
            .json::<Envelope<T>>()
            .await
            .map_err(|e| AuthError::network(format!("malformed response: {e}")))?;
        Ok((status, envelope))
    }

    async fn put<T, B>(
        &self,
        path: &str,
        body: &B,
        bearer: &str,
    ) -> AuthResult<(StatusCode, Envelope<T>)>
    where
        T: serde::de::DeserializeOwned,
        B: Serialize + Sync,
    {
        let response = self
            .client
            .put(self.endpoint(path)?)
            .bearer_auth(bearer)
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::network(e.to_string()))?;
        let status = response.status();
        let envelope = response
            .json::<Envelope<T>>()
            .await
            .map_err(|e| AuthError::network(format!("malformed response: {e}")))?;
        Ok((status, envelope))
    }
}

impl std::fmt::Debug for HttpCredentialService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCredentialService")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CredentialService for HttpCredentialService {
    async fn login(&self, email: &str, password: &str) -> AuthResult<Session> {
        let body = json!({ "email": email, "password": password });
        let (status, envelope) = self
            .post::<SessionPayload, _>("auth/login", &body, None)
            .await?;
        match envelope.data {
            Some(payload) if envelope.success => Ok(payload.into()),
            _ if status == StatusCode::UNAUTHORIZED => Err(AuthError::Credentials {
                message: envelope
                    .error
                    .unwrap_or_else(|| "invalid email or password".to_owned()),
                suggestion: envelope.suggestion,
            }),
            _ => Err(envelope.into_error()),
        }
    }

    async fn register(&self, request: &RegistrationRequest) -> AuthResult<Session> {
        let (_, envelope) = self
            .post::<SessionPayload, _>("auth/register", request, None)
            .await?;
        match envelope.data {
            Some(payload) if envelope.success => Ok(payload.into()),
            _ => Err(envelope.into_error()),
        }
    }

    async fn forgot_password(&self, email: &str) -> AuthResult<()> {
        let body = json!({ "email": email });
        let (_, envelope) = self
            .post::<serde_json::Value, _>("auth/forgot-password", &body, None)
            .await?;
        if envelope.success {
            Ok(())
        } else {
            Err(envelope.into_error())
        }
    }

    async fn logout(&self, token: &str) -> AuthResult<()> {
        let (_, envelope) = self
            .post::<serde_json::Value, _>("auth/logout", &json!({}), Some(token))
            .await?;
        if envelope.success {
            Ok(())
        } else {
            Err(envelope.into_error())
        }
    }

    async fn update_profile(
        &self,
        token: &str,
        patch: &ProfileUpdate,
    ) -> AuthResult<AuthenticatedUser> {
        let (_, envelope) = self
            .put::<UserPayload, _>("auth/profile", patch, token)
            .await?;
        match envelope.data {
            Some(payload) if envelope.success => Ok(payload.user),
            _ => Err(envelope.into_error()),
        }
    }

    async fn complete_registration(
        &self,
        profile: &FederatedProfile,
        role: UserRole,
    ) -> AuthResult<Session> {
        let body = json!({
            "role": role,
            "googleUserData": GoogleUserData::from(profile),
        });
        let (status, envelope) = self
            .post::<SessionPayload, _>("auth/google/complete-registration", &body, None)
            .await?;
        match envelope.data {
            Some(payload) if envelope.success => Ok(payload.into()),
            _ if status == StatusCode::CONFLICT => Err(AuthError::RegistrationConflict {
                message: envelope
                    .error
                    .unwrap_or_else(|| "an account with this email already exists".to_owned()),
            }),
            _ => Err(envelope.into_error()),
        }
    }
}
