//! Identity Toolkit Gateway
//!
//! REST client for an Identity-Toolkit compatible service
//! (`/v1/accounts:*`). The id token of the signed-in user is held in
//! memory only.

use std::sync::{Mutex, PoisonError};

use platform::password::ClearTextPassword;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::application::config::AuthConfig;
use crate::domain::entity::profile::Profile;
use crate::domain::gateway::{GatewayError, GatewayResult, IdentityGateway};
use crate::domain::value_object::{
    display_name::DisplayName, email::Email, federated_provider::FederatedProvider,
};

// ============================================================================
// Wire types
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProfileRequest<'a> {
    id_token: &'a str,
    display_name: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IdpRequest<'a> {
    post_body: String,
    request_uri: &'a str,
    return_idp_credential: bool,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    id_token: Option<String>,
    #[serde(default)]
    email: String,
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProfileResponse {
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    #[serde(default)]
    email: String,
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

// ============================================================================
// Error mapping
// ============================================================================

/// Readable reason for a service error code
///
/// Codes may carry detail after `" : "` (e.g. `WEAK_PASSWORD : ...`);
/// only the code selects the mapping. Unknown codes pass through.
pub fn describe_error_code(message: &str) -> String {
    let code = message.split(" : ").next().unwrap_or(message).trim();
    match code {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            "invalid email or password".to_string()
        }
        "EMAIL_EXISTS" => "email already in use".to_string(),
        "USER_DISABLED" => "account disabled".to_string(),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "too many attempts, try again later".to_string(),
        _ => message.trim().to_string(),
    }
}

/// Map a non-success response body onto a gateway error
fn rejection_from_body(status: reqwest::StatusCode, body: &str) -> GatewayError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => {
            GatewayError::Rejected(describe_error_code(&envelope.error.message))
        }
        _ if status.is_server_error() => {
            GatewayError::Unreachable(format!("identity service returned {status}"))
        }
        _ => GatewayError::Rejected(format!("identity service returned {status}")),
    }
}

fn transport_error(err: reqwest::Error) -> GatewayError {
    if err.is_connect() || err.is_timeout() || err.is_request() {
        GatewayError::Unreachable(err.to_string())
    } else {
        GatewayError::Rejected(format!("unexpected response: {err}"))
    }
}

/// Whether a lookup failure means "no session" rather than a fault
fn is_stale_token(err: &GatewayError) -> bool {
    matches!(
        err,
        GatewayError::Rejected(reason)
            if reason.starts_with("INVALID_ID_TOKEN")
                || reason.starts_with("TOKEN_EXPIRED")
                || reason.starts_with("USER_NOT_FOUND")
    )
}

// ============================================================================
// Gateway
// ============================================================================

/// Identity Toolkit REST gateway
pub struct IdentityToolkitGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    request_uri: String,
    google_id_token: Option<String>,
    id_token: Mutex<Option<String>>,
}

impl IdentityToolkitGateway {
    /// Build from configuration; `None` when no API key is configured
    pub fn from_config(config: &AuthConfig) -> GatewayResult<Option<Self>> {
        let Some(api_key) = config.api_key.clone() else {
            return Ok(None);
        };

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| GatewayError::Unreachable(format!("http client: {e}")))?;

        Ok(Some(Self {
            client,
            base_url: config.identity_base_url.clone(),
            api_key,
            request_uri: config.federated_request_uri.clone(),
            google_id_token: config.google_id_token.clone(),
            id_token: Mutex::new(config.seed_id_token.clone()),
        }))
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/v1/accounts:{}?key={}", self.base_url, method, self.api_key)
    }

    fn token(&self) -> Option<String> {
        self.id_token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_token(&self, token: Option<String>) {
        *self.id_token.lock().unwrap_or_else(PoisonError::into_inner) = token;
    }

    async fn post<B, R>(&self, method: &str, body: &B) -> GatewayResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.endpoint(method))
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            let err = rejection_from_body(status, &text);
            tracing::debug!(method, %status, error = %err, "Identity service call failed");
            return Err(err);
        }

        serde_json::from_str(&text)
            .map_err(|e| GatewayError::Rejected(format!("unexpected response: {e}")))
    }

    /// Keep the returned token and build the profile
    fn accept(&self, response: AuthResponse, fallback_email: &str) -> Profile {
        if response.id_token.is_some() {
            self.set_token(response.id_token);
        }
        let email = if response.email.is_empty() {
            fallback_email.to_string()
        } else {
            response.email
        };
        Profile::from_parts(response.display_name, email)
    }
}

impl IdentityGateway for IdentityToolkitGateway {
    async fn sign_in_with_password(
        &self,
        email: &Email,
        password: &ClearTextPassword,
    ) -> GatewayResult<Profile> {
        let request = PasswordRequest {
            email: email.as_str(),
            password: password.expose(),
            return_secure_token: true,
        };
        let response: AuthResponse = self.post("signInWithPassword", &request).await?;
        Ok(self.accept(response, email.as_str()))
    }

    async fn sign_up_with_password(
        &self,
        name: &DisplayName,
        email: &Email,
        password: &ClearTextPassword,
    ) -> GatewayResult<Profile> {
        let request = PasswordRequest {
            email: email.as_str(),
            password: password.expose(),
            return_secure_token: true,
        };
        let response: AuthResponse = self.post("signUp", &request).await?;
        let mut profile = self.accept(response, email.as_str());

        let Some(id_token) = self.token() else {
            return Ok(profile);
        };
        let update = UpdateProfileRequest {
            id_token: &id_token,
            display_name: name.as_str(),
            return_secure_token: false,
        };
        // The account exists at this point; a failed rename keeps the fallback name
        match self
            .post::<_, UpdateProfileResponse>("update", &update)
            .await
        {
            Ok(updated) => {
                profile.name = updated
                    .display_name
                    .unwrap_or_else(|| name.as_str().to_string());
            }
            Err(e) => {
                tracing::warn!(error = %e, "Display name update failed after sign-up");
            }
        }
        Ok(profile)
    }

    async fn sign_in_with_federated_provider(
        &self,
        provider: FederatedProvider,
    ) -> GatewayResult<Profile> {
        let id_token = match provider {
            FederatedProvider::Google => self.google_id_token.as_deref(),
        }
        .ok_or_else(|| {
            GatewayError::Rejected(format!("{} sign-in is not configured", provider.label()))
        })?;

        let request = IdpRequest {
            post_body: format!(
                "id_token={}&providerId={}",
                id_token,
                provider.provider_id()
            ),
            request_uri: &self.request_uri,
            return_idp_credential: true,
            return_secure_token: true,
        };
        let response: AuthResponse = self.post("signInWithIdp", &request).await?;
        Ok(self.accept(response, ""))
    }

    async fn sign_out(&self) -> GatewayResult<()> {
        self.set_token(None);
        Ok(())
    }

    async fn current_profile(&self) -> GatewayResult<Option<Profile>> {
        let Some(id_token) = self.token() else {
            return Ok(None);
        };

        let request = LookupRequest {
            id_token: &id_token,
        };
        let response: LookupResponse = match self.post("lookup", &request).await {
            Ok(response) => response,
            Err(e) if is_stale_token(&e) => {
                tracing::info!(reason = %e, "Stored id token no longer valid");
                self.set_token(None);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        Ok(response
            .users
            .into_iter()
            .next()
            .map(|user| Profile::from_parts(user.display_name, user.email)))
    }
}
