//! Authentication methods for the Easy Rider API.

use crate::error::{error_for_status, ClientError, Result};
use crate::types::{ApiUser, TokenRequest, TokenResponse, UserPayload};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use rider_core::{CurrentUser, NewUser, User};
use tracing::{debug, info, warn};

/// Authentication client for the Easy Rider API.
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Exchange email and password for an access token.
    pub async fn obtain_token(&self, email: &str, password: &str) -> Result<TokenResponse> {
        let url = format!("{}/auth/obtain_token/", self.base_url);
        debug!(url = %url, email = %email, "Requesting access token");

        let request = TokenRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let status = response.status();

        if status.is_success() {
            let token: TokenResponse = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse token response: {}", e))
            })?;

            info!(email = %email, "Obtained access token");
            Ok(token)
        } else if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            // The token endpoint answers bad credentials with 400.
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Token request rejected");
            Err(ClientError::AuthFailed(
                "Invalid email or password".to_string(),
            ))
        } else {
            Err(error_for_status(response, "Token endpoint").await)
        }
    }

    /// Get the user a token belongs to.
    pub async fn current_user(&self, authorization: &str) -> Result<CurrentUser> {
        let url = format!("{}/auth/user/", self.base_url);
        debug!(url = %url, "Getting current user");

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, authorization)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            let user: ApiUser = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse current user: {}", e))
            })?;

            Ok(CurrentUser::try_from(user)?)
        } else {
            Err(error_for_status(response, "Current user").await)
        }
    }

    /// Tell the server the token is no longer in use.
    pub async fn logout(&self, authorization: &str) -> Result<()> {
        let url = format!("{}/auth/logout/", self.base_url);
        debug!(url = %url, "Logging out");

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, authorization)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(error_for_status(response, "Logout endpoint").await)
        }
    }

    /// Create an account without being signed in.
    ///
    /// The backend only accepts anonymous creation of plain users.
    pub async fn sign_up(&self, user: &NewUser) -> Result<User> {
        let url = format!("{}/users/", self.base_url);
        debug!(url = %url, email = %user.email, "Signing up");

        let response = self
            .http
            .post(&url)
            .json(&UserPayload::from(user))
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            let created: ApiUser = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse created user: {}", e))
            })?;

            info!(user_id = created.id, "Signed up");
            Ok(User::try_from(created)?)
        } else {
            Err(error_for_status(response, "Users endpoint").await)
        }
    }
}
