//! User account operations for the Easy Rider API.

use crate::error::{error_for_status, ClientError, Result};
use crate::types::{ApiUser, UserPatch, UserPayload};
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use rider_core::{NewUser, User, UserId};
use tracing::debug;

/// Users client for the Easy Rider API.
pub struct UsersClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    authorization: &'a str,
}

impl<'a> UsersClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, authorization: &'a str) -> Self {
        Self {
            http,
            base_url,
            authorization,
        }
    }

    fn user_url(&self, user_id: UserId) -> String {
        format!("{}/users/{}/", self.base_url, user_id)
    }

    async fn parse_user(response: reqwest::Response) -> Result<User> {
        let user: ApiUser = response.json().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to parse user response: {}", e))
        })?;
        Ok(User::try_from(user)?)
    }

    /// List the users visible to the signed-in account.
    pub async fn list(&self) -> Result<Vec<User>> {
        let url = format!("{}/users/", self.base_url);
        debug!(url = %url, "Listing users");

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, self.authorization)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            let users: Vec<ApiUser> = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse users response: {}", e))
            })?;

            debug!(count = users.len(), "Fetched users");

            let users = users
                .into_iter()
                .map(User::try_from)
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(users)
        } else {
            Err(error_for_status(response, "Users").await)
        }
    }

    /// Get a single user by ID.
    pub async fn get(&self, user_id: UserId) -> Result<User> {
        let url = self.user_url(user_id);
        debug!(url = %url, user_id, "Fetching user");

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, self.authorization)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            Self::parse_user(response).await
        } else {
            Err(error_for_status(response, &format!("User {}", user_id)).await)
        }
    }

    /// Create a user.
    pub async fn create(&self, user: &NewUser) -> Result<User> {
        let url = format!("{}/users/", self.base_url);
        debug!(url = %url, email = %user.email, role = %user.role, "Creating user");

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, self.authorization)
            .json(&UserPayload::from(user))
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            Self::parse_user(response).await
        } else {
            Err(error_for_status(response, "Users").await)
        }
    }

    /// Update email and role, leaving the password as it is.
    pub async fn patch(&self, user_id: UserId, patch: &UserPatch) -> Result<User> {
        let url = self.user_url(user_id);
        debug!(url = %url, user_id, "Patching user");

        let response = self
            .http
            .patch(&url)
            .header(AUTHORIZATION, self.authorization)
            .json(patch)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            Self::parse_user(response).await
        } else {
            Err(error_for_status(response, &format!("User {}", user_id)).await)
        }
    }

    /// Replace a user, including its password.
    pub async fn put(&self, user: &User) -> Result<User> {
        let url = self.user_url(user.id);
        debug!(url = %url, user_id = user.id, "Replacing user");

        let response = self
            .http
            .put(&url)
            .header(AUTHORIZATION, self.authorization)
            .json(&UserPayload::from(user))
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            Self::parse_user(response).await
        } else {
            Err(error_for_status(response, &format!("User {}", user.id)).await)
        }
    }

    /// Delete a user.
    pub async fn delete(&self, user_id: UserId) -> Result<()> {
        let url = self.user_url(user_id);
        debug!(url = %url, user_id, "Deleting user");

        let response = self
            .http
            .delete(&url)
            .header(AUTHORIZATION, self.authorization)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            debug!(user_id, "User deleted");
            Ok(())
        } else {
            Err(error_for_status(response, &format!("User {}", user_id)).await)
        }
    }
}
