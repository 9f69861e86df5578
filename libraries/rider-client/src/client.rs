//! Main Easy Rider API client.

use crate::api::{TripsApi, UsersApi};
use crate::auth::AuthClient;
use crate::error::{ClientError, Result};
use crate::trips::TripsClient;
use crate::types::{ClientConfig, TokenResponse, TripFilter, UserPatch};
use crate::users::UsersClient;
use async_trait::async_trait;
use reqwest::Client;
use rider_core::{CurrentUser, NewTrip, NewUser, Trip, TripId, User, UserId};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Main client for interacting with the Easy Rider API.
///
/// The client holds the access token once obtained and hands out scoped
/// clients for user and trip operations.
///
/// # Example
///
/// ```ignore
/// use rider_client::{ClientConfig, RiderClient};
///
/// let client = RiderClient::new(ClientConfig::new("http://localhost:8000/api"))?;
/// client.obtain_token("admin1@example.com", "secret").await?;
///
/// let me = client.current_user().await?;
/// let trips = client.trips().await?.client().list(me.id).await?;
/// println!("{} has {} trips", me.email, trips.len());
/// ```
pub struct RiderClient {
    http: Client,
    config: Arc<RwLock<ClientConfig>>,
}

impl RiderClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_timeout(config, Duration::from_secs(30))
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(config: ClientConfig, timeout: Duration) -> Result<Self> {
        // Validate URL
        if config.url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let url = config.url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        url::Url::parse(&url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        let normalized_config = ClientConfig { url, ..config };

        // Create HTTP client with reasonable defaults
        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("EasyRider/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self {
            http,
            config: Arc::new(RwLock::new(normalized_config)),
        })
    }

    /// Get the API base URL.
    pub async fn url(&self) -> String {
        self.config.read().await.url.clone()
    }

    /// Check if the client has an access token.
    pub async fn is_authenticated(&self) -> bool {
        self.config.read().await.token.is_some()
    }

    /// Get the current token.
    pub async fn token(&self) -> Option<String> {
        self.config.read().await.token.clone()
    }

    /// Base URL plus the `Authorization` header value, or `AuthRequired`.
    async fn credentials(&self) -> Result<(String, String)> {
        let config = self.config.read().await;
        let token = config.token.as_ref().ok_or(ClientError::AuthRequired)?;
        Ok((
            config.url.clone(),
            format!("{} {}", config.token_type, token),
        ))
    }

    /// Exchange email and password for a token.
    ///
    /// On success, the token is stored for subsequent requests.
    pub async fn obtain_token(&self, email: &str, password: &str) -> Result<TokenResponse> {
        let url = self.url().await;

        let auth_client = AuthClient::new(&self.http, &url);
        let response = auth_client.obtain_token(email, password).await?;

        self.config.write().await.token = Some(response.token.clone());

        Ok(response)
    }

    /// Fetch the user the stored token belongs to.
    pub async fn current_user(&self) -> Result<CurrentUser> {
        let (url, authorization) = self.credentials().await?;

        AuthClient::new(&self.http, &url)
            .current_user(&authorization)
            .await
    }

    /// Log out on the server and drop the stored token.
    ///
    /// The token is dropped even when the server call fails; the failure is
    /// still returned so callers can report it.
    pub async fn logout(&self) -> Result<()> {
        let Ok((url, authorization)) = self.credentials().await else {
            debug!("Logout without a token");
            return Ok(());
        };

        let result = AuthClient::new(&self.http, &url)
            .logout(&authorization)
            .await;

        self.config.write().await.token = None;

        match &result {
            Ok(()) => info!("Logged out"),
            Err(e) => warn!(error = %e, "Server logout failed, token dropped locally"),
        }

        result
    }

    /// Create a plain user account without signing in.
    pub async fn sign_up(&self, user: &NewUser) -> Result<User> {
        let url = self.url().await;
        AuthClient::new(&self.http, &url).sign_up(user).await
    }

    /// Get a users client.
    ///
    /// Returns an error if not authenticated.
    pub async fn users(&self) -> Result<UsersClientHandle> {
        let (url, authorization) = self.credentials().await?;

        Ok(UsersClientHandle {
            http: self.http.clone(),
            url,
            authorization,
        })
    }

    /// Get a trips client.
    ///
    /// Returns an error if not authenticated.
    pub async fn trips(&self) -> Result<TripsClientHandle> {
        let (url, authorization) = self.credentials().await?;

        Ok(TripsClientHandle {
            http: self.http.clone(),
            url,
            authorization,
        })
    }
}

#[async_trait]
impl UsersApi for RiderClient {
    async fn list_users(&self) -> Result<Vec<User>> {
        self.users().await?.client().list().await
    }

    async fn get_user(&self, user_id: UserId) -> Result<User> {
        self.users().await?.client().get(user_id).await
    }

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        self.users().await?.client().create(user).await
    }

    async fn patch_user(&self, user_id: UserId, patch: &UserPatch) -> Result<User> {
        self.users().await?.client().patch(user_id, patch).await
    }

    async fn put_user(&self, user: &User) -> Result<User> {
        self.users().await?.client().put(user).await
    }

    async fn delete_user(&self, user_id: UserId) -> Result<()> {
        self.users().await?.client().delete(user_id).await
    }
}

#[async_trait]
impl TripsApi for RiderClient {
    async fn list_trips(&self, user_id: UserId, filter: &TripFilter) -> Result<Vec<Trip>> {
        self.trips()
            .await?
            .client()
            .list_filtered(user_id, filter)
            .await
    }

    async fn get_trip(&self, user_id: UserId, trip_id: TripId) -> Result<Trip> {
        self.trips().await?.client().get(user_id, trip_id).await
    }

    async fn create_trip(&self, user_id: UserId, trip: &NewTrip) -> Result<Trip> {
        self.trips().await?.client().create(user_id, trip).await
    }

    async fn update_trip(&self, user_id: UserId, trip: &Trip) -> Result<Trip> {
        self.trips().await?.client().patch(user_id, trip).await
    }

    async fn delete_trip(&self, user_id: UserId, trip_id: TripId) -> Result<()> {
        self.trips().await?.client().delete(user_id, trip_id).await
    }
}

/// Handle for user operations.
///
/// This is returned by `RiderClient::users()` and owns what the borrowed
/// [`UsersClient`] needs.
pub struct UsersClientHandle {
    http: Client,
    url: String,
    authorization: String,
}

impl UsersClientHandle {
    /// Get the users client.
    pub fn client(&self) -> UsersClient<'_> {
        UsersClient::new(&self.http, &self.url, &self.authorization)
    }
}

/// Handle for trip operations.
pub struct TripsClientHandle {
    http: Client,
    url: String,
    authorization: String,
}

impl TripsClientHandle {
    /// Get the trips client.
    pub fn client(&self) -> TripsClient<'_> {
        TripsClient::new(&self.http, &self.url, &self.authorization)
    }
}
