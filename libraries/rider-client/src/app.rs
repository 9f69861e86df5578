//! Application state shared by everything that talks to the backend.

use crate::client::RiderClient;
use crate::error::Result;
use crate::store::{TripStore, UserStore};
use rider_core::{CurrentUser, Navigation, Preferences, PrivilegedGuard, Session};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Application state: the API client, the session, UI preferences and the
/// entity stores.
///
/// Created once at startup and passed explicitly to whatever needs it.
/// `sign_out` tears the session-bound parts down again.
pub struct AppState {
    client: Arc<RiderClient>,
    session: RwLock<Session>,
    preferences: RwLock<Preferences>,
    users: UserStore,
    trips: TripStore,
    guard: PrivilegedGuard,
}

impl AppState {
    pub fn new(client: RiderClient, preferences: Preferences, guard: PrivilegedGuard) -> Self {
        let client = Arc::new(client);
        Self {
            users: UserStore::new(client.clone()),
            trips: TripStore::new(client.clone()),
            client,
            session: RwLock::new(Session::anonymous()),
            preferences: RwLock::new(preferences),
            guard,
        }
    }

    pub fn client(&self) -> &RiderClient {
        &self.client
    }

    pub fn users(&self) -> &UserStore {
        &self.users
    }

    pub fn trips(&self) -> &TripStore {
        &self.trips
    }

    /// Snapshot of the current session
    pub async fn session(&self) -> Session {
        self.session.read().await.clone()
    }

    /// Snapshot of the current preferences
    pub async fn preferences(&self) -> Preferences {
        self.preferences.read().await.clone()
    }

    /// Change preferences in place
    pub async fn update_preferences(&self, update: impl FnOnce(&mut Preferences)) {
        update(&mut *self.preferences.write().await);
    }

    /// Obtain a token and load the signed-in user into the session.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<CurrentUser> {
        self.client.obtain_token(email, password).await?;
        self.refresh_session().await
    }

    /// Reload the session from the backend using the stored token.
    pub async fn refresh_session(&self) -> Result<CurrentUser> {
        let user = self.client.current_user().await?;
        self.session.write().await.set_user(user.clone());

        info!(user_id = user.id, role = %user.role, "Signed in");
        Ok(user)
    }

    /// Log out and drop everything tied to the session.
    ///
    /// Local state is cleared even when the server-side logout fails.
    pub async fn sign_out(&self) {
        if let Err(e) = self.client.logout().await {
            warn!(error = %e, "Logout request failed");
        }

        self.users.clear().await;
        self.trips.clear().await;
        self.session.write().await.clear();

        info!("Signed out");
    }

    /// Run the access guard against the current session
    pub async fn check_privileged(&self) -> Navigation {
        self.guard.check(&*self.session.read().await)
    }

    pub async fn is_privileged(&self) -> bool {
        let session = self.session.read().await;
        self.preferences.read().await.is_privileged(&session)
    }

    pub async fn is_admin(&self) -> bool {
        let session = self.session.read().await;
        self.preferences.read().await.is_admin(&session)
    }
}
