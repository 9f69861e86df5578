//! User store

use crate::api::UsersApi;
use crate::error::Result;
use crate::types::UserPatch;
use rider_core::{NewUser, Session, User, UserId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Cache of user accounts keyed by id.
///
/// Cached users never hold a real password: every record entering the store
/// carries [`rider_core::PASSWORD_PLACEHOLDER`] instead.
pub struct UserStore {
    api: Arc<dyn UsersApi>,
    users: RwLock<HashMap<UserId, User>>,
}

impl UserStore {
    pub fn new(api: Arc<dyn UsersApi>) -> Self {
        Self {
            api,
            users: RwLock::new(HashMap::new()),
        }
    }

    async fn insert(&self, users: &[User]) {
        let mut map = self.users.write().await;
        for user in users {
            map.insert(user.id, user.clone());
        }
    }

    /// Fetch every visible user and merge them into the cache.
    pub async fn list(&self) -> Result<Vec<User>> {
        let users: Vec<User> = self
            .api
            .list_users()
            .await?
            .into_iter()
            .map(User::with_masked_password)
            .collect();

        self.insert(&users).await;
        debug!(count = users.len(), "Merged users into store");

        Ok(users)
    }

    /// Return a user, fetching it only if it is not cached.
    pub async fn retrieve(&self, user_id: UserId) -> Result<User> {
        let cached = self.users.read().await.get(&user_id).cloned();
        if let Some(user) = cached {
            return Ok(user);
        }

        let user = self.api.get_user(user_id).await?.with_masked_password();
        self.insert(std::slice::from_ref(&user)).await;

        Ok(user)
    }

    /// Create a user and cache it under its server-assigned id.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let user = self.api.create_user(new_user).await?.with_masked_password();
        self.insert(std::slice::from_ref(&user)).await;

        info!(user_id = user.id, role = %user.role, "User created");
        Ok(user)
    }

    /// Push a user's edits to the server.
    ///
    /// When the password still holds the placeholder only email and role are
    /// sent (PATCH); otherwise the whole record, new password included,
    /// replaces the server copy (PUT). The server's answer is what gets
    /// cached.
    pub async fn update(&self, user: &User) -> Result<User> {
        let updated = if user.password_unchanged() {
            self.api.patch_user(user.id, &UserPatch::from(user)).await?
        } else {
            self.api.put_user(user).await?
        }
        .with_masked_password();

        self.insert(std::slice::from_ref(&updated)).await;

        info!(user_id = updated.id, "User updated");
        Ok(updated)
    }

    /// Delete a user on the server and drop it from the cache.
    pub async fn destroy(&self, user_id: UserId) -> Result<()> {
        self.api.delete_user(user_id).await?;
        self.users.write().await.remove(&user_id);

        info!(user_id, "User deleted");
        Ok(())
    }

    /// Drop every cached user.
    pub async fn clear(&self) {
        self.users.write().await.clear();
    }

    /// Cached copy of a user, without touching the network
    pub async fn get(&self, user_id: UserId) -> Option<User> {
        self.users.read().await.get(&user_id).cloned()
    }

    /// Every cached user, ordered by id
    pub async fn all(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by_key(|u| u.id);
        users
    }

    /// Cached users the signed-in user manages.
    ///
    /// Excludes the signed-in user and anyone with a higher role. Empty
    /// without a session.
    pub async fn visible_users(&self, session: &Session) -> Vec<User> {
        let Some(me) = session.user() else {
            return Vec::new();
        };

        self.all()
            .await
            .into_iter()
            .filter(|u| u.id != me.id && u.role <= me.role)
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}
