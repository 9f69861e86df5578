//! Easy Rider Client
//!
//! HTTP client library and entity stores for the Easy Rider trip booking API.
//!
//! # Features
//!
//! - **Authentication**: token exchange, current user, logout, sign-up
//! - **Users**: list, retrieve, create, update and delete accounts
//! - **Trips**: per-user trip CRUD with server-side filtering
//! - **Stores**: in-memory caches that stay in step with the server
//! - **App state**: session lifecycle, preferences and the access guard
//!
//! # Example
//!
//! ```ignore
//! use rider_client::{AppState, ClientConfig, RiderClient};
//! use rider_core::{Preferences, PrivilegedGuard};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RiderClient::new(ClientConfig::new("http://localhost:8000/api"))?;
//!     let app = AppState::new(client, Preferences::default(), PrivilegedGuard::default());
//!
//!     let me = app.sign_in("user1@example.com", "secret").await?;
//!     for trip in app.trips().list(me.id).await? {
//!         println!("{} ({} - {})", trip.destination, trip.start_date, trip.end_date);
//!     }
//!
//!     app.sign_out().await;
//!     Ok(())
//! }
//! ```

mod api;
mod app;
mod auth;
mod client;
mod error;
pub mod store;
mod trips;
mod types;
mod users;

// Re-export main types
pub use api::{TripsApi, UsersApi};
pub use app::AppState;
pub use client::{RiderClient, TripsClientHandle, UsersClientHandle};
pub use error::{ClientError, Result};
pub use store::{TripStore, UserStore};
pub use types::{
    ApiTrip, ApiUser, ClientConfig, TokenResponse, TripFilter, TripPayload, UserPatch,
    UserPayload, DEFAULT_API_URL, DEFAULT_TOKEN_TYPE,
};

// Re-export sub-clients for direct use if needed
pub use auth::AuthClient;
pub use trips::TripsClient;
pub use users::UsersClient;
