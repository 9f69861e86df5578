//! Tests for the Easy Rider HTTP client.
//!
//! These tests use mock servers to verify client behavior without
//! requiring a real backend.

use rider_client::{ClientConfig, ClientError, RiderClient, TripFilter, UserPatch};
use rider_core::{NewTrip, NewUser, Role, User};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test_token";

fn authed_client(server: &MockServer) -> RiderClient {
    RiderClient::new(ClientConfig::with_token(server.uri(), TOKEN)).unwrap()
}

fn user_json(id: i64, email: &str, role: i64) -> serde_json::Value {
    serde_json::json!({ "id": id, "email": email, "role": role })
}

fn trip_json(id: i64, user: i64, destination: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "user": user,
        "destination": destination,
        "startDate": "2020-07-01",
        "endDate": "2020-08-01",
        "comment": null
    })
}

// =============================================================================
// Client Config Tests
// =============================================================================

mod client_config {
    use super::*;

    #[test]
    fn test_new_with_url() {
        let config = ClientConfig::new("http://localhost:8000/api");
        assert_eq!(config.url, "http://localhost:8000/api");
        assert!(config.token.is_none());
        assert_eq!(config.token_type, "Bearer");
    }

    #[test]
    fn test_with_token_and_scheme() {
        let config = ClientConfig::with_token("https://example.com", "abc").token_type("JWT");
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.token_type, "JWT");
    }

    #[test]
    fn test_default_points_at_local_backend() {
        assert_eq!(ClientConfig::default().url, "http://localhost:8000/api");
    }

    #[test]
    fn test_empty_url_rejected() {
        match RiderClient::new(ClientConfig::new("")) {
            Err(ClientError::InvalidUrl(msg)) => assert!(msg.contains("empty")),
            _ => panic!("Expected InvalidUrl error"),
        }
    }

    #[test]
    fn test_url_without_scheme_rejected() {
        match RiderClient::new(ClientConfig::new("example.com/api")) {
            Err(ClientError::InvalidUrl(msg)) => {
                assert!(msg.contains("http://") || msg.contains("https://"));
            }
            _ => panic!("Expected InvalidUrl error"),
        }
    }

    #[tokio::test]
    async fn test_url_normalization_multiple_trailing_slashes() {
        let client = RiderClient::new(ClientConfig::new("https://example.com/api///")).unwrap();
        assert_eq!(client.url().await, "https://example.com/api");
    }
}

// =============================================================================
// Authentication Tests
// =============================================================================

mod authentication {
    use super::*;

    #[tokio::test]
    async fn test_obtain_token_stores_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/obtain_token/"))
            .and(body_json(serde_json::json!({
                "email": "user1@example.com",
                "password": "secret"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "token": "jwt123" })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = RiderClient::new(ClientConfig::new(mock_server.uri())).unwrap();
        assert!(!client.is_authenticated().await);

        let response = client
            .obtain_token("user1@example.com", "secret")
            .await
            .unwrap();
        assert_eq!(response.token, "jwt123");
        assert_eq!(client.token().await.as_deref(), Some("jwt123"));
    }

    #[tokio::test]
    async fn test_obtain_token_bad_credentials() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/obtain_token/"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "nonFieldErrors": ["Unable to log in with provided credentials."]
            })))
            .mount(&mock_server)
            .await;

        let client = RiderClient::new(ClientConfig::new(mock_server.uri())).unwrap();

        match client.obtain_token("user1@example.com", "wrong").await {
            Err(ClientError::AuthFailed(msg)) => assert!(msg.contains("Invalid")),
            other => panic!("Expected AuthFailed, got: {:?}", other.map(|r| r.token)),
        }
        assert!(!client.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_current_user_sends_authorization() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/auth/user/"))
            .and(header("Authorization", "Bearer test_token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(user_json(5, "m@example.com", 2)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let user = authed_client(&mock_server).current_user().await.unwrap();
        assert_eq!(user.id, 5);
        assert_eq!(user.role, Role::Manager);
    }

    #[tokio::test]
    async fn test_custom_token_type() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/auth/user/"))
            .and(header("Authorization", "JWT test_token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(user_json(5, "m@example.com", 4)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client =
            RiderClient::new(ClientConfig::with_token(mock_server.uri(), TOKEN).token_type("JWT"))
                .unwrap();
        assert_eq!(client.current_user().await.unwrap().role, Role::Admin);
    }

    #[tokio::test]
    async fn test_current_user_with_rejected_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/auth/user/"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let result = authed_client(&mock_server).current_user().await;
        assert!(matches!(result, Err(ClientError::AuthRequired)));
    }

    #[tokio::test]
    async fn test_current_user_with_unknown_role() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/auth/user/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(user_json(5, "x@example.com", 8)),
            )
            .mount(&mock_server)
            .await;

        let result = authed_client(&mock_server).current_user().await;
        assert!(matches!(result, Err(ClientError::Core(_))));
    }

    #[tokio::test]
    async fn test_logout_drops_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/logout/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = authed_client(&mock_server);
        client.logout().await.unwrap();
        assert!(!client.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_failed_logout_still_drops_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/logout/"))
            .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
            .mount(&mock_server)
            .await;

        let client = authed_client(&mock_server);
        assert!(client.logout().await.is_err());
        assert!(!client.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_sign_up_is_anonymous() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/users/"))
            .and(body_json(serde_json::json!({
                "email": "new@example.com",
                "role": 1,
                "password": "pw"
            })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(user_json(12, "new@example.com", 1)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = RiderClient::new(ClientConfig::new(mock_server.uri())).unwrap();
        let user = client
            .sign_up(&NewUser::new("new@example.com", "pw", Role::User))
            .await
            .unwrap();
        assert_eq!(user.id, 12);
        assert!(!client.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let client = RiderClient::new(ClientConfig::new("http://127.0.0.1:1")).unwrap();

        match client.obtain_token("a@example.com", "b").await {
            Err(ClientError::ServerUnreachable(_) | ClientError::Request(_)) => {}
            other => panic!("Expected ServerUnreachable, got: {:?}", other.map(|r| r.token)),
        }
    }
}

// =============================================================================
// User Endpoint Tests
// =============================================================================

mod users {
    use super::*;

    #[tokio::test]
    async fn test_list_users() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/"))
            .and(header("Authorization", "Bearer test_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                user_json(1, "user1@example.com", 1),
                user_json(3, "manager1@example.com", 2)
            ])))
            .mount(&mock_server)
            .await;

        let client = authed_client(&mock_server);
        let users = client.users().await.unwrap().client().list().await.unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[1].role, Role::Manager);
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/42/"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = authed_client(&mock_server);
        let err = client
            .users()
            .await
            .unwrap()
            .client()
            .get(42)
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(err.to_string().contains("User 42"));
    }

    #[tokio::test]
    async fn test_patch_sends_email_and_role_only() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/users/7/"))
            .and(body_json(serde_json::json!({ "email": "e@example.com", "role": 2 })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(user_json(7, "e@example.com", 2)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = authed_client(&mock_server);
        let patch = UserPatch {
            email: "e@example.com".to_string(),
            role: Role::Manager,
        };
        let user = client
            .users()
            .await
            .unwrap()
            .client()
            .patch(7, &patch)
            .await
            .unwrap();
        assert_eq!(user.email, "e@example.com");
    }

    #[tokio::test]
    async fn test_put_sends_full_record() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/users/7/"))
            .and(body_json(serde_json::json!({
                "id": 7,
                "email": "e@example.com",
                "role": 1,
                "password": "fresh"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(user_json(7, "e@example.com", 1)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = authed_client(&mock_server);
        let user = User {
            id: 7,
            email: "e@example.com".to_string(),
            role: Role::User,
            password: "fresh".to_string(),
        };
        client
            .users()
            .await
            .unwrap()
            .client()
            .put(&user)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_forbidden_create() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/users/"))
            .respond_with(ResponseTemplate::new(403).set_body_string("not allowed"))
            .mount(&mock_server)
            .await;

        let client = authed_client(&mock_server);
        let result = client
            .users()
            .await
            .unwrap()
            .client()
            .create(&NewUser::new("a@example.com", "pw", Role::Admin))
            .await;

        match result {
            Err(ClientError::Forbidden(msg)) => assert_eq!(msg, "not allowed"),
            other => panic!("Expected Forbidden, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_user() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/users/7/"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = authed_client(&mock_server);
        client
            .users()
            .await
            .unwrap()
            .client()
            .delete(7)
            .await
            .unwrap();
    }
}

// =============================================================================
// Trip Endpoint Tests
// =============================================================================

mod trips {
    use super::*;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_list_trips_parses_dates() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/1/trips/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                trip_json(10, 1, "Paris"),
                trip_json(11, 1, "Rome")
            ])))
            .mount(&mock_server)
            .await;

        let client = authed_client(&mock_server);
        let trips = client.trips().await.unwrap().client().list(1).await.unwrap();

        assert_eq!(trips.len(), 2);
        assert_eq!(
            trips[0].start_date,
            NaiveDate::from_ymd_opt(2020, 7, 1).unwrap()
        );
    }

    #[tokio::test]
    async fn test_list_trips_with_filter() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/1/trips/"))
            .and(query_param("destination__contains", "Par"))
            .and(query_param("start_date__gte", "2020-06-01"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([trip_json(10, 1, "Paris")])),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = authed_client(&mock_server);
        let filter = TripFilter {
            destination_contains: Some("Par".to_string()),
            start_date_gte: NaiveDate::from_ymd_opt(2020, 6, 1),
            ..TripFilter::default()
        };
        let trips = client
            .trips()
            .await
            .unwrap()
            .client()
            .list_filtered(1, &filter)
            .await
            .unwrap();
        assert_eq!(trips.len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_date_is_rejected() {
        let mock_server = MockServer::start().await;

        let mut bad = trip_json(10, 1, "Paris");
        bad["startDate"] = serde_json::json!("someday");

        Mock::given(method("GET"))
            .and(path("/users/1/trips/10/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(bad))
            .mount(&mock_server)
            .await;

        let client = authed_client(&mock_server);
        let result = client.trips().await.unwrap().client().get(1, 10).await;
        assert!(matches!(result, Err(ClientError::Core(_))));
    }

    #[tokio::test]
    async fn test_create_trip_sends_wire_dates() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/users/1/trips/"))
            .and(body_json(serde_json::json!({
                "user": 1,
                "destination": "Paris",
                "startDate": "2020-07-01",
                "endDate": "2020-08-01",
                "comment": "summer"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(trip_json(10, 1, "Paris")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = authed_client(&mock_server);
        let new_trip = NewTrip::new(
            "Paris",
            NaiveDate::from_ymd_opt(2020, 7, 1).unwrap(),
            NaiveDate::from_ymd_opt(2020, 8, 1).unwrap(),
        )
        .with_comment("summer");

        let trip = client
            .trips()
            .await
            .unwrap()
            .client()
            .create(1, &new_trip)
            .await
            .unwrap();
        assert_eq!(trip.id, 10);
    }

    #[tokio::test]
    async fn test_delete_trip_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/users/1/trips/10/"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&mock_server)
            .await;

        let client = authed_client(&mock_server);
        match client.trips().await.unwrap().client().delete(1, 10).await {
            Err(ClientError::ServerError { status, message }) => {
                assert_eq!(status, 500);
                assert!(message.contains("Internal Server Error"));
            }
            other => panic!("Expected ServerError, got: {:?}", other),
        }
    }
}
