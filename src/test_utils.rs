#[cfg(test)]
pub mod test_utils {
    use crate::auth::{hash_password, TokenService};
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::http::HeaderValue;
    use axum::Router;
    use axum_test::TestServer;
    use chrono::{NaiveDate, Utc};
    use common::ApiResponse;
    use compute::clock::FixedClock;
    use migration::{Migrator, MigratorTrait};
    use model::entities::practice::{self, PracticeRole};
    use moka::future::Cache;
    use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
    use serde_json::json;
    use std::sync::Arc;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    pub const TEST_JWT_SECRET: &str = "test-secret";
    pub const ADMIN_EMAIL: &str = "admin@lenscompare.test";
    pub const ADMIN_PASSWORD: &str = "admin-password";

    /// Create an in-memory SQLite database for testing
    pub async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        // Run migrations, which also seed the default catalog
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    /// Today as seen by the test clock. Falls in Q2.
    pub fn test_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 15).expect("valid date")
    }

    /// Create AppState for testing with a seeded master admin
    pub async fn setup_test_app_state() -> AppState {
        let db = setup_test_db().await;

        let admin = practice::ActiveModel {
            name: Set("Master Admin".to_string()),
            email: Set(ADMIN_EMAIL.to_string()),
            password_hash: Set(hash_password(ADMIN_PASSWORD).expect("Failed to hash password")),
            role: Set(PracticeRole::Admin),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        admin.insert(&db).await.expect("Failed to create admin");

        AppState {
            db,
            cache: Cache::new(100),
            tokens: TokenService::new(TEST_JWT_SECRET, 24),
            calculator: Arc::new(compute::default_calculator()),
            clock: Arc::new(FixedClock::new(test_today())),
        }
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing
    pub async fn setup_test_app() -> Router {
        let _ = init_test_tracing();

        let state = setup_test_app_state().await;
        create_router(state)
    }

    /// Create a test server around a fresh app
    pub async fn setup_test_server() -> TestServer {
        TestServer::new(setup_test_app().await).expect("Failed to create test server")
    }

    /// Create a test server plus a handle on its database, for tests that
    /// need rows the API would refuse to write
    pub async fn setup_test_server_with_db() -> (TestServer, DatabaseConnection) {
        let _ = init_test_tracing();

        let state = setup_test_app_state().await;
        let db = state.db.clone();
        let server = TestServer::new(create_router(state)).expect("Failed to create test server");
        (server, db)
    }

    /// `Authorization` header value for a token
    pub fn bearer(token: &str) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", token)).expect("valid header value")
    }

    fn token_from(body: ApiResponse<serde_json::Value>) -> String {
        body.data["token"]
            .as_str()
            .expect("response should carry a token")
            .to_string()
    }

    /// Register a practice and return its token
    pub async fn register_practice(server: &TestServer, name: &str, email: &str) -> String {
        let response = server
            .post("/api/v1/auth/register")
            .json(&json!({ "name": name, "email": email, "password": "password123" }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        token_from(response.json())
    }

    /// Log in as the seeded master admin and return the token
    pub async fn login_admin(server: &TestServer) -> String {
        let response = server
            .post("/api/v1/auth/login")
            .json(&json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
            .await;
        response.assert_status_ok();
        token_from(response.json())
    }
}
