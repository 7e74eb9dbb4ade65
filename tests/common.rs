use studio_backend::{
    api::router::create_router,
    config::Config,
    infra::repositories::{
        sqlite_booking_repo::SqliteBookingRepo,
        sqlite_enquiry_repo::SqliteEnquiryRepo,
        sqlite_package_repo::SqlitePackageRepo,
        sqlite_schedule_repo::SqliteScheduleRepo,
    },
    state::AppState,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;
use axum::{
    body::Body,
    http::Request,
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            timezone: chrono_tz::UTC,
            slot_interval_min: 15,
            buffer_min: 15,
        };

        let state = Arc::new(AppState {
            config: config.clone(),
            package_repo: Arc::new(SqlitePackageRepo::new(pool.clone())),
            booking_repo: Arc::new(SqliteBookingRepo::new(pool.clone())),
            schedule_repo: Arc::new(SqliteScheduleRepo::new(pool.clone())),
            enquiry_repo: Arc::new(SqliteEnquiryRepo::new(pool.clone())),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Create a package through the admin API and return its id.
    #[allow(dead_code)]
    pub async fn create_package(&self, slug: &str, duration_min: i32) -> String {
        let payload = serde_json::json!({
            "title": format!("Package {}", slug),
            "slug": slug,
            "description": "Test package",
            "price_cents": 6500,
            "duration_min": duration_min
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/admin/packages")
                .header("Content-Type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        assert!(response.status().is_success(), "package creation failed in test helper");

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        json["id"].as_str().unwrap().to_string()
    }

    /// Create an availability rule for a weekday (0=Sunday..6=Saturday).
    #[allow(dead_code)]
    pub async fn create_rule(&self, weekday: i32, start_minutes: i32, end_minutes: i32) {
        let payload = serde_json::json!({
            "weekday": weekday,
            "start_minutes": start_minutes,
            "end_minutes": end_minutes
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/admin/schedule/rules")
                .header("Content-Type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        assert!(response.status().is_success(), "rule creation failed in test helper");
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
