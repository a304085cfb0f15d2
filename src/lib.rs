pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod health;
pub mod middleware;
pub mod ports;
pub mod schemas;
pub mod use_cases;
pub mod utils;
pub mod validation;

use crate::auth::{InMemorySessionStore, PgSessionStore, SessionSettings, SessionStore};
use crate::config::{Config, SessionBackend};
use crate::db::{
    PgPackageRepository, PgPaymentRepository, PgReportRepository, PgUserRepository,
    PgVehicleRepository,
};
use crate::domain::PricingTable;
use crate::health::{HealthChecker, PostgresChecker, SessionStoreChecker};
use crate::ports::{
    PackageRepository, PaymentRepository, ReportRepository, UserRepository, VehicleRepository,
};
use crate::use_cases::ProcessPayment;
use axum::{
    http::{header, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;

/// OpenAPI schema for the washing bay API
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::auth::login,
        handlers::vehicles::create_vehicle,
        handlers::vehicles::delete_vehicle,
        handlers::payments::create_payment,
        handlers::payments::list_payments,
        handlers::reports::daily_summary,
    ),
    components(
        schemas(
            health::HealthResponse,
            health::DependencyStatus,
            auth::UserIdentity,
            schemas::LoginRequest,
            schemas::AuthResponse,
            schemas::MessageResponse,
            schemas::VehicleRequest,
            schemas::VehicleCreatedResponse,
            schemas::PaymentCreateRequest,
            schemas::PaymentCreatedResponse,
            schemas::PaymentListResponse,
            schemas::DailySummaryResponse,
            db::models::PaymentDetail,
            db::models::DailySummaryRow,
        )
    ),
    info(
        title = "Washing Bay API",
        description = "Vehicle intake, tiered pricing and payments for a washing bay"
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Auth", description = "Cashier sessions"),
        (name = "Vehicles", description = "Vehicles in and out of the bay"),
        (name = "Payments", description = "Settling a stay"),
        (name = "Reports", description = "Revenue and time reports"),
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub vehicles: Arc<dyn VehicleRepository>,
    pub packages: Arc<dyn PackageRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub reports: Arc<dyn ReportRepository>,
    pub sessions: Arc<dyn SessionStore>,
    pub pricing: Arc<PricingTable>,
    pub process_payment: Arc<ProcessPayment>,
    pub session_settings: SessionSettings,
    pub health_checker: Arc<HealthChecker>,
}

impl AppState {
    pub fn new(pool: PgPool, config: &Config) -> Self {
        let ttl = config.session_ttl();
        let sessions: Arc<dyn SessionStore> = match config.session_store {
            SessionBackend::Postgres => Arc::new(PgSessionStore::new(pool.clone(), ttl)),
            SessionBackend::Memory => Arc::new(InMemorySessionStore::new(ttl)),
        };
        let settings = SessionSettings {
            ttl_secs: config.session_ttl_secs,
            secure: config.session_cookie_secure,
        };
        Self::with_sessions(pool, sessions, settings)
    }

    /// Builds the state around an explicit session store.
    pub fn with_sessions(
        pool: PgPool,
        sessions: Arc<dyn SessionStore>,
        session_settings: SessionSettings,
    ) -> Self {
        let pricing = Arc::new(PricingTable::standard());
        let payments: Arc<dyn PaymentRepository> = Arc::new(PgPaymentRepository::new(pool.clone()));
        let process_payment = Arc::new(ProcessPayment::new(payments.clone(), pricing.clone()));
        let health_checker = Arc::new(
            HealthChecker::new(Instant::now())
                .add_checker(Box::new(PostgresChecker::new(pool.clone())))
                .add_checker(Box::new(SessionStoreChecker::new(sessions.clone()))),
        );

        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            vehicles: Arc::new(PgVehicleRepository::new(pool.clone())),
            packages: Arc::new(PgPackageRepository::new(pool.clone())),
            payments,
            reports: Arc::new(PgReportRepository::new(pool)),
            sessions,
            pricing,
            process_payment,
            session_settings,
            health_checker,
        }
    }
}

fn cors_layer(allowed_origins: &[String]) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_credentials(true)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE]),
    )
}

pub fn create_app(app_state: AppState, allowed_origins: &[String]) -> Router {
    use crate::middleware::request_logger::request_logger_middleware;
    use crate::middleware::validate::{
        validate_login, validate_payment, validate_register, validate_vehicle,
    };

    let public = Router::new()
        .route("/health", get(handlers::health))
        .route("/api-docs/openapi.json", get(handlers::openapi_json))
        .route(
            "/api/auth/register",
            post(handlers::auth::register).layer(from_fn(validate_register)),
        )
        .route(
            "/api/auth/login",
            post(handlers::auth::login).layer(from_fn(validate_login)),
        )
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route("/api/auth/session", get(handlers::auth::session_status));

    let protected = Router::new()
        .route("/api/auth/me", get(handlers::auth::me))
        .route(
            "/api/vehicles",
            get(handlers::vehicles::list_vehicles)
                .merge(post(handlers::vehicles::create_vehicle).layer(from_fn(validate_vehicle))),
        )
        .route(
            "/api/vehicles/active",
            get(handlers::vehicles::list_active_vehicles),
        )
        .route(
            "/api/vehicles/:id",
            get(handlers::vehicles::get_vehicle)
                .delete(handlers::vehicles::delete_vehicle)
                .merge(put(handlers::vehicles::update_vehicle).layer(from_fn(validate_vehicle))),
        )
        .route("/api/vehicles/:id/exit", post(handlers::vehicles::record_exit))
        .route(
            "/api/vehicles/:id/status",
            get(handlers::vehicles::payment_status),
        )
        .route(
            "/api/vehicles/:id/history",
            get(handlers::vehicles::vehicle_history),
        )
        .route("/api/packages", get(handlers::packages::list_packages))
        .route("/api/packages/:id", get(handlers::packages::get_package))
        .route(
            "/api/payments",
            get(handlers::payments::list_payments)
                .merge(post(handlers::payments::create_payment).layer(from_fn(validate_payment))),
        )
        .route(
            "/api/reports/daily-summary",
            get(handlers::reports::daily_summary),
        )
        .route(
            "/api/reports/time-analysis",
            get(handlers::reports::time_analysis),
        )
        .route(
            "/api/reports/vehicle-type-summary",
            get(handlers::reports::vehicle_type_summary),
        )
        .route_layer(from_fn_with_state(app_state.clone(), auth::require_session));

    let router = Router::new()
        .merge(public)
        .merge(protected)
        .layer(from_fn(request_logger_middleware))
        .with_state(app_state);

    match cors_layer(allowed_origins) {
        Some(cors) => router.layer(cors),
        None => router,
    }
}
