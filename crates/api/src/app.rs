use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use domain::models::RoleTable;
use domain::services::{
    IdentityService, LoginService, OtpService, RegistrationService, SignupService,
};
use domain::stores::memory::{
    InMemoryCredentialStore, InMemoryDirectory, InMemoryEventCatalog, InMemoryOtpStore,
    InMemoryRegistrationStore,
};
use domain::stores::{
    CredentialStore, EventCatalog, IdentityDirectory, OtpStore, RegistrationStore,
};
use persistence::repositories::{
    AllowListRepository, EventRepository, RegistrationRepository, UserRepository,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{Config, ConfigValidationError};
use crate::middleware::{
    metrics_handler, metrics_middleware, rate_limit_middleware, request_id, RateLimiterState,
};
use crate::routes::{
    allow_list, attendance, auth, event_results, events, health, notifications, programs,
    ratings, registrations, reports, users,
};

/// Store implementations the identity and registration flows run against.
#[derive(Clone)]
pub struct Stores {
    pub directory: Arc<dyn IdentityDirectory>,
    pub credentials: Arc<dyn CredentialStore>,
    pub events: Arc<dyn EventCatalog>,
    pub registrations: Arc<dyn RegistrationStore>,
    pub otp: Arc<dyn OtpStore>,
}

impl Stores {
    /// PostgreSQL repositories, with one-time codes held in process memory.
    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            directory: Arc::new(AllowListRepository::new(pool.clone())),
            credentials: Arc::new(UserRepository::new(pool.clone())),
            events: Arc::new(EventRepository::new(pool.clone())),
            registrations: Arc::new(RegistrationRepository::new(pool.clone())),
            otp: Arc::new(InMemoryOtpStore::new()),
        }
    }

    /// Everything in process memory.
    pub fn in_memory() -> Self {
        Self {
            directory: Arc::new(InMemoryDirectory::new()),
            credentials: Arc::new(InMemoryCredentialStore::new()),
            events: Arc::new(InMemoryEventCatalog::new()),
            registrations: Arc::new(InMemoryRegistrationStore::new()),
            otp: Arc::new(InMemoryOtpStore::new()),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub roles: RoleTable,
    pub stores: Stores,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
}

impl AppState {
    pub fn new(config: Config, pool: PgPool, stores: Stores) -> Result<Self, ConfigValidationError> {
        let roles = config.role_table()?;
        let rate_limiter = RateLimiterState::new(
            config.security.auth_rate_limit_per_minute,
            config.security.trust_forwarded_for,
        )
        .map(Arc::new);

        Ok(Self {
            pool,
            config: Arc::new(config),
            roles,
            stores,
            rate_limiter,
        })
    }

    pub fn identity_service(&self) -> IdentityService {
        IdentityService::new(
            self.stores.directory.clone(),
            self.stores.credentials.clone(),
            self.roles.clone(),
        )
    }

    pub fn otp_service(&self) -> OtpService {
        OtpService::new(self.stores.otp.clone(), self.config.otp_ttl())
    }

    pub fn signup_service(&self) -> SignupService {
        SignupService::new(
            self.stores.directory.clone(),
            self.stores.credentials.clone(),
            self.roles.clone(),
        )
    }

    pub fn login_service(&self) -> LoginService {
        LoginService::new(
            self.stores.directory.clone(),
            self.stores.credentials.clone(),
            self.roles.clone(),
        )
    }

    pub fn registration_service(&self) -> RegistrationService {
        RegistrationService::new(
            self.stores.registrations.clone(),
            self.stores.events.clone(),
            self.stores.credentials.clone(),
        )
    }
}

/// Builds the router over PostgreSQL-backed stores.
pub fn create_app(config: Config, pool: PgPool) -> Result<Router, ConfigValidationError> {
    let stores = Stores::postgres(&pool);
    Ok(build_router(AppState::new(config, pool, stores)?))
}

pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();

    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Identity routes: verify-id -> send-otp -> verify-otp -> register, then login.
    let auth_routes = Router::new()
        .route("/verify-id", post(auth::verify_id))
        .route("/send-otp", post(auth::send_otp))
        .route("/verify-otp", post(auth::verify_otp))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    let api_routes = Router::new()
        // Allow-lists
        .route(
            "/api/allow-list/:role",
            get(allow_list::list_entries).post(allow_list::create_entry),
        )
        .route(
            "/api/allow-list/:role/:external_id",
            put(allow_list::update_entry).delete(allow_list::delete_entry),
        )
        // Users
        .route("/api/users/lookup/:external_id", get(users::lookup_user))
        .route("/api/users/:user_id", get(users::get_user))
        // Programs
        .route(
            "/api/programs",
            get(programs::list_programs).post(programs::create_program),
        )
        .route(
            "/api/programs/:id",
            get(programs::get_program)
                .put(programs::update_program)
                .delete(programs::delete_program),
        )
        // Events
        .route(
            "/api/events",
            get(events::list_events).post(events::create_event),
        )
        .route(
            "/api/events/:id",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        // Registrations
        .route(
            "/api/registrations",
            get(registrations::list_registrations).post(registrations::create_registration),
        )
        .route(
            "/api/registrations/user/:user_id",
            get(registrations::list_user_registrations),
        )
        .route(
            "/api/registrations/:id/status",
            put(registrations::update_registration_status),
        )
        .route(
            "/api/registrations/:id",
            delete(registrations::delete_registration),
        )
        // Attendance
        .route("/api/attendance", post(attendance::mark_attendance))
        .route(
            "/api/attendance/event/:event_id",
            get(attendance::list_event_attendance),
        )
        .route(
            "/api/attendance/user/:user_id",
            get(attendance::list_user_attendance),
        )
        // Ratings
        .route("/api/ratings", post(ratings::submit_rating))
        .route("/api/ratings/event/:event_id", get(ratings::list_event_ratings))
        .route("/api/ratings/:id", delete(ratings::delete_rating))
        // Reports
        .route(
            "/api/reports",
            get(reports::list_reports).post(reports::create_report),
        )
        .route(
            "/api/reports/:id",
            get(reports::get_report)
                .put(reports::update_report)
                .delete(reports::delete_report),
        )
        // Notifications
        .route(
            "/api/notifications",
            get(notifications::list_notifications).post(notifications::create_notification),
        )
        .route(
            "/api/notifications/:id",
            delete(notifications::delete_notification),
        )
        // Event results
        .route("/api/event-results", post(event_results::create_result))
        .route(
            "/api/event-results/event/:event_id",
            get(event_results::list_event_results),
        )
        .route(
            "/api/event-results/:id",
            delete(event_results::delete_result),
        );

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(api_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id))
        .layer(cors)
        .with_state(state)
}
