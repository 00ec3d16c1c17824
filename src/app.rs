use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer};

use crate::{
    config::Config,
    handlers,
    middleware,
    services::{SessionManager, TaskService, UserService},
    storage::Stores,
};

/// Deadlines applied to store round-trips made on behalf of one request.
#[derive(Debug, Clone, Copy)]
pub struct Deadlines {
    pub request: Duration,
    pub login: Duration,
}

/// Transport limits applied to every route.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    pub max_body_size: usize,
    pub request_timeout: Duration,
}

/// Everything a request needs, built once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionManager,
    pub users: UserService,
    pub tasks: TaskService,
    pub deadlines: Deadlines,
    pub limits: Limits,
}

impl AppState {
    pub fn new(stores: Stores, config: &Config) -> Self {
        Self {
            sessions: SessionManager::new(stores.sessions, config.session_ttl()),
            users: UserService::new(stores.credentials),
            tasks: TaskService::new(stores.tasks),
            deadlines: Deadlines {
                request: config.request_timeout(),
                login: config.login_timeout(),
            },
            limits: Limits {
                max_body_size: config.server.max_body_size,
                request_timeout: config.server_timeout(),
            },
        }
    }
}

/// Route table. Routes under `/tasks` sit behind the session gate.
pub fn routes(state: AppState) -> Router {
    let protected = Router::new()
        .route("/tasks", get(handlers::my_tasks))
        .route("/tasks/created", get(handlers::created_tasks))
        .route("/tasks/new", get(handlers::serve_create_page).post(handlers::create_task))
        .route("/tasks/assign", get(handlers::serve_assign_page).post(handlers::assign_task))
        .route("/tasks/unassign", get(handlers::serve_unassign_page).post(handlers::unassign_task))
        .route("/tasks/complete", get(handlers::serve_complete_page).post(handlers::complete_task))
        .route_layer(from_fn_with_state(state.clone(), middleware::require_session));

    Router::new()
        .route("/", get(handlers::all_tasks))
        .route("/login", get(handlers::serve_login_page).post(handlers::handle_login))
        .route("/logout", get(handlers::serve_logout_page).post(handlers::handle_logout))
        .route(
            "/registration",
            get(handlers::serve_registration_page).post(handlers::handle_registration),
        )
        .merge(protected)
        .with_state(state)
}

/// Outer request pipeline: panic containment wraps access logging, which wraps dispatch.
pub fn with_pipeline(router: Router) -> Router {
    router
        .layer(from_fn(middleware::access_log))
        .layer(from_fn(middleware::recover_panic))
}

/// Body size cap, then a whole-request timeout answered with 408.
pub fn with_limits(router: Router, limits: Limits) -> Router {
    router
        .layer(RequestBodyLimitLayer::new(limits.max_body_size))
        .layer(TimeoutLayer::new(limits.request_timeout))
}

pub fn router(state: AppState) -> Router {
    let limits = state.limits;
    with_pipeline(with_limits(routes(state), limits))
}
