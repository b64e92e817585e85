use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::HeaderName;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::request_id::MakeRequestUuid;
use tower_http::request_id::PropagateRequestIdLayer;
use tower_http::request_id::SetRequestIdLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::accounts::me;
use super::handlers::accounts::update_account;
use super::handlers::health::health;
use super::handlers::login::login;
use super::handlers::registration::register;
use super::middleware::authenticate;
use crate::domain::authentication::service::AuthenticationService;
use crate::user::ports::UserDirectory;

pub const TRACE_ID_HEADER: &str = "x-trace-id";

pub struct AppState<D>
where
    D: UserDirectory,
{
    pub authentication_service: Arc<AuthenticationService<D>>,
    pub directory: Arc<D>,
    pub authenticator: Arc<Authenticator>,
    pub directory_timeout: Duration,
    /// Root token cancelled on graceful shutdown; requests derive child tokens.
    pub shutdown: CancellationToken,
}

// Derived Clone would require `D: Clone`.
impl<D> Clone for AppState<D>
where
    D: UserDirectory,
{
    fn clone(&self) -> Self {
        Self {
            authentication_service: Arc::clone(&self.authentication_service),
            directory: Arc::clone(&self.directory),
            authenticator: Arc::clone(&self.authenticator),
            directory_timeout: self.directory_timeout,
            shutdown: self.shutdown.clone(),
        }
    }
}

impl<D> AppState<D>
where
    D: UserDirectory,
{
    pub fn new(
        directory: Arc<D>,
        authenticator: Arc<Authenticator>,
        directory_timeout: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        let authentication_service = Arc::new(AuthenticationService::new(
            Arc::clone(&directory),
            Arc::clone(&authenticator),
            directory_timeout,
        ));

        Self {
            authentication_service,
            directory,
            authenticator,
            directory_timeout,
            shutdown,
        }
    }
}

pub fn create_router<D: UserDirectory>(state: AppState<D>) -> Router {
    let public_routes = Router::new()
        .route("/users/registrations", post(register::<D>))
        .route("/users/login", post(login::<D>))
        .route("/users/sessions", post(login::<D>))
        .route("/health", get(health));

    let protected_routes = Router::new()
        .route("/accounts/me", get(me).patch(update_account::<D>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            authenticate::<D>,
        ));

    // Headers stay out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            let trace_id = request
                .headers()
                .get(TRACE_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default();

            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri().path(),
                version = ?request.version(),
                trace_id,
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri().path(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    let trace_id = HeaderName::from_static(TRACE_ID_HEADER);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(trace_id.clone(), MakeRequestUuid))
                .layer(trace_layer)
                .layer(PropagateRequestIdLayer::new(trace_id)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
