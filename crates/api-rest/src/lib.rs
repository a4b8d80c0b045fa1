//! # API REST
//!
//! REST API for the users service.
//!
//! Handles:
//! - HTTP endpoints with axum over a shared [`UserStore`]
//! - OpenAPI document generation
//! - REST-specific concerns (JSON error bodies, CORS, request tracing, panic containment)
//!
//! Uses `users-core` for the data model and store.
//!
//! ## Routes
//! - `GET    /api/users`
//! - `POST   /api/users`
//! - `GET    /api/users/:user_id`
//! - `PUT    /api/users/:user_id`
//! - `DELETE /api/users/:user_id`
//! - `GET    /api-docs/openapi.json`
//!
//! The `/api/users` prefix matches in any letter case and a single trailing slash is ignored, so
//! `GET /API/Users/` lists users. The `:user_id` segment is passed through untouched.
//!
//! Anything else, including an unsupported method on a known path, is
//! `404 {"message": "Endpoint not found"}`.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod extract;
pub mod users;

use std::any::Any;

use axum::{
    extract::Request,
    http::{uri::PathAndQuery, Uri},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use tower::util::MapRequest;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use users_core::{CoreConfig, User, UserPayload, UserStore};

use crate::error::{ApiError, MessageRes};
use crate::users::{
    create_user, delete_user, endpoint_not_found, get_user, list_users, update_user,
};

/// Application state shared across REST API handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub store: UserStore,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
    ),
    components(schemas(User, UserPayload, MessageRes))
)]
pub struct ApiDoc;

/// Literal collection path; matched case-insensitively by [`normalize_path`].
const USERS_PATH: &str = "/api/users";

/// The full service: path normalisation in front of the router.
pub type UsersApp = MapRequest<Router, fn(Request) -> Request>;

/// Build the application over `store`.
///
/// Every route shares the same store. Pass a fresh [`UserStore`] for an independent instance.
pub fn app(store: UserStore) -> UsersApp {
    let normalize: fn(Request) -> Request = normalize_path;
    tower::ServiceExt::<Request>::map_request(router(store), normalize)
}

fn router(store: UserStore) -> Router {
    let collection = get(list_users)
        .post(create_user)
        .fallback(endpoint_not_found);
    let member = get(get_user)
        .put(update_user)
        .delete(delete_user)
        .fallback(endpoint_not_found);

    Router::new()
        .route(USERS_PATH, collection)
        .route("/api/users/:user_id", member)
        .route("/api-docs/openapi.json", get(openapi))
        .fallback(endpoint_not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState { store })
}

/// Lowercases a case-variant `/api/users` prefix and drops one trailing slash.
///
/// Requests whose rewritten URI cannot be rebuilt are passed on unchanged.
fn normalize_path(mut req: Request) -> Request {
    let path = req.uri().path();
    let mut normalized = match path.get(..USERS_PATH.len()) {
        Some(prefix)
            if prefix.eq_ignore_ascii_case(USERS_PATH)
                && matches!(path.as_bytes().get(USERS_PATH.len()), None | Some(b'/')) =>
        {
            format!("{}{}", USERS_PATH, &path[USERS_PATH.len()..])
        }
        _ => path.to_owned(),
    };
    if normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    if normalized == path {
        return req;
    }

    if let Some(query) = req.uri().query() {
        normalized = format!("{}?{}", normalized, query);
    }
    let mut parts = req.uri().clone().into_parts();
    let Ok(path_and_query) = PathAndQuery::try_from(normalized) else {
        return req;
    };
    parts.path_and_query = Some(path_and_query);
    if let Ok(uri) = Uri::from_parts(parts) {
        *req.uri_mut() = uri;
    }
    req
}

/// Bind to the configured port and serve until Ctrl-C (or SIGTERM on unix).
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails while running.
pub async fn serve(config: &CoreConfig, store: UserStore) -> anyhow::Result<()> {
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("-- Server is running on port {}", config.port());

    let service = axum::ServiceExt::<Request>::into_make_service(app(store));
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("-- Server stopped");
    Ok(())
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Turns a handler panic into an opaque 500, logging the panic payload.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ApiError::Internal(format!("handler panicked: {}", detail)).into_response()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("-- Shutdown signal received");
}
