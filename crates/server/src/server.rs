use axum::{
    Router,
    http::{HeaderName, HeaderValue},
    routing::get,
};
use axum_extra::headers::{Error as AxumError, Header};

use std::sync::Arc;

use crate::{authorized_users, expenses};
use engine::Engine;

/// Header carrying the caller identity set by the authenticating proxy.
pub static REMOTE_USER_HEADER: HeaderName = HeaderName::from_static("x-remote-user");

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// `TypedHeader` for the forwarded caller identity
///
/// The API never authenticates anyone itself: whatever sits in front of it
/// may put the display name of the caller in "x-remote-user". A blank value
/// decodes fine and counts as no identity.
#[derive(Debug)]
pub(crate) struct RemoteUser(pub(crate) String);

impl RemoteUser {
    pub(crate) fn display_name(&self) -> &str {
        &self.0
    }
}

impl Header for RemoteUser {
    fn name() -> &'static HeaderName {
        &REMOTE_USER_HEADER
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, AxumError>
    where
        Self: Sized,
        I: Iterator<Item = &'i HeaderValue>,
    {
        let value = values.next().ok_or_else(AxumError::invalid)?;
        let Ok(value) = value.to_str() else {
            return Err(AxumError::invalid());
        };

        Ok(RemoteUser(value.trim().to_string()))
    }

    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        match HeaderValue::from_str(&self.0) {
            Ok(value) => values.extend(std::iter::once(value)),
            Err(_) => tracing::error!("failed to encode x-remote-user header"),
        }
    }
}

fn router(state: ServerState) -> Router {
    let api = Router::new()
        .route("/expenses", get(expenses::list).post(expenses::create))
        .route(
            "/expenses/{id}",
            get(expenses::get)
                .put(expenses::update)
                .delete(expenses::delete),
        )
        .route(
            "/authorizedusers",
            get(authorized_users::list).post(authorized_users::create),
        )
        .route(
            "/authorizedusers/{id}",
            get(authorized_users::get)
                .put(authorized_users::update)
                .delete(authorized_users::delete),
        );

    Router::new().nest("/api", api).with_state(state)
}

/// Build the `/api` router around `engine`.
pub fn app(engine: Engine) -> Router {
    router(ServerState {
        engine: Arc::new(engine),
    })
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
