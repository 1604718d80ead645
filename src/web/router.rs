//! HTTP router configuration.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use super::handlers::{
    add_todo, complete_all, create_list, delete_list, delete_todo, edit_list, health, index,
    new_list, root, show_list, update_list, update_todo, AppState,
};
use super::session_layer::session_middleware;

/// Static files, relative to the working directory.
pub const PUBLIC_DIR: &str = "public";

/// Create the router with a fresh, default-configured state.
pub fn create_router() -> Router {
    create_router_with_state(AppState::new())
}

/// Create the router with custom state.
pub fn create_router_with_state(state: AppState) -> Router {
    // Everything except the health probe and static files runs inside a session.
    let app_routes = Router::new()
        .route("/", get(root))
        .route("/lists", get(index).post(create_list))
        .route("/lists/new", get(new_list))
        .route("/lists/{id}", get(show_list).post(update_list))
        .route("/lists/{id}/edit", get(edit_list))
        .route("/lists/{id}/delete", post(delete_list))
        .route("/lists/{id}/todos", post(add_todo))
        .route("/lists/{id}/todos/{todo_id}", post(update_todo))
        .route("/lists/{id}/todos/{todo_id}/delete", post(delete_todo))
        .route("/lists/{id}/complete_all", post(complete_all))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ));

    Router::new()
        .route("/health", get(health))
        .nest_service(
            "/javascripts",
            ServeDir::new(format!("{PUBLIC_DIR}/javascripts")),
        )
        .merge(app_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Stop accepting connections on Ctrl-C and drain in-flight requests.
    pub graceful_shutdown: bool,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            graceful_shutdown: true,
        }
    }

    pub fn without_graceful_shutdown(mut self) -> Self {
        self.graceful_shutdown = false;
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new("127.0.0.1", 4567)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Start the HTTP server.
pub async fn serve(config: ServerConfig, state: AppState) -> crate::Result<()> {
    let addr = config.bind_address();
    let router = create_router_with_state(state);

    tracing::info!("Starting session-todos server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(crate::error::TodoError::Io)?;

    let server = axum::serve(listener, router);
    let result = if config.graceful_shutdown {
        server.with_graceful_shutdown(shutdown_signal()).await
    } else {
        server.await
    };

    result.map_err(crate::error::TodoError::Io)?;
    Ok(())
}
