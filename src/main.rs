use axum::{
    http::Method,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinema_backend::{
    config::Config,
    db::connection::create_pool,
    handlers,
    middleware as auth_middleware,
};

fn mask_secret(s: &str) -> String {
    if s.is_empty() {
        return "<empty>".into();
    }
    let prefix = s.chars().take(4).collect::<String>();
    format!("{}*** (len={})", prefix, s.len())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinema_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;
    tracing::info!(
        database_url = %config.database_url,
        jwt_secret = %mask_secret(&config.jwt_secret),
        jwt_expiration_hours = config.jwt_expiration_hours,
        time_zone = %config.time_zone,
        port = config.port,
        "Loaded configuration from environment/.env"
    );

    // Initialize database
    let pool = create_pool(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    // Build public routes (no auth)
    let public_routes = Router::new()
        .route("/api/auth/signup", post(handlers::auth::signup))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/movies", get(handlers::movies::list_movies))
        .route("/api/movies/{id}", get(handlers::movies::get_movie))
        .route("/api/actors", get(handlers::movies::list_actors))
        .route(
            "/api/actors/{id}/movies",
            get(handlers::movies::list_movies_by_actor),
        )
        .route("/api/cinemas", get(handlers::cinemas::list_cinemas))
        .route("/api/cinemas/{id}", get(handlers::cinemas::get_cinema))
        .route(
            "/api/cinemas/{id}/theatres",
            get(handlers::theatres::list_theatres_by_cinema),
        )
        .route("/api/theatres/{id}", get(handlers::theatres::get_theatre))
        .route(
            "/api/theatres/{id}/sessions",
            get(handlers::sessions::list_sessions_by_theatre),
        )
        .route("/api/sessions", get(handlers::sessions::list_sessions))
        .route("/api/sessions/{id}", get(handlers::sessions::get_session));

    // Build user-protected routes (auth required)
    let user_routes = Router::new()
        .route("/api/users", put(handlers::auth::update_user))
        .route("/api/users/{id}", delete(handlers::auth::delete_account))
        .route_layer(axum_middleware::from_fn_with_state(
            (pool.clone(), config.clone()),
            auth_middleware::auth::auth,
        ));

    // Build admin-protected routes (auth + admin role)
    let admin_routes = Router::new()
        .route("/api/movies", post(handlers::movies::create_movie))
        .route(
            "/api/movies/{id}",
            put(handlers::movies::update_movie).delete(handlers::movies::delete_movie),
        )
        .route("/api/cinemas", post(handlers::cinemas::create_cinema))
        .route(
            "/api/cinemas/{id}",
            put(handlers::cinemas::update_cinema).delete(handlers::cinemas::delete_cinema),
        )
        .route("/api/theatres", post(handlers::theatres::create_theatre))
        .route(
            "/api/theatres/{id}",
            put(handlers::theatres::update_theatre).delete(handlers::theatres::delete_theatre),
        )
        .route("/api/sessions", post(handlers::sessions::create_session))
        .route(
            "/api/sessions/{id}",
            put(handlers::sessions::update_session).delete(handlers::sessions::delete_session),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            (pool.clone(), config.clone()),
            auth_middleware::auth::auth_admin,
        ));

    // Compose app with shared layers (CORS/Trace) and shared state
    let app = Router::new()
        .merge(public_routes)
        .merge(user_routes)
        .merge(admin_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([
                            Method::GET,
                            Method::POST,
                            Method::PUT,
                            Method::DELETE,
                            Method::OPTIONS,
                        ])
                        .allow_headers(Any)
                        .max_age(std::time::Duration::from_secs(24 * 60 * 60)),
                ),
        )
        .with_state((pool, config.clone()));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
