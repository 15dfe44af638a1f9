//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::domain::repository::UserRepository;
use auth::{AuthAppState, AuthConfig, MemoryAuthRepository, PgAuthRepository};
use axum::{
    Router, http,
    http::{Method, header},
};
use content::{
    MemoryOwnedRepository, OwnedRepository, PgOwnedRepository, Post, SocialAccount,
    content_router,
};
use platform::crypto::from_base64;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "postdeck_api=info,auth=info,content=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let auth_config = load_auth_config()?;

    let routes = match env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&database_url)
                .await?;

            tracing::info!("Connected to database");

            // Run migrations
            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            build_routes(
                PgAuthRepository::new(pool.clone()),
                PgOwnedRepository::<Post>::new(pool.clone()),
                PgOwnedRepository::<SocialAccount>::new(pool),
                auth_config,
            )
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set, using in-memory stores; data is lost on exit");

            build_routes(
                MemoryAuthRepository::new(),
                MemoryOwnedRepository::<Post>::new(),
                MemoryOwnedRepository::<SocialAccount>::new(),
                auth_config,
            )
        }
    };

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
        ]));

    let app = routes.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    );

    // Start server
    let port: u16 = match env::var("PORT") {
        Ok(port) => port.parse().context("PORT must be a port number")?,
        Err(_) => 3000,
    };
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Auth settings from the environment
///
/// Release builds refuse to start without `AUTH_TOKEN_SECRET`; debug builds
/// fall back to a random key, so tokens do not survive a restart.
fn load_auth_config() -> anyhow::Result<AuthConfig> {
    let mut config = match env::var("AUTH_TOKEN_SECRET") {
        Ok(secret_b64) => {
            let token_secret =
                from_base64(&secret_b64).context("AUTH_TOKEN_SECRET must be base64")?;
            AuthConfig {
                token_secret,
                ..AuthConfig::default()
            }
        }
        Err(_) if cfg!(debug_assertions) => {
            tracing::warn!("AUTH_TOKEN_SECRET not set, using a random development key");
            AuthConfig::development()
        }
        Err(_) => bail!("AUTH_TOKEN_SECRET must be set in production"),
    };

    if !config.has_strong_secret() {
        bail!("AUTH_TOKEN_SECRET must decode to at least 32 bytes");
    }

    if let Ok(ttl) = env::var("AUTH_TOKEN_TTL_SECS") {
        let secs: u64 = ttl
            .parse()
            .context("AUTH_TOKEN_TTL_SECS must be a number of seconds")?;
        config.token_ttl = Duration::from_secs(secs);
    }

    config.password_pepper = env::var("AUTH_PASSWORD_PEPPER")
        .ok()
        .filter(|pepper| !pepper.is_empty())
        .map(String::into_bytes);

    tracing::info!(token_ttl_secs = config.token_ttl.as_secs(), "Auth configured");

    Ok(config)
}

/// All routers over one set of stores
fn build_routes<U, P, S>(users: U, posts: P, accounts: S, config: AuthConfig) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    P: OwnedRepository<Post> + Send + Sync + 'static,
    S: OwnedRepository<SocialAccount> + Send + Sync + 'static,
{
    let state = AuthAppState::new(users, config);
    let gateway = state.gateway();

    Router::new()
        .merge(auth::auth_router(state.clone()))
        .merge(auth::users_router(state))
        .merge(content_router(posts, accounts, gateway))
}
