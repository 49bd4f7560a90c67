use anyhow::Result;
use bazaar_core::application::{
    ports::{
        security::{PasswordHasher, TokenManager},
        time::Clock,
        util::SlugGenerator,
    },
    services::{ApplicationServices, Repositories},
};
use bazaar_core::config::AppConfig;
use bazaar_core::domain::{
    category::{CategoryReadRepository, CategoryWriteRepository},
    product::{ProductReadRepository, ProductWriteRepository},
    review::{ReviewReadRepository, ReviewWriteRepository},
    user::UserRepository,
};
use bazaar_core::infrastructure::{
    database,
    repositories::{
        PostgresCategoryReadRepository, PostgresCategoryWriteRepository,
        PostgresProductReadRepository, PostgresProductWriteRepository,
        PostgresReviewReadRepository, PostgresReviewWriteRepository, PostgresUserRepository,
    },
    security::{HmacTokenManager, password::Argon2PasswordHasher},
    time::SystemClock,
    util::DefaultSlugGenerator,
};
use bazaar_core::presentation::http::{routes::build_router, state::HttpState};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;

    let users: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool.clone()));
    let category_write: Arc<dyn CategoryWriteRepository> =
        Arc::new(PostgresCategoryWriteRepository::new(pool.clone()));
    let category_read: Arc<dyn CategoryReadRepository> =
        Arc::new(PostgresCategoryReadRepository::new(pool.clone()));
    let product_write: Arc<dyn ProductWriteRepository> =
        Arc::new(PostgresProductWriteRepository::new(pool.clone()));
    let product_read: Arc<dyn ProductReadRepository> =
        Arc::new(PostgresProductReadRepository::new(pool.clone()));
    let review_write: Arc<dyn ReviewWriteRepository> =
        Arc::new(PostgresReviewWriteRepository::new(pool.clone()));
    let review_read: Arc<dyn ReviewReadRepository> =
        Arc::new(PostgresReviewReadRepository::new(pool.clone()));

    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::default());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::default());
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator::default());
    let token_manager: Arc<dyn TokenManager> = Arc::new(HmacTokenManager::new(
        config.auth_token_secret(),
        config.token_ttl_seconds(),
        Arc::clone(&users),
        Arc::clone(&clock),
    ));

    let repositories = Repositories {
        category_write,
        category_read,
        product_write,
        product_read,
        review_write,
        review_read,
        users,
    };

    let services = Arc::new(ApplicationServices::new(
        repositories,
        password_hasher,
        token_manager,
        clock,
        slugger,
    ));

    let state = HttpState {
        services,
        db_pool: pool,
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install terminate handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
