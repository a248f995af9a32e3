use anyhow::Result;
use sickleave_core::application::{
    commands::users::BootstrapAdminCommand,
    ports::{
        cache::QueryCache,
        ids::IdGenerator,
        security::{PasswordHasher, TokenManager},
        time::Clock,
    },
    services::{ApplicationDependencies, ApplicationServices},
};
use sickleave_core::config::AppConfig;
use sickleave_core::infrastructure::{
    cache::{InMemoryQueryCache, NoopQueryCache},
    database,
    ids::UuidV4Generator,
    repositories::{
        PostgresAuditLogRepository, PostgresEmployeeRepository, PostgresSickLeaveRepository,
        PostgresTransactionManager, PostgresUserRepository,
    },
    security::{Argon2PasswordHasher, BiscuitTokenManager},
    time::SystemClock,
};
use sickleave_core::presentation::http::{routes::build_router_with_rate_limiter, state::HttpState};
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

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let cache: Arc<dyn QueryCache> = if config.cache_disabled() {
        tracing::info!("query cache disabled");
        Arc::new(NoopQueryCache)
    } else {
        Arc::new(InMemoryQueryCache::new(Arc::clone(&clock)))
    };
    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher);
    let token_manager: Arc<dyn TokenManager> = Arc::new(BiscuitTokenManager::new(
        config.biscuit_private_key(),
        config.token_ttl(),
    )?);
    let ids: Arc<dyn IdGenerator> = Arc::new(UuidV4Generator);

    let services = Arc::new(ApplicationServices::new(ApplicationDependencies {
        user_repo: Arc::new(PostgresUserRepository::new(pool.clone())),
        employee_repo: Arc::new(PostgresEmployeeRepository::new(pool.clone())),
        sick_leave_repo: Arc::new(PostgresSickLeaveRepository::new(pool.clone())),
        audit_log_repo: Arc::new(PostgresAuditLogRepository::new(pool.clone())),
        transactions: Arc::new(PostgresTransactionManager::new(pool.clone())),
        password_hasher,
        token_manager,
        cache,
        clock,
        ids,
        cache_ttls: config.cache_ttls(),
    }));

    if let Some(admin) = config.bootstrap_admin() {
        let command = BootstrapAdminCommand {
            email: admin.email.clone(),
            password: admin.password.clone(),
        };
        if services.user_commands.bootstrap_admin(command).await?.is_none() {
            tracing::debug!("users exist, bootstrap admin skipped");
        }
    }

    let state = HttpState {
        services: Arc::clone(&services),
    };

    let app = build_router_with_rate_limiter(
        state,
        config.allowed_origins(),
        config.rate_limit_enabled(),
    );

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
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
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
