mod cli;

use clap::Parser;
use cli::{Cli, Commands, DbCommands};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use washbay_core::config::{Config, ConfigInfo};
use washbay_core::{create_app, db, AppState};

fn init_tracing(json: bool) {
    let filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}

async fn serve(info: ConfigInfo) -> anyhow::Result<()> {
    let config = info.config;
    tracing::info!(
        profile = info.profile.as_str(),
        overrides = ?info.overrides,
        "Configuration loaded"
    );

    let pool = db::create_pool(&config).await?;
    db::run_migrations(&pool).await?;

    let app_state = AppState::new(pool, &config);
    let app = create_app(app_state, &config.allowed_origins());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Quote {
        size,
        package,
        hours,
    }) = &cli.command
    {
        return cli::handle_quote(size, package, *hours);
    }

    let info = Config::from_env()?;
    init_tracing(info.config.log_json);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(info).await,
        Commands::Db(DbCommands::Migrate) => cli::handle_db_migrate(&info).await,
        Commands::Config => cli::handle_config(&info),
        Commands::Quote { .. } => Ok(()),
    }
}
