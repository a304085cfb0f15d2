use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use washbay_core::config::ConfigInfo;
use washbay_core::domain::PricingTable;

#[derive(Parser)]
#[command(name = "washbay-core")]
#[command(about = "Washing bay backend - vehicles, packages and payments", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Database management commands
    #[command(subcommand)]
    Db(DbCommands),

    /// Print the resolved configuration
    Config,

    /// Price a stay without touching the database
    Quote {
        /// Vehicle size (small, medium or big)
        #[arg(long)]
        size: String,

        /// Package name (Basic, Special or VIP)
        #[arg(long)]
        package: String,

        /// Whole hours spent in the bay
        #[arg(long, default_value_t = 0)]
        hours: u32,
    },
}

#[derive(Subcommand)]
pub enum DbCommands {
    /// Run database migrations
    Migrate,
}

pub async fn handle_db_migrate(info: &ConfigInfo) -> anyhow::Result<()> {
    let pool = washbay_core::db::create_pool(&info.config).await?;

    tracing::info!("Running database migrations...");
    washbay_core::db::run_migrations(&pool).await?;

    println!("✓ Database migrations completed");

    Ok(())
}

pub fn handle_config(info: &ConfigInfo) -> anyhow::Result<()> {
    let config = &info.config;

    println!("Configuration ({} profile):", info.profile.as_str());
    println!("  Server Port: {}", config.server_port);
    println!("  Database URL: {}", config.redacted_database_url());
    println!("  Max DB Connections: {}", config.db_max_connections);
    println!(
        "  CORS Origins: {}",
        config.cors_allowed_origins.as_deref().unwrap_or("(none)")
    );
    println!("  Session TTL: {}s", config.session_ttl_secs);
    println!("  Secure Cookie: {}", config.session_cookie_secure);
    println!("  Session Store: {:?}", config.session_store);
    println!("  JSON Logs: {}", config.log_json);

    if !info.overrides.is_empty() {
        println!("  Overridden by environment: {}", info.overrides.join(", "));
    }

    println!("✓ Configuration is valid");
    Ok(())
}

pub fn handle_quote(size: &str, package: &str, hours: u32) -> anyhow::Result<()> {
    let settled_at = Utc::now();
    let entry = settled_at - Duration::hours(i64::from(hours));
    let fee = PricingTable::standard().quote(size, package, entry, settled_at)?;

    println!("{} / {} after {}h: {}", size, package.trim(), hours, fee);
    Ok(())
}
