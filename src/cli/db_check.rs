use clap::Args;
use sqlx::Connection;

use crate::cli::OutputFormat;
use crate::db::{ConnectionPool, DbConfig, DEFAULT_POOL_SIZE};

#[derive(Args)]
pub struct DbCheckArgs {
    /// Full MySQL connection URL (mysql:// or mariadb://); overrides the individual settings below
    #[arg(long, env = "VV_DB_URL", hide_env_values = true)]
    pub url: Option<String>,

    /// Database host
    #[arg(long, env = "VV_DB_HOST", default_value = "localhost")]
    pub host: String,

    /// Database port
    #[arg(long, env = "VV_DB_PORT", default_value = "3306")]
    pub port: u16,

    /// Database user
    #[arg(long, env = "VV_DB_USER", default_value = "vvadmin")]
    pub user: String,

    /// Database password
    #[arg(long, env = "VV_DB_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    /// Database (schema) name
    #[arg(long, env = "VV_DB_NAME", default_value = "validator")]
    pub database: String,

    /// Maximum pooled connections
    #[arg(long, default_value_t = DEFAULT_POOL_SIZE)]
    pub pool_size: u32,
}

impl DbCheckArgs {
    /// Build the pool settings, accepting only MySQL URLs
    pub fn to_config(&self) -> anyhow::Result<DbConfig> {
        let config = match &self.url {
            Some(url) => {
                let config = DbConfig::from_url(url.clone());
                match config.scheme().as_deref() {
                    Some("mysql" | "mariadb") => config,
                    Some(other) => anyhow::bail!(
                        "Unsupported database URL scheme '{other}': expected mysql:// or mariadb://"
                    ),
                    None => anyhow::bail!("Invalid database URL: {}", config.redacted_url()),
                }
            }
            None => DbConfig::mysql(
                &self.host,
                self.port,
                &self.user,
                &self.password,
                &self.database,
            )?,
        };
        Ok(config.with_max_connections(self.pool_size))
    }
}

pub fn run(args: DbCheckArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.to_config()?;

    if verbose {
        eprintln!("Connecting to {}", config.redacted_url());
    }

    let rt = tokio::runtime::Runtime::new()?;
    let outcome = rt.block_on(async { check(&config).await });

    match format {
        OutputFormat::Text => match &outcome {
            Ok(()) => println!("OK: {} ({} connections)", config.redacted_url(), config.max_connections),
            Err(e) => println!("FAILED: {}: {e}", config.redacted_url()),
        },
        OutputFormat::Json => {
            let json = serde_json::json!({
                "url": config.redacted_url(),
                "pool_size": config.max_connections,
                "ok": outcome.is_ok(),
                "error": outcome.as_ref().err().map(ToString::to_string),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Tsv => {
            println!("url\tpool_size\tok");
            println!("{}\t{}\t{}", config.redacted_url(), config.max_connections, outcome.is_ok());
        }
    }

    outcome
}

async fn check(config: &DbConfig) -> anyhow::Result<()> {
    let mut pool: ConnectionPool = ConnectionPool::open(config).await?;

    let ping = match pool.primary_mut() {
        Some(conn) => conn.ping().await.map_err(anyhow::Error::from),
        None => Err(anyhow::anyhow!("Pool opened without a primary connection")),
    };

    pool.close().await?;
    ping
}
