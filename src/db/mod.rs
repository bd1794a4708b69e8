//! Database connection pooling for the validation pipeline.
//!
//! The core record and classifier never touch the database; this module only
//! supplies connections to the stages that do.
//!
//! ## Example
//!
//! ```rust,no_run
//! use variant_state::db::{ConnectionPool, DbConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DbConfig::mysql("localhost", 3306, "vvadmin", "var1ant", "validator")?;
//! let mut pool: ConnectionPool = ConnectionPool::open(&config).await?;
//!
//! // A stage borrows a connection for the length of its work
//! {
//!     let _conn = pool.acquire().await?;
//! }
//!
//! pool.close().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod pool;

pub use config::{DbConfig, DEFAULT_POOL_SIZE};
pub use pool::{ConnectionPool, PoolError};
