//! Pooled database connections shared by the pipeline stages.
//!
//! [`ConnectionPool::open`] creates the pool and eagerly checks out one
//! primary connection for the owner's own queries. Stages take further
//! connections with [`ConnectionPool::acquire`]; each returns to the pool when
//! dropped. [`ConnectionPool::close`] can be called any number of times.
//!
//! Pooled connections hand themselves back on a runtime task. A pool dropped
//! outside any Tokio runtime detaches its primary connection instead, so
//! teardown at process exit does not panic. Connections from `acquire` must
//! still be dropped inside the runtime.

use sqlx::pool::{Pool, PoolConnection, PoolOptions};
use sqlx::{Connection, Database, MySql};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::db::config::DbConfig;

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("Failed to create connection pool: {0}")]
    Create(#[source] sqlx::Error),

    #[error("Failed to acquire connection: {0}")]
    Acquire(#[source] sqlx::Error),

    #[error("Failed to close connection: {0}")]
    Close(#[source] sqlx::Error),

    #[error("Connection pool is closed")]
    Closed,
}

/// Bounded pool plus the owner's long-lived primary connection
pub struct ConnectionPool<DB: Database = MySql> {
    pool: Option<Pool<DB>>,
    primary: Option<PoolConnection<DB>>,
    capacity: u32,
}

impl<DB: Database> ConnectionPool<DB> {
    /// Create the pool and check out the primary connection.
    ///
    /// Blocks on the database handshake; there is no timeout beyond what the
    /// driver applies.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Create` if the pool cannot connect, or
    /// `PoolError::Acquire` if the primary connection cannot be checked out.
    pub async fn open(config: &DbConfig) -> Result<Self, PoolError> {
        let pool = PoolOptions::<DB>::new()
            .max_connections(config.max_connections)
            .connect(config.url())
            .await
            .map_err(PoolError::Create)?;

        let primary = match pool.acquire().await {
            Ok(conn) => conn,
            Err(e) => {
                pool.close().await;
                return Err(PoolError::Acquire(e));
            }
        };

        info!(
            url = %config.redacted_url(),
            capacity = config.max_connections,
            "Connection pool opened"
        );

        Ok(Self {
            pool: Some(pool),
            primary: Some(primary),
            capacity: config.max_connections,
        })
    }

    /// Check out an additional connection; it returns to the pool on drop.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Closed` after [`ConnectionPool::close`], or
    /// `PoolError::Acquire` if the pool cannot supply a connection.
    pub async fn acquire(&self) -> Result<PoolConnection<DB>, PoolError> {
        let pool = self.pool.as_ref().ok_or(PoolError::Closed)?;
        pool.acquire().await.map_err(PoolError::Acquire)
    }

    /// The eagerly acquired connection, until the pool is closed
    pub fn primary_mut(&mut self) -> Option<&mut PoolConnection<DB>> {
        self.primary.as_mut()
    }

    #[must_use]
    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.pool.is_some()
    }

    /// Maximum number of pooled connections
    #[must_use]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Connections currently open, idle or in use
    #[must_use]
    pub fn size(&self) -> u32 {
        self.pool.as_ref().map_or(0, Pool::size)
    }

    /// Close the primary connection and the pool.
    ///
    /// Both references are cleared on every path. A primary connection that no
    /// longer answers a ping, or whose close reports it is already gone, counts
    /// as closed.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Close` only for an unexpected failure while closing
    /// a live primary connection.
    pub async fn close(&mut self) -> Result<(), PoolError> {
        let primary = self.primary.take();
        let pool = self.pool.take();
        let mut result = Ok(());

        if let Some(mut conn) = primary {
            if conn.ping().await.is_ok() {
                match conn.detach().close().await {
                    Ok(()) => debug!("Primary connection closed"),
                    Err(e) if is_already_closed(&e) => {
                        debug!(error = %e, "Primary connection already closed");
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to close primary connection");
                        result = Err(PoolError::Close(e));
                    }
                }
            } else {
                debug!("Primary connection already disconnected");
            }
        }

        if let Some(pool) = pool {
            pool.close().await;
            info!("Connection pool closed");
        }

        result
    }
}

/// Close errors that mean the connection was already gone
fn is_already_closed(error: &sqlx::Error) -> bool {
    matches!(
        error,
        sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::WorkerCrashed
    )
}

impl<DB: Database> Drop for ConnectionPool<DB> {
    fn drop(&mut self) {
        let Some(conn) = self.primary.take() else {
            return;
        };
        if tokio::runtime::Handle::try_current().is_err() {
            // No runtime to return it on; close the raw connection in place
            drop(conn.detach());
            debug!("Primary connection detached outside runtime");
        }
    }
}

impl<DB: Database> std::fmt::Debug for ConnectionPool<DB> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionPool")
            .field("open", &self.pool.is_some())
            .field("primary", &self.primary.is_some())
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Sqlite;

    #[test]
    fn test_is_already_closed() {
        assert!(is_already_closed(&sqlx::Error::PoolClosed));
        assert!(is_already_closed(&sqlx::Error::Io(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "broken pipe"
        ))));
        assert!(!is_already_closed(&sqlx::Error::RowNotFound));
    }

    #[tokio::test]
    async fn test_open_checks_out_primary() {
        let config = DbConfig::from_url("sqlite::memory:");
        let mut pool = ConnectionPool::<Sqlite>::open(&config).await.unwrap();

        assert!(pool.is_open());
        assert!(pool.has_primary());
        assert_eq!(pool.capacity(), 10);
        assert!(pool.size() >= 1);
        assert!(pool.primary_mut().is_some());

        pool.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_close_twice() {
        let config = DbConfig::from_url("sqlite::memory:");
        let mut pool = ConnectionPool::<Sqlite>::open(&config).await.unwrap();

        pool.close().await.unwrap();
        assert!(!pool.is_open());
        assert!(!pool.has_primary());

        pool.close().await.unwrap();
        assert!(!pool.is_open());
        assert!(!pool.has_primary());
        assert_eq!(pool.size(), 0);
    }
}
