//! Redis backend.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use redis::AsyncCommands;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use tracing::{debug, info};

use super::backend::KeyValueStore;
use crate::error::StoreError;

const BACKEND: &str = "redis";

/// Reconnect attempts after a failed connect, at startup and later.
const CONNECT_RETRIES: usize = 1;

/// Time allowed for one TCP connect and handshake.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Key-value store backed by a Redis server.
///
/// Uses a [`ConnectionManager`], which multiplexes one connection across
/// concurrent callers and reconnects after failures. Errors are surfaced
/// once; there is no retry policy.
pub struct RedisStore {
    /// Address used for logging; never contains the password.
    address: String,
    db: i64,
    connection: RwLock<Option<ConnectionManager>>,
}

impl RedisStore {
    /// Connects to `addr` (`host:port`) using the given password and
    /// logical database.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Connection` if the server is unreachable or
    /// rejects the credentials. An unreachable server fails after
    /// `CONNECT_RETRIES` reconnect attempts of at most `CONNECT_TIMEOUT` each.
    pub async fn connect(addr: &str, password: Option<&str>, db: i64) -> Result<Self, StoreError> {
        let url = connection_url(addr, password, db);

        let client = redis::Client::open(url.as_str())
            .map_err(|e| StoreError::connection(BACKEND, addr, e.to_string()))?;
        let config = ConnectionManagerConfig::new()
            .set_number_of_retries(CONNECT_RETRIES)
            .set_connection_timeout(CONNECT_TIMEOUT);
        let connection = ConnectionManager::new_with_config(client, config)
            .await
            .map_err(|e| StoreError::connection(BACKEND, addr, e.to_string()))?;

        debug!(addr = %addr, db = db, "Redis connection established");

        Ok(Self {
            address: addr.to_string(),
            db,
            connection: RwLock::new(Some(connection)),
        })
    }

    /// Returns the server address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the logical database index.
    pub fn db(&self) -> i64 {
        self.db
    }

    fn connection(&self, operation: &'static str) -> Result<ConnectionManager, StoreError> {
        self.connection
            .read()
            .clone()
            .ok_or_else(|| StoreError::transport(BACKEND, operation, "connection closed"))
    }
}

fn connection_url(addr: &str, password: Option<&str>, db: i64) -> String {
    match password.filter(|p| !p.is_empty()) {
        Some(password) => format!(
            "redis://:{}@{}/{}",
            urlencoding::encode(password),
            addr,
            db
        ),
        None => format!("redis://{addr}/{db}"),
    }
}

fn transport(operation: &'static str, err: redis::RedisError) -> StoreError {
    StoreError::transport(BACKEND, operation, err.to_string())
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection("get")?;
        // Nil reply maps to None; anything else that fails is a transport error.
        conn.get::<_, Option<String>>(key)
            .await
            .map_err(|e| transport("get", e))
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StoreError> {
        let mut conn = self.connection("set")?;

        match ttl {
            Some(ttl) => conn
                .set_ex::<_, _, ()>(key, value, ttl.as_secs().max(1))
                .await
                .map_err(|e| transport("set", e)),
            None => conn
                .set::<_, _, ()>(key, value)
                .await
                .map_err(|e| transport("set", e)),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.connection("ping")?;
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map(|_| ())
            .map_err(|e| transport("ping", e))
    }

    async fn close(&self) -> Result<(), StoreError> {
        if self.connection.write().take().is_some() {
            info!(addr = %self.address, "Redis connection closed");
        }
        Ok(())
    }

    fn name(&self) -> &str {
        BACKEND
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("address", &self.address)
            .field("db", &self.db)
            .field("open", &self.connection.read().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_without_password() {
        assert_eq!(
            connection_url("localhost:6379", None, 0),
            "redis://localhost:6379/0"
        );
        assert_eq!(
            connection_url("localhost:6379", Some(""), 3),
            "redis://localhost:6379/3"
        );
    }

    #[test]
    fn test_url_encodes_password() {
        assert_eq!(
            connection_url("cache:6380", Some("p@ss:word"), 1),
            "redis://:p%40ss%3Aword@cache:6380/1"
        );
    }
}
