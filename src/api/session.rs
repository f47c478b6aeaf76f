use argon2::Argon2;
use tokio::task::JoinHandle;
use tower_sessions::cookie::Key;
use tower_sessions::session_store::ExpiredDeletion;
use tower_sessions_sqlx_store::SqliteStore;
use tracing::warn;

use crate::constants::session::{KEY_SALT, PURGE_INTERVAL};
use crate::db::Store;

/// Stretches the configured secret into the 64 bytes the cookie signer needs.
/// Any non-empty secret is accepted.
pub fn signing_key(secret: &str) -> anyhow::Result<Key> {
    let mut bytes = [0u8; 64];
    Argon2::default()
        .hash_password_into(secret.as_bytes(), KEY_SALT, &mut bytes)
        .map_err(|e| anyhow::anyhow!("Failed to derive session key: {e}"))?;
    Ok(Key::from(&bytes))
}

/// Session store on the application database. The table is created by the
/// store migrations.
#[must_use]
pub fn session_store(store: &Store) -> SqliteStore {
    SqliteStore::new(store.conn.get_sqlite_connection_pool().clone())
}

pub async fn purge_expired_sessions(sessions: &SqliteStore) -> anyhow::Result<()> {
    sessions
        .delete_expired()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete expired sessions: {e}"))
}

pub fn spawn_session_cleanup(sessions: SqliteStore) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PURGE_INTERVAL);
        loop {
            interval.tick().await;
            if let Err(e) = purge_expired_sessions(&sessions).await {
                warn!(error = %e, "Session cleanup failed");
            }
        }
    })
}
