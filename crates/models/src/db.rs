use std::time::Duration;

use configs::DatabaseConfig;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

/// Idle timeout and lifetime of the single in-memory sqlite connection.
/// `ConnectOptions` only takes a `Duration`, so "never" is spelled as a very long one.
const PINNED_CONN_TTL: Duration = Duration::from_secs(u32::MAX as u64);

fn is_sqlite_memory(url: &str) -> bool {
    url.starts_with("sqlite:") && url.contains(":memory:")
}

fn connect_options(cfg: &DatabaseConfig) -> ConnectOptions {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .sqlx_logging(cfg.sqlx_logging);
    if is_sqlite_memory(&cfg.url) {
        // each in-memory sqlite connection is its own database: one connection, never recycled
        opt.max_connections(1)
            .min_connections(1)
            .idle_timeout(PINNED_CONN_TTL)
            .max_lifetime(PINNED_CONN_TTL);
    } else {
        opt.max_connections(cfg.max_connections)
            .min_connections(cfg.min_connections)
            .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs));
    }
    opt
}

/// Open a pool sized and timed by `cfg`.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let db = Database::connect(connect_options(cfg)).await?;
    info!(backend = ?db.get_database_backend(), "database connected");
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_in_memory_sqlite() {
        assert!(is_sqlite_memory("sqlite::memory:"));
        assert!(!is_sqlite_memory("sqlite://data/hcm.db"));
        assert!(!is_sqlite_memory("postgres://localhost/hcm"));
    }

    #[test]
    fn in_memory_sqlite_keeps_its_only_connection() {
        let cfg = DatabaseConfig { url: "sqlite::memory:".into(), max_connections: 8, ..Default::default() };
        let opt = connect_options(&cfg);
        assert_eq!(opt.get_max_connections(), Some(1));
        assert_eq!(opt.get_min_connections(), Some(1));
        assert_eq!(opt.get_idle_timeout(), Some(PINNED_CONN_TTL));
        assert_eq!(opt.get_max_lifetime(), Some(PINNED_CONN_TTL));
        assert!(PINNED_CONN_TTL >= Duration::from_secs(100 * 365 * 24 * 3600));
    }

    #[test]
    fn server_pool_follows_config() {
        let cfg = DatabaseConfig {
            url: "postgres://localhost/hcm".into(),
            max_connections: 8,
            min_connections: 2,
            idle_timeout_secs: 60,
            max_lifetime_secs: 600,
            ..Default::default()
        };
        let opt = connect_options(&cfg);
        assert_eq!(opt.get_max_connections(), Some(8));
        assert_eq!(opt.get_min_connections(), Some(2));
        assert_eq!(opt.get_idle_timeout(), Some(Duration::from_secs(60)));
        assert_eq!(opt.get_max_lifetime(), Some(Duration::from_secs(600)));
    }
}
