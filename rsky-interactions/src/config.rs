use std::env;
use std::time::Duration;

pub const DEFAULT_USER_HASH_SALT: &str = "default_secret_salt";
pub const DEFAULT_HTTP_PORT: u16 = 5001;

pub fn env_int(name: &str) -> Option<usize> {
    match env::var(name) {
        Ok(str) => match str.parse::<usize>() {
            Ok(int) => Some(int),
            _ => None,
        },
        _ => None,
    }
}

pub fn env_str(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(str) => Some(str),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    /// Full connection string. When set it wins over the individual parts.
    pub url: Option<String>,
    pub dbname: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub pool_max_size: usize,
    pub timeout: Duration,
}

#[derive(Clone, PartialEq)]
pub struct ServiceConfig {
    pub http_port: u16,
    pub store: StoreKind,
    pub database: DatabaseConfig,
    pub user_hash_salt: String,
}

// Keeps the salt and password out of startup logs.
impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("http_port", &self.http_port)
            .field("store", &self.store)
            .field("dbname", &self.database.dbname)
            .field("user", &self.database.user)
            .field("host", &self.database.host)
            .field("port", &self.database.port)
            .field("url_set", &self.database.url.is_some())
            .field("pool_max_size", &self.database.pool_max_size)
            .field("timeout", &self.database.timeout)
            .finish_non_exhaustive()
    }
}

pub fn env_to_cfg() -> ServiceConfig {
    let http_port = env_int("ROCKET_PORT")
        .and_then(|port| u16::try_from(port).ok())
        .unwrap_or(DEFAULT_HTTP_PORT);

    let store = match env_str("INTERACTIONS_STORE").as_deref() {
        Some("memory") => StoreKind::Memory,
        Some("postgres") | None => StoreKind::Postgres,
        Some(other) => {
            tracing::warn!("Unknown INTERACTIONS_STORE {other:?}, using postgres");
            StoreKind::Postgres
        }
    };

    let port = env_int("DB_PORT")
        .and_then(|port| u16::try_from(port).ok())
        .unwrap_or(5432);

    let database = DatabaseConfig {
        url: env_str("DATABASE_URL").filter(|url| !url.is_empty()),
        dbname: env_str("DB_NAME").unwrap_or("interactions_db".to_string()),
        user: env_str("DB_USER").unwrap_or("postgres".to_string()),
        password: env_str("DB_PASSWORD").unwrap_or_default(),
        host: env_str("DB_HOST").unwrap_or("localhost".to_string()),
        port,
        pool_max_size: env_int("DB_POOL_MAX_SIZE").unwrap_or(10),
        timeout: Duration::from_secs(env_int("DB_TIMEOUT_SECS").unwrap_or(30) as u64),
    };

    let user_hash_salt = match env_str("USER_HASH_SALT") {
        Some(salt) if !salt.is_empty() => salt,
        _ => {
            tracing::warn!("USER_HASH_SALT not set, using the default salt");
            DEFAULT_USER_HASH_SALT.to_string()
        }
    };

    ServiceConfig {
        http_port,
        store,
        database,
        user_hash_salt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 11] = [
        "ROCKET_PORT",
        "INTERACTIONS_STORE",
        "DATABASE_URL",
        "DB_NAME",
        "DB_USER",
        "DB_PASSWORD",
        "DB_HOST",
        "DB_PORT",
        "DB_POOL_MAX_SIZE",
        "DB_TIMEOUT_SECS",
        "USER_HASH_SALT",
    ];

    #[test]
    fn defaults_when_unset() {
        temp_env::with_vars_unset(VARS, || {
            let cfg = env_to_cfg();
            assert_eq!(cfg.http_port, DEFAULT_HTTP_PORT);
            assert_eq!(cfg.store, StoreKind::Postgres);
            assert_eq!(cfg.database.url, None);
            assert_eq!(cfg.database.dbname, "interactions_db");
            assert_eq!(cfg.database.user, "postgres");
            assert_eq!(cfg.database.password, "");
            assert_eq!(cfg.database.host, "localhost");
            assert_eq!(cfg.database.port, 5432);
            assert_eq!(cfg.database.pool_max_size, 10);
            assert_eq!(cfg.database.timeout, Duration::from_secs(30));
            assert_eq!(cfg.user_hash_salt, DEFAULT_USER_HASH_SALT);
        });
    }

    #[test]
    fn reads_overrides() {
        temp_env::with_vars(
            [
                ("ROCKET_PORT", Some("8080")),
                ("INTERACTIONS_STORE", Some("memory")),
                ("DATABASE_URL", Some("postgres://u:p@db:6543/x")),
                ("DB_PORT", Some("6543")),
                ("DB_POOL_MAX_SIZE", Some("3")),
                ("DB_TIMEOUT_SECS", Some("5")),
                ("USER_HASH_SALT", Some("pepper")),
            ],
            || {
                let cfg = env_to_cfg();
                assert_eq!(cfg.http_port, 8080);
                assert_eq!(cfg.store, StoreKind::Memory);
                assert_eq!(cfg.database.url.as_deref(), Some("postgres://u:p@db:6543/x"));
                assert_eq!(cfg.database.port, 6543);
                assert_eq!(cfg.database.pool_max_size, 3);
                assert_eq!(cfg.database.timeout, Duration::from_secs(5));
                assert_eq!(cfg.user_hash_salt, "pepper");
            },
        );
    }

    #[test]
    fn bad_port_and_empty_salt_fall_back() {
        temp_env::with_vars(
            [
                ("ROCKET_PORT", Some("70000")),
                ("DB_PORT", Some("99999")),
                ("USER_HASH_SALT", Some("")),
                ("DATABASE_URL", Some("")),
            ],
            || {
                let cfg = env_to_cfg();
                assert_eq!(cfg.http_port, DEFAULT_HTTP_PORT);
                assert_eq!(cfg.database.port, 5432);
                assert_eq!(cfg.database.url, None);
                assert_eq!(cfg.user_hash_salt, DEFAULT_USER_HASH_SALT);
            },
        );
    }

    #[test]
    fn debug_hides_secrets() {
        temp_env::with_vars(
            [
                ("USER_HASH_SALT", Some("very-secret-salt")),
                ("DB_PASSWORD", Some("hunter2")),
            ],
            || {
                let rendered = format!("{:?}", env_to_cfg());
                assert!(!rendered.contains("very-secret-salt"));
                assert!(!rendered.contains("hunter2"));
            },
        );
    }
}
