use crate::error::{ClinicError, ClinicResult};
use crate::logger::{Logger, TracingLogger};
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Main configuration for the clinic-queue service
#[derive(Clone)]
pub struct ClinicConfig {
    /// Application name, used in the health payload and log lines.
    ///
    /// Defaults to `"clinic-queue"`.
    pub app_name: String,

    /// Postgres connection URL. `None` when running on the in-memory adapter.
    pub database_url: Option<String>,

    /// Socket address the HTTP server binds to.
    pub bind_addr: String,

    /// Where unauthenticated visitors of session-only pages are sent.
    ///
    /// Defaults to `"/login"`.
    pub login_path: String,

    /// Whether the internal router (queue inspection) is mounted.
    ///
    /// Defaults to `false`. The internal router is never merged into the
    /// public router; enabling this mounts it under `/internal`.
    pub internal_routes: bool,

    /// Origins allowed to call the public API from a browser (CORS).
    ///
    /// Supports glob patterns (e.g. `"https://*.clinic.example"`). Empty
    /// means same-origin only.
    pub trusted_origins: Vec<String>,

    /// Logger implementation for service lifecycle logging.
    ///
    /// Defaults to a [`TracingLogger`](crate::logger::TracingLogger).
    pub logger: Arc<dyn Logger>,

    /// Session configuration
    pub session: SessionConfig,

    /// Password configuration
    pub password: PasswordConfig,

    /// Postgres connection pool settings. Ignored by the in-memory adapter.
    pub pool: PoolConfig,
}

/// Session lookup configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Cookie carrying the session token issued by the auth provider
    pub cookie_name: String,
}

/// Password policy for provisioned credentials
#[derive(Debug, Clone)]
pub struct PasswordConfig {
    /// Minimum password length
    pub min_length: usize,
}

/// Postgres connection pool settings
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            app_name: "clinic-queue".to_string(),
            database_url: None,
            bind_addr: "0.0.0.0:3000".to_string(),
            login_path: "/login".to_string(),
            internal_routes: false,
            trusted_origins: Vec::new(),
            logger: Arc::new(TracingLogger),
            session: SessionConfig::default(),
            password: PasswordConfig::default(),
            pool: PoolConfig::default(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "clinic_queue.session_token".to_string(),
        }
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self { min_length: 12 }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 0,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            max_lifetime: Some(Duration::from_secs(1800)),
        }
    }
}

impl std::fmt::Debug for ClinicConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClinicConfig")
            .field("app_name", &self.app_name)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("bind_addr", &self.bind_addr)
            .field("login_path", &self.login_path)
            .field("internal_routes", &self.internal_routes)
            .field("trusted_origins", &self.trusted_origins)
            .field("session", &self.session)
            .field("password", &self.password)
            .field("pool", &self.pool)
            .finish()
    }
}

impl ClinicConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from environment variables.
    ///
    /// | Variable | Field |
    /// |---|---|
    /// | `DATABASE_URL` | `database_url` |
    /// | `CLINIC_QUEUE_BIND` | `bind_addr` |
    /// | `CLINIC_QUEUE_LOGIN_PATH` | `login_path` |
    /// | `CLINIC_QUEUE_SESSION_COOKIE` | `session.cookie_name` |
    /// | `CLINIC_QUEUE_INTERNAL_ROUTES` | `internal_routes` |
    /// | `CLINIC_QUEUE_TRUSTED_ORIGINS` | `trusted_origins` (comma separated) |
    /// | `CLINIC_QUEUE_PASSWORD_MIN_LENGTH` | `password.min_length` |
    /// | `CLINIC_QUEUE_DB_MAX_CONNECTIONS` | `pool.max_connections` |
    /// | `CLINIC_QUEUE_DB_MIN_CONNECTIONS` | `pool.min_connections` |
    /// | `CLINIC_QUEUE_DB_ACQUIRE_TIMEOUT_SECS` | `pool.acquire_timeout` |
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> ClinicResult<Self> {
        let defaults = Self::default();

        let config = Self {
            database_url: env::var("DATABASE_URL").ok(),
            bind_addr: try_load("CLINIC_QUEUE_BIND", defaults.bind_addr.clone())?,
            login_path: try_load("CLINIC_QUEUE_LOGIN_PATH", defaults.login_path.clone())?,
            internal_routes: try_load_flag(
                "CLINIC_QUEUE_INTERNAL_ROUTES",
                defaults.internal_routes,
            )?,
            trusted_origins: env::var("CLINIC_QUEUE_TRUSTED_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|origin| !origin.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            session: SessionConfig {
                cookie_name: try_load(
                    "CLINIC_QUEUE_SESSION_COOKIE",
                    defaults.session.cookie_name.clone(),
                )?,
            },
            password: PasswordConfig {
                min_length: try_load(
                    "CLINIC_QUEUE_PASSWORD_MIN_LENGTH",
                    defaults.password.min_length,
                )?,
            },
            pool: PoolConfig {
                max_connections: try_load(
                    "CLINIC_QUEUE_DB_MAX_CONNECTIONS",
                    defaults.pool.max_connections,
                )?,
                min_connections: try_load(
                    "CLINIC_QUEUE_DB_MIN_CONNECTIONS",
                    defaults.pool.min_connections,
                )?,
                acquire_timeout: Duration::from_secs(try_load(
                    "CLINIC_QUEUE_DB_ACQUIRE_TIMEOUT_SECS",
                    defaults.pool.acquire_timeout.as_secs(),
                )?),
                ..defaults.pool.clone()
            },
            ..defaults
        };

        config.validate()?;
        Ok(config)
    }

    /// Set the application name.
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = name.into();
        self
    }

    /// Set the Postgres connection URL.
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Set the bind address of the HTTP server.
    pub fn bind_addr(mut self, addr: impl Into<String>) -> Self {
        self.bind_addr = addr.into();
        self
    }

    /// Set the login redirect target.
    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    /// Enable or disable the internal router.
    pub fn internal_routes(mut self, enabled: bool) -> Self {
        self.internal_routes = enabled;
        self
    }

    /// Add a trusted origin. Supports glob patterns.
    pub fn trusted_origin(mut self, origin: impl Into<String>) -> Self {
        self.trusted_origins.push(origin.into());
        self
    }

    /// Set a custom logger implementation.
    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    /// Set the session cookie name.
    pub fn session_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.session.cookie_name = name.into();
        self
    }

    /// Set the minimum password length.
    pub fn password_min_length(mut self, length: usize) -> Self {
        self.password.min_length = length;
        self
    }

    /// Set the Postgres pool settings.
    pub fn pool(mut self, pool: PoolConfig) -> Self {
        self.pool = pool;
        self
    }

    /// Check whether a given origin matches any of the `trusted_origins`.
    pub fn is_origin_trusted(&self, origin: &str) -> bool {
        self.trusted_origins
            .iter()
            .any(|pattern| glob_match(pattern, origin))
    }

    pub fn validate(&self) -> Result<(), ClinicError> {
        if !self.login_path.starts_with('/') {
            return Err(ClinicError::config("Login path must start with '/'"));
        }

        if self.session.cookie_name.is_empty() {
            return Err(ClinicError::config("Session cookie name cannot be empty"));
        }

        if self.password.min_length < 8 {
            return Err(ClinicError::config(
                "Password minimum length must be at least 8",
            ));
        }

        if matches!(&self.database_url, Some(url) if url.trim().is_empty()) {
            return Err(ClinicError::config("Database URL cannot be empty"));
        }

        if self.pool.max_connections == 0 {
            return Err(ClinicError::config(
                "Pool max connections must be at least 1",
            ));
        }

        if self.pool.min_connections > self.pool.max_connections {
            return Err(ClinicError::config(
                "Pool min connections cannot exceed max connections",
            ));
        }

        Ok(())
    }
}

fn try_load<T: FromStr>(key: &str, default: T) -> ClinicResult<T>
where
    T: Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e| {
            warn!("Invalid {key} value: {e}");
            ClinicError::config(format!("Invalid {key} value: {e}"))
        }),
        Err(_) => {
            debug!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

/// Like [`try_load`] for on/off switches. Accepts `1`/`0` besides
/// `true`/`false`.
fn try_load_flag(key: &str, default: bool) -> ClinicResult<bool> {
    match env::var(key) {
        Ok(raw) => parse_flag(&raw).ok_or_else(|| {
            warn!("Invalid {key} value: {raw}");
            ClinicError::config(format!("Invalid {key} value: {raw}"))
        }),
        Err(_) => {
            debug!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Simple glob-pattern matching for origin strings.
///
/// `*` matches any sequence of characters. For example,
/// `"https://*.clinic.example"` matches `"https://tv.clinic.example"`.
pub fn glob_match(pattern: &str, value: &str) -> bool {
    if !pattern.contains('*') {
        return pattern == value;
    }

    let parts: Vec<&str> = pattern.split('*').collect();
    let first = parts[0];
    let last = parts[parts.len() - 1];

    if !value.starts_with(first) || !value.ends_with(last) {
        return false;
    }

    let mut pos = 0;
    for part in &parts {
        if part.is_empty() {
            continue;
        }
        match value[pos..].find(part) {
            Some(idx) => pos += idx + part.len(),
            None => return false,
        }
    }

    true
}
