use clinic_queue_core::{ClinicConfig, ClinicError, ClinicResult};

/// Backing store chosen for a process at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// Postgres at the given URL.
    Postgres(String),
    /// Process-local tables. Nothing survives a restart.
    Memory,
}

impl StorageBackend {
    /// Pick the backend for `config`.
    ///
    /// A `DATABASE_URL` in a build without the `sqlx-postgres` feature is a
    /// configuration error rather than a silent downgrade to memory.
    pub fn select(config: &ClinicConfig) -> ClinicResult<Self> {
        match &config.database_url {
            Some(url) if cfg!(feature = "sqlx-postgres") => Ok(Self::Postgres(url.clone())),
            Some(_) => Err(ClinicError::config(
                "DATABASE_URL is set but this build has no Postgres support \
                 (enable the sqlx-postgres feature)",
            )),
            None => Ok(Self::Memory),
        }
    }

    pub fn is_persistent(&self) -> bool {
        matches!(self, Self::Postgres(_))
    }

    /// Fail unless writes through this backend outlive the process.
    pub fn require_persistent(&self, operation: &str) -> ClinicResult<()> {
        if self.is_persistent() {
            return Ok(());
        }
        Err(ClinicError::config(format!(
            "{} needs DATABASE_URL: the in-memory adapter keeps nothing after exit",
            operation
        )))
    }
}
