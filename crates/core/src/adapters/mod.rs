pub mod database;
pub mod memory;
pub mod traits;

pub use database::DatabaseAdapter;
pub use memory::MemoryDatabaseAdapter;
pub use traits::{ClinicOps, SessionOps, SubscriptionOps, SuperAdminOps, SupportTicketOps, TurnOps};

#[cfg(feature = "sqlx-postgres")]
pub use database::sqlx_adapter::{PoolStats, SqlxAdapter};
