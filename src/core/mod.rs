mod app;
mod storage;

pub use app::{ClinicQueue, ClinicQueueBuilder, TypedClinicQueueBuilder};
pub use storage::StorageBackend;
