pub mod activation;
pub mod bootstrap;
pub mod display;
pub mod identity;
pub mod onboarding;
pub mod queue;

pub use activation::check_activation_status;
pub use bootstrap::{
    ProvisionAdminRequest, ProvisionAdminResponse, provision_super_admin, verify_super_admin,
};
pub use display::tv_display;
pub use identity::resolve_clinic;
pub use onboarding::{PendingActivationView, pending_activation_page, pending_activation_ticket};
pub use queue::{QueueSnapshotResponse, queue_snapshot};
