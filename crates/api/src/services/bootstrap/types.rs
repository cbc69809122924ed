use serde::{Deserialize, Serialize};
use validator::Validate;

/// Credentials for the bootstrap super admin.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProvisionAdminRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Result of provisioning. Never carries the password or its hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProvisionAdminResponse {
    pub message: String,
    pub email: String,
    pub password_configured: bool,
}
