//! Super admin provisioning.
//!
//! This is a deployment-time operation: it is reachable from the
//! `provision-admin` CLI command only and has no HTTP route.

use validator::Validate;

use clinic_queue_core::adapters::DatabaseAdapter;
use clinic_queue_core::{
    ClinicContext, ClinicError, ClinicResult, SuperAdmin, hash_password, normalize_email,
    validation_message, verify_password,
};

mod types;

pub use types::{ProvisionAdminRequest, ProvisionAdminResponse};

/// Create the super admin for `request.email`, or overwrite its password.
///
/// Idempotent: any number of calls leaves exactly one row for the email,
/// holding a hash of the most recent password.
pub async fn provision_super_admin<DB: DatabaseAdapter>(
    request: &ProvisionAdminRequest,
    ctx: &ClinicContext<DB>,
) -> ClinicResult<ProvisionAdminResponse> {
    let request = ProvisionAdminRequest {
        email: normalize_email(&request.email),
        password: request.password.clone(),
    };
    request
        .validate()
        .map_err(|e| ClinicError::validation(validation_message(&e)))?;

    let min_length = ctx.config.password.min_length;
    if request.password.chars().count() < min_length {
        return Err(ClinicError::validation(format!(
            "Password must be at least {} characters long",
            min_length
        )));
    }

    let password_hash = hash_password(&request.password)?;

    let admin = ctx
        .database()?
        .upsert_super_admin(&request.email, &password_hash)
        .await?;

    ctx.config
        .logger
        .info(&format!("Super admin credential provisioned for {}", admin.email));

    Ok(ProvisionAdminResponse {
        message: "Super admin provisioned".to_string(),
        email: admin.email,
        password_configured: true,
    })
}

/// Check a super admin login attempt.
///
/// Unknown emails and wrong passwords both yield `InvalidCredentials`.
pub async fn verify_super_admin<DB: DatabaseAdapter>(
    email: &str,
    password: &str,
    ctx: &ClinicContext<DB>,
) -> ClinicResult<SuperAdmin> {
    let admin = ctx
        .database()?
        .get_super_admin_by_email(&normalize_email(email))
        .await?
        .ok_or(ClinicError::InvalidCredentials)?;

    verify_password(password, &admin.password)?;
    Ok(admin)
}

#[cfg(test)]
mod tests;
