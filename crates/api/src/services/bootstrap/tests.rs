use super::*;
use crate::services::test_helpers;
use clinic_queue_core::adapters::SuperAdminOps;

const ADMIN_EMAIL: &str = "ops@clinic-queue.test";

fn request(email: &str, password: &str) -> ProvisionAdminRequest {
    ProvisionAdminRequest {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_provision_creates_admin() {
    let ctx = test_helpers::create_test_context();

    let response = provision_super_admin(&request(ADMIN_EMAIL, "first-strong-password"), &ctx)
        .await
        .unwrap();

    assert_eq!(
        response,
        ProvisionAdminResponse {
            message: "Super admin provisioned".to_string(),
            email: ADMIN_EMAIL.to_string(),
            password_configured: true,
        }
    );

    let stored = test_helpers::db(&ctx)
        .get_super_admin_by_email(ADMIN_EMAIL)
        .await
        .unwrap()
        .expect("admin row");
    assert!(stored.password.starts_with("$argon2"));
    assert_ne!(stored.password, "first-strong-password");
}

#[tokio::test]
async fn test_second_call_overwrites_password_without_duplicating() {
    let ctx = test_helpers::create_test_context();

    provision_super_admin(&request(ADMIN_EMAIL, "first-strong-password"), &ctx)
        .await
        .unwrap();
    provision_super_admin(&request(ADMIN_EMAIL, "second-strong-password"), &ctx)
        .await
        .unwrap();

    let db = test_helpers::db(&ctx);
    assert_eq!(db.count_super_admins(ADMIN_EMAIL).await.unwrap(), 1);

    assert!(
        verify_super_admin(ADMIN_EMAIL, "second-strong-password", &ctx)
            .await
            .is_ok()
    );
    assert!(matches!(
        verify_super_admin(ADMIN_EMAIL, "first-strong-password", &ctx).await,
        Err(ClinicError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn test_email_is_normalized() {
    let ctx = test_helpers::create_test_context();

    provision_super_admin(&request("  Ops@Clinic-Queue.test ", "first-strong-password"), &ctx)
        .await
        .unwrap();

    assert_eq!(
        test_helpers::db(&ctx)
            .count_super_admins(ADMIN_EMAIL)
            .await
            .unwrap(),
        1
    );
    assert!(
        verify_super_admin("OPS@clinic-queue.test", "first-strong-password", &ctx)
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn test_invalid_email_is_rejected() {
    let ctx = test_helpers::create_test_context();

    let err = provision_super_admin(&request("not-an-email", "first-strong-password"), &ctx)
        .await
        .unwrap_err();
    assert!(matches!(err, ClinicError::Validation(_)));
    assert!(err.to_string().contains("Invalid email address"));
}

#[tokio::test]
async fn test_short_password_is_rejected() {
    let ctx = test_helpers::create_test_context();

    let err = provision_super_admin(&request(ADMIN_EMAIL, "short"), &ctx)
        .await
        .unwrap_err();
    assert!(matches!(err, ClinicError::Validation(_)));
    assert_eq!(err.status_code(), 400);
    assert_eq!(
        test_helpers::db(&ctx)
            .count_super_admins(ADMIN_EMAIL)
            .await
            .unwrap(),
        0
    );
}

#[tokio::test]
async fn test_unknown_admin_is_invalid_credentials() {
    let ctx = test_helpers::create_test_context();
    assert!(matches!(
        verify_super_admin(ADMIN_EMAIL, "whatever-password", &ctx).await,
        Err(ClinicError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn test_unavailable_gateway_rejects_provisioning() {
    let ctx = test_helpers::create_unavailable_context();
    assert!(matches!(
        provision_super_admin(&request(ADMIN_EMAIL, "first-strong-password"), &ctx).await,
        Err(ClinicError::GatewayUnavailable(_))
    ));
}

#[tokio::test]
async fn test_differently_cased_emails_share_one_admin() {
    let ctx = test_helpers::create_test_context();

    provision_super_admin(&request("\tOPS@clinic-queue.test", "first-strong-password"), &ctx)
        .await
        .unwrap();
    let response = provision_super_admin(
        &request("ops@Clinic-Queue.Test  ", "second-strong-password"),
        &ctx,
    )
    .await
    .unwrap();
    assert_eq!(response.email, ADMIN_EMAIL);

    let db = test_helpers::db(&ctx);
    assert_eq!(db.count_super_admins(ADMIN_EMAIL).await.unwrap(), 1);
    assert!(
        verify_super_admin("Ops@Clinic-Queue.Test", "second-strong-password", &ctx)
            .await
            .is_ok()
    );
}
