use clinic_queue_core::adapters::DatabaseAdapter;
use clinic_queue_core::{ActivationStatus, ClinicContext, ClinicResult, Session};

use super::identity::resolve_clinic;

/// Report the subscription status of the signed-in clinic.
///
/// `Ok(None)` means "not activated yet": no session, no clinic, or no
/// subscription. `status` and `plan` are returned exactly as stored.
pub async fn check_activation_status<DB: DatabaseAdapter>(
    session: Option<&Session>,
    ctx: &ClinicContext<DB>,
) -> ClinicResult<Option<ActivationStatus>> {
    let Some(clinic) = resolve_clinic(session, ctx).await? else {
        return Ok(None);
    };

    let subscription = ctx
        .database()?
        .get_subscription_by_clinic(&clinic.id)
        .await?;

    Ok(subscription.map(ActivationStatus::from))
}
