use clinic_queue_core::adapters::DatabaseAdapter;
use clinic_queue_core::{Clinic, ClinicContext, ClinicResult, Session, normalize_email};

/// Resolve the clinic owned by the signed-in account.
///
/// Returns `Ok(None)` when there is no session, the session carries no
/// email, or no clinic is registered under that email. Only database
/// failures are errors.
pub async fn resolve_clinic<DB: DatabaseAdapter>(
    session: Option<&Session>,
    ctx: &ClinicContext<DB>,
) -> ClinicResult<Option<Clinic>> {
    let Some(email) = session
        .and_then(|session| session.user_email.as_deref())
        .map(normalize_email)
        .filter(|email| !email.is_empty())
    else {
        return Ok(None);
    };

    ctx.database()?.get_clinic_by_email(&email).await
}
