use clinic_queue_core::adapters::DatabaseAdapter;
use clinic_queue_core::{ClinicContext, ClinicDisplay, ClinicError, ClinicResult};

/// Public display data of a clinic for the waiting-room TV.
///
/// Unlike the onboarding lookups, an unknown slug is an error
/// (`ClinicError::NotFound`) so that the page answers 404.
pub async fn tv_display<DB: DatabaseAdapter>(
    slug: &str,
    ctx: &ClinicContext<DB>,
) -> ClinicResult<ClinicDisplay> {
    ctx.database()?
        .get_clinic_by_slug(slug)
        .await?
        .map(ClinicDisplay::from)
        .ok_or_else(|| ClinicError::not_found("Clinic not found"))
}
