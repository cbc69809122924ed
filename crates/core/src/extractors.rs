//! Axum extractors for clinic-queue.

#[cfg(feature = "axum")]
mod axum_impl {
    use axum::{
        Json,
        extract::FromRequestParts,
        http::{StatusCode, request::Parts},
        response::{IntoResponse, Response},
    };

    use crate::adapters::DatabaseAdapter;
    use crate::context::ClinicContext;
    use crate::error::ClinicError;
    use crate::types::{ErrorMessageResponse, Session};

    /// Optional session extractor.
    ///
    /// A missing, unknown or expired token yields `None`. Database failures
    /// still reject.
    pub struct OptionalSession(pub Option<Session>);

    /// Extract a session token from request parts.
    ///
    /// Checks `Authorization: Bearer <token>` first, then the session cookie.
    pub fn extract_token_from_parts(parts: &Parts, cookie_name: &str) -> Option<String> {
        if let Some(auth_header) = parts.headers.get("authorization")
            && let Ok(auth_str) = auth_header.to_str()
            && let Some(token) = auth_str.strip_prefix("Bearer ")
            && !token.is_empty()
        {
            return Some(token.to_string());
        }

        for cookie_header in parts.headers.get_all("cookie") {
            let Ok(cookie_str) = cookie_header.to_str() else {
                continue;
            };
            for part in cookie_str.split(';') {
                if let Some((name, value)) = part.trim().split_once('=')
                    && name == cookie_name
                    && !value.is_empty()
                {
                    return Some(value.to_string());
                }
            }
        }

        None
    }

    impl<DB: DatabaseAdapter> FromRequestParts<ClinicContext<DB>> for OptionalSession {
        type Rejection = ClinicError;

        async fn from_request_parts(
            parts: &mut Parts,
            state: &ClinicContext<DB>,
        ) -> Result<Self, Self::Rejection> {
            let Some(token) = extract_token_from_parts(parts, &state.config.session.cookie_name)
            else {
                return Ok(OptionalSession(None));
            };

            let session = state.session_manager.get_session(&token).await?;
            Ok(OptionalSession(session))
        }
    }

    impl IntoResponse for ClinicError {
        fn into_response(self) -> Response {
            let status = StatusCode::from_u16(self.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

            if status.is_server_error() {
                tracing::error!(error = %self, "Request failed");
            }

            let body = ErrorMessageResponse {
                message: self.public_message(),
            };
            (status, Json(body)).into_response()
        }
    }

}

#[cfg(feature = "axum")]
pub use axum_impl::{OptionalSession, extract_token_from_parts};
