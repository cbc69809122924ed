//! Row decoding for the Postgres adapter.

#[cfg(feature = "sqlx-postgres")]
mod postgres_impls {
    use crate::types::{
        Clinic, Message, MessageSender, Session, Subscription, SuperAdmin, SupportTicket,
        TicketStatus, Turn, TurnStatus,
    };
    use sqlx::postgres::PgRow;
    use sqlx::{FromRow, Row};
    use std::str::FromStr;

    fn decode_enum<T>(row: &PgRow, column: &str) -> Result<T, sqlx::Error>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let raw: String = row.try_get(column)?;
        raw.parse().map_err(|e| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(e),
        })
    }

    impl FromRow<'_, PgRow> for Clinic {
        fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
            Ok(Self {
                id: row.try_get("id")?,
                email: row.try_get("email")?,
                slug: row.try_get("slug")?,
                name: row.try_get("name")?,
                logo: row.try_get("logo")?,
                ticket_language: row.try_get("ticket_language")?,
                created_at: row.try_get("created_at")?,
                updated_at: row.try_get("updated_at")?,
            })
        }
    }

    impl FromRow<'_, PgRow> for Subscription {
        fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
            Ok(Self {
                id: row.try_get("id")?,
                clinic_id: row.try_get("clinic_id")?,
                status: row.try_get("status")?,
                plan: row.try_get("plan")?,
                created_at: row.try_get("created_at")?,
                updated_at: row.try_get("updated_at")?,
            })
        }
    }

    impl FromRow<'_, PgRow> for SupportTicket {
        fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
            Ok(Self {
                id: row.try_get("id")?,
                clinic_id: row.try_get("clinic_id")?,
                subject: row.try_get("subject")?,
                status: decode_enum::<TicketStatus>(row, "status")?,
                created_at: row.try_get("created_at")?,
                updated_at: row.try_get("updated_at")?,
            })
        }
    }

    impl FromRow<'_, PgRow> for Message {
        fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
            Ok(Self {
                id: row.try_get("id")?,
                ticket_id: row.try_get("ticket_id")?,
                sender: decode_enum::<MessageSender>(row, "sender")?,
                body: row.try_get("body")?,
                created_at: row.try_get("created_at")?,
            })
        }
    }

    impl FromRow<'_, PgRow> for Turn {
        fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
            Ok(Self {
                id: row.try_get("id")?,
                clinic_id: row.try_get("clinic_id")?,
                ticket_code: row.try_get("ticket_code")?,
                status: decode_enum::<TurnStatus>(row, "status")?,
                position: row.try_get("position")?,
                created_at: row.try_get("created_at")?,
            })
        }
    }

    impl FromRow<'_, PgRow> for SuperAdmin {
        fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
            Ok(Self {
                id: row.try_get("id")?,
                email: row.try_get("email")?,
                password: row.try_get("password")?,
                created_at: row.try_get("created_at")?,
                updated_at: row.try_get("updated_at")?,
            })
        }
    }

    impl FromRow<'_, PgRow> for Session {
        fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
            Ok(Self {
                id: row.try_get("id")?,
                token: row.try_get("token")?,
                user_email: row.try_get("user_email")?,
                expires_at: row.try_get("expires_at")?,
                created_at: row.try_get("created_at")?,
            })
        }
    }
}
