use chrono::{DateTime, Utc};

use crate::models::{Contact, NewContact};

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    contact: &NewContact,
    submitted_at: DateTime<Utc>,
) -> Result<Contact, sqlx::Error> {
    sqlx::query_as::<_, Contact>(
        "INSERT INTO contacts (name, email, phone, company, service, message, submitted_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
    )
    .bind(&contact.name)
    .bind(&contact.email)
    .bind(&contact.phone)
    .bind(&contact.company)
    .bind(&contact.service)
    .bind(&contact.message)
    .bind(submitted_at)
    .fetch_one(executor)
    .await
}

/// Newest first. `id` breaks ties between rows written in the same instant.
pub async fn list<'e, E: sqlx::PgExecutor<'e>>(executor: E) -> Result<Vec<Contact>, sqlx::Error> {
    sqlx::query_as::<_, Contact>("SELECT * FROM contacts ORDER BY submitted_at DESC, id DESC")
        .fetch_all(executor)
        .await
}
