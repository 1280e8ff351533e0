use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde_json::json;

use crate::email::OutboundEmail;
use crate::error::AppError;
use crate::models::Contact;
use crate::state::SharedState;
use crate::submission::ContactForm;

pub const THANK_YOU: &str = "Thank you! Your message has been sent successfully.";

/// Accept a contact form. Storage and email are best-effort: once the form
/// validates, the submitter is always thanked.
pub async fn submit(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let contact = ContactForm::from_json(&body)?.validate()?;

    let submitted_at = match state.store.save(&contact).await {
        Ok(saved) => {
            tracing::info!("Stored contact submission {}", saved.id);
            saved.submitted_at
        }
        Err(e) => {
            tracing::error!("Failed to store contact submission: {e}");
            Utc::now()
        }
    };

    let email = OutboundEmail::for_submission(&state.config.mail.notify_to, &contact, submitted_at);
    state.dispatcher.dispatch(email);

    Ok(Json(json!({ "success": true, "message": THANK_YOU })))
}

// TODO: gate behind an admin credential once one is provisioned; the
// website has never authenticated this listing.
pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<Contact>>, AppError> {
    Ok(Json(state.store.list().await?))
}
