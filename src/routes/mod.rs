pub mod contacts;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/submit-contact", post(contacts::submit))
        .route("/contacts", get(contacts::list))
}
