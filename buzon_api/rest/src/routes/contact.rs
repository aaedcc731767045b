use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use buzon_core_contact_contracts::{ContactFeatureService, ContactSubmitError};

use super::{error, internal_server_error};
use crate::models::contact::{ApiContactForm, ApiContactSubmitted};

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route("/contact", routing::post(submit))
        .with_state(service)
}

async fn submit(
    service: State<Arc<impl ContactFeatureService>>,
    payload: Result<Json<ApiContactForm>, JsonRejection>,
) -> Response {
    let Ok(Json(payload)) = payload else {
        return error(StatusCode::BAD_REQUEST, "Faltan datos requeridos");
    };
    let Some(form) = payload.into_form() else {
        return error(StatusCode::BAD_REQUEST, "Faltan datos requeridos");
    };

    match service.submit(form).await {
        Ok(submitted) => Json(ApiContactSubmitted {
            success: true,
            message: "Mensaje enviado correctamente",
            email_sent: submitted.email_sent,
        })
        .into_response(),
        Err(ContactSubmitError::Validation(violations)) => error(
            StatusCode::BAD_REQUEST,
            violations
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Err(ContactSubmitError::Other(err)) => internal_server_error(err),
    }
}
