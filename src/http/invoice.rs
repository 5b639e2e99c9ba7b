use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Json, Query,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::http::response::ApiResponse;
use crate::invoice::{self, BatchValidation};
use crate::observability::metrics;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRequest {
    pub filenames: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParseQuery {
    pub filename: String,
}

/// Extractor rejections, rendered as error envelopes.
fn rejected(status: StatusCode, message: String) -> Response {
    tracing::debug!(status = %status, message = %message, "Rejected invoice request");
    ApiResponse::<()>::error(message).with_status(status)
}

pub async fn validate_invoices(request: Result<Json<ValidateRequest>, JsonRejection>) -> Response {
    let Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => return rejected(rejection.status(), rejection.body_text()),
    };

    let result: BatchValidation = invoice::batch_validate(request.filenames);

    tracing::debug!(
        valid = result.valid.len(),
        invalid = result.invalid.len(),
        "Validated invoice filenames"
    );
    metrics::record_invoice_filenames(result.valid.len(), result.invalid.len());

    ApiResponse::ok(result).into_response()
}

pub async fn parse_invoice(query: Result<Query<ParseQuery>, QueryRejection>) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return rejected(rejection.status(), rejection.body_text()),
    };

    match invoice::parse(&query.filename) {
        Some(parsed) => {
            metrics::record_invoice_filenames(1, 0);
            ApiResponse::ok(parsed).into_response()
        }
        None => {
            metrics::record_invoice_filenames(0, 1);
            ApiResponse::<()>::error(format!("Invalid invoice filename: {}", query.filename))
                .with_status(StatusCode::UNPROCESSABLE_ENTITY)
        }
    }
}
