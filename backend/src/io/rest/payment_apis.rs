//! # REST API for Bill Payments
//!
//! Recording a payment against a payable bill also writes its mirrored
//! expense; the response carries both so clients can refresh their views.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use shared::{BillPayment, RecordPaymentRequest, RecordPaymentResponse};
use tracing::info;

use crate::domain::PaymentRecorder;
use crate::io::rest::error::{ApiJson, ApiQuery, ApiResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentListQuery {
    pub bill_id: Option<String>,
}

/// Create a router for bill payment APIs
pub fn router(recorder: PaymentRecorder) -> Router {
    Router::new()
        .route("/", get(list_payments).post(record_payment))
        .route("/:id", get(get_payment).delete(delete_payment))
        .with_state(recorder)
}

pub async fn list_payments(
    State(recorder): State<PaymentRecorder>,
    ApiQuery(query): ApiQuery<PaymentListQuery>,
) -> ApiResult<Json<Vec<BillPayment>>> {
    info!("GET /api/bill-payments - query: {:?}", query);
    Ok(Json(recorder.list_payments(query.bill_id.as_deref()).await?))
}

pub async fn record_payment(
    State(recorder): State<PaymentRecorder>,
    ApiJson(request): ApiJson<RecordPaymentRequest>,
) -> ApiResult<(StatusCode, Json<RecordPaymentResponse>)> {
    info!("POST /api/bill-payments - request: {:?}", request);
    let response = recorder.record_payment(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn get_payment(
    State(recorder): State<PaymentRecorder>,
    Path(id): Path<String>,
) -> ApiResult<Json<BillPayment>> {
    info!("GET /api/bill-payments/{}", id);
    Ok(Json(recorder.get_payment(&id).await?))
}

pub async fn delete_payment(
    State(recorder): State<PaymentRecorder>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    info!("DELETE /api/bill-payments/{}", id);
    recorder.delete_payment(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
