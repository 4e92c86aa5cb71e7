//! # REST API for plain record registries
//!
//! One generic set of handlers serves income, expenses, assets, liabilities,
//! investments, the rental fleet and trading accounts. Each registry gets its
//! own router whose state is the [`RecordService`] for that record type.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use tracing::info;

use crate::domain::{Record, RecordService};
use crate::io::rest::error::{ApiJson, ApiResult};

/// Create a router exposing CRUD for one record type
pub fn router<T: Record>(service: RecordService<T>) -> Router {
    Router::new()
        .route("/", get(list_records::<T>).post(create_record::<T>))
        .route(
            "/:id",
            get(get_record::<T>)
                .patch(update_record::<T>)
                .delete(delete_record::<T>),
        )
        .with_state(service)
}

/// List records, newest first
pub async fn list_records<T: Record>(State(service): State<RecordService<T>>) -> ApiResult<Json<Vec<T>>> {
    info!("GET {} list", service.kind());
    Ok(Json(service.list().await?))
}

pub async fn create_record<T: Record>(
    State(service): State<RecordService<T>>,
    ApiJson(request): ApiJson<T::Create>,
) -> ApiResult<(StatusCode, Json<T>)> {
    info!("POST {} - request: {:?}", service.kind(), request);
    let record = service.create(request).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn get_record<T: Record>(
    State(service): State<RecordService<T>>,
    Path(id): Path<String>,
) -> ApiResult<Json<T>> {
    info!("GET {} {}", service.kind(), id);
    Ok(Json(service.get(&id).await?))
}

/// Partial update: absent fields are kept, explicit nulls clear optional fields
pub async fn update_record<T: Record>(
    State(service): State<RecordService<T>>,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<T::Update>,
) -> ApiResult<Json<T>> {
    info!("PATCH {} {} - request: {:?}", service.kind(), id, update);
    Ok(Json(service.update(&id, update).await?))
}

pub async fn delete_record<T: Record>(
    State(service): State<RecordService<T>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    info!("DELETE {} {}", service.kind(), id);
    service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{DbConnection, LedgerRepository, VehicleRepository};
    use axum::{
        body::Body,
        http::{Method, Request},
    };
    use serde_json::{json, Value};
    use shared::{ErrorResponse, LedgerEntry, RentalVehicle, VehicleStatus};
    use std::sync::Arc;
    use tower::util::ServiceExt; // for `oneshot`

    async fn setup_income_app() -> Router {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        router(RecordService::<LedgerEntry>::new(
            "income",
            Arc::new(LedgerRepository::income(db)),
        ))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_income_crud_over_http() {
        let app = setup_income_app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/",
            Some(json!({
                "date": "2024-03-01",
                "amount": "50000.00",
                "category": "Salary",
                "member": "Ravi"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let created: LedgerEntry = serde_json::from_slice(&body).unwrap();
        assert_eq!(created.amount, "50000.00");
        assert_eq!(created.member.as_deref(), Some("Ravi"));

        let (status, body) = send(&app, Method::GET, &format!("/{}", created.id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_slice::<LedgerEntry>(&body).unwrap(), created);

        let (status, body) = send(
            &app,
            Method::PATCH,
            &format!("/{}", created.id),
            Some(json!({ "amount": "52000.00", "member": null })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let updated: LedgerEntry = serde_json::from_slice(&body).unwrap();
        assert_eq!(updated.amount, "52000.00");
        assert_eq!(updated.member, None);
        assert_eq!(updated.category, "Salary");

        let (status, body) = send(&app, Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_slice::<Vec<LedgerEntry>>(&body).unwrap(), vec![updated]);

        let (status, _) = send(&app, Method::DELETE, &format!("/{}", created.id), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, Method::GET, &format!("/{}", created.id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_payloads_are_bad_requests() {
        let app = setup_income_app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/",
            Some(json!({ "date": "01/03/2024", "amount": "10", "category": "Salary" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.message, "Validation failed");
        assert!(error.detail.unwrap().contains("date"));

        // Missing required field never reaches the domain layer
        let (status, body) = send(&app, Method::POST, "/", Some(json!({ "amount": "10" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.message, "Invalid request body");

        let (status, _) = send(&app, Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found() {
        let app = setup_income_app().await;

        let (status, _) = send(&app, Method::PATCH, "/missing", Some(json!({ "amount": "1" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, Method::DELETE, "/missing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.message, "income missing not found");
    }

    #[tokio::test]
    async fn test_rental_vehicle_status_defaults_to_active() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let app = router(RecordService::<RentalVehicle>::new(
            "rental vehicle",
            Arc::new(VehicleRepository::new(db)),
        ));

        let (status, body) = send(
            &app,
            Method::POST,
            "/",
            Some(json!({
                "vehicleNumber": "KA-01-AB-1234",
                "model": "Toyota Innova",
                "monthlyRent": "35000.00"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let vehicle: RentalVehicle = serde_json::from_slice(&body).unwrap();
        assert_eq!(vehicle.status, VehicleStatus::Active);

        let (status, body) = send(
            &app,
            Method::PATCH,
            &format!("/{}", vehicle.id),
            Some(json!({ "status": "maintenance" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let updated: RentalVehicle = serde_json::from_slice(&body).unwrap();
        assert_eq!(updated.status, VehicleStatus::Maintenance);
        assert_eq!(updated.model, "Toyota Innova");
    }
}
