//! Supplier HTTP handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::services::supplier::{CreateSupplierInput, SupplierService};
use crate::AppState;

/// Register a supplier
pub async fn create_supplier(
    State(state): State<AppState>,
    Json(input): Json<CreateSupplierInput>,
) -> impl IntoResponse {
    let service = SupplierService::new(state.db.clone());

    match service.create_supplier(input).await {
        Ok(supplier) => (StatusCode::CREATED, Json(supplier)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// List all suppliers
pub async fn list_suppliers(State(state): State<AppState>) -> impl IntoResponse {
    let service = SupplierService::new(state.db.clone());

    match service.get_suppliers().await {
        Ok(suppliers) => (
            StatusCode::OK,
            Json(serde_json::json!({ "suppliers": suppliers })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
