//! Product (stock receipt) HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::middleware::CurrentAdmin;
use crate::services::product::{CreateProductInput, ProductService, UpdateProductInput};
use crate::AppState;

/// Create a new stock receipt; runs the full derivation pipeline
pub async fn create_product(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    Json(input): Json<CreateProductInput>,
) -> impl IntoResponse {
    let service = ProductService::new(state.db.clone());

    tracing::debug!(admin = %admin.email, "product creation requested");

    match service.create_product(input).await {
        Ok(product) => (StatusCode::CREATED, Json(product)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// List all products, newest first
pub async fn list_products(State(state): State<AppState>) -> impl IntoResponse {
    let service = ProductService::new(state.db.clone());

    match service.get_products().await {
        Ok(products) => {
            (StatusCode::OK, Json(serde_json::json!({ "products": products }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Get one product by ID
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = ProductService::new(state.db.clone());

    match service.get_product(product_id).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a product; derived amounts are recomputed server-side
pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(input): Json<UpdateProductInput>,
) -> impl IntoResponse {
    let service = ProductService::new(state.db.clone());

    match service.update_product(product_id, input).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a product by ID
pub async fn delete_product(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    Path(product_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = ProductService::new(state.db.clone());

    tracing::info!(admin = %admin.email, %product_id, "product deletion requested");

    match service.delete_product(product_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Product deleted successfully" })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
