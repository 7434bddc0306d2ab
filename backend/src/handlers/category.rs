//! Category and sub-category HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::category::{AddSubCategoriesInput, CategoryService, CreateCategoryInput};
use crate::AppState;

/// Create a category
pub async fn create_category(
    State(state): State<AppState>,
    Json(input): Json<CreateCategoryInput>,
) -> impl IntoResponse {
    let service = CategoryService::new(state.db.clone());

    match service.create_category(input).await {
        Ok(category) => (StatusCode::CREATED, Json(category)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// List all categories
pub async fn list_categories(State(state): State<AppState>) -> impl IntoResponse {
    let service = CategoryService::new(state.db.clone());

    match service.get_categories().await {
        Ok(categories) => (
            StatusCode::OK,
            Json(serde_json::json!({ "categories": categories })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Add sub-categories under a category
pub async fn add_sub_categories(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
    Json(input): Json<AddSubCategoriesInput>,
) -> impl IntoResponse {
    let service = CategoryService::new(state.db.clone());

    match service.add_sub_categories(category_id, input).await {
        Ok(sub_categories) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "subCategories": sub_categories })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// List sub-categories for a category
pub async fn list_sub_categories(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = CategoryService::new(state.db.clone());

    match service.get_sub_categories(category_id).await {
        Ok(sub_categories) => (
            StatusCode::OK,
            Json(serde_json::json!({ "subCategories": sub_categories })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
