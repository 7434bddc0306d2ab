//! Category and sub-category service

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use serde::Deserialize;
use shared::models::{Category, SubCategory};
use shared::validation::is_blank;

/// Category service for managing the category/sub-category reference data
#[derive(Clone)]
pub struct CategoryService {
    db: PgPool,
}

/// Input for creating a category
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryInput {
    pub name: String,
}

/// Input for adding sub-categories to a category in one request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSubCategoriesInput {
    pub names: Vec<String>,
}

impl CategoryService {
    /// Create a new CategoryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a category; names are unique
    pub async fn create_category(&self, input: CreateCategoryInput) -> AppResult<Category> {
        if is_blank(&input.name) {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Category name cannot be empty".to_string(),
            });
        }

        let category = sqlx::query_as::<_, CategoryRow>(
            r#"
            INSERT INTO categories (name)
            VALUES ($1)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(input.name.trim())
        .fetch_one(&self.db)
        .await
        .map_err(AppError::from_persistence)?;

        Ok(category.into())
    }

    /// Get all categories, alphabetically
    pub async fn get_categories(&self) -> AppResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, created_at, updated_at FROM categories ORDER BY name",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    /// Add a batch of sub-categories under one category
    pub async fn add_sub_categories(
        &self,
        category_id: Uuid,
        input: AddSubCategoriesInput,
    ) -> AppResult<Vec<SubCategory>> {
        if input.names.is_empty() || input.names.iter().all(|n| is_blank(n)) {
            return Err(AppError::Validation {
                field: "names".to_string(),
                message: "At least one sub-category name is required".to_string(),
            });
        }

        // The parent must exist before attaching sub-categories
        let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories WHERE id = $1")
            .bind(category_id)
            .fetch_one(&self.db)
            .await?;

        if exists == 0 {
            return Err(AppError::NotFound("Category".to_string()));
        }

        let mut tx = self.db.begin().await?;
        let mut created = Vec::with_capacity(input.names.len());

        for name in input.names.iter().filter(|n| !is_blank(n)) {
            let row = sqlx::query_as::<_, SubCategoryRow>(
                r#"
                INSERT INTO sub_categories (category_id, name)
                VALUES ($1, $2)
                RETURNING id, category_id, name, created_at, updated_at
                "#,
            )
            .bind(category_id)
            .bind(name.trim())
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::from_persistence)?;

            created.push(row.into());
        }

        tx.commit().await?;

        Ok(created)
    }

    /// Get all sub-categories for a category
    pub async fn get_sub_categories(&self, category_id: Uuid) -> AppResult<Vec<SubCategory>> {
        let rows = sqlx::query_as::<_, SubCategoryRow>(
            r#"
            SELECT id, category_id, name, created_at, updated_at
            FROM sub_categories
            WHERE category_id = $1
            ORDER BY name
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(SubCategory::from).collect())
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    name: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SubCategoryRow {
    id: Uuid,
    category_id: Uuid,
    name: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<SubCategoryRow> for SubCategory {
    fn from(row: SubCategoryRow) -> Self {
        SubCategory {
            id: row.id,
            category_id: row.category_id,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
