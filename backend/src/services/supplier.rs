//! Supplier service

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::Supplier;
use shared::validation::{is_blank, validate_email, validate_mobile};

/// Supplier service for vendor/party registration
#[derive(Clone)]
pub struct SupplierService {
    db: PgPool,
}

/// Input for registering a supplier
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSupplierInput {
    pub name: String,
    pub mobile: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub gst_number: Option<String>,
    pub company_name: Option<String>,
}

impl SupplierService {
    /// Create a new SupplierService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Register a supplier
    pub async fn create_supplier(&self, input: CreateSupplierInput) -> AppResult<Supplier> {
        if is_blank(&input.name) {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Supplier name cannot be empty".to_string(),
            });
        }

        validate_mobile(&input.mobile).map_err(|msg| AppError::Validation {
            field: "mobile".to_string(),
            message: msg.to_string(),
        })?;

        if let Some(ref email) = input.email {
            validate_email(email).map_err(|msg| AppError::Validation {
                field: "email".to_string(),
                message: msg.to_string(),
            })?;
        }

        let row = sqlx::query_as::<_, SupplierRow>(
            r#"
            INSERT INTO suppliers (name, mobile, email, address, gst_number, company_name)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, mobile, email, address, gst_number, company_name,
                      created_at, updated_at
            "#,
        )
        .bind(input.name.trim())
        .bind(&input.mobile)
        .bind(&input.email)
        .bind(&input.address)
        .bind(&input.gst_number)
        .bind(&input.company_name)
        .fetch_one(&self.db)
        .await
        .map_err(AppError::from_persistence)?;

        Ok(row.into())
    }

    /// Get all suppliers, alphabetically
    pub async fn get_suppliers(&self) -> AppResult<Vec<Supplier>> {
        let rows = sqlx::query_as::<_, SupplierRow>(
            r#"
            SELECT id, name, mobile, email, address, gst_number, company_name,
                   created_at, updated_at
            FROM suppliers
            ORDER BY name
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Supplier::from).collect())
    }
}

#[derive(sqlx::FromRow)]
struct SupplierRow {
    id: Uuid,
    name: String,
    mobile: String,
    email: Option<String>,
    address: Option<String>,
    gst_number: Option<String>,
    company_name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SupplierRow> for Supplier {
    fn from(row: SupplierRow) -> Self {
        Supplier {
            id: row.id,
            name: row.name,
            mobile: row.mobile,
            email: row.email,
            address: row.address,
            gst_number: row.gst_number,
            company_name: row.company_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
