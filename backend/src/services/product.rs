//! Product (stock receipt) service
//!
//! Owns the creation pipeline: validate the submitted fields, allocate a
//! serial number, derive the challan/lot/HSN identifiers and the financial
//! amounts, then persist. Identity fields are assigned here exactly once;
//! updates merge caller-supplied input fields and re-run the amount
//! derivation, never the identifier derivation.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::sequence::{SequenceService, PRODUCT_COUNTER};
use shared::models::{DerivedAmounts, JobWorkDetails, Product, ProductIdentifiers};
use shared::validation::{is_blank, validate_non_negative};

/// Columns returned for every product query, in `ProductRow` order
const PRODUCT_COLUMNS: &str = "id, sr_no, challan_no, challan_date, category_id, sub_category_id, \
     item_name, hsn_code, color, fabric_type, pattern, width, gsm, lot_no, unit, \
     gross_qty, tare_weight, net_qty, price, gst, total_amount, gst_amount, final_amount, \
     supplier_id, is_job_work, job_work_details, remarks, created_at, updated_at";

/// Product service for stock receipt creation and CRUD
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
    sequences: SequenceService,
}

/// Input for creating a product.
///
/// Required fields are optional at the type level so a missing field is
/// reported as a validation error before any serial number is allocated,
/// rather than as a deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductInput {
    pub challan_date: Option<NaiveDate>,
    pub category_id: Option<Uuid>,
    pub sub_category_id: Option<Uuid>,
    pub item_name: Option<String>,
    pub hsn_code: Option<String>,
    pub color: Option<String>,
    pub fabric_type: Option<String>,
    pub pattern: Option<String>,
    pub width: Option<String>,
    pub gsm: Option<Decimal>,
    pub unit: Option<String>,
    pub gross_qty: Option<Decimal>,
    pub tare_weight: Option<Decimal>,
    pub price: Option<Decimal>,
    pub gst: Option<Decimal>,
    pub supplier_id: Option<Uuid>,
    pub is_job_work: Option<bool>,
    pub job_work_details: Option<JobWorkDetails>,
    pub remarks: Option<String>,
}

/// Input for updating a product.
///
/// Identity fields (srNo, challanNo, lotNo, hsnCode) and derived amounts
/// are not accepted; the amounts are recomputed from the merged quantity
/// and price fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductInput {
    pub challan_date: Option<NaiveDate>,
    pub category_id: Option<Uuid>,
    pub sub_category_id: Option<Uuid>,
    pub item_name: Option<String>,
    pub color: Option<String>,
    pub fabric_type: Option<String>,
    pub pattern: Option<String>,
    pub width: Option<String>,
    pub gsm: Option<Decimal>,
    pub unit: Option<String>,
    pub gross_qty: Option<Decimal>,
    pub tare_weight: Option<Decimal>,
    pub price: Option<Decimal>,
    pub gst: Option<Decimal>,
    pub supplier_id: Option<Uuid>,
    pub is_job_work: Option<bool>,
    pub job_work_details: Option<JobWorkDetails>,
    pub remarks: Option<String>,
}

/// Database row for a product
#[derive(Debug, FromRow)]
struct ProductRow {
    id: Uuid,
    sr_no: i64,
    challan_no: String,
    challan_date: NaiveDate,
    category_id: Uuid,
    sub_category_id: Uuid,
    item_name: String,
    hsn_code: String,
    color: Option<String>,
    fabric_type: Option<String>,
    pattern: Option<String>,
    width: Option<String>,
    gsm: Option<Decimal>,
    lot_no: String,
    unit: String,
    gross_qty: Decimal,
    tare_weight: Decimal,
    net_qty: Option<Decimal>,
    price: Decimal,
    gst: Decimal,
    total_amount: Option<Decimal>,
    gst_amount: Option<Decimal>,
    final_amount: Option<Decimal>,
    supplier_id: Uuid,
    is_job_work: bool,
    job_work_details: Option<Json<JobWorkDetails>>,
    remarks: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            sr_no: row.sr_no,
            challan_no: row.challan_no,
            challan_date: row.challan_date,
            category_id: row.category_id,
            sub_category_id: row.sub_category_id,
            item_name: row.item_name,
            hsn_code: row.hsn_code,
            color: row.color,
            fabric_type: row.fabric_type,
            pattern: row.pattern,
            width: row.width,
            gsm: row.gsm,
            lot_no: row.lot_no,
            unit: row.unit,
            gross_qty: row.gross_qty,
            tare_weight: row.tare_weight,
            net_qty: row.net_qty,
            price: row.price,
            gst: row.gst,
            total_amount: row.total_amount,
            gst_amount: row.gst_amount,
            final_amount: row.final_amount,
            supplier_id: row.supplier_id,
            is_job_work: row.is_job_work,
            job_work_details: row.job_work_details.map(|j| j.0),
            remarks: row.remarks,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Required fields extracted from a validated create input
struct ValidatedCreate {
    challan_date: NaiveDate,
    category_id: Uuid,
    sub_category_id: Uuid,
    item_name: String,
    unit: String,
    gross_qty: Decimal,
    tare_weight: Decimal,
    price: Decimal,
    gst: Decimal,
    supplier_id: Uuid,
}

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        let sequences = SequenceService::new(db.clone());
        Self { db, sequences }
    }

    /// Create a stock receipt: validate, allocate a serial, derive the
    /// identifiers and amounts, persist.
    pub async fn create_product(&self, input: CreateProductInput) -> AppResult<Product> {
        let validated = Self::validate_create(&input)?;

        // Allocation happens only after validation; a number allocated
        // here is burned if the insert below fails.
        let sr_no = self.sequences.allocate(PRODUCT_COUNTER).await?;
        if sr_no > 9999 {
            tracing::warn!(
                sr_no,
                "serial exceeds 9999; 4-digit identifiers wrap around and may collide"
            );
        }

        let identifiers = ProductIdentifiers::from_serial(sr_no, input.hsn_code.as_deref());
        let amounts = DerivedAmounts::compute(
            Some(validated.gross_qty),
            validated.tare_weight,
            Some(validated.price),
            Some(validated.gst),
        );

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            INSERT INTO products (
                sr_no, challan_no, challan_date, category_id, sub_category_id,
                item_name, hsn_code, color, fabric_type, pattern, width, gsm,
                lot_no, unit, gross_qty, tare_weight, net_qty, price, gst,
                total_amount, gst_amount, final_amount, supplier_id,
                is_job_work, job_work_details, remarks
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                    $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24,
                    $25, $26)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(identifiers.sr_no)
        .bind(&identifiers.challan_no)
        .bind(validated.challan_date)
        .bind(validated.category_id)
        .bind(validated.sub_category_id)
        .bind(&validated.item_name)
        .bind(&identifiers.hsn_code)
        .bind(&input.color)
        .bind(&input.fabric_type)
        .bind(&input.pattern)
        .bind(&input.width)
        .bind(input.gsm)
        .bind(&identifiers.lot_no)
        .bind(&validated.unit)
        .bind(validated.gross_qty)
        .bind(validated.tare_weight)
        .bind(amounts.net_qty)
        .bind(validated.price)
        .bind(validated.gst)
        .bind(amounts.total_amount)
        .bind(amounts.gst_amount)
        .bind(amounts.final_amount)
        .bind(validated.supplier_id)
        .bind(input.is_job_work.unwrap_or(false))
        .bind(input.job_work_details.as_ref().map(Json))
        .bind(&input.remarks)
        .fetch_one(&self.db)
        .await
        .map_err(AppError::from_persistence)?;

        tracing::info!(sr_no, challan_no = %identifiers.challan_no, "product created");

        Ok(row.into())
    }

    /// Get all products, newest first
    pub async fn get_products(&self) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC"
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Get a product by ID
    pub async fn get_product(&self, product_id: Uuid) -> AppResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        Ok(row.into())
    }

    /// Update a product by replacing caller-supplied fields.
    ///
    /// Derived amounts are recomputed from the merged quantity and price
    /// fields; identity fields stay as assigned at creation.
    pub async fn update_product(
        &self,
        product_id: Uuid,
        input: UpdateProductInput,
    ) -> AppResult<Product> {
        let existing = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        let challan_date = input.challan_date.unwrap_or(existing.challan_date);
        let category_id = input.category_id.unwrap_or(existing.category_id);
        let sub_category_id = input.sub_category_id.unwrap_or(existing.sub_category_id);
        let item_name = input.item_name.unwrap_or(existing.item_name);
        let color = input.color.or(existing.color);
        let fabric_type = input.fabric_type.or(existing.fabric_type);
        let pattern = input.pattern.or(existing.pattern);
        let width = input.width.or(existing.width);
        let gsm = input.gsm.or(existing.gsm);
        let unit = input.unit.unwrap_or(existing.unit);
        let gross_qty = input.gross_qty.unwrap_or(existing.gross_qty);
        let tare_weight = input.tare_weight.unwrap_or(existing.tare_weight);
        let price = input.price.unwrap_or(existing.price);
        let gst = input.gst.unwrap_or(existing.gst);
        let supplier_id = input.supplier_id.unwrap_or(existing.supplier_id);
        let is_job_work = input.is_job_work.unwrap_or(existing.is_job_work);
        let job_work_details = input
            .job_work_details
            .map(Json)
            .or(existing.job_work_details);
        let remarks = input.remarks.or(existing.remarks);

        if is_blank(&item_name) {
            return Err(AppError::Validation {
                field: "itemName".to_string(),
                message: "Item name cannot be empty".to_string(),
            });
        }
        Self::validate_quantities(gross_qty, tare_weight, gst)?;

        let amounts = DerivedAmounts::compute(Some(gross_qty), tare_weight, Some(price), Some(gst));

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            UPDATE products
            SET challan_date = $1, category_id = $2, sub_category_id = $3,
                item_name = $4, color = $5, fabric_type = $6, pattern = $7,
                width = $8, gsm = $9, unit = $10, gross_qty = $11,
                tare_weight = $12, net_qty = $13, price = $14, gst = $15,
                total_amount = $16, gst_amount = $17, final_amount = $18,
                supplier_id = $19, is_job_work = $20, job_work_details = $21,
                remarks = $22
            WHERE id = $23
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(challan_date)
        .bind(category_id)
        .bind(sub_category_id)
        .bind(&item_name)
        .bind(&color)
        .bind(&fabric_type)
        .bind(&pattern)
        .bind(&width)
        .bind(gsm)
        .bind(&unit)
        .bind(gross_qty)
        .bind(tare_weight)
        .bind(amounts.net_qty)
        .bind(price)
        .bind(gst)
        .bind(amounts.total_amount)
        .bind(amounts.gst_amount)
        .bind(amounts.final_amount)
        .bind(supplier_id)
        .bind(is_job_work)
        .bind(&job_work_details)
        .bind(&remarks)
        .bind(product_id)
        .fetch_one(&self.db)
        .await
        .map_err(AppError::from_persistence)?;

        Ok(row.into())
    }

    /// Delete a product by ID
    pub async fn delete_product(&self, product_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product".to_string()));
        }

        Ok(())
    }

    /// Check presence of every required field before any allocation
    fn validate_create(input: &CreateProductInput) -> AppResult<ValidatedCreate> {
        fn required<T: Clone>(value: &Option<T>, field: &str) -> AppResult<T> {
            value.clone().ok_or_else(|| AppError::Validation {
                field: field.to_string(),
                message: format!("{} is required", field),
            })
        }

        let item_name = required(&input.item_name, "itemName")?;
        if is_blank(&item_name) {
            return Err(AppError::Validation {
                field: "itemName".to_string(),
                message: "Item name cannot be empty".to_string(),
            });
        }

        let unit = required(&input.unit, "unit")?;
        if is_blank(&unit) {
            return Err(AppError::Validation {
                field: "unit".to_string(),
                message: "Unit cannot be empty".to_string(),
            });
        }

        let gross_qty = required(&input.gross_qty, "grossQty")?;
        let tare_weight = input.tare_weight.unwrap_or(Decimal::ZERO);
        let price = required(&input.price, "price")?;
        let gst = required(&input.gst, "gst")?;

        Self::validate_quantities(gross_qty, tare_weight, gst)?;

        Ok(ValidatedCreate {
            challan_date: required(&input.challan_date, "challanDate")?,
            category_id: required(&input.category_id, "category")?,
            sub_category_id: required(&input.sub_category_id, "subCategory")?,
            item_name,
            unit,
            gross_qty,
            tare_weight,
            price,
            gst,
            supplier_id: required(&input.supplier_id, "supplier")?,
        })
    }

    fn validate_quantities(gross_qty: Decimal, tare_weight: Decimal, gst: Decimal) -> AppResult<()> {
        validate_non_negative(gross_qty).map_err(|msg| AppError::Validation {
            field: "grossQty".to_string(),
            message: msg.to_string(),
        })?;
        validate_non_negative(tare_weight).map_err(|msg| AppError::Validation {
            field: "tareWeight".to_string(),
            message: msg.to_string(),
        })?;
        validate_non_negative(gst).map_err(|msg| AppError::Validation {
            field: "gst".to_string(),
            message: msg.to_string(),
        })?;
        Ok(())
    }
}
