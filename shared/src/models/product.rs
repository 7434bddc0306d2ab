//! Stock receipt (product) models and the pure derivation logic
//!
//! A product records one inbound fabric batch (challan). On creation the
//! backend allocates a serial number and derives the human-facing
//! identifiers and the financial amounts; both derivations live here as
//! pure functions so they can be tested in isolation.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Width of the numeric suffix in generated identifiers
const IDENTIFIER_DIGITS: u32 = 4;

/// Modulus applied to the serial before formatting (10^IDENTIFIER_DIGITS)
pub const IDENTIFIER_MODULUS: i64 = 10_000;

/// Format a serial number as a 4-digit, zero-padded suffix.
///
/// Serials past 9999 wrap around (12345 -> "2345"); consumers depend on the
/// 4-digit shape, so the format is never widened.
pub fn pad4(serial: i64) -> String {
    format!(
        "{:0width$}",
        serial.rem_euclid(IDENTIFIER_MODULUS),
        width = IDENTIFIER_DIGITS as usize
    )
}

/// System-generated identity fields of a product.
///
/// Assigned exactly once, at creation, and never recomputed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductIdentifiers {
    pub sr_no: i64,
    pub challan_no: String,
    pub lot_no: String,
    pub hsn_code: String,
}

impl ProductIdentifiers {
    /// Derive the identifier set from an allocated serial number.
    ///
    /// A caller-supplied, non-blank HSN code is kept unchanged; otherwise a
    /// placeholder is derived from the serial like the other identifiers.
    pub fn from_serial(sr_no: i64, supplied_hsn: Option<&str>) -> Self {
        let suffix = pad4(sr_no);
        let hsn_code = match supplied_hsn {
            Some(code) if !code.trim().is_empty() => code.to_string(),
            _ => format!("HSN-{suffix}"),
        };

        Self {
            sr_no,
            challan_no: format!("CH{suffix}"),
            lot_no: format!("LOT{suffix}"),
            hsn_code,
        }
    }
}

/// Computed financial fields of a product.
///
/// Each step runs only when its inputs are present; an absent input leaves
/// the rest of the chain unset. A present zero is a value like any other
/// and flows through the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedAmounts {
    pub net_qty: Option<Decimal>,
    pub total_amount: Option<Decimal>,
    pub gst_amount: Option<Decimal>,
    pub final_amount: Option<Decimal>,
}

impl DerivedAmounts {
    /// Run the cascading amount derivation.
    ///
    /// `net_qty = gross_qty - tare_weight` (requires non-negative tare),
    /// `total_amount = net_qty * price`,
    /// `gst_amount = total_amount * gst / 100` (requires non-negative gst),
    /// `final_amount = total_amount + gst_amount`.
    pub fn compute(
        gross_qty: Option<Decimal>,
        tare_weight: Decimal,
        price: Option<Decimal>,
        gst: Option<Decimal>,
    ) -> Self {
        let net_qty = match gross_qty {
            Some(gross) if tare_weight >= Decimal::ZERO => Some(gross - tare_weight),
            _ => None,
        };

        let total_amount = match (net_qty, price) {
            (Some(net), Some(price)) => Some(net * price),
            _ => None,
        };

        let gst_amount = match (total_amount, gst) {
            (Some(total), Some(gst)) if gst >= Decimal::ZERO => {
                Some(total * gst / Decimal::from(100))
            }
            _ => None,
        };

        let final_amount = match (total_amount, gst_amount) {
            (Some(total), Some(gst)) => Some(total + gst),
            _ => None,
        };

        Self {
            net_qty,
            total_amount,
            gst_amount,
            final_amount,
        }
    }
}

/// Job work details embedded in a product when material is sent out for
/// sub-contracted processing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobWorkDetails {
    pub party_name: Option<String>,
    pub job_work_rate: Option<Decimal>,
    pub issue_date: Option<NaiveDate>,
    pub expected_return_date: Option<NaiveDate>,
    pub quantity_sent: Option<Decimal>,
}

/// A stock receipt record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub sr_no: i64,
    pub challan_no: String,
    pub challan_date: NaiveDate,
    pub category_id: Uuid,
    pub sub_category_id: Uuid,
    pub item_name: String,
    pub hsn_code: String,
    pub color: Option<String>,
    pub fabric_type: Option<String>,
    pub pattern: Option<String>,
    pub width: Option<String>,
    pub gsm: Option<Decimal>,
    pub lot_no: String,
    pub unit: String,
    pub gross_qty: Decimal,
    pub tare_weight: Decimal,
    pub net_qty: Option<Decimal>,
    pub price: Decimal,
    pub gst: Decimal,
    pub total_amount: Option<Decimal>,
    pub gst_amount: Option<Decimal>,
    pub final_amount: Option<Decimal>,
    pub supplier_id: Uuid,
    pub is_job_work: bool,
    pub job_work_details: Option<JobWorkDetails>,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
