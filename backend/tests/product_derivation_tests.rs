//! Product derivation tests
//!
//! Covers the creation pipeline's pure logic:
//! - identifier formatting (challanNo / lotNo / hsnCode from the serial)
//! - the cascading amount derivation (net -> total -> GST -> final)
//! - presence short-circuiting and the zero-value behavior

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::models::{pad4, DerivedAmounts, ProductIdentifiers};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Padding correctness for the documented cases
    #[test]
    fn test_padding_correctness() {
        assert_eq!(pad4(7), "0007");
        assert_eq!(pad4(42), "0042");
        assert_eq!(pad4(12345), "2345");
    }

    /// End-to-end identifier shapes for the first serial
    #[test]
    fn test_first_serial_identifiers() {
        let ids = ProductIdentifiers::from_serial(1, None);

        assert_eq!(ids.challan_no, "CH0001");
        assert_eq!(ids.lot_no, "LOT0001");
        assert_eq!(ids.hsn_code, "HSN-0001");
    }

    /// A caller-supplied HSN code survives derivation unchanged
    #[test]
    fn test_hsn_override() {
        let ids = ProductIdentifiers::from_serial(9001, Some("5407"));

        assert_eq!(ids.hsn_code, "5407");
        assert_eq!(ids.challan_no, "CH9001");
        assert_eq!(ids.lot_no, "LOT9001");
    }

    /// The documented arithmetic chain
    #[test]
    fn test_arithmetic_chain() {
        let amounts = DerivedAmounts::compute(
            Some(dec("100")),
            dec("5"),
            Some(dec("50")),
            Some(dec("18")),
        );

        assert_eq!(amounts.net_qty, Some(dec("95")));
        assert_eq!(amounts.total_amount, Some(dec("4750")));
        assert_eq!(amounts.gst_amount, Some(dec("855")));
        assert_eq!(amounts.final_amount, Some(dec("5605")));
    }

    /// An absent gross quantity leaves the whole chain unset
    #[test]
    fn test_missing_field_short_circuit() {
        let amounts = DerivedAmounts::compute(None, dec("0"), Some(dec("50")), Some(dec("18")));

        assert_eq!(amounts.net_qty, None);
        assert_eq!(amounts.total_amount, None);
        assert_eq!(amounts.gst_amount, None);
        assert_eq!(amounts.final_amount, None);
    }

    /// A present zero is a value, not an absence
    #[test]
    fn test_zero_net_qty_still_computes() {
        let amounts = DerivedAmounts::compute(
            Some(dec("10")),
            dec("10"),
            Some(dec("50")),
            Some(dec("18")),
        );

        assert_eq!(amounts.net_qty, Some(Decimal::ZERO));
        assert_eq!(amounts.total_amount, Some(Decimal::ZERO));
        assert_eq!(amounts.final_amount, Some(Decimal::ZERO));
    }

    /// Identifier derivation is a pure function of the serial
    #[test]
    fn test_deterministic_derivation() {
        for serial in [1i64, 99, 5000, 9999, 10001] {
            let a = ProductIdentifiers::from_serial(serial, None);
            let b = ProductIdentifiers::from_serial(serial, None);
            assert_eq!(a, b);
        }
    }

    /// Two different serials never produce the same identifiers below the
    /// wraparound point
    #[test]
    fn test_distinct_serials_distinct_identifiers() {
        let a = ProductIdentifiers::from_serial(17, None);
        let b = ProductIdentifiers::from_serial(18, None);

        assert_ne!(a.challan_no, b.challan_no);
        assert_ne!(a.lot_no, b.lot_no);
        assert_ne!(a.hsn_code, b.hsn_code);
    }

    /// Serials past 9999 wrap to the low range (documented collision risk)
    #[test]
    fn test_wraparound_collision_shape() {
        let early = ProductIdentifiers::from_serial(1, None);
        let wrapped = ProductIdentifiers::from_serial(10001, None);

        assert_eq!(early.challan_no, wrapped.challan_no);
        assert_ne!(early.sr_no, wrapped.sr_no);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

/// Strategy for quantities in a realistic range with 2 decimal places
fn qty_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for GST rates (0.00% to 28.00%)
fn gst_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=2800i64).prop_map(|n| Decimal::new(n, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The padded suffix is always exactly 4 digits
    #[test]
    fn prop_pad4_always_four_digits(serial in 1i64..=100_000_000i64) {
        let padded = pad4(serial);
        prop_assert_eq!(padded.len(), 4);
        prop_assert!(padded.chars().all(|c| c.is_ascii_digit()));
    }

    /// Identifier prefixes are stable for any serial
    #[test]
    fn prop_identifier_prefixes(serial in 1i64..=100_000_000i64) {
        let ids = ProductIdentifiers::from_serial(serial, None);
        prop_assert!(ids.challan_no.starts_with("CH"));
        prop_assert!(ids.lot_no.starts_with("LOT"));
        prop_assert!(ids.hsn_code.starts_with("HSN-"));
        prop_assert_eq!(ids.challan_no.len(), 6);
        prop_assert_eq!(ids.lot_no.len(), 7);
        prop_assert_eq!(ids.hsn_code.len(), 8);
    }

    /// Serials below the wraparound map to pairwise distinct identifiers
    #[test]
    fn prop_identifiers_injective_below_modulus(
        a in 1i64..=9999i64,
        b in 1i64..=9999i64
    ) {
        prop_assume!(a != b);
        let ids_a = ProductIdentifiers::from_serial(a, None);
        let ids_b = ProductIdentifiers::from_serial(b, None);
        prop_assert_ne!(ids_a.challan_no, ids_b.challan_no);
        prop_assert_ne!(ids_a.lot_no, ids_b.lot_no);
    }

    /// net = gross - tare whenever tare <= gross
    #[test]
    fn prop_net_qty_derivation(gross in qty_strategy(), tare in qty_strategy()) {
        prop_assume!(tare <= gross);
        let amounts = DerivedAmounts::compute(Some(gross), tare, None, None);
        prop_assert_eq!(amounts.net_qty, Some(gross - tare));
        // No price: the rest of the chain stays unset
        prop_assert_eq!(amounts.total_amount, None);
        prop_assert_eq!(amounts.final_amount, None);
    }

    /// final = total * (1 + gst/100) whenever the chain completes
    #[test]
    fn prop_final_amount_consistent(
        gross in qty_strategy(),
        price in qty_strategy(),
        gst in gst_strategy()
    ) {
        let amounts = DerivedAmounts::compute(Some(gross), Decimal::ZERO, Some(price), Some(gst));

        let total = amounts.total_amount.unwrap();
        let gst_amount = amounts.gst_amount.unwrap();
        let final_amount = amounts.final_amount.unwrap();

        prop_assert_eq!(total, gross * price);
        prop_assert_eq!(gst_amount, total * gst / Decimal::from(100));
        prop_assert_eq!(final_amount, total + gst_amount);
    }

    /// The amount derivation is deterministic
    #[test]
    fn prop_amounts_deterministic(
        gross in qty_strategy(),
        tare in qty_strategy(),
        price in qty_strategy(),
        gst in gst_strategy()
    ) {
        let a = DerivedAmounts::compute(Some(gross), tare, Some(price), Some(gst));
        let b = DerivedAmounts::compute(Some(gross), tare, Some(price), Some(gst));
        prop_assert_eq!(a, b);
    }
}
