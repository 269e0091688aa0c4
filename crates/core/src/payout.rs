//! Booking financials: GST back-out, platform commission and artist payout.
//!
//! Booking prices are GST-inclusive at a fixed 18%. Revenue is split equally
//! between assigned artists, GST is backed out of each share, and the
//! platform fee is taken from the taxable value. Travel charges are paid by
//! the customer directly to the artist and pass through untouched.
//!
//! Arithmetic is fixed-point [`Decimal`] and results keep full precision;
//! rounding to paise is a presentation concern.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::booking::{Booking, BookingStatus};
use crate::error::CoreError;
use crate::types::Amount;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// GST rate baked into every booking price (0.18).
pub const GST_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);

/// Divisor that backs GST out of a tax-inclusive price (1.18).
pub const GST_INCLUSIVE_DIVISOR: Decimal = Decimal::from_parts(118, 0, 0, false, 2);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Per-artist financial breakdown of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayoutBreakdown {
    /// Equal share of the tax-inclusive booking amount.
    pub per_artist_share: Amount,
    /// Share with GST removed.
    pub taxable_value: Amount,
    pub gst_amount: Amount,
    pub platform_fee: Amount,
    /// What the platform pays the artist.
    pub net_payout: Amount,
    /// Collected by the artist from the customer; not taxed or split.
    pub travel_charge: Amount,
}

/// Totals for one artist over their completed bookings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EarningsSummary {
    pub completed_bookings: u32,
    pub gross_share: Amount,
    pub gst_amount: Amount,
    pub platform_fee: Amount,
    pub net_payout: Amount,
    pub travel_charges: Amount,
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

/// Compute one artist's payout for a booking.
///
/// An `assigned_artist_count` of zero is treated as one. The caller is
/// responsible for keeping `platform_fee_fraction` within `[0, 1]` (see
/// [`validate_platform_fee_fraction`]); out-of-range values are used as given.
pub fn compute_payout(
    booking_amount: Amount,
    assigned_artist_count: u32,
    platform_fee_fraction: Decimal,
    travel_charge: Amount,
) -> PayoutBreakdown {
    let per_artist_share = booking_amount / Decimal::from(assigned_artist_count.max(1));
    let taxable_value = per_artist_share / GST_INCLUSIVE_DIVISOR;
    let gst_amount = per_artist_share - taxable_value;
    let platform_fee = taxable_value * platform_fee_fraction;
    let net_payout = taxable_value - platform_fee;

    PayoutBreakdown {
        per_artist_share,
        taxable_value,
        gst_amount,
        platform_fee,
        net_payout,
        travel_charge,
    }
}

/// [`compute_payout`] using the amount, assignment count and travel charge
/// stored on `booking`.
pub fn payout_for_booking(booking: &Booking, platform_fee_fraction: Decimal) -> PayoutBreakdown {
    let assigned = u32::try_from(booking.assigned_artist_ids.len()).unwrap_or(u32::MAX);
    compute_payout(
        booking.total_amount,
        assigned,
        platform_fee_fraction,
        booking.travel_charge.unwrap_or_default(),
    )
}

/// Sum an artist's payouts over every completed booking they are assigned to.
pub fn summarize_artist_earnings(
    artist_id: &str,
    bookings: &[Booking],
    platform_fee_fraction: Decimal,
) -> EarningsSummary {
    bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Completed && b.is_assigned_to(artist_id))
        .map(|b| payout_for_booking(b, platform_fee_fraction))
        .fold(EarningsSummary::default(), |mut acc, p| {
            acc.completed_bookings += 1;
            acc.gross_share += p.per_artist_share;
            acc.gst_amount += p.gst_amount;
            acc.platform_fee += p.platform_fee;
            acc.net_payout += p.net_payout;
            acc.travel_charges += p.travel_charge;
            acc
        })
}

// ---------------------------------------------------------------------------
// Settings helpers
// ---------------------------------------------------------------------------

/// Convert the percentage stored in platform settings (e.g. `10`) to the
/// fraction [`compute_payout`] expects (`0.10`).
pub fn fee_fraction_from_percent(percent: Decimal) -> Decimal {
    percent / Decimal::ONE_HUNDRED
}

/// Reject platform fee fractions outside `[0, 1]`.
pub fn validate_platform_fee_fraction(fraction: Decimal) -> Result<(), CoreError> {
    if !(Decimal::ZERO..=Decimal::ONE).contains(&fraction) {
        return Err(CoreError::Validation(format!(
            "platform fee fraction must be between 0 and 1, got {fraction}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    /// `units` scaled down by `scale` decimal places.
    fn d(units: i64, scale: u32) -> Decimal {
        Decimal::new(units, scale)
    }

    fn rupees(r: i64) -> Decimal {
        Decimal::from(r)
    }

    fn completed(id: &str, amount: Decimal, assigned: &[&str], travel: Option<Decimal>) -> Booking {
        Booking {
            id: id.into(),
            service_dates: vec![],
            status: BookingStatus::Completed,
            assigned_artist_ids: assigned.iter().map(|a| a.to_string()).collect(),
            total_amount: amount,
            travel_charge: travel,
            district: None,
        }
    }

    // -- constants --

    #[test]
    fn divisor_is_one_plus_gst_rate() {
        assert_eq!(GST_RATE, d(18, 2));
        assert_eq!(GST_INCLUSIVE_DIVISOR, Decimal::ONE + GST_RATE);
    }

    // -- compute_payout --

    #[test]
    fn two_artists_ten_percent_fee() {
        let p = compute_payout(rupees(100_000), 2, d(10, 2), Decimal::ZERO);
        assert_eq!(p.per_artist_share, rupees(50_000));
        assert_eq!(p.taxable_value.round_dp(2), d(4_237_288, 2));
        assert_eq!(p.gst_amount.round_dp(2), d(762_712, 2));
        assert_eq!(p.platform_fee.round_dp(2), d(423_729, 2));
        assert_eq!(p.net_payout.round_dp(2), d(3_813_559, 2));
        assert_eq!(p.travel_charge, Decimal::ZERO);
    }

    #[test]
    fn zero_artists_treated_as_one() {
        for amount in [Decimal::ZERO, Decimal::ONE, d(99_999, 2), rupees(118_000)] {
            assert_eq!(
                compute_payout(amount, 0, d(15, 2), rupees(250)),
                compute_payout(amount, 1, d(15, 2), rupees(250))
            );
        }
    }

    #[test]
    fn share_plus_parts_are_exact() {
        let p = compute_payout(rupees(11_800), 1, d(20, 2), Decimal::ZERO);
        assert_eq!(p.taxable_value, rupees(10_000));
        assert_eq!(p.gst_amount, rupees(1_800));
        assert_eq!(p.platform_fee, rupees(2_000));
        assert_eq!(p.net_payout, rupees(8_000));

        let odd = compute_payout(rupees(100_000), 3, d(125, 3), Decimal::ZERO);
        assert_eq!(odd.taxable_value + odd.gst_amount, odd.per_artist_share);
        assert_eq!(
            (odd.platform_fee + odd.net_payout).round_dp(10),
            odd.taxable_value.round_dp(10)
        );
    }

    #[test]
    fn travel_charge_is_passed_through() {
        let p = compute_payout(rupees(10_000), 4, d(10, 2), rupees(1_500));
        assert_eq!(p.travel_charge, rupees(1_500));
        assert_eq!(p.per_artist_share, rupees(2_500));
    }

    #[test]
    fn zero_fee_pays_full_taxable_value() {
        let p = compute_payout(rupees(5_900), 1, Decimal::ZERO, Decimal::ZERO);
        assert_eq!(p.platform_fee, Decimal::ZERO);
        assert_eq!(p.net_payout, p.taxable_value);
    }

    #[test]
    fn out_of_range_fee_is_not_clamped() {
        let p = compute_payout(rupees(11_800), 1, d(15, 1), Decimal::ZERO);
        assert_eq!(p.platform_fee, rupees(15_000));
        assert_eq!(p.net_payout, rupees(-5_000));
    }

    #[test]
    fn compute_is_identical_on_repeat() {
        let a = compute_payout(d(12_345_678, 2), 3, d(125, 3), rupees(42));
        let b = compute_payout(d(12_345_678, 2), 3, d(125, 3), rupees(42));
        assert_eq!(a.net_payout.mantissa(), b.net_payout.mantissa());
        assert_eq!(a.net_payout.scale(), b.net_payout.scale());
        assert_eq!(a, b);
    }

    // -- payout_for_booking --

    #[test]
    fn booking_payout_uses_stored_fields() {
        let b = completed("b1", rupees(100_000), &["a", "b"], Some(rupees(800)));
        let p = payout_for_booking(&b, d(10, 2));
        assert_eq!(p, compute_payout(rupees(100_000), 2, d(10, 2), rupees(800)));
    }

    #[test]
    fn unassigned_booking_counts_as_single_artist() {
        let b = completed("b1", rupees(11_800), &[], None);
        let p = payout_for_booking(&b, Decimal::ZERO);
        assert_eq!(p.per_artist_share, rupees(11_800));
        assert_eq!(p.travel_charge, Decimal::ZERO);
    }

    // -- summarize_artist_earnings --

    #[test]
    fn earnings_cover_only_completed_assigned_bookings() {
        let mut confirmed = completed("b3", rupees(50_000), &["a"], None);
        confirmed.status = BookingStatus::Confirmed;
        let bookings = vec![
            completed("b1", rupees(11_800), &["a"], Some(rupees(200))),
            completed("b2", rupees(23_600), &["a", "b"], None),
            confirmed,
            completed("b4", rupees(99_999), &["b"], None),
        ];

        let s = summarize_artist_earnings("a", &bookings, d(10, 2));

        assert_eq!(s.completed_bookings, 2);
        assert_eq!(s.gross_share, rupees(23_600));
        assert_eq!(s.gst_amount, rupees(3_600));
        assert_eq!(s.platform_fee, rupees(2_000));
        assert_eq!(s.net_payout, rupees(18_000));
        assert_eq!(s.travel_charges, rupees(200));
    }

    #[test]
    fn earnings_totals_do_not_drift() {
        let bookings = vec![
            completed("b1", d(1, 1), &["a"], Some(d(1, 1))),
            completed("b2", d(2, 1), &["a"], Some(d(2, 1))),
        ];
        let s = summarize_artist_earnings("a", &bookings, Decimal::ZERO);
        assert_eq!(s.gross_share, d(3, 1));
        assert_eq!(s.travel_charges, d(3, 1));
    }

    #[test]
    fn earnings_empty_for_unknown_artist() {
        let bookings = vec![completed("b1", rupees(11_800), &["a"], None)];
        assert_eq!(
            summarize_artist_earnings("nobody", &bookings, d(10, 2)),
            EarningsSummary::default()
        );
    }

    // -- settings helpers --

    #[test]
    fn percent_to_fraction() {
        assert_eq!(fee_fraction_from_percent(rupees(10)), d(10, 2));
        assert_eq!(fee_fraction_from_percent(d(125, 1)), d(125, 3));
        assert_eq!(fee_fraction_from_percent(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn fee_fraction_bounds_accepted() {
        assert!(validate_platform_fee_fraction(Decimal::ZERO).is_ok());
        assert!(validate_platform_fee_fraction(d(1, 1)).is_ok());
        assert!(validate_platform_fee_fraction(Decimal::ONE).is_ok());
    }

    #[test]
    fn fee_fraction_out_of_range_rejected() {
        assert_matches!(
            validate_platform_fee_fraction(d(-1, 2)),
            Err(CoreError::Validation(_))
        );
        assert!(validate_platform_fee_fraction(d(101, 2)).is_err());
    }
}
