//! Text and JSON rendering of core results.

use std::fmt::Write as _;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use shringar_core::availability::{Candidate, CandidateGroup, UnavailableReason};
use shringar_core::payout::{EarningsSummary, PayoutBreakdown};

/// Round to paise for display, half away from zero.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn money(amount: Decimal) -> String {
    format!("{:.2}", round_currency(amount))
}

// ---------------------------------------------------------------------------
// Report payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct CandidatesReport<'a> {
    pub booking_id: &'a str,
    pub candidates: &'a [Candidate<'a>],
}

#[derive(Debug, Serialize)]
pub struct PayoutReport<'a> {
    pub booking_id: &'a str,
    pub assigned_artists: usize,
    pub platform_fee_fraction: Decimal,
    pub breakdown: PayoutBreakdown,
}

#[derive(Debug, Serialize)]
pub struct EarningsReport<'a> {
    pub artist_id: &'a str,
    pub artist_name: &'a str,
    pub platform_fee_fraction: Decimal,
    pub summary: EarningsSummary,
}

// ---------------------------------------------------------------------------
// Text rendering
// ---------------------------------------------------------------------------

fn group_label(group: CandidateGroup) -> &'static str {
    match group {
        CandidateGroup::AvailableLocal => "available (local)",
        CandidateGroup::AvailableElsewhere => "available",
        CandidateGroup::Unavailable => "unavailable",
    }
}

fn reason_text(reason: &UnavailableReason) -> String {
    match reason {
        UnavailableReason::Booked { date, booking_id } => {
            format!("booked {date} ({booking_id})")
        }
        UnavailableReason::DeclaredUnavailable { date } => format!("off {date}"),
    }
}

/// One line per candidate, in ranking order.
pub fn render_candidates(report: &CandidatesReport<'_>) -> String {
    let mut out = format!("Candidates for booking {}\n", report.booking_id);
    if report.candidates.is_empty() {
        out.push_str("  (no artists on the roster)\n");
        return out;
    }
    for (i, c) in report.candidates.iter().enumerate() {
        let district = c.artist.district.as_deref().unwrap_or("-");
        let _ = write!(
            out,
            "{:>3}. {:<24} {:<14} {}",
            i + 1,
            c.artist.name,
            district,
            group_label(c.group()),
        );
        if !c.reasons.is_empty() {
            let reasons: Vec<String> = c.reasons.iter().map(reason_text).collect();
            let _ = write!(out, ": {}", reasons.join(", "));
        }
        out.push('\n');
    }
    out
}

pub fn render_payout(report: &PayoutReport<'_>) -> String {
    let p = &report.breakdown;
    let mut out = format!(
        "Payout for booking {} ({} artist(s), platform fee {:.2}%)\n",
        report.booking_id,
        report.assigned_artists,
        report.platform_fee_fraction * Decimal::ONE_HUNDRED,
    );
    let rows = [
        ("Per-artist share", p.per_artist_share),
        ("Taxable value", p.taxable_value),
        ("GST", p.gst_amount),
        ("Platform fee", p.platform_fee),
        ("Net payout", p.net_payout),
        ("Travel charge", p.travel_charge),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "  {label:<18} {:>14}", money(value));
    }
    out
}

pub fn render_earnings(report: &EarningsReport<'_>) -> String {
    let s = &report.summary;
    let mut out = format!(
        "Earnings for {} ({}) over {} completed booking(s)\n",
        report.artist_name, report.artist_id, s.completed_bookings,
    );
    let rows = [
        ("Gross share", s.gross_share),
        ("GST", s.gst_amount),
        ("Platform fee", s.platform_fee),
        ("Net payout", s.net_payout),
        ("Travel charges", s.travel_charges),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "  {label:<18} {:>14}", money(value));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_currency(Decimal::new(42_372_881_355, 6)), Decimal::new(4_237_288, 2));
        assert_eq!(round_currency(Decimal::new(42_372_885, 3)), Decimal::new(4_237_289, 2));
        assert_eq!(round_currency(Decimal::new(-1_005, 3)), Decimal::new(-101, 2));
        assert_eq!(round_currency(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn money_always_has_two_decimals() {
        assert_eq!(money(Decimal::from(50_000)), "50000.00");
        assert_eq!(money(Decimal::new(7_627_118_644, 6)), "7627.12");
        assert_eq!(money(Decimal::new(3, 1)), "0.30");
    }
}
