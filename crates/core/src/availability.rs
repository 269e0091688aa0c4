//! Artist availability resolution for the assignment dialog.
//!
//! Given the booking being (re)assigned, every known booking and the artist
//! roster, works out which artists are already committed or have declared
//! themselves unavailable on one of the requested service days, and ranks
//! the roster for display:
//!
//! 1. available and local to the booking's district,
//! 2. available elsewhere,
//! 3. unavailable.
//!
//! Within a group artists are ordered by name using ordinal (byte-wise,
//! case-sensitive) comparison, then by id. Unavailable artists are never
//! dropped so staff can still force an assignment.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::artist::Artist;
use crate::booking::Booking;
use crate::types::{DocId, ServiceDate};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Display group of a candidate. Variant order is ranking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateGroup {
    AvailableLocal,
    AvailableElsewhere,
    Unavailable,
}

/// Why an artist cannot take a booking on a given day.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnavailableReason {
    /// Already assigned to another confirmed or completed booking that day.
    Booked { date: ServiceDate, booking_id: DocId },
    /// The artist marked the day as unavailable.
    DeclaredUnavailable { date: ServiceDate },
}

impl UnavailableReason {
    pub fn date(&self) -> ServiceDate {
        match self {
            Self::Booked { date, .. } | Self::DeclaredUnavailable { date } => *date,
        }
    }
}

/// One roster entry in the ranked assignment list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate<'a> {
    pub artist: &'a Artist,
    pub available: bool,
    pub is_local: bool,
    /// Empty exactly when `available` is true. Sorted by date.
    pub reasons: Vec<UnavailableReason>,
}

impl Candidate<'_> {
    pub fn group(&self) -> CandidateGroup {
        match (self.available, self.is_local) {
            (false, _) => CandidateGroup::Unavailable,
            (true, true) => CandidateGroup::AvailableLocal,
            (true, false) => CandidateGroup::AvailableElsewhere,
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Rank the full artist roster for assignment to `target`.
///
/// `all_bookings` may include `target` itself; it is skipped by id. An empty
/// roster yields an empty list and a target with no service dates leaves
/// every artist available.
pub fn resolve_candidates<'a>(
    target: &Booking,
    all_bookings: &[Booking],
    all_artists: &'a [Artist],
) -> Vec<Candidate<'a>> {
    let requested: BTreeSet<ServiceDate> = target.service_dates.iter().copied().collect();

    let booked = booked_reasons(target, &requested, all_bookings);

    let mut candidates: Vec<Candidate<'a>> = all_artists
        .iter()
        .map(|artist| {
            let mut reasons = booked.get(artist.id.as_str()).cloned().unwrap_or_default();
            reasons.extend(
                artist
                    .unavailable_dates
                    .iter()
                    .filter(|d| requested.contains(*d))
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .map(|&date| UnavailableReason::DeclaredUnavailable { date }),
            );
            reasons.sort_by(|a, b| a.date().cmp(&b.date()).then_with(|| a.cmp(b)));
            reasons.dedup();

            Candidate {
                artist,
                available: reasons.is_empty(),
                is_local: artist.is_local_to(target.district.as_deref()),
                reasons,
            }
        })
        .collect();

    candidates.sort_by(|a, b| {
        a.group()
            .cmp(&b.group())
            .then_with(|| a.artist.name.cmp(&b.artist.name))
            .then_with(|| a.artist.id.cmp(&b.artist.id))
    });
    candidates
}

/// Collect `Booked` reasons keyed by artist id from every other booking
/// that blocks the schedule on a requested day.
fn booked_reasons<'b>(
    target: &Booking,
    requested: &BTreeSet<ServiceDate>,
    all_bookings: &'b [Booking],
) -> HashMap<&'b str, Vec<UnavailableReason>> {
    let mut out: HashMap<&str, Vec<UnavailableReason>> = HashMap::new();
    if requested.is_empty() {
        return out;
    }

    for other in all_bookings {
        if other.id == target.id
            || !other.status.blocks_schedule()
            || other.assigned_artist_ids.is_empty()
        {
            continue;
        }

        let clashes: BTreeSet<ServiceDate> = other
            .service_dates
            .iter()
            .copied()
            .filter(|d| requested.contains(d))
            .collect();
        if clashes.is_empty() {
            continue;
        }

        for artist_id in &other.assigned_artist_ids {
            let entry = out.entry(artist_id.as_str()).or_default();
            entry.extend(clashes.iter().map(|&date| UnavailableReason::Booked {
                date,
                booking_id: other.id.clone(),
            }));
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
