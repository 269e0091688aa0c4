//! Boundary adapter for database snapshots.
//!
//! The hosted database stores dates in several shapes: plain `YYYY-MM-DD`
//! strings, RFC 3339 timestamps written by browsers, and timestamp objects
//! (`{"seconds": .., "nanoseconds": ..}`, or the `_seconds`/`_nanoseconds`
//! form produced by admin exports). Everything is normalised here into
//! [`ServiceDate`]s so the core only ever sees calendar days.

use std::path::Path;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Deserialize;
use shringar_core::artist::Artist;
use shringar_core::booking::{Booking, BookingStatus};
use shringar_core::types::ServiceDate;

use crate::error::{CliError, CliResult};

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

/// A date field as it appears in an exported document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WireDate {
    Text(String),
    Timestamp {
        #[serde(alias = "_seconds")]
        seconds: i64,
        #[serde(default, alias = "_nanoseconds")]
        nanoseconds: u32,
    },
}

impl std::fmt::Display for WireDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Timestamp {
                seconds,
                nanoseconds,
            } => write!(f, "{{seconds: {seconds}, nanoseconds: {nanoseconds}}}"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBooking {
    id: String,
    #[serde(default, alias = "eventDates", alias = "dates")]
    service_dates: Vec<WireDate>,
    /// Older single-day bookings carry one `date` instead of a list.
    #[serde(default)]
    date: Option<WireDate>,
    status: String,
    #[serde(default, alias = "assignedArtists")]
    assigned_artist_ids: Vec<String>,
    #[serde(default, alias = "amount")]
    total_amount: Decimal,
    #[serde(default, alias = "travelCharges")]
    travel_charge: Option<Decimal>,
    #[serde(default, alias = "location")]
    district: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtist {
    id: String,
    name: String,
    #[serde(default, alias = "location")]
    district: Option<String>,
    #[serde(default)]
    unavailable_dates: Vec<WireDate>,
}

/// Platform settings document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, alias = "platformFee")]
    pub platform_fee_percent: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    bookings: Vec<RawBooking>,
    #[serde(default)]
    artists: Vec<RawArtist>,
    #[serde(default)]
    settings: Settings,
}

// ---------------------------------------------------------------------------
// Normalised snapshot
// ---------------------------------------------------------------------------

/// Bookings, artists and settings ready for the core.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub bookings: Vec<Booking>,
    pub artists: Vec<Artist>,
    pub settings: Settings,
}

impl Snapshot {
    /// Read and normalise a snapshot file.
    pub fn load(path: &Path, offset: FixedOffset) -> CliResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let snapshot = Self::from_json(&text, offset)?;
        tracing::info!(
            path = %path.display(),
            bookings = snapshot.bookings.len(),
            artists = snapshot.artists.len(),
            "Snapshot loaded",
        );
        Ok(snapshot)
    }

    /// Parse and normalise snapshot JSON.
    pub fn from_json(json: &str, offset: FixedOffset) -> CliResult<Self> {
        let raw: RawSnapshot = serde_json::from_str(json)?;

        let bookings = raw
            .bookings
            .into_iter()
            .map(|b| normalize_booking(b, offset))
            .collect::<CliResult<Vec<_>>>()?;
        let artists = raw
            .artists
            .into_iter()
            .map(|a| normalize_artist(a, offset))
            .collect::<CliResult<Vec<_>>>()?;

        Ok(Self {
            bookings,
            artists,
            settings: raw.settings,
        })
    }
}

fn normalize_booking(raw: RawBooking, offset: FixedOffset) -> CliResult<Booking> {
    let record = format!("booking {}", raw.id);

    let mut wire_dates = raw.service_dates;
    if wire_dates.is_empty() {
        wire_dates.extend(raw.date);
    }
    if wire_dates.is_empty() {
        tracing::warn!(booking_id = %raw.id, "Booking has no service dates");
    }

    Ok(Booking {
        service_dates: normalize_dates(&wire_dates, offset, &record)?,
        status: BookingStatus::from_label(&raw.status)?,
        assigned_artist_ids: raw.assigned_artist_ids,
        total_amount: raw.total_amount,
        travel_charge: raw.travel_charge,
        district: clean_district(raw.district),
        id: raw.id,
    })
}

fn normalize_artist(raw: RawArtist, offset: FixedOffset) -> CliResult<Artist> {
    let record = format!("artist {}", raw.id);
    Ok(Artist {
        unavailable_dates: normalize_dates(&raw.unavailable_dates, offset, &record)?,
        district: clean_district(raw.district),
        name: raw.name,
        id: raw.id,
    })
}

fn normalize_dates(
    dates: &[WireDate],
    offset: FixedOffset,
    record: &str,
) -> CliResult<Vec<ServiceDate>> {
    dates
        .iter()
        .map(|d| {
            to_service_date(d, offset).ok_or_else(|| CliError::InvalidDate {
                record: record.to_string(),
                value: d.to_string(),
            })
        })
        .collect()
}

/// Blank districts count as missing.
fn clean_district(district: Option<String>) -> Option<String> {
    district
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

// ---------------------------------------------------------------------------
// Date coercion
// ---------------------------------------------------------------------------

/// Convert a stored date into the calendar day it falls on at `offset`.
///
/// Plain dates and zone-less date-times are taken as already local.
pub fn to_service_date(date: &WireDate, offset: FixedOffset) -> Option<ServiceDate> {
    match date {
        WireDate::Text(text) => {
            let text = text.trim();
            if let Ok(day) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
                return Some(day);
            }
            if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
                return Some(ts.with_timezone(&offset).date_naive());
            }
            NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        }
        WireDate::Timestamp {
            seconds,
            nanoseconds,
        } => DateTime::from_timestamp(*seconds, *nanoseconds)
            .map(|ts| ts.with_timezone(&offset).date_naive()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
