//! Booking records and their lifecycle status.
//!
//! A booking covers one or more service days. Only bookings whose status
//! [`blocks_schedule`](BookingStatus::blocks_schedule) make their assigned
//! artists unavailable on those days.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Amount, DocId, ServiceDate};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of a booking, serialized with its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingStatus {
    #[serde(rename = "Pending Approval")]
    PendingApproval,
    #[serde(rename = "Needs Assignment")]
    NeedsAssignment,
    Confirmed,
    Completed,
    Cancelled,
    Disputed,
}

impl BookingStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [BookingStatus; 6] = [
        Self::PendingApproval,
        Self::NeedsAssignment,
        Self::Confirmed,
        Self::Completed,
        Self::Cancelled,
        Self::Disputed,
    ];

    /// Human-readable label, identical to the stored value.
    pub fn label(self) -> &'static str {
        match self {
            Self::PendingApproval => "Pending Approval",
            Self::NeedsAssignment => "Needs Assignment",
            Self::Confirmed => "Confirmed",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::Disputed => "Disputed",
        }
    }

    /// Parse a stored label, ignoring case and surrounding whitespace.
    pub fn from_label(label: &str) -> Result<Self, CoreError> {
        let wanted = label.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                CoreError::Validation(format!("Unknown booking status '{label}'"))
            })
    }

    /// Whether assigned artists are committed for the booking's dates.
    pub fn blocks_schedule(self) -> bool {
        matches!(self, Self::Confirmed | Self::Completed)
    }

    /// Whether the booking has reached an end state.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Booking
// ---------------------------------------------------------------------------

/// A customer booking, already normalised from its stored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: DocId,
    /// Requested service days.
    #[serde(default)]
    pub service_dates: Vec<ServiceDate>,
    pub status: BookingStatus,
    #[serde(default)]
    pub assigned_artist_ids: Vec<DocId>,
    /// Total price charged to the customer, GST included.
    pub total_amount: Amount,
    /// Travel charge the customer pays the artist directly.
    #[serde(default)]
    pub travel_charge: Option<Amount>,
    /// District where the service takes place.
    #[serde(default)]
    pub district: Option<String>,
}

impl Booking {
    pub fn is_assigned_to(&self, artist_id: &str) -> bool {
        self.assigned_artist_ids.iter().any(|id| id == artist_id)
    }
}

/// Look up a booking by id.
pub fn find_booking<'a>(bookings: &'a [Booking], id: &str) -> Result<&'a Booking, CoreError> {
    bookings
        .iter()
        .find(|b| b.id == id)
        .ok_or_else(|| CoreError::NotFound {
            entity: "booking",
            id: id.to_string(),
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
