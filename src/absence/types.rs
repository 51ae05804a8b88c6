//! Absence entry types for staff ledgers.
//!
//! Every absence is a structured entry with an inclusive date range. The set
//! of unavailable dates is always derived from these entries, never stored,
//! so entries and availability cannot drift apart.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::timegrid;

/// Category of a ledger entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsenceKind {
    #[default]
    Vacation,
    Sick,
    Injury,
    Training,
    Unpaid,
    /// Extra hours worked. Credits the overtime balance instead of
    /// consuming time off.
    Overtime,
    /// Time off taken against the overtime balance.
    OvertimeRecovery,
    Other,
}

impl AbsenceKind {
    /// Credits add to the overtime balance and never make a date
    /// unavailable, whatever the entry's `full_day` flag says.
    pub fn is_credit(self) -> bool {
        matches!(self, AbsenceKind::Overtime)
    }
}

/// One recorded absence or overtime credit on a staff member's ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbsenceEntry {
    /// Unique identifier for the entry.
    pub id: String,
    /// Category of the entry.
    pub kind: AbsenceKind,
    /// First day covered, inclusive.
    pub start_date: NaiveDate,
    /// Last day covered, inclusive.
    pub end_date: NaiveDate,
    /// Whether the entry takes staff off the schedule for whole days.
    pub full_day: bool,
    /// Hours booked against the contract. Always non-negative; the kind
    /// decides whether they credit or debit the overtime balance.
    pub hours: f64,
    /// Free-form annotation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// When the entry was recorded.
    pub created_at: DateTime<Utc>,
}

impl AbsenceEntry {
    /// Materialize a validated draft into a ledger entry.
    pub fn from_draft(draft: AbsenceDraft) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind: draft.kind,
            start_date: draft.start_date,
            end_date: draft.end_date,
            full_day: draft.full_day,
            hours: draft.hours,
            note: draft.note,
            created_at: Utc::now(),
        }
    }

    /// Whether the inclusive date range covers `date`.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Whether this entry removes its dates from the bookable schedule.
    pub fn blocks_dates(&self) -> bool {
        self.full_day && !self.kind.is_credit()
    }

    /// Calendar days the entry spans, inclusive.
    pub fn day_span(&self) -> i64 {
        timegrid::day_count_inclusive(self.start_date, self.end_date)
    }
}

/// Input shape for a new ledger entry, validated by the ledger before it
/// becomes an [`AbsenceEntry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbsenceDraft {
    pub kind: AbsenceKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub full_day: bool,
    pub hours: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl AbsenceDraft {
    /// A full-day draft covering an inclusive date range. Hours start at
    /// zero; set them explicitly when the entry should move a balance.
    pub fn new(kind: AbsenceKind, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            kind,
            start_date,
            end_date,
            full_day: true,
            hours: 0.0,
            note: None,
        }
    }

    /// A full-day draft for a single date.
    pub fn single_day(kind: AbsenceKind, date: NaiveDate) -> Self {
        Self::new(kind, date, date)
    }

    /// Set the hours the entry books against the contract.
    pub fn with_hours(mut self, hours: f64) -> Self {
        self.hours = hours;
        self
    }

    /// Mark the entry as hourly rather than full-day. Hourly entries never
    /// block dates.
    pub fn partial_day(mut self) -> Self {
        self.full_day = false;
        self
    }

    /// Attach a note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
