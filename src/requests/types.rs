//! Leave-request types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::absence::AbsenceKind;

/// What a request is asking for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// Time off of the given kind.
    Absence(AbsenceKind),
    /// A change to working hours or weekly closed days. Applying the change
    /// stays a manual roster edit after approval.
    AvailabilityChange,
    /// Request to undo an already-approved absence.
    Revocation { absence_id: String },
}

/// Lifecycle state of a request. Approved and rejected are terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        };
        f.write_str(label)
    }
}

/// A staff-submitted request waiting for, or past, an admin decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier for the request.
    pub id: String,
    /// Staff member the request concerns.
    pub staff_id: String,
    /// What is being asked for.
    pub kind: RequestKind,
    /// First day concerned, inclusive.
    pub start_date: NaiveDate,
    /// Last day concerned, inclusive.
    pub end_date: NaiveDate,
    /// Lifecycle state.
    #[serde(default)]
    pub status: RequestStatus,
    /// Free-form annotation from the requester.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// When the request was filed.
    pub submitted_at: DateTime<Utc>,
    /// When an admin decided it, if they have.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<DateTime<Utc>>,
}

impl LeaveRequest {
    /// Create a new pending request with a generated id.
    pub fn new(
        staff_id: impl Into<String>,
        kind: RequestKind,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            staff_id: staff_id.into(),
            kind,
            start_date,
            end_date,
            status: RequestStatus::Pending,
            note: None,
            submitted_at: Utc::now(),
            decided_at: None,
        }
    }

    /// Attach a note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
