//! The leave-request state machine.
//!
//! Requests move `pending -> approved | rejected` by admin action, both
//! terminal. Staff can cancel their own request only while it is pending,
//! which removes it outright. Undoing an approved absence is never a
//! mutation of the original entry; it is a fresh pending revocation request
//! that goes through the same decision gate.
//!
//! Approval deliberately does not touch any ledger itself. It hands back an
//! [`ApprovedEffect`] describing what should happen, and the caller applies
//! it (and persists) explicitly, so the workflow never needs mutable access
//! to the roster.

use chrono::{NaiveDate, Utc};

use crate::absence::{AbsenceDraft, AbsenceEntry};
use crate::config::Config;
use crate::error::{Result, WorkflowError};
use crate::requests::types::{LeaveRequest, RequestKind, RequestStatus};
use crate::timegrid;

// ============================================================================
// Approval Outcome
// ============================================================================

/// Follow-on effect of an approval, applied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum ApprovedEffect {
    /// Record this absence on the staff member's ledger.
    CreateAbsence(AbsenceDraft),
    /// Remove the revoked absence from the ledger.
    RemoveAbsence { absence_id: String },
    /// Adjust working hours or closed days; remains a manual roster edit.
    AvailabilityChange,
}

/// What an approval decided and what should happen next.
#[derive(Debug, Clone)]
pub struct ApprovalOutcome {
    /// Snapshot of the request after the decision.
    pub request: LeaveRequest,
    /// The effect the caller applies.
    pub effect: ApprovedEffect,
}

// ============================================================================
// Request Workflow
// ============================================================================

/// Owns the request list and enforces the request lifecycle.
pub struct RequestWorkflow {
    hours_per_day: f64,
    requests: Vec<LeaveRequest>,
}

impl RequestWorkflow {
    pub fn new(config: &Config) -> Self {
        Self {
            hours_per_day: config.contract.hours_per_day,
            requests: Vec::new(),
        }
    }

    /// Rebuild a workflow from persisted requests.
    pub fn from_requests(config: &Config, requests: Vec<LeaveRequest>) -> Self {
        Self {
            hours_per_day: config.contract.hours_per_day,
            requests,
        }
    }

    /// File a new pending request.
    pub fn submit(
        &mut self,
        staff_id: impl Into<String>,
        kind: RequestKind,
        start_date: NaiveDate,
        end_date: NaiveDate,
        note: Option<String>,
    ) -> Result<&LeaveRequest> {
        if start_date > end_date {
            return Err(WorkflowError::ReversedRange {
                start: start_date,
                end: end_date,
            }
            .into());
        }
        let mut request = LeaveRequest::new(staff_id, kind, start_date, end_date);
        request.note = note;
        tracing::debug!(
            request_id = %request.id,
            staff_id = %request.staff_id,
            kind = ?request.kind,
            "Submitting leave request"
        );
        let idx = self.requests.len();
        self.requests.push(request);
        Ok(&self.requests[idx])
    }

    /// Approve a pending request and return the effect to apply.
    pub fn approve(&mut self, id: &str) -> Result<ApprovalOutcome> {
        let pos = self.position(id)?;
        let status = self.requests[pos].status;
        if status.is_terminal() {
            return Err(WorkflowError::AlreadyDecided {
                id: id.to_string(),
                status,
            }
            .into());
        }

        {
            let request = &mut self.requests[pos];
            request.status = RequestStatus::Approved;
            request.decided_at = Some(Utc::now());
        }
        let request = self.requests[pos].clone();
        tracing::debug!(request_id = %id, staff_id = %request.staff_id, "Approving leave request");

        let effect = match &request.kind {
            RequestKind::Absence(kind) => {
                let days =
                    timegrid::day_count_inclusive(request.start_date, request.end_date) as f64;
                let mut draft = AbsenceDraft::new(*kind, request.start_date, request.end_date)
                    .with_hours(days * self.hours_per_day);
                if let Some(note) = &request.note {
                    draft = draft.with_note(note.clone());
                }
                ApprovedEffect::CreateAbsence(draft)
            }
            RequestKind::Revocation { absence_id } => ApprovedEffect::RemoveAbsence {
                absence_id: absence_id.clone(),
            },
            RequestKind::AvailabilityChange => ApprovedEffect::AvailabilityChange,
        };

        Ok(ApprovalOutcome { request, effect })
    }

    /// Reject a pending request.
    pub fn reject(&mut self, id: &str) -> Result<()> {
        let pos = self.position(id)?;
        let status = self.requests[pos].status;
        if status.is_terminal() {
            return Err(WorkflowError::AlreadyDecided {
                id: id.to_string(),
                status,
            }
            .into());
        }
        let request = &mut self.requests[pos];
        request.status = RequestStatus::Rejected;
        request.decided_at = Some(Utc::now());
        tracing::debug!(request_id = %id, staff_id = %request.staff_id, "Rejecting leave request");
        Ok(())
    }

    /// Withdraw a request that has not been decided yet. The request is
    /// removed entirely and returned.
    pub fn cancel(&mut self, id: &str) -> Result<LeaveRequest> {
        let pos = self.position(id)?;
        let status = self.requests[pos].status;
        if status.is_terminal() {
            return Err(WorkflowError::NotCancellable {
                id: id.to_string(),
                status,
            }
            .into());
        }
        let request = self.requests.remove(pos);
        tracing::debug!(request_id = %id, staff_id = %request.staff_id, "Cancelling leave request");
        Ok(request)
    }

    /// File a new pending revocation request for an approved absence. The
    /// original entry stays untouched until the revocation is approved and
    /// its effect applied.
    pub fn revoke_absence(
        &mut self,
        staff_id: impl Into<String>,
        absence: &AbsenceEntry,
        note: Option<String>,
    ) -> &LeaveRequest {
        let mut request = LeaveRequest::new(
            staff_id,
            RequestKind::Revocation {
                absence_id: absence.id.clone(),
            },
            absence.start_date,
            absence.end_date,
        );
        request.note = note;
        tracing::debug!(
            request_id = %request.id,
            absence_id = %absence.id,
            "Filing revocation request"
        );
        let idx = self.requests.len();
        self.requests.push(request);
        &self.requests[idx]
    }

    pub fn get(&self, id: &str) -> Option<&LeaveRequest> {
        self.requests.iter().find(|r| r.id == id)
    }

    /// All requests in submission order.
    pub fn all(&self) -> &[LeaveRequest] {
        &self.requests
    }

    /// Requests still awaiting a decision.
    pub fn pending(&self) -> Vec<&LeaveRequest> {
        self.requests
            .iter()
            .filter(|r| r.status == RequestStatus::Pending)
            .collect()
    }

    /// Every request ever filed for one staff member.
    pub fn for_staff(&self, staff_id: &str) -> Vec<&LeaveRequest> {
        self.requests
            .iter()
            .filter(|r| r.staff_id == staff_id)
            .collect()
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.requests
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| WorkflowError::UnknownRequest(id.to_string()).into())
    }
}
