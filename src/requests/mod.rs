//! Leave requests: how staff ask for time off and admins decide.
//!
//! - **Requests**: typed asks (absence, availability change, revocation)
//!   over inclusive date ranges
//! - **Workflow**: pending -> approved/rejected lifecycle, cancel while
//!   pending, revocation as a fresh request
//! - **Effects**: approvals hand back what should happen; the caller
//!   applies it to the ledger or roster and persists
//!
//! Keeping effects out of the workflow means a decided request is a pure
//! record: replaying history never double-applies anything.

pub mod types;
mod workflow;

pub use types::{LeaveRequest, RequestKind, RequestStatus};
pub use workflow::{ApprovalOutcome, ApprovedEffect, RequestWorkflow};
