//! Absence ledger: structured time-off entries per staff member.
//!
//! - **Entries**: typed absences (vacation, sick, overtime, ...) over
//!   inclusive date ranges, full-day or hourly
//! - **Ledger**: validated add/remove with exact overtime bookkeeping
//! - **Statistics**: per-kind day counts against the contract
//! - **Projection**: unavailable dates derived on demand, never stored
//!
//! The projection is the one source of truth for "is this person off that
//! day": slot computation and the planning grid both go through it.

mod ledger;
pub mod types;

pub use ledger::{blocks_date, unavailable_dates, AbsenceLedger, AbsenceStats};
pub use types::{AbsenceDraft, AbsenceEntry, AbsenceKind};
