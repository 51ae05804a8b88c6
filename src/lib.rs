//! Chignon: Salon Scheduling Core
//!
//! A library for salon booking systems: half-hour slot availability,
//! planning-grid occupancy, absence ledgers with overtime balances, and the
//! leave-request workflow, all computed as pure functions over in-memory
//! snapshots.

pub mod absence;
pub mod booking;
pub mod catalog;
pub mod config;
pub mod error;
pub mod requests;
pub mod roster;
pub mod scheduling;
pub mod timegrid;

pub use absence::{AbsenceDraft, AbsenceEntry, AbsenceKind, AbsenceLedger, AbsenceStats};
pub use booking::AppointmentBook;
pub use catalog::{Service, ServiceCatalog, ServiceCategory};
pub use config::Config;
pub use error::{ChignonError, Result};
pub use requests::{
    ApprovalOutcome, ApprovedEffect, LeaveRequest, RequestKind, RequestStatus, RequestWorkflow,
};
pub use roster::{StaffDirectory, StaffMember, StaffRole};
pub use scheduling::{
    Appointment, AppointmentCell, AppointmentStatus, AvailabilityEngine, CellStatus, HourCell,
    OccupancyResolver, ScheduleSnapshot, SlotQuery,
};
pub use timegrid::{SalonCalendar, TimeWindow};
