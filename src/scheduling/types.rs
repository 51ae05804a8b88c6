//! Appointment and snapshot types for slot computation.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Service;
use crate::roster::StaffMember;
use crate::timegrid::hhmm;

// ============================================================================
// Appointment Types
// ============================================================================

/// Lifecycle state of an appointment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    #[default]
    Confirmed,
    Pending,
    Cancelled,
}

/// A booked appointment.
///
/// Start times are civil salon time; anchoring to an instant happens only at
/// the boundary via [`SalonCalendar`](crate::timegrid::SalonCalendar).
/// Duration is never stored: it is derived from the referenced service at
/// evaluation time, so a menu change takes effect everywhere at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    /// Unique identifier for the appointment.
    pub id: String,
    /// Client display name.
    pub client_name: String,
    /// Service being performed, resolved through the catalog.
    pub service_id: String,
    /// Staff member performing it.
    pub staff_id: String,
    /// Calendar day of the appointment.
    pub date: NaiveDate,
    /// Start of the appointment on the salon's wall clock.
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    /// Lifecycle state; cancelled appointments stop blocking their slot.
    #[serde(default)]
    pub status: AppointmentStatus,
    /// Free-form annotation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// When the appointment was created.
    pub created_at: DateTime<Utc>,
    /// When the appointment was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    /// Create a new confirmed appointment with a generated id.
    pub fn new(
        client_name: impl Into<String>,
        service_id: impl Into<String>,
        staff_id: impl Into<String>,
        date: NaiveDate,
        start: NaiveTime,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            client_name: client_name.into(),
            service_id: service_id.into(),
            staff_id: staff_id.into(),
            date,
            start,
            status: AppointmentStatus::Confirmed,
            note: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set a specific id (imports and tests).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the lifecycle state.
    pub fn with_status(mut self, status: AppointmentStatus) -> Self {
        self.status = status;
        self
    }

    /// Attach a note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Whether the appointment still blocks its slot.
    pub fn is_active(&self) -> bool {
        self.status != AppointmentStatus::Cancelled
    }
}

// ============================================================================
// Slot Query
// ============================================================================

/// Parameters of one availability computation.
#[derive(Debug, Clone)]
pub struct SlotQuery {
    /// Staff member the client wants to book.
    pub staff_id: String,
    /// Service the client wants to book.
    pub service_id: String,
    /// Day being booked.
    pub date: NaiveDate,
    /// Appointment to ignore during conflict checks, so an edit flow can
    /// offer the appointment's own slot back.
    pub exclude_appointment: Option<String>,
    /// The caller's civil clock reading in the salon timezone. Explicit so
    /// computations stay deterministic under test.
    pub now: NaiveDateTime,
}

impl SlotQuery {
    pub fn new(
        staff_id: impl Into<String>,
        service_id: impl Into<String>,
        date: NaiveDate,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            staff_id: staff_id.into(),
            service_id: service_id.into(),
            date,
            exclude_appointment: None,
            now,
        }
    }

    /// Ignore one appointment during conflict checks.
    pub fn excluding(mut self, appointment_id: impl Into<String>) -> Self {
        self.exclude_appointment = Some(appointment_id.into());
        self
    }
}

// ============================================================================
// Schedule Snapshot
// ============================================================================

/// Read-only view of the world a computation runs against.
///
/// Callers assemble it from whatever they currently hold (directory,
/// catalog, appointment book). Computations never mutate through it, so two
/// calls over the same snapshot always return the same answer; freshness is
/// entirely the caller's concern.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleSnapshot<'a> {
    pub staff: &'a [StaffMember],
    pub services: &'a [Service],
    pub appointments: &'a [Appointment],
}

impl<'a> ScheduleSnapshot<'a> {
    pub fn new(
        staff: &'a [StaffMember],
        services: &'a [Service],
        appointments: &'a [Appointment],
    ) -> Self {
        Self {
            staff,
            services,
            appointments,
        }
    }

    pub fn staff_by_id(&self, id: &str) -> Option<&'a StaffMember> {
        self.staff.iter().find(|s| s.id == id)
    }

    pub fn service_by_id(&self, id: &str) -> Option<&'a Service> {
        self.services.iter().find(|s| s.id == id)
    }

    /// Duration of a service in minutes, falling back when the id does not
    /// resolve in this snapshot.
    pub fn service_duration(&self, id: &str, fallback_minutes: u32) -> u32 {
        self.service_by_id(id)
            .map(|s| s.duration_minutes)
            .unwrap_or(fallback_minutes)
    }

    /// Non-cancelled appointments of one staff member on one date.
    pub fn appointments_for(&self, staff_id: &str, date: NaiveDate) -> Vec<&'a Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.staff_id == staff_id && a.date == date && a.is_active())
            .collect()
    }
}
