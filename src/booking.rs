//! The write side of the appointment list.
//!
//! Slot computation is read-only and assumes someone enforces the
//! at-most-one-booking-per-slot rule when an appointment is actually
//! written. `AppointmentBook` is that collaborator for in-memory use:
//! `schedule` and `reschedule` re-check conflicts against the bookings
//! currently on file and reject the write instead of storing an overlap.
//! Two callers who both saw a slot free race here; the loser gets a
//! [`BookingError::SlotConflict`] and re-picks from fresh slots.

use chrono::{NaiveDate, NaiveTime, Utc};

use crate::catalog::ServiceCatalog;
use crate::config::Config;
use crate::error::{BookingError, Result};
use crate::scheduling::{Appointment, AppointmentStatus};
use crate::timegrid::minute_of_day;

// ============================================================================
// Appointment Book
// ============================================================================

/// In-memory appointment list with write-time conflict checks.
pub struct AppointmentBook {
    fallback_service_minutes: u32,
    appointments: Vec<Appointment>,
}

impl AppointmentBook {
    pub fn new(config: &Config) -> Self {
        Self {
            fallback_service_minutes: config.scheduling.fallback_service_minutes,
            appointments: Vec::new(),
        }
    }

    /// Rebuild a book from persisted appointments. The overlap invariant is
    /// assumed to already hold for stored data and is not re-checked.
    pub fn from_appointments(config: &Config, appointments: Vec<Appointment>) -> Self {
        Self {
            fallback_service_minutes: config.scheduling.fallback_service_minutes,
            appointments,
        }
    }

    /// Write a new appointment, rejecting it when its block overlaps a
    /// non-cancelled appointment of the same staff member.
    pub fn schedule(
        &mut self,
        catalog: &ServiceCatalog,
        appointment: Appointment,
    ) -> Result<String> {
        if appointment.is_active() {
            let duration = self.resolve_duration(catalog, &appointment.service_id);
            let start = minute_of_day(appointment.start);
            if self
                .conflicting(
                    catalog,
                    &appointment.staff_id,
                    appointment.date,
                    start,
                    start + duration,
                    None,
                )
                .is_some()
            {
                return Err(BookingError::SlotConflict {
                    staff_id: appointment.staff_id.clone(),
                    date: appointment.date,
                    start: appointment.start,
                }
                .into());
            }
        }
        tracing::debug!(
            appointment_id = %appointment.id,
            staff_id = %appointment.staff_id,
            date = %appointment.date,
            start = %appointment.start,
            "Scheduling appointment"
        );
        let id = appointment.id.clone();
        self.appointments.push(appointment);
        Ok(id)
    }

    /// Move an appointment to a new date and start, with the same conflict
    /// check minus the appointment itself.
    pub fn reschedule(
        &mut self,
        catalog: &ServiceCatalog,
        id: &str,
        date: NaiveDate,
        start: NaiveTime,
    ) -> Result<()> {
        let pos = self.position(id)?;
        let staff_id = self.appointments[pos].staff_id.clone();
        let service_id = self.appointments[pos].service_id.clone();
        let duration = self.resolve_duration(catalog, &service_id);
        let start_min = minute_of_day(start);
        if self
            .conflicting(
                catalog,
                &staff_id,
                date,
                start_min,
                start_min + duration,
                Some(id),
            )
            .is_some()
        {
            return Err(BookingError::SlotConflict {
                staff_id,
                date,
                start,
            }
            .into());
        }
        let appointment = &mut self.appointments[pos];
        tracing::debug!(
            appointment_id = %id,
            date = %date,
            start = %start,
            "Rescheduling appointment"
        );
        appointment.date = date;
        appointment.start = start;
        appointment.updated_at = Utc::now();
        Ok(())
    }

    /// Cancel an appointment. Its slot stops being blocked immediately.
    pub fn cancel(&mut self, id: &str) -> Result<()> {
        let pos = self.position(id)?;
        let appointment = &mut self.appointments[pos];
        tracing::debug!(appointment_id = %id, "Cancelling appointment");
        appointment.status = AppointmentStatus::Cancelled;
        appointment.updated_at = Utc::now();
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    /// A staff member's non-cancelled appointments on one date, in booking
    /// order.
    pub fn for_staff_on(&self, staff_id: &str, date: NaiveDate) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.staff_id == staff_id && a.date == date && a.is_active())
            .collect()
    }

    /// Every appointment on file, cancelled ones included. Feeds snapshots.
    pub fn all(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    fn resolve_duration(&self, catalog: &ServiceCatalog, service_id: &str) -> u32 {
        catalog
            .duration_of(service_id)
            .unwrap_or(self.fallback_service_minutes)
    }

    fn conflicting(
        &self,
        catalog: &ServiceCatalog,
        staff_id: &str,
        date: NaiveDate,
        start_min: u32,
        end_min: u32,
        exclude: Option<&str>,
    ) -> Option<&Appointment> {
        self.appointments.iter().find(|a| {
            a.staff_id == staff_id
                && a.date == date
                && a.is_active()
                && Some(a.id.as_str()) != exclude
                && {
                    let existing_start = minute_of_day(a.start);
                    let existing_end =
                        existing_start + self.resolve_duration(catalog, &a.service_id);
                    start_min < existing_end && end_min > existing_start
                }
        })
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.appointments
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| BookingError::UnknownAppointment(id.to_string()).into())
    }
}
