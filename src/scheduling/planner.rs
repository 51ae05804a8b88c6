//! Planning-grid cell classification.
//!
//! The day planner renders one cell per staff member per hour. Each cell
//! gets exactly one status, resolved in a fixed priority order: a booked
//! appointment always shows, then weekly closure, then vacation, then the
//! break, then non-working hours, and only then is the cell free. Callers
//! rely on that order being stable, so it must not be rearranged.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::absence;
use crate::config::Config;
use crate::scheduling::types::ScheduleSnapshot;
use crate::timegrid::{hhmm, minute_of_day, TimeWindow};

// ============================================================================
// Cell Types
// ============================================================================

/// Details carried by an appointment cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentCell {
    pub appointment_id: String,
    pub client_name: String,
    pub service_id: String,
    /// Exact start of the appointment, not of the cell.
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    /// Resolved duration in minutes, fallback applied.
    pub duration_minutes: u32,
    /// True when the appointment starts exactly on this cell's hour.
    /// Callers render details here and merge the continuation cells into
    /// one visual block.
    pub starts_here: bool,
}

/// Exclusive classification of one planning-grid cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellStatus {
    Appointment(AppointmentCell),
    Closure,
    Vacation,
    Break,
    NonWorking,
    Free,
}

/// One row cell of the planning grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourCell {
    pub hour: u32,
    pub status: CellStatus,
}

// ============================================================================
// Occupancy Resolver
// ============================================================================

/// Classifies planning-grid cells for one staff member at a time.
pub struct OccupancyResolver {
    default_window: TimeWindow,
    fallback_service_minutes: u32,
    grid_start_hour: u32,
    grid_end_hour: u32,
}

impl OccupancyResolver {
    pub fn new(config: &Config) -> Self {
        Self {
            default_window: config.scheduling.opening_window(),
            fallback_service_minutes: config.scheduling.fallback_service_minutes,
            grid_start_hour: config.scheduling.grid_start_hour,
            grid_end_hour: config.scheduling.grid_end_hour,
        }
    }

    /// Classify the cell at `hour` o'clock on `date`.
    ///
    /// Returns `None` only when the staff id does not resolve in the
    /// snapshot; every resolvable cell has exactly one status.
    pub fn classify(
        &self,
        snap: &ScheduleSnapshot,
        staff_id: &str,
        date: NaiveDate,
        hour: u32,
    ) -> Option<CellStatus> {
        let staff = snap.staff_by_id(staff_id)?;
        let minute = hour * 60;

        for appt in snap.appointments_for(staff_id, date) {
            let start = minute_of_day(appt.start);
            let length = snap.service_duration(&appt.service_id, self.fallback_service_minutes);
            if start <= minute && minute < start + length {
                return Some(CellStatus::Appointment(AppointmentCell {
                    appointment_id: appt.id.clone(),
                    client_name: appt.client_name.clone(),
                    service_id: appt.service_id.clone(),
                    start: appt.start,
                    duration_minutes: length,
                    starts_here: start == minute,
                }));
            }
        }

        if staff.closed_on(date) {
            return Some(CellStatus::Closure);
        }
        if absence::blocks_date(staff, date) {
            return Some(CellStatus::Vacation);
        }
        if let Some(brk) = &staff.break_window {
            if brk.contains_minute(minute) {
                return Some(CellStatus::Break);
            }
        }
        let window = staff.working_window(self.default_window);
        if !window.contains_minute(minute) {
            return Some(CellStatus::NonWorking);
        }
        Some(CellStatus::Free)
    }

    /// One planning-grid row: every configured hour of the day, classified.
    /// `None` when the staff id does not resolve.
    pub fn day_grid(
        &self,
        snap: &ScheduleSnapshot,
        staff_id: &str,
        date: NaiveDate,
    ) -> Option<Vec<HourCell>> {
        snap.staff_by_id(staff_id)?;
        let cells = (self.grid_start_hour..self.grid_end_hour)
            .filter_map(|hour| {
                self.classify(snap, staff_id, date, hour)
                    .map(|status| HourCell { hour, status })
            })
            .collect();
        Some(cells)
    }
}
