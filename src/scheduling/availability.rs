//! Bookable-slot computation.
//!
//! Given a read-only snapshot and a query, the engine answers one question:
//! at which half-hour marks could this service start with this staff member
//! on this date? Every returned start is conflict-free against the snapshot;
//! the engine promises nothing about the snapshot staying fresh, so callers
//! recompute after every booking.

use chrono::{NaiveTime, Timelike};

use crate::absence;
use crate::config::Config;
use crate::scheduling::types::{ScheduleSnapshot, SlotQuery};
use crate::timegrid::{minute_of_day, TimeWindow};

// ============================================================================
// Availability Engine
// ============================================================================

/// Computes bookable half-hour start times.
pub struct AvailabilityEngine {
    default_window: TimeWindow,
    lead_time_minutes: u32,
    fallback_service_minutes: u32,
}

impl AvailabilityEngine {
    pub fn new(config: &Config) -> Self {
        Self {
            default_window: config.scheduling.opening_window(),
            lead_time_minutes: config.scheduling.lead_time_minutes,
            fallback_service_minutes: config.scheduling.fallback_service_minutes,
        }
    }

    /// All surviving slot start times for the query, ascending.
    ///
    /// Unresolvable staff or service ids yield an empty vector rather than
    /// an error; a slot picker stays usable on partial data and renders the
    /// same "no availability" state it shows for a fully booked day.
    pub fn compute_slots(&self, snap: &ScheduleSnapshot, query: &SlotQuery) -> Vec<NaiveTime> {
        let Some(staff) = snap.staff_by_id(&query.staff_id) else {
            return Vec::new();
        };
        let Some(service) = snap.service_by_id(&query.service_id) else {
            return Vec::new();
        };
        if staff.closed_on(query.date) {
            return Vec::new();
        }
        if absence::blocks_date(staff, query.date) {
            return Vec::new();
        }

        let window = staff.working_window(self.default_window);
        let window_start = window.start_minute();
        let window_end = window.end_minute();
        let duration = service.duration_minutes;

        // Blocked intervals from existing bookings, minus the appointment
        // being edited. Each interval's length comes from its own service,
        // with the configured fallback when that service no longer resolves.
        let busy: Vec<(u32, u32)> = snap
            .appointments_for(&query.staff_id, query.date)
            .into_iter()
            .filter(|a| Some(a.id.as_str()) != query.exclude_appointment.as_deref())
            .map(|a| {
                let start = minute_of_day(a.start);
                let length = snap.service_duration(&a.service_id, self.fallback_service_minutes);
                (start, start + length)
            })
            .collect();

        let same_day = query.date == query.now.date();
        let cutoff = minute_of_day(query.now.time()) + self.lead_time_minutes;

        let mut slots = Vec::new();
        for hour in window.start.hour()..=window.end.hour() {
            for minute in [0u32, 30] {
                let slot_start = hour * 60 + minute;
                let slot_end = slot_start + duration;

                if slot_start < window_start {
                    continue;
                }
                // Same-day bookings need lead time; a slot must start
                // strictly after now + lead to survive.
                if same_day && slot_start <= cutoff {
                    continue;
                }
                if let Some(brk) = &staff.break_window {
                    if brk.overlaps_minutes(slot_start, slot_end) {
                        continue;
                    }
                }
                if slot_end > window_end {
                    continue;
                }
                if busy
                    .iter()
                    .any(|&(start, end)| slot_start < end && slot_end > start)
                {
                    continue;
                }
                if let Some(time) = NaiveTime::from_hms_opt(hour, minute, 0) {
                    slots.push(time);
                }
            }
        }
        slots
    }
}
