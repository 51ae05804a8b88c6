//! Staff member types.

use std::collections::HashSet;

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::absence::AbsenceEntry;
use crate::timegrid::{weekday_nums, TimeWindow};

/// Position a staff member holds in the salon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    #[default]
    Stylist,
    Colorist,
    Apprentice,
    Receptionist,
    Manager,
}

/// A staff member and everything scheduling needs to know about them.
///
/// The `id` is the reference key everywhere in the crate; `name` is a display
/// attribute whose uniqueness [`StaffDirectory`](crate::roster::StaffDirectory)
/// enforces, so renames never invalidate bookings or ledger entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffMember {
    /// Stable unique identifier.
    pub id: String,
    /// Display name, unique within the directory (case-insensitive).
    pub name: String,
    /// Position in the salon.
    #[serde(default)]
    pub role: StaffRole,
    /// Personal working hours. `None` falls back to the salon's configured
    /// opening hours.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<TimeWindow>,
    /// Daily break during which no appointments are offered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_window: Option<TimeWindow>,
    /// Weekdays this staff member never works, serialized as integers with
    /// Sunday as 0.
    #[serde(with = "weekday_nums", default)]
    pub closed_weekdays: HashSet<Weekday>,
    /// Recorded absences and overtime credits. Unavailable dates are always
    /// derived from these, never stored separately.
    #[serde(default)]
    pub absences: Vec<AbsenceEntry>,
    /// Yearly vacation allowance in days.
    #[serde(default = "default_vacation_allowance")]
    pub vacation_allowance_days: f64,
    /// Signed running overtime balance in hours, maintained by the ledger.
    #[serde(default)]
    pub overtime_hours: f64,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

fn default_vacation_allowance() -> f64 {
    25.0
}

impl StaffMember {
    /// Create a new staff member with a generated id and default allowance.
    pub fn new(name: impl Into<String>, role: StaffRole) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            role,
            hours: None,
            break_window: None,
            closed_weekdays: HashSet::new(),
            absences: Vec::new(),
            vacation_allowance_days: default_vacation_allowance(),
            overtime_hours: 0.0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set a specific id (imports and tests).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set personal working hours.
    pub fn with_hours(mut self, hours: TimeWindow) -> Self {
        self.hours = Some(hours);
        self
    }

    /// Set the daily break window.
    pub fn with_break(mut self, window: TimeWindow) -> Self {
        self.break_window = Some(window);
        self
    }

    /// Add a weekly closed day.
    pub fn with_closed_weekday(mut self, day: Weekday) -> Self {
        self.closed_weekdays.insert(day);
        self
    }

    /// Add several weekly closed days.
    pub fn with_closed_weekdays(mut self, days: impl IntoIterator<Item = Weekday>) -> Self {
        self.closed_weekdays.extend(days);
        self
    }

    /// Set the yearly vacation allowance.
    pub fn with_vacation_allowance(mut self, days: f64) -> Self {
        self.vacation_allowance_days = days;
        self
    }

    /// The working window on a given day, falling back to the salon default.
    pub fn working_window(&self, default: TimeWindow) -> TimeWindow {
        self.hours.unwrap_or(default)
    }

    /// Whether the date falls on one of this member's weekly closed days.
    pub fn closed_on(&self, date: NaiveDate) -> bool {
        self.closed_weekdays.contains(&date.weekday())
    }
}
