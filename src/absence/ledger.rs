//! Absence bookkeeping: ledger mutations, HR statistics, and the
//! unavailable-date projection.

use std::collections::BTreeSet;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::absence::types::{AbsenceDraft, AbsenceEntry, AbsenceKind};
use crate::config::Config;
use crate::error::{LedgerError, Result};
use crate::roster::StaffMember;
use crate::timegrid;

// ============================================================================
// Absence Ledger
// ============================================================================

/// Validates and applies ledger mutations, and derives per-staff statistics.
///
/// The ledger owns no data; it operates on the `absences` vector and
/// `overtime_hours` balance of the staff member handed to it. Overtime
/// entries credit the balance, recovery entries debit it, and removal
/// reverses the effect exactly, so the balance always equals the sum over
/// the entries still present.
pub struct AbsenceLedger {
    hours_per_day: f64,
}

impl AbsenceLedger {
    pub fn new(config: &Config) -> Self {
        Self {
            hours_per_day: config.contract.hours_per_day,
        }
    }

    /// Validate a draft and append it to the staff member's ledger,
    /// returning the new entry's id.
    pub fn add_entry(&self, staff: &mut StaffMember, draft: AbsenceDraft) -> Result<String> {
        if draft.start_date > draft.end_date {
            return Err(LedgerError::ReversedRange {
                start: draft.start_date,
                end: draft.end_date,
            }
            .into());
        }
        if !draft.hours.is_finite() || draft.hours < 0.0 {
            return Err(LedgerError::InvalidHours(draft.hours).into());
        }

        let entry = AbsenceEntry::from_draft(draft);
        tracing::debug!(
            staff_id = %staff.id,
            entry_id = %entry.id,
            kind = ?entry.kind,
            hours = entry.hours,
            "Recording absence entry"
        );
        match entry.kind {
            AbsenceKind::Overtime => staff.overtime_hours += entry.hours,
            AbsenceKind::OvertimeRecovery => staff.overtime_hours -= entry.hours,
            _ => {}
        }
        let id = entry.id.clone();
        staff.absences.push(entry);
        staff.updated_at = Utc::now();
        Ok(id)
    }

    /// Remove an entry by id, reversing its overtime effect exactly.
    pub fn remove_entry(&self, staff: &mut StaffMember, id: &str) -> Result<AbsenceEntry> {
        let pos = staff
            .absences
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| LedgerError::UnknownEntry(id.to_string()))?;
        let entry = staff.absences.remove(pos);
        tracing::debug!(
            staff_id = %staff.id,
            entry_id = %id,
            kind = ?entry.kind,
            "Removing absence entry"
        );
        match entry.kind {
            AbsenceKind::Overtime => staff.overtime_hours -= entry.hours,
            AbsenceKind::OvertimeRecovery => staff.overtime_hours += entry.hours,
            _ => {}
        }
        staff.updated_at = Utc::now();
        Ok(entry)
    }

    /// Derive the HR statistics for one staff member.
    pub fn stats_for(&self, staff: &StaffMember) -> AbsenceStats {
        let mut vacation_hours = 0.0;
        let mut sick_hours = 0.0;
        let mut injury_hours = 0.0;
        let mut training_hours = 0.0;
        let mut recovery_hours = 0.0;

        for entry in &staff.absences {
            match entry.kind {
                AbsenceKind::Vacation => vacation_hours += entry.hours,
                AbsenceKind::Sick => sick_hours += entry.hours,
                AbsenceKind::Injury => injury_hours += entry.hours,
                AbsenceKind::Training => training_hours += entry.hours,
                AbsenceKind::OvertimeRecovery => recovery_hours += entry.hours,
                AbsenceKind::Overtime | AbsenceKind::Unpaid | AbsenceKind::Other => {}
            }
        }

        let vacation_used = self.to_days(vacation_hours);
        AbsenceStats {
            vacation_used,
            vacation_remaining: round1(staff.vacation_allowance_days - vacation_used),
            sick_days: self.to_days(sick_hours),
            injury_days: self.to_days(injury_hours),
            training_days: self.to_days(training_hours),
            recovery_used: self.to_days(recovery_hours),
            overtime_balance: staff.overtime_hours,
            potential_recovery_days: (staff.overtime_hours / self.hours_per_day).floor() as i64,
        }
    }

    /// Hours a full-day absence books per calendar day.
    pub fn hours_per_day(&self) -> f64 {
        self.hours_per_day
    }

    fn to_days(&self, hours: f64) -> f64 {
        round1(hours / self.hours_per_day)
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Per-staff absence statistics, day figures rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbsenceStats {
    /// Vacation days consumed this year.
    pub vacation_used: f64,
    /// Allowance minus used; negative when overdrawn.
    pub vacation_remaining: f64,
    pub sick_days: f64,
    pub injury_days: f64,
    pub training_days: f64,
    /// Overtime recovery days already taken.
    pub recovery_used: f64,
    /// Raw running balance in hours, credits positive.
    pub overtime_balance: f64,
    /// Whole recovery days the current balance could fund.
    pub potential_recovery_days: i64,
}

// ============================================================================
// Unavailable-date projection
// ============================================================================

/// Dates on which the staff member cannot take appointments, derived from
/// full-day, non-credit ledger entries.
///
/// Because the set is recomputed from the entries every time, removing one
/// of two overlapping absences can never accidentally free a day the other
/// still covers.
pub fn unavailable_dates(staff: &StaffMember) -> BTreeSet<NaiveDate> {
    let mut dates = BTreeSet::new();
    for entry in &staff.absences {
        if !entry.blocks_dates() {
            continue;
        }
        for day in timegrid::expand_days(entry.start_date, entry.end_date) {
            dates.insert(day);
        }
    }
    dates
}

/// Membership shortcut for a single date; avoids building the full set.
pub fn blocks_date(staff: &StaffMember, date: NaiveDate) -> bool {
    staff
        .absences
        .iter()
        .any(|e| e.blocks_dates() && e.covers(date))
}
