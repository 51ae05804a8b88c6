//! Leave requests, ledger entries, and their effect on availability.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use chignon::absence::unavailable_dates;
use chignon::{
    AbsenceKind, AbsenceLedger, ApprovedEffect, AvailabilityEngine, Config, RequestKind,
    RequestStatus, RequestWorkflow, ScheduleSnapshot, Service, ServiceCatalog, ServiceCategory,
    SlotQuery, StaffDirectory, StaffMember, StaffRole,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn clock() -> NaiveDateTime {
    date(2026, 6, 1).and_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap())
}

struct Salon {
    config: Config,
    catalog: ServiceCatalog,
    directory: StaffDirectory,
    staff_id: String,
}

impl Salon {
    fn new() -> Self {
        let config = Config::default();
        let mut catalog = ServiceCatalog::new();
        catalog
            .add(Service::new("Trim", ServiceCategory::Cut, 30).with_id("trim"))
            .unwrap();
        let mut directory = StaffDirectory::new();
        let staff_id = directory
            .insert(StaffMember::new("Amélie", StaffRole::Stylist))
            .unwrap();
        Self {
            config,
            catalog,
            directory,
            staff_id,
        }
    }

    fn bookable_on(&self, day: NaiveDate) -> bool {
        let engine = AvailabilityEngine::new(&self.config);
        let snap = ScheduleSnapshot::new(self.directory.members(), self.catalog.services(), &[]);
        let query = SlotQuery::new(&self.staff_id, "trim", day, clock());
        !engine.compute_slots(&snap, &query).is_empty()
    }
}

#[test]
fn test_approved_vacation_blocks_the_requested_week() {
    let mut salon = Salon::new();
    let ledger = AbsenceLedger::new(&salon.config);
    let mut workflow = RequestWorkflow::new(&salon.config);

    // Monday through Friday off, requested and approved.
    let request_id = workflow
        .submit(
            &salon.staff_id,
            RequestKind::Absence(AbsenceKind::Vacation),
            date(2026, 7, 6),
            date(2026, 7, 10),
            Some("Summer break".to_string()),
        )
        .unwrap()
        .id
        .clone();
    assert!(salon.bookable_on(date(2026, 7, 8)));

    let outcome = workflow.approve(&request_id).unwrap();
    let draft = match outcome.effect {
        ApprovedEffect::CreateAbsence(draft) => draft,
        other => panic!("expected a create-absence effect, got {other:?}"),
    };
    assert_eq!(draft.kind, AbsenceKind::Vacation);
    // Five days at the default 8.5-hour contract day.
    assert_eq!(draft.hours, 42.5);

    // The caller applies the effect to the ledger explicitly.
    let staff = salon.directory.get_mut(&salon.staff_id).unwrap();
    ledger.add_entry(staff, draft).unwrap();

    // The slot picker now skips the whole week and nothing around it.
    assert!(!salon.bookable_on(date(2026, 7, 6)));
    assert!(!salon.bookable_on(date(2026, 7, 8)));
    assert!(!salon.bookable_on(date(2026, 7, 10)));
    assert!(salon.bookable_on(date(2026, 7, 3)));
    assert!(salon.bookable_on(date(2026, 7, 13)));

    let staff = salon.directory.get(&salon.staff_id).unwrap();
    assert_eq!(unavailable_dates(staff).len(), 5);
    let stats = ledger.stats_for(staff);
    assert_eq!(stats.vacation_used, 5.0);
    assert_eq!(stats.vacation_remaining, 20.0);
}

#[test]
fn test_revocation_goes_through_a_fresh_request() {
    let mut salon = Salon::new();
    let ledger = AbsenceLedger::new(&salon.config);
    let mut workflow = RequestWorkflow::new(&salon.config);

    // An already-approved vacation sits on the ledger.
    let request_id = workflow
        .submit(
            &salon.staff_id,
            RequestKind::Absence(AbsenceKind::Vacation),
            date(2026, 7, 6),
            date(2026, 7, 10),
            None,
        )
        .unwrap()
        .id
        .clone();
    let outcome = workflow.approve(&request_id).unwrap();
    let draft = match outcome.effect {
        ApprovedEffect::CreateAbsence(draft) => draft,
        other => panic!("expected a create-absence effect, got {other:?}"),
    };
    let staff = salon.directory.get_mut(&salon.staff_id).unwrap();
    let entry_id = ledger.add_entry(staff, draft).unwrap();

    // Plans change. Filing the revocation does not touch the ledger: the
    // week stays blocked while the request is pending.
    let entry = salon
        .directory
        .get(&salon.staff_id)
        .unwrap()
        .absences
        .iter()
        .find(|e| e.id == entry_id)
        .unwrap()
        .clone();
    let revocation_id = workflow
        .revoke_absence(&salon.staff_id, &entry, Some("Plans changed".to_string()))
        .id
        .clone();
    assert_eq!(
        workflow.get(&revocation_id).unwrap().status,
        RequestStatus::Pending
    );
    assert!(!salon.bookable_on(date(2026, 7, 8)));

    // Approval hands back the removal, the caller applies it, and the week
    // opens up again.
    let outcome = workflow.approve(&revocation_id).unwrap();
    assert_eq!(
        outcome.effect,
        ApprovedEffect::RemoveAbsence {
            absence_id: entry_id.clone()
        }
    );
    let staff = salon.directory.get_mut(&salon.staff_id).unwrap();
    ledger.remove_entry(staff, &entry_id).unwrap();

    assert!(salon.bookable_on(date(2026, 7, 8)));
    let staff = salon.directory.get(&salon.staff_id).unwrap();
    assert_eq!(ledger.stats_for(staff).vacation_used, 0.0);
    assert!(staff.absences.is_empty());
}

#[test]
fn test_overtime_credit_and_recovery_round_trip() {
    let mut salon = Salon::new();
    let ledger = AbsenceLedger::new(&salon.config);
    let mut workflow = RequestWorkflow::new(&salon.config);

    // A trade-fair Sunday worked as overtime, approved as a one-day credit.
    let overtime_id = workflow
        .submit(
            &salon.staff_id,
            RequestKind::Absence(AbsenceKind::Overtime),
            date(2026, 9, 6),
            date(2026, 9, 6),
            None,
        )
        .unwrap()
        .id
        .clone();
    let outcome = workflow.approve(&overtime_id).unwrap();
    let draft = match outcome.effect {
        ApprovedEffect::CreateAbsence(draft) => draft,
        other => panic!("expected a create-absence effect, got {other:?}"),
    };
    let staff = salon.directory.get_mut(&salon.staff_id).unwrap();
    ledger.add_entry(staff, draft).unwrap();

    // Credits raise the balance and never block the day they were earned.
    let staff = salon.directory.get(&salon.staff_id).unwrap();
    assert_eq!(staff.overtime_hours, 8.5);
    assert_eq!(ledger.stats_for(staff).potential_recovery_days, 1);
    assert!(salon.bookable_on(date(2026, 9, 6)));

    // Taking the day back: recovery debits the balance and blocks its date.
    let recovery_id = workflow
        .submit(
            &salon.staff_id,
            RequestKind::Absence(AbsenceKind::OvertimeRecovery),
            date(2026, 9, 14),
            date(2026, 9, 14),
            None,
        )
        .unwrap()
        .id
        .clone();
    let outcome = workflow.approve(&recovery_id).unwrap();
    let draft = match outcome.effect {
        ApprovedEffect::CreateAbsence(draft) => draft,
        other => panic!("expected a create-absence effect, got {other:?}"),
    };
    let staff = salon.directory.get_mut(&salon.staff_id).unwrap();
    ledger.add_entry(staff, draft).unwrap();

    let staff = salon.directory.get(&salon.staff_id).unwrap();
    assert_eq!(staff.overtime_hours, 0.0);
    assert_eq!(ledger.stats_for(staff).recovery_used, 1.0);
    assert!(!salon.bookable_on(date(2026, 9, 14)));
}

#[test]
fn test_rejected_and_cancelled_requests_leave_no_trace() {
    let mut salon = Salon::new();
    let mut workflow = RequestWorkflow::new(&salon.config);

    let rejected = workflow
        .submit(
            &salon.staff_id,
            RequestKind::Absence(AbsenceKind::Sick),
            date(2026, 8, 3),
            date(2026, 8, 4),
            None,
        )
        .unwrap()
        .id
        .clone();
    workflow.reject(&rejected).unwrap();
    assert_eq!(
        workflow.get(&rejected).unwrap().status,
        RequestStatus::Rejected
    );
    assert!(workflow.get(&rejected).unwrap().decided_at.is_some());

    let cancelled = workflow
        .submit(
            &salon.staff_id,
            RequestKind::AvailabilityChange,
            date(2026, 8, 10),
            date(2026, 8, 10),
            None,
        )
        .unwrap()
        .id
        .clone();
    workflow.cancel(&cancelled).unwrap();
    assert!(workflow.get(&cancelled).is_none());

    // Neither touched the roster: the ledger is empty and every day books.
    let staff = salon.directory.get(&salon.staff_id).unwrap();
    assert!(staff.absences.is_empty());
    assert!(salon.bookable_on(date(2026, 8, 3)));
    assert_eq!(workflow.pending().len(), 0);
}
