//! End-to-end booking flow: slot picker, write-side conflicts, edits.

use std::fs::File;
use std::io::Write;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tempfile::TempDir;

use chignon::{
    Appointment, AppointmentBook, AvailabilityEngine, Config, ScheduleSnapshot, Service,
    ServiceCatalog, ServiceCategory, SlotQuery, StaffDirectory, StaffMember, StaffRole,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// A clock reading from the Monday before the queried day, so the same-day
/// lead-time rule never interferes unless a test wants it to.
fn monday_morning() -> NaiveDateTime {
    date(2026, 3, 2).and_time(time(9, 0))
}

/// Catalog with the two services the tests book.
fn menu() -> ServiceCatalog {
    let mut catalog = ServiceCatalog::new();
    catalog
        .add(Service::new("Cut & Blow Dry", ServiceCategory::Cut, 60).with_id("cut"))
        .unwrap();
    catalog
        .add(Service::new("Trim", ServiceCategory::Cut, 30).with_id("trim"))
        .unwrap();
    catalog
}

#[test]
fn test_booking_removes_slot_and_cancelling_restores_it() {
    let config = Config::default();
    let engine = AvailabilityEngine::new(&config);
    let catalog = menu();
    let mut directory = StaffDirectory::new();
    let amelie = directory
        .insert(StaffMember::new("Amélie", StaffRole::Stylist))
        .unwrap();
    let mut book = AppointmentBook::new(&config);

    let day = date(2026, 3, 3);
    let query = SlotQuery::new(amelie.clone(), "cut", day, monday_morning());

    // The slot picker offers 10:00 on an empty day.
    let snap = ScheduleSnapshot::new(directory.members(), catalog.services(), book.all());
    let open_slots = engine.compute_slots(&snap, &query);
    assert!(open_slots.contains(&time(10, 0)));

    // A client takes it.
    let booked = book
        .schedule(
            &catalog,
            Appointment::new("Mme. Rochat", "cut", &amelie, day, time(10, 0)),
        )
        .unwrap();

    // Recomputing drops 09:30 through 10:30: each would overlap the
    // 10:00-11:00 block with another hour-long service.
    let snap = ScheduleSnapshot::new(directory.members(), catalog.services(), book.all());
    let slots = engine.compute_slots(&snap, &query);
    assert!(!slots.contains(&time(9, 30)));
    assert!(!slots.contains(&time(10, 0)));
    assert!(!slots.contains(&time(10, 30)));
    assert!(slots.contains(&time(9, 0)));
    assert!(slots.contains(&time(11, 0)));
    assert_eq!(slots.len(), open_slots.len() - 3);

    // A second caller who computed from the stale snapshot loses the race
    // at write time.
    let clash = book.schedule(
        &catalog,
        Appointment::new("M. Besson", "cut", &amelie, day, time(10, 30)),
    );
    assert!(clash.is_err());

    // Cancelling puts the whole window back on offer.
    book.cancel(&booked).unwrap();
    let snap = ScheduleSnapshot::new(directory.members(), catalog.services(), book.all());
    let reopened = engine.compute_slots(&snap, &query);
    assert_eq!(reopened, open_slots);
}

#[test]
fn test_edit_flow_offers_the_appointments_own_slot() {
    let config = Config::default();
    let engine = AvailabilityEngine::new(&config);
    let catalog = menu();
    let mut directory = StaffDirectory::new();
    let amelie = directory
        .insert(StaffMember::new("Amélie", StaffRole::Stylist))
        .unwrap();
    let mut book = AppointmentBook::new(&config);

    let day = date(2026, 3, 3);
    let booked = book
        .schedule(
            &catalog,
            Appointment::new("Mme. Rochat", "cut", &amelie, day, time(10, 0)),
        )
        .unwrap();

    // Rebooking the same appointment sees its own slot as available.
    let snap = ScheduleSnapshot::new(directory.members(), catalog.services(), book.all());
    let fresh = SlotQuery::new(amelie.clone(), "cut", day, monday_morning());
    assert!(!engine.compute_slots(&snap, &fresh).contains(&time(10, 0)));

    let editing = fresh.clone().excluding(booked.clone());
    let slots = engine.compute_slots(&snap, &editing);
    assert!(slots.contains(&time(10, 0)));
    assert!(slots.contains(&time(10, 30)));

    // The client picks 15:00 from that list; the write side agrees.
    book.reschedule(&catalog, &booked, day, time(15, 0)).unwrap();
    let snap = ScheduleSnapshot::new(directory.members(), catalog.services(), book.all());
    let after = engine.compute_slots(&snap, &fresh);
    assert!(after.contains(&time(10, 0)));
    assert!(!after.contains(&time(15, 0)));
}

#[test]
fn test_stylists_schedules_are_independent() {
    let config = Config::default();
    let engine = AvailabilityEngine::new(&config);
    let catalog = menu();
    let mut directory = StaffDirectory::new();
    let amelie = directory
        .insert(StaffMember::new("Amélie", StaffRole::Stylist))
        .unwrap();
    let bea = directory
        .insert(StaffMember::new("Béa", StaffRole::Colorist))
        .unwrap();
    let mut book = AppointmentBook::new(&config);

    let day = date(2026, 3, 3);
    book.schedule(
        &catalog,
        Appointment::new("Mme. Rochat", "cut", &amelie, day, time(10, 0)),
    )
    .unwrap();

    // Amélie's 10:00 is gone; Béa still offers it, and booking her at the
    // same time is not a conflict.
    let snap = ScheduleSnapshot::new(directory.members(), catalog.services(), book.all());
    let amelie_slots =
        engine.compute_slots(&snap, &SlotQuery::new(&amelie, "cut", day, monday_morning()));
    let bea_slots =
        engine.compute_slots(&snap, &SlotQuery::new(&bea, "cut", day, monday_morning()));
    assert!(!amelie_slots.contains(&time(10, 0)));
    assert!(bea_slots.contains(&time(10, 0)));

    book.schedule(
        &catalog,
        Appointment::new("M. Besson", "cut", &bea, day, time(10, 0)),
    )
    .unwrap();
}

#[test]
fn test_config_file_drives_the_slot_picker() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("chignon.toml");
    let mut f = File::create(&path).unwrap();
    write!(
        f,
        r#"
[salon]
name = "Atelier Nord"
timezone = "Europe/Paris"

[scheduling]
open = "10:00"
close = "14:00"
lead_time_minutes = 30
"#
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.calendar().timezone(), chrono_tz::Europe::Paris);

    let engine = AvailabilityEngine::new(&config);
    let catalog = menu();
    let mut directory = StaffDirectory::new();
    let amelie = directory
        .insert(StaffMember::new("Amélie", StaffRole::Stylist))
        .unwrap();
    let book = AppointmentBook::new(&config);

    // Staff without personal hours follow the configured 10:00-14:00 window.
    let day = date(2026, 3, 3);
    let snap = ScheduleSnapshot::new(directory.members(), catalog.services(), book.all());
    let slots =
        engine.compute_slots(&snap, &SlotQuery::new(&amelie, "trim", day, monday_morning()));
    assert_eq!(slots.first(), Some(&time(10, 0)));
    assert_eq!(slots.last(), Some(&time(13, 30)));
    assert_eq!(slots.len(), 8);

    // The configured 30-minute lead time applies on the day itself: at
    // noon, 12:30 is inside the cutoff and 13:00 is the next offer.
    let same_day = SlotQuery::new(&amelie, "trim", day, day.and_time(time(12, 0)));
    let afternoon = engine.compute_slots(&snap, &same_day);
    assert_eq!(afternoon, vec![time(13, 0), time(13, 30)]);
}
