//! Scheduling module: slot availability and planning-grid occupancy.
//!
//! This module provides the read side of the booking system:
//!
//! - **Availability**: which half-hour starts are bookable for a staff
//!   member, service, and date
//! - **Occupancy**: what each planning-grid cell shows for a staff member's
//!   day
//! - **Snapshots**: the read-only world view both computations run against
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Scheduling Layer                        │
//! │  ┌───────────────────────┐  ┌─────────────────────────────┐ │
//! │  │  AvailabilityEngine   │  │     OccupancyResolver       │ │
//! │  │  - half-hour slots    │  │  - per-cell classification  │ │
//! │  │  - lead-time cutoff   │  │  - fixed priority order     │ │
//! │  │  - conflict checks    │  │  - day grid rows            │ │
//! │  └───────────┬───────────┘  └──────────────┬──────────────┘ │
//! │              │                             │                │
//! │              ▼                             ▼                │
//! │  ┌─────────────────────────────────────────────────────────┐│
//! │  │                  ScheduleSnapshot                       ││
//! │  │     (staff + services + appointments, read-only)        ││
//! │  └─────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both engines are pure: they never mutate the snapshot, hold no locks,
//! and recompute from scratch on every call. Staleness is bounded only by
//! how fresh the caller's snapshot is, and bookings race only at the write
//! side ([`AppointmentBook`](crate::booking::AppointmentBook)).
//!
//! # Usage
//!
//! ```ignore
//! use chignon::{AvailabilityEngine, Config, ScheduleSnapshot, SlotQuery};
//!
//! let config = Config::load()?;
//! let engine = AvailabilityEngine::new(&config);
//!
//! let snap = ScheduleSnapshot::new(directory.members(), catalog.services(), book.all());
//! let query = SlotQuery::new(staff_id, service_id, date, config.calendar().now_civil());
//! for slot in engine.compute_slots(&snap, &query) {
//!     println!("{slot}");
//! }
//! ```

mod availability;
mod planner;
pub mod types;

pub use availability::AvailabilityEngine;
pub use planner::{AppointmentCell, CellStatus, HourCell, OccupancyResolver};
pub use types::{Appointment, AppointmentStatus, ScheduleSnapshot, SlotQuery};
