//! Error types for the chignon scheduling core.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use crate::requests::RequestStatus;

/// Main error type for chignon operations.
#[derive(Error, Debug)]
pub enum ChignonError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Workflow error: {0}")]
    Workflow(#[from] WorkflowError),

    #[error("Booking error: {0}")]
    Booking(#[from] BookingError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Staff directory errors.
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Staff name already taken: {0}")]
    DuplicateName(String),

    #[error("Unknown staff member: {0}")]
    UnknownStaff(String),
}

/// Absence ledger errors.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Absence range is reversed: {start} > {end}")]
    ReversedRange { start: NaiveDate, end: NaiveDate },

    #[error("Absence hours must be a finite, non-negative number, got {0}")]
    InvalidHours(f64),

    #[error("Unknown absence entry: {0}")]
    UnknownEntry(String),
}

/// Leave-request workflow errors.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Unknown request: {0}")]
    UnknownRequest(String),

    #[error("Request range is reversed: {start} > {end}")]
    ReversedRange { start: NaiveDate, end: NaiveDate },

    #[error("Request {id} was already decided ({status})")]
    AlreadyDecided { id: String, status: RequestStatus },

    #[error("Request {id} can no longer be cancelled ({status})")]
    NotCancellable { id: String, status: RequestStatus },
}

/// Appointment book errors.
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Slot already taken for staff {staff_id} on {date} at {start}")]
    SlotConflict {
        staff_id: String,
        date: NaiveDate,
        start: NaiveTime,
    },

    #[error("Unknown appointment: {0}")]
    UnknownAppointment(String),
}

/// Service catalog errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Service duration must be positive: {0}")]
    ZeroDuration(String),
}

/// Result type alias for chignon operations.
pub type Result<T> = std::result::Result<T, ChignonError>;
