//! Configuration for the chignon scheduling core.
//!
//! Settings are loaded from TOML (file or string) and validated up front,
//! so the scheduling code can trust invariants like `open < close` without
//! re-checking them on every query.

mod settings;

pub use settings::{Config, ContractConfig, SalonConfig, SchedulingConfig};
