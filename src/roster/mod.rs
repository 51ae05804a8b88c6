//! Staff roster: who works at the salon and when they are around.
//!
//! Staff members carry their own working hours, break window, weekly closed
//! days, and absence ledger. The directory wraps the roster with stable-id
//! lookups and display-name uniqueness.

mod directory;
pub mod types;

pub use directory::StaffDirectory;
pub use types::{StaffMember, StaffRole};
