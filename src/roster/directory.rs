//! Staff directory: the id-keyed roster with unique display names.

use chrono::Utc;

use crate::error::{Result, RosterError};
use crate::roster::types::StaffMember;

// ============================================================================
// Staff Directory
// ============================================================================

/// Owns the roster and enforces display-name uniqueness.
///
/// Every other part of the crate references staff by stable id; names are
/// display attributes. `by_name` exists for call sites still migrating off
/// name-keyed records.
#[derive(Debug, Clone, Default)]
pub struct StaffDirectory {
    members: Vec<StaffMember>,
}

impl StaffDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory from existing members, rejecting duplicate names.
    pub fn from_members(members: Vec<StaffMember>) -> Result<Self> {
        let mut directory = Self::new();
        for member in members {
            directory.insert(member)?;
        }
        Ok(directory)
    }

    /// Add a member and return their id. Fails when another member already
    /// uses the name, compared case-insensitively after trimming.
    pub fn insert(&mut self, member: StaffMember) -> Result<String> {
        if self.name_taken(&member.name, None) {
            return Err(RosterError::DuplicateName(member.name.clone()).into());
        }
        tracing::debug!(staff_id = %member.id, name = %member.name, "Adding staff member");
        let id = member.id.clone();
        self.members.push(member);
        Ok(id)
    }

    /// Rename a member, keeping the id stable so bookings and ledger entries
    /// keep pointing at the same person.
    pub fn rename(&mut self, id: &str, new_name: impl Into<String>) -> Result<()> {
        let new_name = new_name.into();
        if self.name_taken(&new_name, Some(id)) {
            return Err(RosterError::DuplicateName(new_name).into());
        }
        let member = self
            .members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| RosterError::UnknownStaff(id.to_string()))?;
        tracing::debug!(staff_id = %id, name = %new_name, "Renaming staff member");
        member.name = new_name;
        member.updated_at = Utc::now();
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&StaffMember> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut StaffMember> {
        self.members.iter_mut().find(|m| m.id == id)
    }

    /// Case-insensitive display-name lookup.
    pub fn by_name(&self, name: &str) -> Option<&StaffMember> {
        let wanted = normalized(name);
        self.members.iter().find(|m| normalized(&m.name) == wanted)
    }

    /// Remove a member by id, returning the record if present.
    pub fn remove(&mut self, id: &str) -> Option<StaffMember> {
        let pos = self.members.iter().position(|m| m.id == id)?;
        tracing::debug!(staff_id = %id, "Removing staff member");
        Some(self.members.remove(pos))
    }

    /// All members in insertion order. Feeds schedule snapshots.
    pub fn members(&self) -> &[StaffMember] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn name_taken(&self, name: &str, exclude_id: Option<&str>) -> bool {
        let wanted = normalized(name);
        self.members
            .iter()
            .any(|m| Some(m.id.as_str()) != exclude_id && normalized(&m.name) == wanted)
    }
}

fn normalized(name: &str) -> String {
    name.trim().to_lowercase()
}
