//! Service catalog: the salon's menu of bookable services.
//!
//! Slot computation never stores durations on appointments; it always
//! resolves them through the catalog so a duration change takes effect
//! everywhere at once.

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

// ============================================================================
// Service Types
// ============================================================================

/// Broad grouping used by the booking UI to organize the menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    Cut,
    Color,
    Styling,
    Treatment,
    Nails,
    #[default]
    Other,
}

/// A bookable service and the time it blocks on the schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    /// Unique identifier for the service.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Menu grouping.
    #[serde(default)]
    pub category: ServiceCategory,
    /// Minutes the service occupies on the schedule. Must be positive.
    pub duration_minutes: u32,
    /// Listed price. Display only; the core does no monetary arithmetic.
    #[serde(default)]
    pub price: f64,
}

impl Service {
    /// Create a new service with a generated id.
    pub fn new(name: impl Into<String>, category: ServiceCategory, duration_minutes: u32) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            category,
            duration_minutes,
            price: 0.0,
        }
    }

    /// Set a specific id (imports and tests).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the listed price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }
}

// ============================================================================
// Service Catalog
// ============================================================================

/// Owned collection of services, keyed by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceCatalog {
    services: Vec<Service>,
}

impl ServiceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from existing services (imports). Every duration is
    /// checked the same way [`add`](Self::add) checks it.
    pub fn from_services(services: Vec<Service>) -> Result<Self> {
        for service in &services {
            if service.duration_minutes == 0 {
                return Err(CatalogError::ZeroDuration(service.name.clone()).into());
            }
        }
        Ok(Self { services })
    }

    /// Add a service and return its id. An existing service with the same id
    /// is replaced. Durations must be positive: a zero-minute service blocks
    /// no time and is rejected.
    pub fn add(&mut self, service: Service) -> Result<String> {
        if service.duration_minutes == 0 {
            return Err(CatalogError::ZeroDuration(service.name).into());
        }
        let id = service.id.clone();
        tracing::debug!(service_id = %id, name = %service.name, "Adding service to catalog");
        self.services.retain(|s| s.id != id);
        self.services.push(service);
        Ok(id)
    }

    pub fn get(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    /// Remove a service by id, returning it if present.
    pub fn remove(&mut self, id: &str) -> Option<Service> {
        let pos = self.services.iter().position(|s| s.id == id)?;
        tracing::debug!(service_id = %id, "Removing service from catalog");
        Some(self.services.remove(pos))
    }

    /// Duration of a service in minutes, if the id resolves.
    pub fn duration_of(&self, id: &str) -> Option<u32> {
        self.get(id).map(|s| s.duration_minutes)
    }

    /// All services in a category, sorted by name.
    pub fn by_category(&self, category: ServiceCategory) -> Vec<&Service> {
        let mut matches: Vec<&Service> = self
            .services
            .iter()
            .filter(|s| s.category == category)
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name));
        matches
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
