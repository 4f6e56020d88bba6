//! Domain identifier types with proper encapsulation.
//!
//! Every record handed out by a store carries one of these identifiers.
//! Callers supply identifiers as raw strings (CLI arguments, JSON
//! payloads), so each type exposes [`parse`](FoodId::parse) as the single
//! gate between untrusted input and a structurally valid reference.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A caller-supplied reference that is not a well-formed store identity.
///
/// Raised before any store round-trip, so a garbage reference can never
/// surface as a lookup miss.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed store reference: {given:?}")]
pub struct MalformedReference {
    /// The raw string as the caller supplied it.
    pub given: String,
}

/// Food item identifier - newtype for type safety.
///
/// The inner UUID is private to ensure all construction goes through
/// the defined constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FoodId(Uuid);

impl FoodId {
    /// Create a new `FoodId` with a generated UUID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a caller-supplied reference into a `FoodId`.
    pub fn parse(given: &str) -> Result<Self, MalformedReference> {
        Uuid::parse_str(given)
            .map(Self)
            .map_err(|_| MalformedReference {
                given: given.to_string(),
            })
    }

    /// Get the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for FoodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for FoodId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Purchase record identifier - newtype for type safety.
///
/// The inner UUID is private to ensure all construction goes through
/// the defined constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PurchaseId(Uuid);

impl PurchaseId {
    /// Create a new `PurchaseId` with a generated UUID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a caller-supplied reference into a `PurchaseId`.
    pub fn parse(given: &str) -> Result<Self, MalformedReference> {
        Uuid::parse_str(given)
            .map(Self)
            .map_err(|_| MalformedReference {
                given: given.to_string(),
            })
    }

    /// Get the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PurchaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for PurchaseId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Reconciliation incident identifier.
///
/// Incidents are only ever created by the checkout flow itself, so there
/// is no parsing constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IncidentId(Uuid);

impl IncidentId {
    /// Create a new `IncidentId` with a generated UUID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for IncidentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for IncidentId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}
