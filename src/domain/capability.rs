//! Capability taxonomy and per-user capability sets.
//!
//! Capabilities are opaque strings. Groups exist for display only: nothing
//! in the system interprets a capability beyond set membership.

use std::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single grantable permission string, e.g. `create_products`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Capability(String);

#[derive(Debug, Clone, Error, PartialEq)]
#[error("Invalid capability: {0:?}")]
pub struct InvalidCapability(pub String);

impl Capability {
    /// Builds a capability from a raw string. Surrounding whitespace is trimmed;
    /// an empty result is rejected.
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidCapability> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidCapability(raw));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The catalog group this capability is listed under, if any.
    pub fn group(&self) -> Option<&'static CapabilityGroup> {
        CATALOG.iter().find(|group| group.contains(self.as_str()))
    }
}

impl TryFrom<String> for Capability {
    type Error = InvalidCapability;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Capability> for String {
    fn from(value: Capability) -> Self {
        value.0
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// A named functional area and the capabilities listed under it.
#[derive(Debug, PartialEq, Eq)]
pub struct CapabilityGroup {
    pub key: &'static str,
    pub label: &'static str,
    pub capabilities: &'static [&'static str],
}

impl CapabilityGroup {
    pub fn contains(&self, capability: &str) -> bool {
        self.capabilities.contains(&capability)
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.capabilities.iter().map(|name| Capability(name.to_string()))
    }
}

pub static CATALOG: &[CapabilityGroup] = &[
    CapabilityGroup {
        key: "products",
        label: "Product Management",
        capabilities: &["view_products", "create_products", "edit_products", "delete_products"],
    },
    CapabilityGroup {
        key: "orders",
        label: "Order Management",
        capabilities: &["view_orders", "update_order_status", "cancel_orders", "refund_orders"],
    },
    CapabilityGroup {
        key: "inventory",
        label: "Inventory",
        capabilities: &["view_inventory", "manage_inventory"],
    },
    CapabilityGroup {
        key: "reports",
        label: "Reports",
        capabilities: &["view_reports", "create_reports", "export_reports"],
    },
    CapabilityGroup {
        key: "users",
        label: "User Management",
        capabilities: &["view_users", "create_users", "edit_users", "delete_users", "manage_permissions"],
    },
    CapabilityGroup {
        key: "company",
        label: "Company Management",
        capabilities: &["view_company", "edit_company", "manage_withdrawals"],
    },
];

/// Looks up a catalog group by its key.
pub fn catalog_group(key: &str) -> Option<&'static CapabilityGroup> {
    CATALOG.iter().find(|group| group.key == key)
}

// =============================================================================
// CapabilitySet
// =============================================================================

/// Ordered list of capabilities with set semantics.
///
/// Insertion order is kept so a checklist renders in the order capabilities were
/// granted, but equality ignores order and duplicates can never be stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Capability>", into = "Vec<Capability>")]
pub struct CapabilitySet(Vec<Capability>);

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, capability: &Capability) -> bool {
        self.0.contains(capability)
    }

    /// Appends the capability unless already present. Returns true if it was added.
    pub fn insert(&mut self, capability: Capability) -> bool {
        if self.contains(&capability) {
            return false;
        }
        self.0.push(capability);
        true
    }

    /// Returns true if the capability was present.
    pub fn remove(&mut self, capability: &Capability) -> bool {
        let before = self.0.len();
        self.0.retain(|c| c != capability);
        self.0.len() != before
    }

    /// Removes the capability if present, appends it otherwise.
    /// Returns whether the capability is granted afterwards.
    pub fn toggle(&mut self, capability: Capability) -> bool {
        if self.remove(&capability) {
            false
        } else {
            self.0.push(capability);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Capability> {
        self.0.iter()
    }

    /// Capabilities in `self` that `other` lacks, in `self`'s order.
    pub fn difference<'a>(&'a self, other: &'a CapabilitySet) -> impl Iterator<Item = &'a Capability> {
        self.0.iter().filter(move |c| !other.contains(c))
    }
}

impl PartialEq for CapabilitySet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|c| other.contains(c))
    }
}

impl Eq for CapabilitySet {}

impl From<Vec<Capability>> for CapabilitySet {
    fn from(items: Vec<Capability>) -> Self {
        items.into_iter().collect()
    }
}

impl From<CapabilitySet> for Vec<Capability> {
    fn from(set: CapabilitySet) -> Self {
        set.0
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        let mut set = Self::new();
        for capability in iter {
            set.insert(capability);
        }
        set
    }
}

impl<'a> IntoIterator for &'a CapabilitySet {
    type Item = &'a Capability;
    type IntoIter = std::slice::Iter<'a, Capability>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Parses a list of raw strings, failing on the first blank entry.
#[allow(dead_code)]
pub fn parse_capabilities<I, S>(names: I) -> Result<CapabilitySet, InvalidCapability>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(Capability::new).collect()
}
