use std::fmt;
use serde::{Deserialize, Serialize};
use super::capability::CapabilitySet;

/// Which console a user belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// A buyer using the storefront.
    User,
    /// A member of a selling company. `business` is accepted on the wire.
    #[serde(alias = "business")]
    Company,
    /// Platform administrator.
    Admin,
}

impl UserType {
    /// Maps the backend's free-form `userType` string. Unknown values fall back to `User`.
    pub fn from_wire(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "company" | "business" => UserType::Company,
            "admin" => UserType::Admin,
            _ => UserType::User,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::User => "user",
            UserType::Company => "company",
            UserType::Admin => "admin",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a registered account on the marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub user_type: UserType,
    /// Free-form label shown next to the user, e.g. "Warehouse manager".
    pub role: Option<String>,
    pub company_id: Option<String>,
    pub capabilities: CapabilitySet,
}

/// Params for creating a new user.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub user_type: UserType,
    pub role: Option<String>,
    pub company_id: Option<String>,
    pub capabilities: CapabilitySet,
}

/// Patch for updating profile fields of an existing user.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    /// `Some(None)` clears the role.
    pub role: Option<Option<String>>,
}

impl User {
    /// Creates a buyer-type user with no capabilities.
    ///
    /// The `id` field is left empty and is assigned by the user actor.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            email: email.into(),
            user_type: UserType::User,
            role: None,
            company_id: None,
            capabilities: CapabilitySet::new(),
        }
    }

    pub fn with_type(mut self, user_type: UserType) -> Self {
        self.user_type = user_type;
        self
    }

    pub fn with_company(mut self, company_id: impl Into<String>) -> Self {
        self.company_id = Some(company_id.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_capabilities(mut self, capabilities: CapabilitySet) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn into_create(self) -> UserCreate {
        UserCreate {
            name: self.name,
            email: self.email,
            user_type: self.user_type,
            role: self.role,
            company_id: self.company_id,
            capabilities: self.capabilities,
        }
    }
}
