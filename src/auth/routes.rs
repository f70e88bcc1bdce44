use std::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::domain::UserType;

#[derive(Debug, Clone, Error, PartialEq)]
#[error("Invalid locale: {0:?}")]
pub struct InvalidLocale(pub String);

/// Route prefix and `Accept-Language` value, e.g. `en` or `vi`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    pub fn new(tag: impl Into<String>) -> Result<Self, InvalidLocale> {
        let tag = tag.into();
        let valid = !tag.is_empty()
            && tag.len() <= 16
            && tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        if valid {
            Ok(Self(tag))
        } else {
            Err(InvalidLocale(tag))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self("en".to_string())
    }
}

impl TryFrom<String> for Locale {
    type Error = InvalidLocale;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Locale> for String {
    fn from(value: Locale) -> Self {
        value.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a freshly logged-in user lands. Company accounts get the company
/// dashboard, everyone else the user dashboard.
pub fn dashboard_path(locale: &Locale, user_type: UserType) -> String {
    match user_type {
        UserType::Company => format!("/{}/dashboard/company", locale),
        UserType::User | UserType::Admin => format!("/{}/dashboard/user", locale),
    }
}

pub fn login_path(locale: &Locale) -> String {
    format!("/{}/login", locale)
}
