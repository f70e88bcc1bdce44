use std::fmt;
use serde::Serialize;
use thiserror::Error;
use crate::domain::UserType;

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Body of `POST /api/auth/login`.
///
/// `company_name` and `tax_code` are sent as empty strings for non-company logins.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub user_type: UserType,
    pub company_name: String,
    pub tax_code: String,
    pub remember_me: bool,
}

// Hand-written so the password never reaches a log line.
impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("user_type", &self.user_type)
            .field("company_name", &self.company_name)
            .field("tax_code", &self.tax_code)
            .field("remember_me", &self.remember_me)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Every failed field of a login form, in form order.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", join_messages(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

fn join_messages(errors: &[FieldError]) -> String {
    errors.iter().map(|e| e.message).collect::<Vec<_>>().join("; ")
}

impl ValidationErrors {
    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl LoginRequest {
    pub fn user(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            user_type: UserType::User,
            company_name: String::new(),
            tax_code: String::new(),
            remember_me: false,
        }
    }

    pub fn company(
        email: impl Into<String>,
        password: impl Into<String>,
        company_name: impl Into<String>,
        tax_code: impl Into<String>,
    ) -> Self {
        Self {
            user_type: UserType::Company,
            company_name: company_name.into(),
            tax_code: tax_code.into(),
            ..Self::user(email, password)
        }
    }

    pub fn remember(mut self, remember_me: bool) -> Self {
        self.remember_me = remember_me;
        self
    }

    /// Checks the form before anything is sent.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();
        let email = self.email.trim();
        if email.is_empty() {
            errors.push(FieldError { field: "email", message: "Email is required" });
        } else if !email.contains('@') {
            errors.push(FieldError { field: "email", message: "Email is not valid" });
        }
        if self.password.is_empty() {
            errors.push(FieldError { field: "password", message: "Password is required" });
        } else if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.push(FieldError { field: "password", message: "Password must be at least 6 characters" });
        }
        if self.user_type == UserType::Company {
            if self.company_name.trim().is_empty() {
                errors.push(FieldError { field: "companyName", message: "Company name is required" });
            }
            if self.tax_code.trim().is_empty() {
                errors.push(FieldError { field: "taxCode", message: "Tax code is required" });
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_uses_camel_case() {
        let request = LoginRequest::company("ops@acme.test", "hunter22", "Acme", "0101").remember(true);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "email": "ops@acme.test",
                "password": "hunter22",
                "userType": "company",
                "companyName": "Acme",
                "taxCode": "0101",
                "rememberMe": true,
            })
        );
    }

    #[test]
    fn test_validation_collects_all_fields() {
        let request = LoginRequest::company("", "abc", " ", "");
        let errors = request.validate().unwrap_err();
        assert!(errors.has("email"));
        assert!(errors.has("password"));
        assert!(errors.has("companyName"));
        assert!(errors.has("taxCode"));

        assert!(LoginRequest::user("buyer@shop.test", "secret1").validate().is_ok());
        assert!(LoginRequest::user("buyer.shop.test", "secret1").validate().unwrap_err().has("email"));
    }

    #[test]
    fn test_validation_message_joins_fields() {
        let errors = LoginRequest::user("", "abc").validate().unwrap_err();
        assert_eq!(errors.to_string(), "Email is required; Password must be at least 6 characters");
        let as_error: &dyn std::error::Error = &errors;
        assert!(as_error.source().is_none());
    }

    #[test]
    fn test_debug_redacts_password() {
        let rendered = format!("{:?}", LoginRequest::user("buyer@shop.test", "topsecret"));
        assert!(!rendered.contains("topsecret"));
    }
}
