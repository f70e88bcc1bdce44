use crate::actor_framework::Entity;
use crate::domain::{User, UserCreate, UserPatch, UserType};
use super::actions::{UserAction, UserActionResult};

impl Entity for User {
    type Id = String;
    type CreateParams = UserCreate;
    type Patch = UserPatch;
    type Action = UserAction;
    type ActionResult = UserActionResult;

    fn id(&self) -> &String { &self.id }

    /// Creates a new User from creation parameters.
    ///
    /// Company users must name the company they belong to.
    fn from_create_params(id: String, params: UserCreate) -> Result<Self, String> {
        if !params.email.contains('@') {
            return Err(format!("Invalid email: {}", params.email));
        }
        if params.user_type == UserType::Company && params.company_id.is_none() {
            return Err("Company users require a company_id".to_string());
        }
        Ok(Self {
            id,
            name: params.name,
            email: params.email,
            user_type: params.user_type,
            role: params.role,
            company_id: params.company_id,
            capabilities: params.capabilities,
        })
    }

    fn on_update(&mut self, patch: UserPatch) -> Result<(), String> {
        if let Some(email) = &patch.email {
            if !email.contains('@') {
                return Err(format!("Invalid email: {}", email));
            }
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        Ok(())
    }

    /// Handles user-specific actions.
    ///
    /// `ReplaceCapabilities` swaps the stored set wholesale; there is no
    /// merge and no check against what the caller originally read.
    fn handle_action(&mut self, action: UserAction) -> Result<UserActionResult, String> {
        match action {
            UserAction::ReplaceCapabilities(capabilities) => {
                let previous = std::mem::replace(&mut self.capabilities, capabilities);
                Ok(UserActionResult::ReplaceCapabilities(previous))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{parse_capabilities, CapabilitySet};

    #[test]
    fn test_company_user_requires_company() {
        let params = User::new("Dana", "dana@acme.test").with_type(UserType::Company).into_create();
        assert!(User::from_create_params("user_1".into(), params).is_err());

        let params = User::new("Dana", "dana@acme.test")
            .with_type(UserType::Company)
            .with_company("acme")
            .into_create();
        let user = User::from_create_params("user_1".into(), params).unwrap();
        assert_eq!(user.id, "user_1");
    }

    #[test]
    fn test_replace_capabilities_returns_previous() {
        let original = parse_capabilities(["view_products"]).unwrap();
        let mut user = User::new("Dana", "dana@acme.test").with_capabilities(original.clone());

        let replacement = parse_capabilities(["create_products", "view_reports"]).unwrap();
        let result = user.handle_action(UserAction::ReplaceCapabilities(replacement.clone())).unwrap();

        assert_eq!(result, UserActionResult::ReplaceCapabilities(original));
        assert_eq!(user.capabilities, replacement);

        user.handle_action(UserAction::ReplaceCapabilities(CapabilitySet::new())).unwrap();
        assert!(user.capabilities.is_empty());
    }

    #[test]
    fn test_update_rejects_bad_email_without_partial_write() {
        let mut user = User::new("Dana", "dana@acme.test");
        let patch = UserPatch { name: Some("Renamed".into()), email: Some("nope".into()), role: None };
        assert!(user.on_update(patch).is_err());
        assert_eq!(user.name, "Dana");

        let patch = UserPatch { role: Some(Some("Buyer lead".into())), ..Default::default() };
        user.on_update(patch).unwrap();
        assert_eq!(user.role.as_deref(), Some("Buyer lead"));
    }
}
