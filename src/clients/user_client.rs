use tracing::{debug, info, instrument};
use crate::domain::{CapabilitySet, User, UserPatch, UserType};
use crate::user_actor::{UserAction, UserActionResult, UserError};
use crate::actor_framework::ResourceClient;

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl_basic_client!(UserClient, User, UserError, user);

impl UserClient {
    #[instrument(skip(self, user), fields(user_email = %user.email))]
    pub async fn create_user(&self, user: User) -> Result<String, UserError> {
        debug!("Sending request");
        self.inner.create(user.into_create()).await.map_err(UserError::from)
    }

    /// Fetches a user, turning a missing record into `UserError::NotFound`.
    #[instrument(skip(self))]
    pub async fn require_user(&self, id: String) -> Result<User, UserError> {
        self.get_user(id.clone()).await?.ok_or(UserError::NotFound(id))
    }

    /// Lists users sorted by name, optionally restricted to one user type.
    #[instrument(skip(self))]
    pub async fn list_users(&self, user_type: Option<UserType>) -> Result<Vec<User>, UserError> {
        debug!("Sending request");
        let mut users: Vec<User> = self
            .inner
            .list()
            .await?
            .into_iter()
            .filter(|user| user_type.map_or(true, |t| user.user_type == t))
            .collect();
        users.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(users)
    }

    #[instrument(skip(self))]
    pub async fn update_user(&self, id: String, patch: UserPatch) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(UserError::from)
    }

    /// Stores `capabilities` as the user's whole capability list and returns
    /// the list it replaced.
    #[instrument(skip(self, capabilities), fields(count = capabilities.len()))]
    pub async fn replace_capabilities(
        &self,
        id: String,
        capabilities: CapabilitySet,
    ) -> Result<CapabilitySet, UserError> {
        debug!("Sending request");
        match self.inner.perform_action(id, UserAction::ReplaceCapabilities(capabilities)).await? {
            UserActionResult::ReplaceCapabilities(previous) => {
                info!(previous = previous.len(), "Capabilities replaced");
                Ok(previous)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parse_capabilities;
    use crate::mock_framework::{create_mock_client, expect_action, expect_list};

    #[tokio::test]
    async fn test_replace_capabilities_sends_action() {
        let (inner, mut receiver) = create_mock_client::<User>(10);
        let client = UserClient::new(inner);

        let task = tokio::spawn(async move {
            let caps = parse_capabilities(["view_reports"]).unwrap();
            client.replace_capabilities("user_1".into(), caps).await
        });

        let (id, action, responder) = expect_action(&mut receiver).await.expect("Expected User Action");
        assert_eq!(id, "user_1");
        let UserAction::ReplaceCapabilities(caps) = action;
        assert_eq!(caps, parse_capabilities(["view_reports"]).unwrap());
        responder
            .send(Ok(UserActionResult::ReplaceCapabilities(CapabilitySet::new())))
            .unwrap();

        assert_eq!(task.await.unwrap(), Ok(CapabilitySet::new()));
    }

    #[tokio::test]
    async fn test_list_users_filters_and_sorts() {
        let (inner, mut receiver) = create_mock_client::<User>(10);
        let client = UserClient::new(inner);

        let task = tokio::spawn(async move { client.list_users(Some(UserType::Company)).await });

        let responder = expect_list(&mut receiver).await.expect("Expected User List");
        responder
            .send(Ok(vec![
                User::new("Zed", "z@acme.test").with_id("u3").with_type(UserType::Company),
                User::new("Amy", "a@shop.test").with_id("u1"),
                User::new("Bea", "b@acme.test").with_id("u2").with_type(UserType::Company),
            ]))
            .unwrap();

        let names: Vec<String> = task.await.unwrap().unwrap().into_iter().map(|u| u.name).collect();
        assert_eq!(names, vec!["Bea", "Zed"]);
    }
}
