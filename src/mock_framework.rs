//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_get`] or [`expect_action`] to assert behavior.
//! [`create_mock_transport`] does the same for the login backend.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use crate::actor_framework::{Entity, FrameworkError, ResourceClient, ResourceRequest};
use crate::auth::{Locale, LoginRequest, LoginResponse, LoginTransport, TransportError};

/// Creates a mock client and a receiver for asserting requests.
///
/// The client sends to a channel the test controls, so the test plays the
/// actor: it inspects each request and answers through the oneshot sender.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::CreateParams, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<oneshot::Sender<Result<Vec<T>, FrameworkError>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, T::Action, oneshot::Sender<Result<T::ActionResult, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

// =============================================================================
// Login backend
// =============================================================================

/// A login call captured by [`MockLoginTransport`].
pub struct LoginCall {
    pub locale: Locale,
    pub request: LoginRequest,
    pub respond_to: oneshot::Sender<Result<LoginResponse, TransportError>>,
}

/// Login transport that forwards every call to the test.
pub struct MockLoginTransport {
    sender: mpsc::Sender<LoginCall>,
}

#[async_trait]
impl LoginTransport for MockLoginTransport {
    async fn post_login(&self, locale: &Locale, request: &LoginRequest) -> Result<LoginResponse, TransportError> {
        let (respond_to, response) = oneshot::channel();
        let call = LoginCall { locale: locale.clone(), request: request.clone(), respond_to };
        self.sender.send(call).await.map_err(|_| TransportError::Network("mock closed".into()))?;
        response.await.map_err(|_| TransportError::Network("mock dropped".into()))?
    }
}

pub fn create_mock_transport(buffer_size: usize) -> (MockLoginTransport, mpsc::Receiver<LoginCall>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (MockLoginTransport { sender }, receiver)
}

/// Helper to take the next login call
pub async fn expect_login(receiver: &mut mpsc::Receiver<LoginCall>) -> Option<LoginCall> {
    receiver.recv().await
}

/// Answers a login call with a raw JSON body, as the backend would.
pub fn respond_json(call: LoginCall, body: serde_json::Value) {
    let parsed = serde_json::from_value::<LoginResponse>(body).map_err(|e| TransportError::Decode(e.to_string()));
    let _ = call.respond_to.send(parsed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{User, UserType};

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<User>(10);

        let create_task = tokio::spawn(async move {
            let user = User::new("Test", "test@example.com").with_type(UserType::Admin);
            client.create(user.into_create()).await
        });

        let (params, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(params.name, "Test");
        assert_eq!(params.user_type, UserType::Admin);
        responder.send(Ok("user_1".to_string())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok("user_1".to_string()));
    }

    #[tokio::test]
    async fn test_mock_transport() {
        let (transport, mut receiver) = create_mock_transport(1);

        let task = tokio::spawn(async move {
            transport.post_login(&Locale::default(), &LoginRequest::user("a@b.test", "secret1")).await
        });

        let call = expect_login(&mut receiver).await.expect("Expected login call");
        assert_eq!(call.request.email, "a@b.test");
        respond_json(call, serde_json::json!({"success": false}));

        let response = task.await.unwrap().unwrap();
        assert!(!response.success);
        assert!(response.data.is_none());
    }
}
