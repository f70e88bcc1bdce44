use thiserror::Error;
use crate::actor_framework::FrameworkError;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Invalid product: {0}")]
    InvalidProduct(String),
    #[error("Invalid user: {0}")]
    InvalidUser(String),
    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),
    #[error("Order validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

/// A checkout that stopped part way. `placed` holds the orders created
/// before `source` occurred; they are not rolled back.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Checkout stopped after {} placed order(s): {source}", .placed.len())]
pub struct CheckoutError {
    pub placed: Vec<String>,
    pub source: OrderError,
}

impl From<FrameworkError> for OrderError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::Rejected(reason) => OrderError::ValidationError(reason),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
