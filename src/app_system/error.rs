use thiserror::Error;
use crate::auth::{LoginError, SessionError, TransportError};
use crate::config::ConfigError;
use crate::domain::InvalidCapability;
use crate::order_actor::{CheckoutError, OrderError};
use crate::permissions::EditorError;
use crate::product_actor::ProductError;
use crate::user_actor::UserError;

/// Top-level error for the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Product(#[from] ProductError),
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
    #[error(transparent)]
    Capability(#[from] InvalidCapability),
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error(transparent)]
    Login(#[from] LoginError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("Actor task failed: {0}")]
    Shutdown(String),
}
