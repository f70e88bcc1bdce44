use thiserror::Error;
use tracing::{error, info, instrument, warn};
use super::form::{LoginRequest, ValidationErrors};
use super::routes::{dashboard_path, login_path, Locale};
use super::session::{Session, SessionContext, SessionError};
use super::transport::{LoginTransport, TransportError};

/// Shown when the backend gives no message of its own.
pub const GENERIC_LOGIN_ERROR: &str = "Login failed. Please try again.";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LoginError {
    #[error("Invalid login form: {0}")]
    Validation(ValidationErrors),
    #[error("Login rejected: {}", .0.as_deref().unwrap_or(GENERIC_LOGIN_ERROR))]
    Rejected(Option<String>),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl LoginError {
    /// Text to put under the login form.
    pub fn display_message(&self) -> String {
        match self {
            LoginError::Validation(errors) => errors.to_string(),
            LoginError::Rejected(Some(message)) => message.clone(),
            _ => GENERIC_LOGIN_ERROR.to_string(),
        }
    }
}

/// A completed login: the stored session and the path to navigate to.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    pub session: Session,
    pub redirect_to: String,
}

/// Drives the login form: validation, the backend call, session storage and
/// the post-login redirect.
pub struct LoginClient<T: LoginTransport> {
    transport: T,
    session: SessionContext,
    locale: Locale,
}

impl<T: LoginTransport> LoginClient<T> {
    pub fn new(transport: T, session: SessionContext, locale: Locale) -> Self {
        Self { transport, session, locale }
    }

    /// Logs in. On any failure the session is left untouched.
    #[instrument(skip(self, request), fields(email = %request.email, user_type = %request.user_type, locale = %self.locale))]
    pub async fn login(&self, request: LoginRequest) -> Result<LoginOutcome, LoginError> {
        request.validate().map_err(|errors| {
            warn!(%errors, "Login form invalid");
            LoginError::Validation(errors)
        })?;

        let response = self.transport.post_login(&self.locale, &request).await.map_err(|e| {
            error!(error = %e, "Login request failed");
            LoginError::from(e)
        })?;

        let data = match (response.success, response.data) {
            (true, Some(data)) => data,
            (_, _) => {
                warn!(message = ?response.message, "Login rejected by backend");
                return Err(LoginError::Rejected(response.message));
            }
        };

        let session = Session::new(data.user, data.token, request.remember_me);
        let redirect_to = dashboard_path(&self.locale, session.user_type());
        self.session.establish(session.clone()).await?;

        info!(%redirect_to, "Login successful");
        Ok(LoginOutcome { session, redirect_to })
    }

    /// Ends the session and returns the login page path.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<String, LoginError> {
        self.session.logout().await?;
        Ok(login_path(&self.locale))
    }
}
