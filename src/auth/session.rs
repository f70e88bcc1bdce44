use std::path::{Path, PathBuf};
use std::sync::Arc;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};
use crate::domain::UserType;
use super::transport::SessionUser;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Io(String),
    #[error("Stored session is corrupt: {0}")]
    Corrupt(String),
}

/// What a successful login leaves behind on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: SessionUser,
    pub token: String,
    pub remember_me: bool,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user: SessionUser, token: impl Into<String>, remember_me: bool) -> Self {
        Self {
            user,
            token: token.into(),
            remember_me,
            created_at: Utc::now(),
        }
    }

    pub fn user_type(&self) -> UserType {
        self.user.kind()
    }
}

struct SessionState {
    current: RwLock<Option<Session>>,
    path: Option<PathBuf>,
}

/// Handle to the signed-in session, passed explicitly to whatever needs it.
///
/// Clones share the same state. With a storage path, every established
/// session is written to disk and survives a restart.
#[derive(Clone)]
pub struct SessionContext {
    state: Arc<SessionState>,
}

impl SessionContext {
    pub fn in_memory() -> Self {
        Self::build(None, None)
    }

    /// Opens a context backed by `path`, restoring a previously stored session if any.
    #[instrument]
    pub async fn persistent(path: &Path) -> Result<Self, SessionError> {
        let restored = match tokio::fs::read(path).await {
            Ok(bytes) => {
                let session: Session = serde_json::from_slice(&bytes)
                    .map_err(|e| SessionError::Corrupt(e.to_string()))?;
                info!(user_type = %session.user_type(), "Restored stored session");
                Some(session)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(SessionError::Io(e.to_string())),
        };
        Ok(Self::build(Some(path.to_path_buf()), restored))
    }

    fn build(path: Option<PathBuf>, current: Option<Session>) -> Self {
        Self {
            state: Arc::new(SessionState {
                current: RwLock::new(current),
                path,
            }),
        }
    }

    pub async fn current(&self) -> Option<Session> {
        self.state.current.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.current.read().await.is_some()
    }

    pub async fn token(&self) -> Option<String> {
        self.state.current.read().await.as_ref().map(|s| s.token.clone())
    }

    /// Makes `session` the current one. Storage is written before memory so a
    /// failed write leaves the previous session in place.
    #[instrument(skip(self, session), fields(user_type = %session.user_type()))]
    pub async fn establish(&self, session: Session) -> Result<(), SessionError> {
        let mut current = self.state.current.write().await;
        if let Some(path) = &self.state.path {
            let bytes = serde_json::to_vec_pretty(&session)
                .map_err(|e| SessionError::Corrupt(e.to_string()))?;
            tokio::fs::write(path, bytes)
                .await
                .map_err(|e| SessionError::Io(e.to_string()))?;
            debug!(path = %path.display(), remember_me = session.remember_me, "Session persisted");
        }
        *current = Some(session);
        Ok(())
    }

    /// Clears the session from memory and storage.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), SessionError> {
        let mut current = self.state.current.write().await;
        if let Some(path) = &self.state.path {
            remove_file(path).await?;
        }
        if current.take().is_none() {
            warn!("Logout without an active session");
        }
        Ok(())
    }
}

async fn remove_file(path: &Path) -> Result<(), SessionError> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(SessionError::Io(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company_user() -> SessionUser {
        serde_json::from_value(serde_json::json!({"userType": "company", "name": "Acme Ops"})).unwrap()
    }

    #[tokio::test]
    async fn test_remembered_session_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let context = SessionContext::persistent(&path).await.unwrap();
        assert!(!context.is_authenticated().await);
        context.establish(Session::new(company_user(), "tok-1", true)).await.unwrap();

        let reopened = SessionContext::persistent(&path).await.unwrap();
        let session = reopened.current().await.unwrap();
        assert_eq!(session.token, "tok-1");
        assert_eq!(session.user_type(), UserType::Company);

        reopened.logout().await.unwrap();
        assert!(!path.exists());
        assert!(reopened.current().await.is_none());
    }

    #[tokio::test]
    async fn test_session_is_stored_without_remember_me() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let context = SessionContext::persistent(&path).await.unwrap();
        context.establish(Session::new(company_user(), "tok-2", false)).await.unwrap();
        assert_eq!(context.token().await.as_deref(), Some("tok-2"));
        assert!(path.exists());

        let reopened = SessionContext::persistent(&path).await.unwrap();
        let restored = reopened.current().await.unwrap();
        assert_eq!(restored.token, "tok-2");
        assert!(!restored.remember_me);

        let shared = context.clone();
        shared.logout().await.unwrap();
        assert!(!context.is_authenticated().await);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_in_memory_session_touches_no_file() {
        let context = SessionContext::in_memory();
        context.establish(Session::new(company_user(), "tok-3", true)).await.unwrap();
        assert_eq!(context.token().await.as_deref(), Some("tok-3"));
        context.logout().await.unwrap();
        assert!(context.current().await.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"{not json").unwrap();

        let err = SessionContext::persistent(&path).await.err().unwrap();
        assert!(matches!(err, SessionError::Corrupt(_)));
    }
}
