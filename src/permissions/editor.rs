use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use crate::clients::UserClient;
use crate::domain::{catalog_group, Capability, CapabilitySet, User, CATALOG};
use crate::user_actor::UserError;

/// Label of the checklist group holding granted capabilities outside the catalog.
pub const OTHER_GROUP_LABEL: &str = "Other";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum EditorError {
    #[error("User not found: {0}")]
    UserNotFound(String),
    #[error("Unknown capability group: {0}")]
    UnknownGroup(String),
    #[error(transparent)]
    User(UserError),
}

impl From<UserError> for EditorError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => EditorError::UserNotFound(id),
            other => EditorError::User(other),
        }
    }
}

/// Capabilities added and removed relative to the set the editor was opened with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CapabilityDiff {
    pub added: Vec<Capability>,
    pub removed: Vec<Capability>,
}

impl CapabilityDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChecklistItem {
    pub capability: Capability,
    pub granted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChecklistGroup {
    pub label: &'static str,
    pub items: Vec<ChecklistItem>,
}

/// Result of a successful save.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedCapabilities {
    pub user_id: String,
    pub capabilities: CapabilitySet,
    /// What was stored right before the save, which may differ from what the editor opened with.
    pub replaced: CapabilitySet,
}

/// Working copy of one user's capabilities.
///
/// Nothing reaches the user store until [`CapabilityEditor::save`]; dropping or
/// cancelling the editor discards every toggle.
pub struct CapabilityEditor {
    client: UserClient,
    user: User,
    working: CapabilitySet,
}

impl CapabilityEditor {
    #[instrument(skip(client))]
    pub async fn open(client: &UserClient, user_id: &str) -> Result<Self, EditorError> {
        let user = client.require_user(user_id.to_string()).await?;
        debug!(granted = user.capabilities.len(), "Editor opened");
        Ok(Self {
            client: client.clone(),
            working: user.capabilities.clone(),
            user,
        })
    }

    /// The user as read when the editor was opened.
    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn working(&self) -> &CapabilitySet {
        &self.working
    }

    pub fn is_granted(&self, capability: &Capability) -> bool {
        self.working.contains(capability)
    }

    /// Flips one capability. Returns whether it is granted afterwards.
    pub fn toggle(&mut self, capability: Capability) -> bool {
        if capability.group().is_none() {
            warn!(%capability, "Toggling capability outside the catalog");
        }
        self.working.toggle(capability)
    }

    /// Grants or revokes every capability listed under a catalog group.
    pub fn set_group(&mut self, group_key: &str, granted: bool) -> Result<(), EditorError> {
        let group = catalog_group(group_key).ok_or_else(|| EditorError::UnknownGroup(group_key.to_string()))?;
        for capability in group.iter() {
            if granted {
                self.working.insert(capability);
            } else {
                self.working.remove(&capability);
            }
        }
        Ok(())
    }

    pub fn diff(&self) -> CapabilityDiff {
        let original = &self.user.capabilities;
        CapabilityDiff {
            added: self.working.difference(original).cloned().collect(),
            removed: original.difference(&self.working).cloned().collect(),
        }
    }

    pub fn is_dirty(&self) -> bool {
        !self.diff().is_empty()
    }

    /// Catalog groups with a granted flag per capability.
    ///
    /// Granted capabilities that no group lists are appended under
    /// [`OTHER_GROUP_LABEL`] so they stay visible.
    pub fn checklist(&self) -> Vec<ChecklistGroup> {
        let mut groups: Vec<ChecklistGroup> = CATALOG
            .iter()
            .map(|group| ChecklistGroup {
                label: group.label,
                items: group
                    .iter()
                    .map(|capability| ChecklistItem {
                        granted: self.working.contains(&capability),
                        capability,
                    })
                    .collect(),
            })
            .collect();

        let unlisted: Vec<ChecklistItem> = self
            .working
            .iter()
            .filter(|capability| capability.group().is_none())
            .map(|capability| ChecklistItem { capability: capability.clone(), granted: true })
            .collect();
        if !unlisted.is_empty() {
            groups.push(ChecklistGroup { label: OTHER_GROUP_LABEL, items: unlisted });
        }
        groups
    }

    /// Replaces the stored capability list with the working copy.
    #[instrument(skip(self), fields(user_id = %self.user.id))]
    pub async fn save(self) -> Result<SavedCapabilities, EditorError> {
        let diff = self.diff();
        let replaced = self
            .client
            .replace_capabilities(self.user.id.clone(), self.working.clone())
            .await?;
        info!(added = diff.added.len(), removed = diff.removed.len(), "Capabilities saved");
        Ok(SavedCapabilities {
            user_id: self.user.id,
            capabilities: self.working,
            replaced,
        })
    }

    /// Discards the working copy.
    pub fn cancel(self) {
        debug!(user_id = %self.user.id, "Editor cancelled");
    }
}
