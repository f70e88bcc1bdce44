use std::collections::HashMap;
use std::hash::Hash;
use std::fmt::{Debug, Display};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, Params, and Actions)
// =============================================================================

/// Trait that any record type must implement to be managed by ResourceActor
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;

    // --- Custom Actions ---
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;

    /// Get the ID of the record
    fn id(&self) -> &Self::Id;

    /// Construct the full record from the ID and creation params
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, String>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), String> { Ok(()) }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), String>;
    fn on_delete(&self) -> Result<(), String> { Ok(()) }

    // --- Action Handler ---

    /// Handle a custom domain-specific action
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, String>;
}

/// Errors surfaced by the generic actor and client.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Request rejected: {0}")]
    Rejected(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    }
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
    latency: Duration,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
            latency: Duration::ZERO,
        };
        let client = ResourceClient { sender };
        (actor, client)
    }

    /// Preloads records, keyed by their own id. Existing ids are overwritten.
    pub fn with_seed(mut self, items: impl IntoIterator<Item = T>) -> Self {
        for item in items {
            self.store.insert(item.id().clone(), item);
        }
        self
    }

    /// Delays every request by a fixed amount to mimic a network round-trip.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    #[instrument(name = "resource_actor", skip(self), fields(entity = std::any::type_name::<T>()))]
    pub async fn run(mut self) {
        debug!(seeded = self.store.len(), "Actor starting");
        while let Some(msg) = self.receiver.recv().await {
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            self.handle(msg);
        }
        debug!("Actor stopped");
    }

    fn handle(&mut self, msg: ResourceRequest<T>) {
        match msg {
            ResourceRequest::Create { params, respond_to } => {
                let id = (self.next_id_fn)();
                let result = T::from_create_params(id.clone(), params)
                    .and_then(|mut item| item.on_create().map(|_| item))
                    .map(|item| {
                        self.store.insert(id.clone(), item);
                        id
                    })
                    .map_err(FrameworkError::Rejected);
                let _ = respond_to.send(result);
            }
            ResourceRequest::Get { id, respond_to } => {
                let item = self.store.get(&id).cloned();
                let _ = respond_to.send(Ok(item));
            }
            ResourceRequest::List { respond_to } => {
                let items = self.store.values().cloned().collect();
                let _ = respond_to.send(Ok(items));
            }
            ResourceRequest::Update { id, patch, respond_to } => {
                let result = match self.store.get_mut(&id) {
                    Some(item) => item
                        .on_update(patch)
                        .map(|_| item.clone())
                        .map_err(FrameworkError::Rejected),
                    None => Err(FrameworkError::NotFound(id.to_string())),
                };
                let _ = respond_to.send(result);
            }
            ResourceRequest::Delete { id, respond_to } => {
                let result = match self.store.get(&id) {
                    Some(item) => item.on_delete().map_err(FrameworkError::Rejected),
                    None => Err(FrameworkError::NotFound(id.to_string())),
                };
                if result.is_ok() {
                    self.store.remove(&id);
                }
                let _ = respond_to.send(result);
            }
            ResourceRequest::Action { id, action, respond_to } => {
                let result = match self.store.get_mut(&id) {
                    Some(item) => item.handle_action(action).map_err(FrameworkError::Rejected),
                    None => Err(FrameworkError::NotFound(id.to_string())),
                };
                let _ = respond_to.send(result);
            }
        }
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn call<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(build(respond_to))
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T::Id, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Create { params, respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.call(|respond_to| ResourceRequest::List { respond_to }).await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Update { id, patch, respond_to }).await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.call(|respond_to| ResourceRequest::Delete { id, respond_to }).await
    }

    pub async fn perform_action(&self, id: T::Id, action: T::Action) -> Result<T::ActionResult, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Action { id, action, respond_to }).await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU64, Ordering};

    // --- Record Definition ---

    #[derive(Clone, Debug, PartialEq)]
    struct Listing {
        id: String,
        title: String,
        published: bool,
    }

    #[derive(Debug)]
    struct ListingCreate {
        title: String,
    }

    #[derive(Debug)]
    struct ListingPatch {
        title: Option<String>,
    }

    #[derive(Debug)]
    enum ListingAction {
        Publish,
    }

    impl Entity for Listing {
        type Id = String;
        type CreateParams = ListingCreate;
        type Patch = ListingPatch;
        type Action = ListingAction;
        type ActionResult = bool;

        fn id(&self) -> &String { &self.id }

        fn from_create_params(id: String, params: ListingCreate) -> Result<Self, String> {
            if params.title.is_empty() {
                return Err("title is required".to_string());
            }
            Ok(Self { id, title: params.title, published: false })
        }

        fn on_update(&mut self, patch: ListingPatch) -> Result<(), String> {
            if let Some(title) = patch.title {
                self.title = title;
            }
            Ok(())
        }

        fn on_delete(&self) -> Result<(), String> {
            if self.published {
                Err("published listings cannot be deleted".to_string())
            } else {
                Ok(())
            }
        }

        fn handle_action(&mut self, action: ListingAction) -> Result<bool, String> {
            match action {
                ListingAction::Publish => {
                    let changed = !self.published;
                    self.published = true;
                    Ok(changed)
                }
            }
        }
    }

    fn spawn_listing_actor(seed: Vec<Listing>) -> ResourceClient<Listing> {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || format!("listing_{}", counter.fetch_add(1, Ordering::SeqCst));
        let (actor, client) = ResourceActor::new(10, next_id);
        tokio::spawn(actor.with_seed(seed).run());
        client
    }

    #[tokio::test]
    async fn test_resource_actor_with_actions() {
        let client = spawn_listing_actor(Vec::new());

        let id = client.create(ListingCreate { title: "Steel pipes".into() }).await.unwrap();
        assert_eq!(id, "listing_1");

        let changed = client.perform_action(id.clone(), ListingAction::Publish).await.unwrap();
        assert!(changed);
        let listing = client.get(id.clone()).await.unwrap().unwrap();
        assert!(listing.published);

        let changed_again = client.perform_action(id.clone(), ListingAction::Publish).await.unwrap();
        assert!(!changed_again);
    }

    #[tokio::test]
    async fn test_hooks_reject_requests() {
        let client = spawn_listing_actor(Vec::new());

        let err = client.create(ListingCreate { title: String::new() }).await.unwrap_err();
        assert_eq!(err, FrameworkError::Rejected("title is required".into()));

        let id = client.create(ListingCreate { title: "Cement".into() }).await.unwrap();
        client.perform_action(id.clone(), ListingAction::Publish).await.unwrap();
        let err = client.delete(id.clone()).await.unwrap_err();
        assert!(matches!(err, FrameworkError::Rejected(_)));
        assert!(client.get(id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_seed_list_update_and_missing_ids() {
        let seed = vec![Listing { id: "seeded".into(), title: "Bricks".into(), published: false }];
        let client = spawn_listing_actor(seed);

        let updated = client
            .update("seeded".into(), ListingPatch { title: Some("Red bricks".into()) })
            .await
            .unwrap();
        assert_eq!(updated.title, "Red bricks");
        assert_eq!(client.list().await.unwrap().len(), 1);

        let err = client.update("missing".into(), ListingPatch { title: None }).await.unwrap_err();
        assert_eq!(err, FrameworkError::NotFound("missing".into()));
        let err = client.perform_action("missing".into(), ListingAction::Publish).await.unwrap_err();
        assert_eq!(err, FrameworkError::NotFound("missing".into()));

        client.delete("seeded".into()).await.unwrap();
        assert!(client.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_closed_actor_reports_error() {
        let (actor, client) = ResourceActor::<Listing>::new(1, || "x".to_string());
        drop(actor);
        let err = client.get("x".into()).await.unwrap_err();
        assert_eq!(err, FrameworkError::ActorClosed);
    }
}
