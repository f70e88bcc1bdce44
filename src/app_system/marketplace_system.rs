use tracing::{info, error};
use crate::clients::{OrderClient, UserClient, ProductClient};
use crate::actor_framework::{Entity, ResourceActor, ResourceClient};
use crate::config::AppConfig;
use crate::domain::{User, Product, Order};
use super::error::AppError;
use super::seed;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Returns an id generator producing `{prefix}_1`, `{prefix}_2`, ...
fn id_sequence(prefix: &'static str) -> impl Fn() -> String + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(1));
    move || format!("{}_{}", prefix, counter.fetch_add(1, Ordering::SeqCst))
}

/// Records each actor starts with.
#[derive(Debug, Default)]
pub struct SeedData {
    pub users: Vec<User>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
}

impl SeedData {
    /// The mock marketplace: an admin, a company with two staff, a buyer and a few products.
    pub fn mock() -> Self {
        Self {
            users: seed::users(),
            products: seed::products(),
            orders: Vec::new(),
        }
    }
}

/// The application system that owns all record actors.
///
/// Responsible for starting up actors, wiring clients together, and handling shutdown.
pub struct MarketplaceSystem {
    pub order_client: OrderClient,
    pub user_client: UserClient,
    pub product_client: ProductClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl MarketplaceSystem {
    pub fn new(config: &AppConfig, seed: SeedData) -> Self {
        info!(
            users = seed.users.len(),
            products = seed.products.len(),
            latency_ms = config.simulated_latency.as_millis() as u64,
            "Starting marketplace system"
        );
        let mut handles = Vec::with_capacity(3);

        let user_resource_client = spawn_actor(config, "user", seed.users, &mut handles);
        let user_client = UserClient::new(user_resource_client);

        let product_resource_client = spawn_actor(config, "product", seed.products, &mut handles);
        let product_client = ProductClient::new(product_resource_client);

        let order_resource_client = spawn_actor(config, "order", seed.orders, &mut handles);
        let order_client = OrderClient::new(order_resource_client, user_client.clone(), product_client.clone());

        Self {
            order_client,
            user_client,
            product_client,
            handles,
        }
    }

    pub async fn shutdown(self) -> Result<(), AppError> {
        info!("Shutting down system...");
        // Actors stop once every client (and every clone of one) is dropped.
        drop(self.order_client);
        drop(self.user_client);
        drop(self.product_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(AppError::Shutdown(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

fn spawn_actor<T: Entity<Id = String>>(
    config: &AppConfig,
    prefix: &'static str,
    seed: Vec<T>,
    handles: &mut Vec<tokio::task::JoinHandle<()>>,
) -> ResourceClient<T> {
    let (actor, client) = ResourceActor::<T>::new(config.actor_buffer, id_sequence(prefix));
    let actor = actor.with_seed(seed).with_latency(config.simulated_latency);
    handles.push(tokio::spawn(actor.run()));
    client
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProductFilter, UserPatch};

    #[tokio::test]
    async fn test_system_starts_seeded_and_shuts_down() {
        let system = MarketplaceSystem::new(&AppConfig::default(), SeedData::mock());

        let admins = system.user_client.list_users(Some(crate::domain::UserType::Admin)).await.unwrap();
        assert_eq!(admins.len(), 1);

        let acme = ProductFilter { company_id: Some("company_acme".into()), ..Default::default() };
        assert_eq!(system.product_client.list_products(acme).await.unwrap().len(), 2);

        let id = system.user_client.create_user(User::new("New Buyer", "new@buyer.test")).await.unwrap();
        assert_eq!(id, "user_1");

        let patch = UserPatch { name: Some("Renamed Buyer".into()), ..Default::default() };
        let updated = system.user_client.update_user(id.clone(), patch).await.unwrap();
        assert_eq!(updated.name, "Renamed Buyer");
        system.user_client.delete_user(id.clone()).await.unwrap();
        assert!(system.user_client.get_user(id).await.unwrap().is_none());

        system.shutdown().await.unwrap();
    }
}
