use tracing::{debug, instrument};
use crate::domain::{Product, ProductFilter};
use crate::product_actor::{ProductAction, ProductActionResult, ProductCreate, ProductError, ProductPatch};
use crate::actor_framework::{FrameworkError, ResourceClient};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl_basic_client!(ProductClient, Product, ProductError, product);

impl ProductClient {
    #[instrument(skip(self, product), fields(product_name = %product.name))]
    pub async fn create_product(&self, product: Product) -> Result<String, ProductError> {
        debug!("Sending request");
        let params = ProductCreate {
            company_id: product.company_id,
            name: product.name,
            category: product.category,
            price: product.price,
            quantity: product.quantity,
        };
        self.inner.create(params).await.map_err(ProductError::from)
    }

    /// Lists the products matching `filter`, sorted by name.
    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        let mut products: Vec<Product> = self
            .inner
            .list()
            .await?
            .into_iter()
            .filter(|product| filter.matches(product))
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(products)
    }

    #[instrument(skip(self))]
    pub async fn update_product(&self, id: String, patch: ProductPatch) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(ProductError::from)
    }

    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: String) -> Result<u32, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::CheckStock).await? {
            ProductActionResult::CheckStock(level) => Ok(level),
            other => Err(ProductError::ActorCommunicationError(format!("Unexpected result: {:?}", other))),
        }
    }

    /// Reserves stock and returns the units left.
    #[instrument(skip(self))]
    pub async fn reserve_stock(&self, id: String, quantity: u32) -> Result<u32, ProductError> {
        debug!("Sending request");
        if quantity == 0 {
            return Err(ProductError::InvalidQuantity(quantity));
        }
        match self.inner.perform_action(id.clone(), ProductAction::ReserveStock(quantity)).await {
            Ok(ProductActionResult::ReserveStock(remaining)) => Ok(remaining),
            Ok(other) => Err(ProductError::ActorCommunicationError(format!("Unexpected result: {:?}", other))),
            Err(FrameworkError::Rejected(_)) => {
                // The rejection text is informational; read the real level for the error.
                let available = self.check_stock(id).await?;
                Err(ProductError::InsufficientStock { requested: quantity, available })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Returns reserved units to stock and reports the new level.
    #[instrument(skip(self))]
    pub async fn release_stock(&self, id: String, quantity: u32) -> Result<u32, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::ReleaseStock(quantity)).await? {
            ProductActionResult::ReleaseStock(level) => Ok(level),
            other => Err(ProductError::ActorCommunicationError(format!("Unexpected result: {:?}", other))),
        }
    }
}
