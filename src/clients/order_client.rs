use tracing::{error, info, instrument};
use crate::domain::{Cart, Order, OrderCreate, OrderRequest, OrderStatus};
use crate::order_actor::{CheckoutError, OrderAction, OrderActionResult, OrderError};
use crate::product_actor::ProductError;
use crate::actor_framework::ResourceClient;
use crate::clients::{UserClient, ProductClient};

/// Which orders to list. Empty fields match everything.
#[derive(Debug, Clone, Default)]
pub struct OrderQuery {
    pub company_id: Option<String>,
    pub buyer_id: Option<String>,
    pub status: Option<OrderStatus>,
}

impl OrderQuery {
    fn matches(&self, order: &Order) -> bool {
        self.company_id.as_ref().map_or(true, |id| &order.company_id == id)
            && self.buyer_id.as_ref().map_or(true, |id| &order.buyer_id == id)
            && self.status.map_or(true, |status| order.status == status)
    }
}

/// Client for interacting with the Order actor.
///
/// This client handles the orchestration, validating buyers and products
/// before creating an order.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    user_client: UserClient,
    product_client: ProductClient,
}

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        user_client: UserClient,
        product_client: ProductClient
    ) -> Self {
        Self {
            inner,
            user_client,
            product_client,
        }
    }

    #[instrument(skip(self))]
    pub async fn create_order(&self, request: OrderRequest) -> Result<String, OrderError> {
        info!("Processing create_order request (Client Side)");

        if request.quantity == 0 {
            return Err(OrderError::ValidationError("Order quantity must be at least 1".to_string()));
        }

        // Step 1: Validate buyer
        match self.user_client.get_user(request.buyer_id.clone()).await {
            Ok(Some(user)) => info!(user_name = %user.name, "Buyer validation successful"),
            Ok(None) => {
                error!("Buyer not found");
                return Err(OrderError::InvalidUser(request.buyer_id.clone()));
            }
            Err(e) => {
                error!(error = %e, "Buyer validation failed");
                return Err(OrderError::InvalidUser(format!("Buyer validation failed: {}", e)));
            }
        }

        // Step 2: Validate product
        let product = match self.product_client.get_product(request.product_id.clone()).await {
            Ok(Some(product)) => {
                info!(product_name = %product.name, "Product validation successful");
                product
            }
            Ok(None) => {
                error!("Product not found");
                return Err(OrderError::InvalidProduct(request.product_id.clone()));
            }
            Err(e) => {
                error!(error = %e, "Product validation failed");
                return Err(OrderError::InvalidProduct(format!("Product validation failed: {}", e)));
            }
        };

        // Step 3: Reserve stock
        match self.product_client.reserve_stock(request.product_id.clone(), request.quantity).await {
            Ok(remaining) => info!(remaining, "Stock reserved successfully"),
            Err(e @ ProductError::InsufficientStock { .. }) => {
                error!(error = %e, "Stock reservation failed");
                return Err(OrderError::InsufficientStock(e.to_string()));
            }
            Err(e) => {
                error!(error = %e, "Stock reservation failed");
                return Err(OrderError::InvalidProduct(format!("Stock reservation failed: {}", e)));
            }
        }

        // Step 4: Create order in ResourceActor
        let params = OrderCreate {
            buyer_id: request.buyer_id,
            company_id: product.company_id,
            product_id: request.product_id,
            quantity: request.quantity,
            total: product.price * f64::from(request.quantity),
        };

        let product_id = params.product_id.clone();
        let quantity = params.quantity;
        match self.inner.create(params).await {
            Ok(order_id) => Ok(order_id),
            Err(e) => {
                error!(error = %e, "Order creation failed, releasing reserved stock");
                if let Err(release) = self.product_client.release_stock(product_id, quantity).await {
                    error!(error = %release, "Stock release failed");
                }
                Err(OrderError::from(e))
            }
        }
    }

    /// Lists matching orders, newest first.
    #[instrument(skip(self))]
    pub async fn list_orders(&self, query: OrderQuery) -> Result<Vec<Order>, OrderError> {
        let mut orders: Vec<Order> = self
            .inner
            .list()
            .await?
            .into_iter()
            .filter(|order| query.matches(order))
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(orders)
    }

    /// Sets an order's status and returns the previous one. No transition is refused.
    #[instrument(skip(self))]
    pub async fn set_status(&self, id: String, status: OrderStatus) -> Result<OrderStatus, OrderError> {
        match self.inner.perform_action(id, OrderAction::SetStatus(status)).await? {
            OrderActionResult::SetStatus(previous) => {
                info!(%previous, %status, "Order status changed");
                Ok(previous)
            }
        }
    }

    /// Places one order per cart line, in cart order.
    ///
    /// Lines are removed from the cart as their orders are created. On the
    /// first failure the remaining lines stay in the cart, and the error
    /// carries the ids of the orders already placed. Those are kept.
    #[instrument(skip(self, cart), fields(lines = cart.lines().len()))]
    pub async fn checkout(&self, buyer_id: &str, cart: &mut Cart) -> Result<Vec<String>, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError {
                placed: Vec::new(),
                source: OrderError::ValidationError("Cart is empty".to_string()),
            });
        }
        let mut placed = Vec::new();
        for line in cart.lines().to_vec() {
            let request = OrderRequest::new(buyer_id, line.product_id.clone(), line.quantity);
            match self.create_order(request).await {
                Ok(order_id) => {
                    cart.remove(&line.product_id);
                    placed.push(order_id);
                }
                Err(source) => {
                    error!(error = %source, placed = placed.len(), "Checkout stopped");
                    return Err(CheckoutError { placed, source });
                }
            }
        }
        info!(orders = placed.len(), "Checkout complete");
        Ok(placed)
    }
}

impl_client_methods!(OrderClient, Order, OrderError, order);
