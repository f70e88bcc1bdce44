use chrono::Utc;
use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderStatus};
use super::actions::{OrderAction, OrderActionResult};

impl Entity for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    type Patch = (); // Orders change only through actions
    type Action = OrderAction;
    type ActionResult = OrderActionResult;

    fn id(&self) -> &String { &self.id }

    /// Creates a new Order from creation parameters.
    ///
    /// The order starts out `Pending` and is stamped with the current time.
    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, String> {
        if params.quantity == 0 {
            return Err("Order quantity must be at least 1".to_string());
        }
        Ok(Self {
            id,
            buyer_id: params.buyer_id,
            company_id: params.company_id,
            product_id: params.product_id,
            quantity: params.quantity,
            total: params.total,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), String> {
        Ok(())
    }

    fn handle_action(&mut self, action: OrderAction) -> Result<OrderActionResult, String> {
        match action {
            OrderAction::SetStatus(status) => {
                let previous = std::mem::replace(&mut self.status, status);
                Ok(OrderActionResult::SetStatus(previous))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_order() -> Order {
        let params = OrderCreate {
            buyer_id: "user_1".into(),
            company_id: "acme".into(),
            product_id: "p1".into(),
            quantity: 2,
            total: 10.0,
        };
        Order::from_create_params("order_1".into(), params).unwrap()
    }

    #[test]
    fn test_any_status_can_follow_any_status() {
        for from in OrderStatus::ALL {
            for to in OrderStatus::ALL {
                let mut order = pending_order();
                order.status = from;
                let result = order.handle_action(OrderAction::SetStatus(to)).unwrap();
                assert_eq!(result, OrderActionResult::SetStatus(from));
                assert_eq!(order.status, to);
            }
        }
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let params = OrderCreate {
            buyer_id: "user_1".into(),
            company_id: "acme".into(),
            product_id: "p1".into(),
            quantity: 0,
            total: 0.0,
        };
        assert!(Order::from_create_params("order_1".into(), params).is_err());
        assert_eq!(pending_order().status, OrderStatus::Pending);
    }
}
