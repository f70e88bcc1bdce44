use crate::actor_framework::Entity;
use crate::domain::Product;
use super::actions::{ProductAction, ProductActionResult};
use super::dtos::{ProductCreate, ProductPatch};

fn check_price(price: f64) -> Result<(), String> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(format!("Invalid price: {}", price))
    }
}

impl Entity for Product {
    type Id = String;
    type CreateParams = ProductCreate;
    type Patch = ProductPatch;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;

    fn id(&self) -> &String { &self.id }

    fn from_create_params(id: String, params: ProductCreate) -> Result<Self, String> {
        check_price(params.price)?;
        if params.name.trim().is_empty() {
            return Err("Product name is required".to_string());
        }
        Ok(Self {
            id,
            company_id: params.company_id,
            name: params.name,
            category: params.category,
            price: params.price,
            quantity: params.quantity,
        })
    }

    fn on_update(&mut self, patch: ProductPatch) -> Result<(), String> {
        if let Some(price) = patch.price {
            check_price(price)?;
            self.price = price;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        Ok(())
    }

    /// Handles product-specific actions.
    ///
    /// # Errors
    /// Returns an error if attempting to reserve more stock than available.
    fn handle_action(&mut self, action: ProductAction) -> Result<ProductActionResult, String> {
        match action {
            ProductAction::CheckStock => {
                Ok(ProductActionResult::CheckStock(self.quantity))
            }
            ProductAction::ReserveStock(amount) => {
                if self.quantity >= amount {
                    self.quantity -= amount;
                    Ok(ProductActionResult::ReserveStock(self.quantity))
                } else {
                    Err(format!("Insufficient stock: {} available, {} requested", self.quantity, amount))
                }
            }
            ProductAction::ReleaseStock(amount) => {
                self.quantity = self.quantity.saturating_add(amount);
                Ok(ProductActionResult::ReleaseStock(self.quantity))
            }
        }
    }
}
