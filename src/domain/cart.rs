use std::collections::HashMap;
use super::product::Product;

/// One product line in a buyer's cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product_id: String,
    pub quantity: u32,
}

/// A buyer's cart. Lines keep the order in which products were first added.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds units of a product, merging with an existing line.
    pub fn add(&mut self, product_id: impl Into<String>, quantity: u32) {
        if quantity == 0 {
            return;
        }
        let product_id = product_id.into();
        match self.lines.iter_mut().find(|line| line.product_id == product_id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(CartLine { product_id, quantity }),
        }
    }

    /// Sets the quantity of a line; zero removes it.
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
            return;
        }
        match self.lines.iter_mut().find(|line| line.product_id == product_id) {
            Some(line) => line.quantity = quantity,
            None => self.lines.push(CartLine { product_id: product_id.to_string(), quantity }),
        }
    }

    pub fn remove(&mut self, product_id: &str) {
        self.lines.retain(|line| line.product_id != product_id);
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of `price * quantity` over lines whose product is known.
    pub fn subtotal(&self, products: &[Product]) -> f64 {
        let prices: HashMap<&str, f64> = products.iter().map(|p| (p.id.as_str(), p.price)).collect();
        self.lines
            .iter()
            .filter_map(|line| prices.get(line.product_id.as_str()).map(|price| price * f64::from(line.quantity)))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_merges_and_zero_removes() {
        let mut cart = Cart::new();
        cart.add("p1", 2);
        cart.add("p2", 1);
        cart.add("p1", 3);
        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.lines()[0], CartLine { product_id: "p1".into(), quantity: 5 });

        cart.set_quantity("p2", 0);
        assert_eq!(cart.lines().len(), 1);
        cart.add("p3", 0);
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_subtotal_ignores_unknown_products() {
        let mut cart = Cart::new();
        cart.add("p1", 4);
        cart.add("gone", 10);
        let products = vec![Product::new("p1", "acme", "Bolt", 2.5, 100)];
        assert_eq!(cart.subtotal(&products), 10.0);
    }
}
