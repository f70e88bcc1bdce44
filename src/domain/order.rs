use std::fmt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle label of an order.
///
/// Statuses are labels only: any status can replace any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    #[allow(dead_code)]
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
        OrderStatus::Refunded,
    ];

    /// Tag color used by the consoles when listing orders.
    pub fn tag_color(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "orange",
            OrderStatus::Confirmed => "blue",
            OrderStatus::Processing => "cyan",
            OrderStatus::Shipped => "geekblue",
            OrderStatus::Delivered => "green",
            OrderStatus::Cancelled => "red",
            OrderStatus::Refunded => "purple",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
        };
        f.write_str(label)
    }
}

/// Represents a purchase of one product by a buyer from a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub buyer_id: String,
    pub company_id: String,
    pub product_id: String,
    pub quantity: u32,
    pub total: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Params for creating a new order. The total is computed by the caller.
#[derive(Debug)]
pub struct OrderCreate {
    pub buyer_id: String,
    pub company_id: String,
    pub product_id: String,
    pub quantity: u32,
    pub total: f64,
}

/// What a buyer asks for; company and price are resolved from the product.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub buyer_id: String,
    pub product_id: String,
    pub quantity: u32,
}

impl OrderRequest {
    pub fn new(buyer_id: impl Into<String>, product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            buyer_id: buyer_id.into(),
            product_id: product_id.into(),
            quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&OrderStatus::Shipped).unwrap(), "\"shipped\"");
        assert_eq!(OrderStatus::Cancelled.to_string(), "cancelled");
        assert_eq!(OrderStatus::Delivered.tag_color(), "green");
    }
}
