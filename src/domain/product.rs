use serde::{Deserialize, Serialize};

/// A listing offered by a selling company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub company_id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    /// Units in stock.
    pub quantity: u32,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        company_id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        quantity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            company_id: company_id.into(),
            name: name.into(),
            category: String::from("general"),
            price,
            quantity,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

/// Criteria for listing products. Empty fields match everything.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub company_id: Option<String>,
    pub category: Option<String>,
    /// Case-insensitive substring of the product name.
    pub search: Option<String>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(company_id) = &self.company_id {
            if &product.company_id != company_id {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if !product.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.trim().to_lowercase();
            if !needle.is_empty() && !product.name.to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }
}
