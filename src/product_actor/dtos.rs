#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub company_id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<u32>,
}
