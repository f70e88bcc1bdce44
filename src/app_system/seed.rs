//! Mock records loaded into the actors at startup.

use crate::domain::{Capability, CapabilitySet, Product, User, UserType, CATALOG};

fn capabilities(names: &[&str]) -> CapabilitySet {
    names.iter().filter_map(|name| Capability::new(*name).ok()).collect()
}

fn all_capabilities() -> CapabilitySet {
    CATALOG.iter().flat_map(|group| group.iter()).collect()
}

pub fn users() -> Vec<User> {
    vec![
        User::new("Platform Admin", "admin@market.test")
            .with_id("user_admin")
            .with_type(UserType::Admin)
            .with_role("Super admin")
            .with_capabilities(all_capabilities()),
        User::new("Linh Tran", "linh@acme.test")
            .with_id("user_acme_owner")
            .with_type(UserType::Company)
            .with_company("company_acme")
            .with_role("Owner")
            .with_capabilities(capabilities(&[
                "view_products",
                "create_products",
                "edit_products",
                "view_orders",
                "update_order_status",
                "view_company",
                "edit_company",
            ])),
        User::new("Minh Pham", "minh@acme.test")
            .with_id("user_acme_staff")
            .with_type(UserType::Company)
            .with_company("company_acme")
            .with_role("Warehouse staff")
            .with_capabilities(capabilities(&["view_products"])),
        User::new("Hoa Nguyen", "hoa@buyer.test")
            .with_id("user_buyer")
            .with_type(UserType::User),
    ]
}

pub fn products() -> Vec<Product> {
    vec![
        Product::new("product_pipe", "company_acme", "Galvanized Steel Pipe", 12.5, 400).with_category("metals"),
        Product::new("product_cement", "company_acme", "Portland Cement 50kg", 7.25, 1200).with_category("building"),
        Product::new("product_bolt", "company_globex", "Hex Bolt M12", 0.35, 25000).with_category("hardware"),
    ]
}
