mod domain;
mod clients;
mod config;

mod app_system;

#[cfg(test)]
mod mock_framework;

mod actor_framework;
mod user_actor;
mod product_actor;
mod order_actor;
mod permissions;
mod auth;

use tracing::{debug, error, info, warn, Instrument};
use crate::app_system::{setup_tracing, AppError, MarketplaceSystem, SeedData};
use crate::auth::{HttpLoginTransport, LoginClient, LoginError, LoginRequest, SessionContext};
use crate::clients::OrderQuery;
use crate::config::AppConfig;
use crate::domain::{Capability, Cart, OrderStatus, Product, ProductFilter, User, UserPatch, UserType};
use crate::permissions::CapabilityEditor;
use crate::product_actor::ProductPatch;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = AppConfig::from_env()?;
    info!(locale = %config.locale, backend = %config.backend_url, "Starting marketplace console");

    let system = MarketplaceSystem::new(&config, SeedData::mock());
    let session = match &config.session_path {
        Some(path) => SessionContext::persistent(path).await?,
        None => SessionContext::in_memory(),
    };

    // Admin console: review the company team, then hand a staff member catalog rights
    let span = tracing::info_span!("capability_editing");
    async {
        let team = system.user_client.list_users(Some(UserType::Company)).await?;
        for member in &team {
            info!(user_id = %member.id, name = %member.name, role = ?member.role, granted = member.capabilities.len(), "Company member");
        }

        let mut editor = CapabilityEditor::open(&system.user_client, "user_acme_staff").await?;
        info!(name = %editor.user().name, granted = editor.working().len(), "Editing capabilities");
        editor.toggle(Capability::new("create_products")?);
        editor.toggle(Capability::new("view_products")?);
        editor.set_group("inventory", true)?;
        for group in editor.checklist() {
            let granted: Vec<&str> = group
                .items
                .iter()
                .filter(|item| item.granted)
                .map(|item| item.capability.as_str())
                .collect();
            debug!(group = group.label, ?granted, "Checklist");
        }

        if editor.is_dirty() {
            let diff = editor.diff();
            info!(added = diff.added.len(), removed = diff.removed.len(), "Saving capability changes");
            let saved = editor.save().await?;
            let granted: Vec<&str> = saved.capabilities.iter().map(Capability::as_str).collect();
            info!(user_id = %saved.user_id, ?granted, "Staff capabilities updated");
        } else {
            editor.cancel();
        }

        let patch = UserPatch { role: Some(Some("Catalog manager".to_string())), ..Default::default() };
        let staff = system.user_client.update_user("user_acme_staff".to_string(), patch).await?;
        info!(user_id = %staff.id, role = ?staff.role, "Staff role updated");

        // Preview broader access for the owner without committing it
        let mut preview = CapabilityEditor::open(&system.user_client, "user_acme_owner").await?;
        preview.set_group("users", true)?;
        let manage = Capability::new("manage_permissions")?;
        info!(manage_permissions = preview.is_granted(&manage), "Previewed owner access");
        preview.cancel();

        let recruit = User::new("Quoc Le", "quoc@acme.test")
            .with_type(UserType::Company)
            .with_company("company_acme")
            .with_role("Sales");
        let recruit_id = system.user_client.create_user(recruit).await?;
        info!(user_id = %recruit_id, "Company member added");
        Ok::<_, AppError>(())
    }
    .instrument(span)
    .await?;

    // Seller console: list a new product and adjust its price
    let span = tracing::info_span!("catalog");
    let rebar_id = async {
        let rebar = Product::new("", "company_acme", "Rebar 12mm", 9.8, 600).with_category("metals");
        let id = system.product_client.create_product(rebar).await?;
        let patch = ProductPatch { price: Some(9.5), ..Default::default() };
        let updated = system.product_client.update_product(id.clone(), patch).await?;
        info!(product_id = %id, price = updated.price, "Product listed");
        Ok::<_, AppError>(id)
    }
    .instrument(span)
    .await?;

    // Storefront: a buyer checks out a cart, the company ships the first order
    let span = tracing::info_span!("checkout");
    let order_result = async {
        let mut cart = Cart::new();
        cart.add("product_pipe", 20);
        cart.add("product_cement", 50);
        cart.add(rebar_id.clone(), 30);
        cart.set_quantity("product_cement", 40);
        let catalog = system.product_client.list_products(ProductFilter::default()).await?;
        info!(subtotal = cart.subtotal(&catalog), "Cart ready");
        let order_ids = system.order_client.checkout("user_buyer", &mut cart).await?;
        if let Some(first) = order_ids.first() {
            system.order_client.set_status(first.clone(), OrderStatus::Shipped).await?;
        }

        let query = OrderQuery { company_id: Some("company_acme".to_string()), ..Default::default() };
        for order in system.order_client.list_orders(query).await? {
            info!(order_id = %order.id, status = %order.status, tag = order.status.tag_color(), total = order.total, "Company order");
        }
        Ok::<_, AppError>(order_ids)
    }
    .instrument(span)
    .await;

    match order_result {
        Ok(order_ids) => info!(orders = ?order_ids, "Checkout processed successfully"),
        Err(e) => error!(error = %e, "Checkout failed"),
    }

    // Login against the real backend only when credentials are supplied
    if let (Ok(email), Ok(password)) = (std::env::var("MARKET_LOGIN_EMAIL"), std::env::var("MARKET_LOGIN_PASSWORD")) {
        let transport = HttpLoginTransport::new(config.backend_url.clone(), config.request_timeout)?;
        let login = LoginClient::new(transport, session.clone(), config.locale.clone());
        if session.is_authenticated().await {
            let login_page = login.logout().await?;
            info!(%login_page, "Stored session signed out");
        }

        let request = LoginRequest::user(email, password).remember(config.session_path.is_some());
        match login.login(request).await {
            Ok(outcome) => info!(redirect_to = %outcome.redirect_to, "Logged in"),
            Err(LoginError::Validation(errors)) => {
                warn!(email = errors.has("email"), password = errors.has("password"), %errors, "Login form rejected")
            }
            Err(e) => warn!(message = %e.display_message(), "Login failed"),
        }
    }

    // Shutdown system gracefully
    system.shutdown().await?;

    match session.current().await {
        Some(current) => info!(
            user_type = %current.user_type(),
            has_token = session.token().await.is_some(),
            "Application completed with an active session"
        ),
        None => info!("Application completed successfully"),
    }
    Ok(())
}
