//! Admin console views.
//!
//! Every subcommand requires an admin session. The role check below is a
//! UX gate, not a trust boundary - the backend re-authorizes the bearer
//! token on every call.

use clap::Subcommand;
use rust_decimal::Decimal;

use creators_hub_admin::AdminClient;
use creators_hub_core::{OrderId, ProductId, Role, UserId};
use creators_hub_storefront::AppState;
use creators_hub_storefront::hub::{ProductQuery, types::ProductPayload};
use creators_hub_storefront::models::Session;
use creators_hub_storefront::stores::SessionError;

#[derive(Subcommand)]
pub enum AdminAction {
    /// List the full catalog
    Products,
    /// Add a product
    ProductAdd {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: Decimal,
        #[arg(long, default_value = "")]
        image: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        category: String,
        #[arg(long, default_value = "")]
        brand: String,
        /// Creator niches (repeatable)
        #[arg(long)]
        niche: Vec<String>,
        #[arg(long)]
        featured: bool,
        #[arg(long)]
        stock: Option<u32>,
    },
    /// Update a product (unset flags keep current values)
    ProductUpdate {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<Decimal>,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        niche: Vec<String>,
        #[arg(long)]
        featured: Option<bool>,
        #[arg(long)]
        stock: Option<u32>,
    },
    /// Delete a product
    ProductDelete { id: String },
    /// List all orders
    Orders,
    /// Mark an order as delivered
    Deliver { id: String },
    /// List customers and team members
    Customers,
    /// Change a user's role (password re-confirmation required)
    SetRole {
        id: String,
        /// `user` or `admin`
        role: Role,
        /// Your password, re-confirmed by the backend
        #[arg(short, long)]
        password: String,
    },
    /// Delete a user account (password re-confirmation required)
    DeleteUser {
        id: String,
        /// Your password, re-confirmed by the backend
        #[arg(short, long)]
        password: String,
    },
    /// Show store settings
    Settings,
    /// Update store settings (unset flags keep current values)
    SettingsUpdate {
        #[arg(long)]
        store_name: Option<String>,
        /// Currency code (USD, EUR, GBP, NGN, ...)
        #[arg(long)]
        currency: Option<String>,
        #[arg(long)]
        support_email: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    /// Show the analytics dashboard
    Analytics,
    /// Upload an image, printing the hosted URL
    Upload {
        /// Path to the image file
        path: std::path::PathBuf,
    },
}

pub async fn run(state: &AppState, action: AdminAction) -> Result<(), Box<dyn std::error::Error>> {
    let session = require_admin(state)?;
    let token = session.token().to_owned();
    let client = AdminClient::new(state.config());

    match action {
        AdminAction::Products => {
            let products = state.client().products(&ProductQuery::default()).await?;
            for product in &products {
                println!(
                    "{:<26} {:<28} {:>12}  stock: {}",
                    product.id,
                    product.name,
                    state.settings().format_price(product.price),
                    product
                        .count_in_stock
                        .map_or_else(|| "-".to_owned(), |n| n.to_string()),
                );
            }
        }
        AdminAction::ProductAdd {
            name,
            price,
            image,
            description,
            category,
            brand,
            niche,
            featured,
            stock,
        } => {
            let payload = ProductPayload {
                name,
                price,
                image,
                description,
                category,
                brand,
                niche,
                is_featured: featured,
                count_in_stock: stock,
            };
            let product = client.create_product(&payload, &token).await?;
            println!("Created {} ({})", product.name, product.id);
        }
        AdminAction::ProductUpdate {
            id,
            name,
            price,
            image,
            description,
            category,
            brand,
            niche,
            featured,
            stock,
        } => {
            let id = ProductId::new(id);
            // Start from the current document so unset flags keep values.
            let current = state.client().product(&id).await?;
            let payload = ProductPayload {
                name: name.unwrap_or(current.name),
                price: price.unwrap_or(current.price),
                image: image.unwrap_or(current.image),
                description: description.unwrap_or(current.description),
                category: category.unwrap_or(current.category),
                brand: brand.unwrap_or(current.brand),
                niche: if niche.is_empty() { current.niche } else { niche },
                is_featured: featured.unwrap_or(current.is_featured),
                count_in_stock: stock.or(current.count_in_stock),
            };
            let product = client.update_product(&id, &payload, &token).await?;
            println!("Updated {} ({})", product.name, product.id);
        }
        AdminAction::ProductDelete { id } => {
            client.delete_product(&ProductId::new(id), &token).await?;
            println!("Product deleted");
        }
        AdminAction::Orders => {
            let orders = client.orders(&token).await?;
            for order in &orders {
                let customer = order
                    .user
                    .as_ref()
                    .map_or("-", |u| u.name.as_str());
                println!(
                    "{:<26} {:<20} {:<12} {:>12}  delivered: {}",
                    order.id,
                    customer,
                    order.status,
                    state.settings().format_price(order.total_price),
                    order.is_delivered,
                );
            }
            println!("{} order(s)", orders.len());
        }
        AdminAction::Deliver { id } => {
            let order = client.mark_delivered(&OrderId::new(id), &token).await?;
            println!("Order {} marked delivered", order.id);
        }
        AdminAction::Customers => {
            let users = client.users(&token).await?;
            for user in &users {
                println!("{:<26} {:<28} {:<28} {}", user.id, user.name, user.email, user.role);
            }
            println!("{} account(s)", users.len());
        }
        AdminAction::SetRole { id, role, password } => {
            client
                .update_user_role(&session.user_id, &UserId::new(id), role, &password, &token)
                .await?;
            println!("User role updated to {role}");
        }
        AdminAction::DeleteUser { id, password } => {
            client
                .delete_user(&session.user_id, &UserId::new(id), &password, &token)
                .await?;
            println!("User deleted");
        }
        AdminAction::Settings => {
            let settings = state.settings().load().await?;
            println!("{}", settings.store_name);
            println!("  currency:       {}", settings.currency);
            println!("  support email:  {}", settings.support_email);
            println!("  address:        {}", settings.address);
        }
        AdminAction::SettingsUpdate {
            store_name,
            currency,
            support_email,
            address,
        } => {
            // Settings replace wholesale: start from the current document.
            let mut settings = state.settings().load().await?;
            if let Some(store_name) = store_name {
                settings.store_name = store_name;
            }
            if let Some(currency) = currency {
                settings.currency = currency.into();
            }
            if let Some(support_email) = support_email {
                settings.support_email = support_email;
            }
            if let Some(address) = address {
                settings.address = address;
            }

            client.update_settings(&settings, &token).await?;
            let refreshed = state.settings().refresh().await?;
            println!(
                "Settings updated; prices now formatted as {}",
                refreshed.currency.format_amount(Decimal::new(123_456, 2)),
            );
        }
        AdminAction::Analytics => {
            let report = client.analytics(&token).await?;

            println!("Revenue trend:");
            for day in &report.daily_revenue {
                println!(
                    "  {:<12} {}",
                    day.date,
                    state.settings().format_price(day.revenue)
                );
            }
            println!("Top products:");
            for product in &report.top_products {
                println!(
                    "  {:<28} {:>5} sold  {}",
                    product.name,
                    product.sales,
                    state.settings().format_price(product.revenue),
                );
            }
            println!("Orders by status:");
            for bucket in &report.order_status {
                println!("  {:<12} {}", bucket.name, bucket.value);
            }
        }
        AdminAction::Upload { path } => {
            let filename = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("upload.bin")
                .to_owned();
            let bytes = tokio::fs::read(&path).await?;
            let url = state.client().upload_image(&filename, bytes).await?;
            println!("{url}");
        }
    }
    Ok(())
}

/// UX gate: admin commands need an admin session.
fn require_admin(state: &AppState) -> Result<Session, Box<dyn std::error::Error>> {
    let session = state
        .session()
        .session()
        .ok_or(SessionError::NotAuthenticated)?;
    if !session.is_admin() {
        return Err("admin role required".into());
    }
    Ok(session)
}
