//! Checkout and order history views.

use clap::Subcommand;

use creators_hub_core::{Order, OrderId};
use creators_hub_storefront::AppState;
use creators_hub_storefront::checkout::CheckoutForm;
use creators_hub_storefront::stores::SessionError;

#[derive(Subcommand)]
pub enum OrdersAction {
    /// Place an order from the current cart
    Checkout {
        /// Street address
        #[arg(long)]
        address: String,

        /// City
        #[arg(long)]
        city: String,

        /// Postal code
        #[arg(long = "zip")]
        postal_code: String,

        /// Country (defaults to the store's)
        #[arg(long, default_value = "")]
        country: String,
    },
    /// List your orders
    List,
    /// Show one order
    Show {
        /// Order id
        id: String,
    },
    /// Show the most recently placed order
    Last,
}

pub async fn run(state: &AppState, action: OrdersAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        OrdersAction::Checkout {
            address,
            city,
            postal_code,
            country,
        } => {
            let order_id = state
                .checkout(CheckoutForm {
                    address,
                    city,
                    postal_code,
                    country,
                })
                .await?;
            println!("Order placed successfully!");
            println!("Order id: {order_id}");
        }
        OrdersAction::List => {
            let token = require_token(state)?;
            let orders = state.client().my_orders(&token).await?;
            if orders.is_empty() {
                println!("No orders yet");
            }
            for order in &orders {
                print_order_row(state, order);
            }
        }
        OrdersAction::Show { id } => {
            let token = require_token(state)?;
            let order = state.client().order(&OrderId::new(id), &token).await?;
            print_order(state, &order);
        }
        OrdersAction::Last => match state.last_order() {
            Some(last) => {
                println!("Order {} placed {}", last.id, last.placed_at);
                for item in &last.items {
                    println!(
                        "  {:<28} x{:<4} {:>12}",
                        item.name,
                        item.quantity,
                        state.settings().format_price(item.total()),
                    );
                }
                println!(
                    "  subtotal {}  shipping {}  total {}",
                    state.settings().format_price(last.subtotal),
                    state.settings().format_price(last.shipping),
                    state.settings().format_price(last.total),
                );
            }
            None => println!("No order has been placed from this device"),
        },
    }
    Ok(())
}

fn require_token(state: &AppState) -> Result<String, SessionError> {
    state
        .session()
        .session()
        .map(|s| s.token().to_owned())
        .ok_or(SessionError::NotAuthenticated)
}

fn print_order_row(state: &AppState, order: &Order) {
    println!(
        "{:<26} {:<12} {:>12}  paid: {:<5} delivered: {}",
        order.id,
        order.status,
        state.settings().format_price(order.total_price),
        order.is_paid,
        order.is_delivered,
    );
}

fn print_order(state: &AppState, order: &Order) {
    println!("Order {}", order.id);
    println!("  status:    {}", order.status);
    println!("  paid:      {}", order.is_paid);
    println!("  delivered: {}", order.is_delivered);
    println!("  placed:    {}", order.created_at);
    for item in &order.order_items {
        println!(
            "  {:<28} x{:<4} {:>12}",
            item.name,
            item.qty,
            state.settings().format_price(item.price),
        );
    }
    println!(
        "  items {}  tax {}  shipping {}  total {}",
        state.settings().format_price(order.items_price),
        state.settings().format_price(order.tax_price),
        state.settings().format_price(order.shipping_price),
        state.settings().format_price(order.total_price),
    );
    println!(
        "  ship to: {}, {} {} {}",
        order.shipping_address.address,
        order.shipping_address.city,
        order.shipping_address.postal_code,
        order.shipping_address.country,
    );
}
