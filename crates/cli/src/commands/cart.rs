//! Cart views.
//!
//! The cart is purely local: `add` is the only subcommand that touches the
//! network, and only to look the product up.

use clap::Subcommand;

use creators_hub_core::ProductId;
use creators_hub_storefront::AppState;

#[derive(Subcommand)]
pub enum CartAction {
    /// Show the cart contents and subtotal
    Show,
    /// Add a product (an existing line gains quantity 1)
    Add {
        /// Product id
        id: String,
    },
    /// Set a line's quantity (0 removes the line)
    Update {
        /// Product id
        id: String,
        /// New quantity
        quantity: u32,
    },
    /// Remove a line
    Remove {
        /// Product id
        id: String,
    },
    /// Empty the cart
    Clear,
}

pub async fn run(state: &AppState, action: CartAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CartAction::Show => print_cart(state),
        CartAction::Add { id } => {
            let product = state.client().product(&ProductId::new(id)).await?;
            state.cart().add(&product);
            println!("Added {} to cart", product.name);
            print_cart(state);
        }
        CartAction::Update { id, quantity } => {
            state.cart().update_quantity(&ProductId::new(id), quantity);
            print_cart(state);
        }
        CartAction::Remove { id } => {
            state.cart().remove(&ProductId::new(id));
            print_cart(state);
        }
        CartAction::Clear => {
            state.cart().clear();
            println!("Cart cleared");
        }
    }
    Ok(())
}

fn print_cart(state: &AppState) {
    let lines = state.cart().lines();
    if lines.is_empty() {
        println!("Your cart is empty");
        return;
    }

    for line in &lines {
        println!(
            "{:<26} {:<28} x{:<4} {:>12}",
            line.product_id,
            line.name,
            line.quantity,
            state.settings().format_price(line.total()),
        );
    }
    println!(
        "{} item(s), subtotal {}",
        state.cart().count(),
        state.settings().format_price(state.cart().subtotal()),
    );
}
