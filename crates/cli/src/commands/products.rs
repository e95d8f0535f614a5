//! Catalog views.

use clap::Subcommand;

use creators_hub_core::ProductId;
use creators_hub_storefront::AppState;
use creators_hub_storefront::hub::ProductQuery;

#[derive(Subcommand)]
pub enum ProductsAction {
    /// List products, optionally filtered
    List {
        /// Filter by category
        #[arg(long)]
        category: Option<String>,

        /// Filter by creator niche
        #[arg(long)]
        niche: Option<String>,

        /// Only featured products
        #[arg(long)]
        featured: bool,

        /// Free-text search
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one product
    Show {
        /// Product id
        id: String,
    },
}

pub async fn run(
    state: &AppState,
    action: ProductsAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ProductsAction::List {
            category,
            niche,
            featured,
            search,
        } => {
            let query = ProductQuery {
                category,
                niche,
                featured: featured.then_some(true),
                search,
            };
            let products = state.client().products(&query).await?;

            println!("{:<26} {:<28} {:>12}  {}", "ID", "NAME", "PRICE", "CATEGORY");
            for product in &products {
                println!(
                    "{:<26} {:<28} {:>12}  {}{}",
                    product.id,
                    product.name,
                    state.settings().format_price(product.price),
                    product.category,
                    if product.is_featured { "  *featured*" } else { "" },
                );
            }
            println!("{} product(s)", products.len());
        }
        ProductsAction::Show { id } => {
            let product = state.client().product(&ProductId::new(id)).await?;
            println!("{}", product.name);
            println!("  id:        {}", product.id);
            println!(
                "  price:     {}",
                state.settings().format_price(product.price)
            );
            println!("  brand:     {}", product.brand);
            println!("  category:  {}", product.category);
            println!("  niche:     {}", product.niche.join(", "));
            if let Some(stock) = product.count_in_stock {
                println!("  in stock:  {stock}");
            }
            if !product.description.is_empty() {
                println!("\n{}", product.description);
            }
        }
    }
    Ok(())
}
