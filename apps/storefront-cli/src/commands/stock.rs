//! # Stock Command
//!
//! Shows live stock for a product, and what the cart could still take.

use std::fmt::Write as _;

use clap::Args;
use storefront_client::{CatalogClient, Transport};
use storefront_core::stock::max_stock_for_size;
use storefront_core::QuantityControls;
use storefront_store::{CartStore, KeyValueStore};

use super::describe_stock;
use crate::error::CliError;

#[derive(Debug, Clone, Args)]
pub struct StockArgs {
    pub product_id: String,

    /// Only show this size
    #[arg(long)]
    pub size: Option<String>,
}

/// ```text
/// Hoodie
///   M: 4 in stock (2 in cart, +/-)
///   L: out of stock
/// ```
pub async fn run<S, T>(
    args: &StockArgs,
    store: &CartStore<S>,
    catalog: &CatalogClient<T>,
) -> Result<String, CliError>
where
    S: KeyValueStore,
    T: Transport + ?Sized,
{
    let products = catalog.fetch_products().await?;
    let product = products
        .iter()
        .find(|p| p.id == args.product_id)
        .ok_or_else(|| CliError::not_found(format!("Product not found: {}", args.product_id)))?;

    let labels: Vec<String> = match &args.size {
        Some(size) => vec![size.clone()],
        None => product.size_labels().into_iter().map(str::to_string).collect(),
    };

    let mut out = if product.name.is_empty() {
        product.id.clone()
    } else {
        product.name.clone()
    };
    if labels.is_empty() {
        out.push_str("\n  no sizes listed");
    }

    for label in &labels {
        let max_stock = max_stock_for_size(&product.id, label, &products);
        let _ = write!(out, "\n  {label}: {}", describe_stock(max_stock));
        if let Some(line) = store.cart().find(&product.id, label) {
            let controls = QuantityControls::new(line.quantity, max_stock);
            let _ = write!(
                out,
                " ({} in cart{})",
                line.quantity,
                if controls.can_increment { ", can add more" } else { "" }
            );
        }
    }
    Ok(out)
}
