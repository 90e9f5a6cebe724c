//! # Cart Commands
//!
//! Cart manipulation against the persisted cart.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐                         │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │                         │
//! │  │  Cart    │     │          │     │          │                         │
//! │  └──────────┘     └──────────┘     └──────────┘                         │
//! │       ▲                │                │                               │
//! │       │           cart add         success clears                       │
//! │       │           cart update      the cart                             │
//! │       │           cart remove           │                               │
//! │       │                │                │                               │
//! │       └── cart clear ──┘◄───────────────┘                               │
//! │                                                                         │
//! │  Adds and clamped updates check live stock from the catalog.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Write as _;

use clap::{Args, Subcommand};
use storefront_client::{CatalogClient, Transport};
use storefront_core::money::{discounted_unit_price, line_total};
use storefront_core::stock::{clamp_quantity, max_stock_for, max_stock_for_size};
use storefront_core::{CartLine, CatalogProduct, QuantityControls};
use storefront_store::{CartStore, KeyValueStore};
use tracing::{debug, warn};

use super::{describe_stock, line_label};
use crate::error::CliError;

#[derive(Debug, Args)]
pub struct CartCommand {
    #[command(subcommand)]
    pub command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum CartSubcommand {
    /// List cart lines with stock and totals
    Show,
    /// Add a product size to the cart
    Add(AddArgs),
    /// Set the quantity of a cart line
    Update(UpdateArgs),
    /// Remove a cart line
    Remove(RemoveArgs),
    /// Empty the cart
    Clear,
}

#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    pub product_id: String,

    /// Size label as shown by `stock`
    #[arg(long)]
    pub size: String,

    #[arg(long, default_value_t = 1)]
    pub quantity: u32,
}

#[derive(Debug, Clone, Args)]
pub struct UpdateArgs {
    pub product_id: String,

    #[arg(long)]
    pub size: String,

    pub quantity: u32,

    /// Store the quantity as given, without checking stock
    #[arg(long)]
    pub no_clamp: bool,
}

#[derive(Debug, Clone, Args)]
pub struct RemoveArgs {
    pub product_id: String,

    #[arg(long)]
    pub size: String,
}

/// Runs a cart subcommand.
pub async fn run<S, T>(
    command: CartCommand,
    store: &mut CartStore<S>,
    catalog: &CatalogClient<T>,
    currency: &str,
) -> Result<String, CliError>
where
    S: KeyValueStore,
    T: Transport + ?Sized,
{
    match command.command {
        CartSubcommand::Show => Ok(show(store, catalog, currency).await),
        CartSubcommand::Add(args) => add(store, catalog, &args, currency).await,
        CartSubcommand::Update(args) => Ok(update(store, catalog, &args).await),
        CartSubcommand::Remove(args) => Ok(remove(store, &args)),
        CartSubcommand::Clear => {
            store.clear_cart();
            Ok("Cart cleared.".to_string())
        }
    }
}

/// Renders the cart.
///
/// ```text
/// Hoodie (M)  x3  @ 180.00 LE  = 540.00 LE  [4 in stock, +/-]
/// Cap (One)   x1  @ 50.00 LE   = 50.00 LE   [stock unknown, fixed]
///
/// Items: 4
/// Total: 590.00 LE
/// ```
///
/// Stock comes from a best-effort catalog read. When it fails every line
/// shows unknown stock.
pub async fn show<S, T>(store: &CartStore<S>, catalog: &CatalogClient<T>, currency: &str) -> String
where
    S: KeyValueStore,
    T: Transport + ?Sized,
{
    let cart = store.cart();
    if cart.is_empty() {
        return "Your cart is empty.".to_string();
    }

    let products = fetch_catalog_or_empty(catalog).await;

    let mut out = String::new();
    for line in cart {
        let max_stock = max_stock_for(line, &products);
        let controls = QuantityControls::new(line.quantity, max_stock);
        let _ = writeln!(
            out,
            "{}  x{}  @ {} {currency}  = {} {currency}  [{}, {}]",
            line_label(line),
            line.quantity,
            discounted_unit_price(line.price, line.discount),
            line_total(line),
            describe_stock(max_stock),
            describe_controls(&controls),
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Items: {}", cart.total_quantity());
    let _ = write!(out, "Total: {} {currency}", store.total());
    out
}

/// Adds `quantity` of a size to the cart, capped by what is left in stock.
///
/// The size is matched against the catalog ignoring case, and the cart line
/// takes the catalog's spelling so later adds merge with it.
pub async fn add<S, T>(
    store: &mut CartStore<S>,
    catalog: &CatalogClient<T>,
    args: &AddArgs,
    currency: &str,
) -> Result<String, CliError>
where
    S: KeyValueStore,
    T: Transport + ?Sized,
{
    let product = catalog.fetch_product(&args.product_id).await?;
    let (label, available) = resolve_size(&product, &args.size)?;

    let in_cart = store
        .cart()
        .find(&product.id, &label)
        .map_or(0, |line| line.quantity);
    let remaining = available.saturating_sub(in_cart);
    if remaining == 0 {
        return Err(CliError::validation(format!(
            "All {available} of size {label} are already in your cart."
        )));
    }

    let quantity = clamp_quantity(args.quantity, Some(remaining));
    if quantity < args.quantity {
        debug!(requested = args.quantity, quantity, "Add clamped to stock");
    }
    store.add_to_cart(CartLine::from_catalog(&product, &label, quantity));

    let mut out = match store.last_added() {
        Some(event) => format!(
            "Added {} x {} to cart.",
            event.line.quantity,
            line_label(&event.line)
        ),
        None => "Added to cart.".to_string(),
    };
    if quantity < args.quantity {
        let _ = write!(out, " Only {remaining} more available.");
    }
    let _ = write!(
        out,
        "\nCart: {} items, {} {currency}",
        store.cart().total_quantity(),
        store.total()
    );
    Ok(out)
}

/// Sets a line's quantity.
///
/// Clamped to live stock unless `--no-clamp` is given, in which case the
/// value is stored verbatim (zero included). Updating a line that isn't
/// there is not an error.
pub async fn update<S, T>(
    store: &mut CartStore<S>,
    catalog: &CatalogClient<T>,
    args: &UpdateArgs,
) -> String
where
    S: KeyValueStore,
    T: Transport + ?Sized,
{
    let Some(label) = store
        .cart()
        .find(&args.product_id, &args.size)
        .map(line_label)
    else {
        store.update_quantity(&args.product_id, &args.size, args.quantity);
        return "Nothing to update.".to_string();
    };

    let quantity = if args.no_clamp {
        args.quantity
    } else {
        let products = fetch_catalog_or_empty(catalog).await;
        let max_stock = max_stock_for_size(&args.product_id, &args.size, &products);
        clamp_quantity(args.quantity, max_stock)
    };

    store.update_quantity(&args.product_id, &args.size, quantity);
    format!("Updated {label} to {quantity}.")
}

/// Removes a line. Removing a line that isn't there is not an error.
pub fn remove<S: KeyValueStore>(store: &mut CartStore<S>, args: &RemoveArgs) -> String {
    if store.remove_from_cart(&args.product_id, &args.size) {
        format!("Removed size {} of {} from your cart.", args.size, args.product_id)
    } else {
        "Nothing to remove.".to_string()
    }
}

// =============================================================================
// Helpers
// =============================================================================

async fn fetch_catalog_or_empty<T: Transport + ?Sized>(
    catalog: &CatalogClient<T>,
) -> Vec<CatalogProduct> {
    match catalog.fetch_products().await {
        Ok(products) => products,
        Err(e) => {
            warn!(error = %e, "Catalog unavailable; stock unknown");
            Vec::new()
        }
    }
}

/// Catalog label and stock for a requested size.
fn resolve_size(product: &CatalogProduct, size: &str) -> Result<(String, u32), CliError> {
    let Some(entry) = product.find_size(size) else {
        let labels = product.size_labels();
        let available = if labels.is_empty() {
            "none".to_string()
        } else {
            labels.join(", ")
        };
        return Err(CliError::not_found(format!(
            "Size {size} is not available for {}. Sizes: {available}",
            product.name
        )));
    };

    let label = entry.label().unwrap_or(size).to_string();
    if entry.quantity == 0 {
        return Err(CliError::validation(format!("Size {label} is out of stock.")));
    }
    Ok((label, entry.quantity))
}

fn describe_controls(controls: &QuantityControls) -> &'static str {
    match (controls.can_increment, controls.can_decrement) {
        (true, true) => "+/-",
        (true, false) => "+",
        (false, true) => "-",
        (false, false) => "fixed",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{catalog_client, serving_catalog};
    use crate::error::ErrorCode;
    use storefront_client::transport::MockTransport;
    use storefront_client::TransportError;
    use storefront_store::MemoryStore;

    fn add_args(product_id: &str, size: &str, quantity: u32) -> AddArgs {
        AddArgs {
            product_id: product_id.to_string(),
            size: size.to_string(),
            quantity,
        }
    }

    fn offline_catalog() -> CatalogClient<MockTransport> {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .returning(|_, _| Err(TransportError::Network("connection refused".to_string())));
        catalog_client(transport)
    }

    #[tokio::test]
    async fn test_add_uses_catalog_spelling_of_size() {
        let catalog = catalog_client(serving_catalog());
        let mut store = CartStore::open(MemoryStore::new());

        let out = add(&mut store, &catalog, &add_args("p1", "m", 2), "LE")
            .await
            .unwrap();

        let line = store.cart().find("p1", "M").unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.size_id.as_deref(), Some("s1"));
        assert!(out.starts_with("Added 2 x Hoodie (M) to cart."));
        assert!(out.ends_with("Cart: 2 items, 360.00 LE"));
    }

    #[tokio::test]
    async fn test_add_is_capped_by_what_is_left() {
        let catalog = catalog_client(serving_catalog());
        let mut store = CartStore::open(MemoryStore::new());

        add(&mut store, &catalog, &add_args("p1", "M", 3), "LE")
            .await
            .unwrap();
        let out = add(&mut store, &catalog, &add_args("p1", "M", 5), "LE")
            .await
            .unwrap();

        assert_eq!(store.cart().find("p1", "M").unwrap().quantity, 4);
        assert!(out.contains("Only 1 more available."));

        let err = add(&mut store, &catalog, &add_args("p1", "M", 1), "LE")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_add_rejects_sold_out_and_unknown_sizes() {
        let catalog = catalog_client(serving_catalog());
        let mut store = CartStore::open(MemoryStore::new());

        let sold_out = add(&mut store, &catalog, &add_args("p1", "L", 1), "LE")
            .await
            .unwrap_err();
        assert_eq!(sold_out.message, "Size L is out of stock.");

        let unknown = add(&mut store, &catalog, &add_args("p1", "XL", 1), "LE")
            .await
            .unwrap_err();
        assert_eq!(unknown.code, ErrorCode::NotFound);
        assert!(unknown.message.ends_with("Sizes: M, L"));

        let missing = add(&mut store, &catalog, &add_args("p9", "M", 1), "LE")
            .await
            .unwrap_err();
        assert_eq!(missing.code, ErrorCode::NotFound);

        assert!(store.cart().is_empty());
    }

    #[tokio::test]
    async fn test_show_lists_lines_with_stock_and_controls() {
        let catalog = catalog_client(serving_catalog());
        let mut store = CartStore::open(MemoryStore::new());
        add(&mut store, &catalog, &add_args("p1", "M", 4), "LE")
            .await
            .unwrap();

        let out = show(&store, &catalog, "LE").await;
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(
            lines[0],
            "Hoodie (M)  x4  @ 180.00 LE  = 720.00 LE  [4 in stock, -]"
        );
        assert_eq!(lines[2], "Items: 4");
        assert_eq!(lines[3], "Total: 720.00 LE");
    }

    #[tokio::test]
    async fn test_show_without_catalog_reports_unknown_stock() {
        let mut store = CartStore::open(MemoryStore::new());
        store.add_to_cart(CartLine::from_catalog(
            &storefront_core::CatalogProduct {
                id: "p2".to_string(),
                name: "Cap".to_string(),
                price: Some(storefront_core::Money::from_major(50)),
                discount: None,
                product_sizes: None,
            },
            "One",
            2,
        ));

        let out = show(&store, &offline_catalog(), "LE").await;
        assert!(out.starts_with("Cap (One)  x2  @ 50.00 LE  = 100.00 LE  [stock unknown, -]"));
    }

    #[tokio::test]
    async fn test_show_empty_cart_skips_catalog() {
        let mut transport = MockTransport::new();
        transport.expect_get().never();
        let store = CartStore::open(MemoryStore::new());

        let out = show(&store, &catalog_client(transport), "LE").await;
        assert_eq!(out, "Your cart is empty.");
    }

    #[tokio::test]
    async fn test_update_clamps_unless_told_not_to() {
        let catalog = catalog_client(serving_catalog());
        let mut store = CartStore::open(MemoryStore::new());
        add(&mut store, &catalog, &add_args("p1", "M", 1), "LE")
            .await
            .unwrap();

        let args = UpdateArgs {
            product_id: "p1".to_string(),
            size: "M".to_string(),
            quantity: 10,
            no_clamp: false,
        };
        let out = update(&mut store, &catalog, &args).await;
        assert_eq!(out, "Updated Hoodie (M) to 4.");

        let verbatim = UpdateArgs {
            quantity: 0,
            no_clamp: true,
            ..args
        };
        update(&mut store, &offline_catalog(), &verbatim).await;
        assert_eq!(store.cart().find("p1", "M").unwrap().quantity, 0);
    }

    #[tokio::test]
    async fn test_update_of_missing_line_is_a_no_op() {
        let mut transport = MockTransport::new();
        transport.expect_get().never();
        let mut store = CartStore::open(MemoryStore::new());
        let command = CartCommand {
            command: CartSubcommand::Update(UpdateArgs {
                product_id: "p1".to_string(),
                size: "M".to_string(),
                quantity: 2,
                no_clamp: false,
            }),
        };

        let out = run(command, &mut store, &catalog_client(transport), "LE")
            .await
            .unwrap();
        assert_eq!(out, "Nothing to update.");
        assert!(store.cart().is_empty());
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let catalog = catalog_client(serving_catalog());
        let mut store = CartStore::open(MemoryStore::new());
        add(&mut store, &catalog, &add_args("p1", "M", 1), "LE")
            .await
            .unwrap();

        let args = RemoveArgs {
            product_id: "p1".to_string(),
            size: "M".to_string(),
        };
        assert_eq!(remove(&mut store, &args), "Removed size M of p1 from your cart.");
        assert_eq!(remove(&mut store, &args), "Nothing to remove.");

        add(&mut store, &catalog, &add_args("p1", "M", 1), "LE")
            .await
            .unwrap();
        let command = CartCommand {
            command: CartSubcommand::Clear,
        };
        let out = run(command, &mut store, &catalog, "LE").await.unwrap();
        assert_eq!(out, "Cart cleared.");
        assert!(store.cart().is_empty());
    }
}
