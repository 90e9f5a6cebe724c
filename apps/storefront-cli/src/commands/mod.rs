//! # Commands Module
//!
//! One module per command group. Command functions take the pieces of the
//! session they need, generic over storage and transport, and return the
//! text to print.
//!
//! ## Command Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Commands                                             │
//! │                                                                         │
//! │  cart.rs                 stock.rs               checkout.rs             │
//! │  ─────────               ─────────              ────────────            │
//! │  • show                  • stock <product>      • checkout --email ...  │
//! │  • add                                                                  │
//! │  • update                                                               │
//! │  • remove                config.rs                                      │
//! │  • clear                 ─────────                                      │
//! │                          • config show | init                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod checkout;
pub mod config;
pub mod stock;

use storefront_core::CartLine;

/// How a stock figure is shown next to a line or size.
pub(crate) fn describe_stock(max_stock: Option<u32>) -> String {
    match max_stock {
        None => "stock unknown".to_string(),
        Some(0) => "out of stock".to_string(),
        Some(n) => format!("{n} in stock"),
    }
}

/// `Hoodie (M)`, falling back to the product id for nameless lines.
pub(crate) fn line_label(line: &CartLine) -> String {
    let name = if line.name.is_empty() {
        line.product_id.as_str()
    } else {
        line.name.as_str()
    };
    format!("{} ({})", name, line.size)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use serde_json::{json, Value};
    use storefront_client::transport::MockTransport;
    use storefront_client::CatalogClient;

    /// Catalog with a hoodie in M (4 left) and L (sold out), and a sizeless cap.
    pub fn catalog_json() -> Value {
        json!([
            {"id": "p1", "name": "Hoodie", "price": 200, "discount": 10,
             "productSizeDTOS": [{"id": "s1", "size": "M", "quantity": 4},
                                 {"id": "s2", "size": "L", "quantity": 0}]},
            {"id": "p2", "name": "Cap", "price": 50}
        ])
    }

    /// A mock whose catalog reads always succeed.
    pub fn serving_catalog() -> MockTransport {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .returning(|_, _| Ok(catalog_json()));
        transport
    }

    pub fn catalog_client(transport: MockTransport) -> CatalogClient<MockTransport> {
        CatalogClient::new(Arc::new(transport))
    }
}
