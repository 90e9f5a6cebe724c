use std::sync::Arc;

use storefront_client::{CatalogClient, Checkout, HttpTransport, StorefrontConfig};
use storefront_store::{CartStore, FileStore};
use tracing::{debug, info};

use crate::error::CliError;

/// Cart, catalog and checkout for one CLI invocation.
pub struct Session {
    pub config: StorefrontConfig,
    pub cart: CartStore<FileStore>,
    pub catalog: CatalogClient<HttpTransport>,
    pub checkout: Checkout<HttpTransport>,
}

impl Session {
    /// Opens the cart file and builds the HTTP transport.
    ///
    /// No network traffic happens here.
    pub fn open(config: StorefrontConfig) -> Result<Self, CliError> {
        let storage = match &config.storage.data_dir {
            Some(dir) => FileStore::open(dir)?,
            None => FileStore::open_default()?,
        };
        debug!(dir = %storage.dir().display(), "Cart storage ready");

        let transport = Arc::new(HttpTransport::new(&config.api)?);
        info!(base_url = %transport.base_url(), "Session opened");

        Ok(Session {
            cart: CartStore::open(storage),
            catalog: CatalogClient::new(Arc::clone(&transport)),
            checkout: Checkout::new(transport),
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use storefront_client::config::StorageSettings;
    use storefront_core::{CartLine, Money};

    fn config_in(dir: &std::path::Path) -> StorefrontConfig {
        StorefrontConfig {
            storage: StorageSettings {
                data_dir: Some(dir.to_path_buf()),
            },
            ..StorefrontConfig::default()
        }
    }

    #[test]
    fn test_cart_survives_between_sessions() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut session = Session::open(config_in(dir.path())).unwrap();
            session.cart.add_to_cart(CartLine {
                product_id: "p1".to_string(),
                size_id: Some("s1".to_string()),
                size: "M".to_string(),
                name: "Hoodie".to_string(),
                image: String::new(),
                price: Money::from_major(200),
                discount: Decimal::from(10),
                quantity: 2,
            });
        }

        let session = Session::open(config_in(dir.path())).unwrap();
        assert_eq!(session.cart.cart().len(), 1);
        assert_eq!(session.cart.total(), Money::from_major(360));
        assert_eq!(session.config.display.currency, "LE");
        assert!(dir.path().join("cart.json").exists());
    }
}
