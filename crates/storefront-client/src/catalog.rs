//! # Catalog Client
//!
//! Read-only access to the product catalog. The catalog is the stock
//! source for the cart: its results feed `storefront_core::stock`.

use std::sync::Arc;

use storefront_core::CatalogProduct;
use tracing::debug;

use crate::error::{ClientError, ClientResult, TransportError};
use crate::transport::{Params, Transport};

/// Catalog listing endpoint. Also hands out the CSRF cookie.
pub const ALL_PRODUCTS_PATH: &str = "/api/v1/product/allProducts";

/// Paging, sorting and filtering for a catalog listing.
///
/// Unset fields are left to the backend's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    /// 1-based page number.
    pub page_num: Option<u32>,
    pub page_size: Option<u32>,
    pub sort_field: Option<String>,
    /// `"asc"` or `"desc"`.
    pub sort_dir: Option<String>,
    pub category_name: Option<String>,
}

impl CatalogQuery {
    /// Query parameters in backend naming.
    pub fn params(&self) -> Params {
        let mut params = Params::new();
        let mut push = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                params.push((key.to_string(), value));
            }
        };
        push("pageNum", self.page_num.map(|n| n.to_string()));
        push("pageSize", self.page_size.map(|n| n.to_string()));
        push("sortField", self.sort_field.clone());
        push("sortDir", self.sort_dir.clone());
        push("categoryName", self.category_name.clone());
        params
    }
}

pub struct CatalogClient<T: ?Sized> {
    transport: Arc<T>,
}

impl<T: Transport + ?Sized> CatalogClient<T> {
    pub fn new(transport: Arc<T>) -> Self {
        CatalogClient { transport }
    }

    /// Fetches the catalog with the backend's default paging.
    pub async fn fetch_products(&self) -> ClientResult<Vec<CatalogProduct>> {
        self.fetch_products_with(&CatalogQuery::default()).await
    }

    pub async fn fetch_products_with(&self, query: &CatalogQuery) -> ClientResult<Vec<CatalogProduct>> {
        let value = self.transport.get(ALL_PRODUCTS_PATH, query.params()).await?;
        let products: Vec<CatalogProduct> =
            serde_json::from_value(value).map_err(|e| TransportError::Decode(e.to_string()))?;
        debug!(count = products.len(), "Fetched catalog");
        Ok(products)
    }

    /// Fetches the catalog and picks one product from it.
    pub async fn fetch_product(&self, product_id: &str) -> ClientResult<CatalogProduct> {
        self.fetch_products()
            .await?
            .into_iter()
            .find(|p| p.id == product_id)
            .ok_or_else(|| ClientError::ProductNotFound(product_id.to_string()))
    }

    /// Makes the backend (re)issue the CSRF cookie. The response is ignored.
    pub async fn refresh_csrf_token(&self) -> ClientResult<()> {
        self.transport.get(ALL_PRODUCTS_PATH, Params::new()).await?;
        debug!("Refreshed CSRF token");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use serde_json::json;

    #[tokio::test]
    async fn test_fetch_products_decodes_catalog() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .once()
            .withf(|path, params| path == ALL_PRODUCTS_PATH && params.is_empty())
            .return_once(|_, _| {
                Ok(json!([
                    {"id": "p1", "name": "Hoodie", "price": 200, "discount": 10,
                     "productSizeDTOS": [{"id": "s1", "size": "M", "quantity": 4}]},
                    {"id": "p2", "name": "Cap", "price": 50}
                ]))
            });

        let catalog = CatalogClient::new(Arc::new(transport));
        let products = catalog.fetch_products().await.unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].find_size("m").map(|s| s.quantity), Some(4));
    }

    #[tokio::test]
    async fn test_query_params_are_sent() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .once()
            .withf(|_, params| {
                params
                    == &vec![
                        ("pageNum".to_string(), "2".to_string()),
                        ("categoryName".to_string(), "Hoodies".to_string()),
                    ]
            })
            .return_once(|_, _| Ok(json!([])));

        let query = CatalogQuery {
            page_num: Some(2),
            category_name: Some("Hoodies".to_string()),
            ..CatalogQuery::default()
        };
        let products = CatalogClient::new(Arc::new(transport))
            .fetch_products_with(&query)
            .await
            .unwrap();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_unexpected_shape_is_a_decode_error() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .return_once(|_, _| Ok(json!({"content": []})));

        let err = CatalogClient::new(Arc::new(transport))
            .fetch_products()
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::Transport(TransportError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_product_not_found() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .return_once(|_, _| Ok(json!([{"id": "p1"}])));

        let err = CatalogClient::new(Arc::new(transport))
            .fetch_product("p9")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::ProductNotFound(id) if id == "p9"));
    }
}
