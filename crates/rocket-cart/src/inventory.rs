//! # Inventory Service Client
//!
//! Stock and product lookups against the storefront API.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Inventory Service                                  │
//! │                                                                         │
//! │  GET {base_url}/stock/{id}     → { "id": 1, "amount": 5 }              │
//! │  GET {base_url}/products/{id}  → { "id": 1, "title": "...",            │
//! │                                    "price": 179.9, "image": "..." }     │
//! │                                                                         │
//! │  2xx with the expected JSON → Ok                                       │
//! │  anything else              → InventoryError                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart store only sees the [`InventoryApi`] trait, so tests swap in a
//! mock and never touch the network.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Response;
use rocket_core::{Product, ProductId, Stock};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

#[cfg(test)]
use mockall::automock;

use crate::config::InventoryConfig;
use crate::error::InventoryError;

/// Lookups the cart store needs from the inventory service.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait InventoryApi: Send + Sync {
    /// Current stock for a product.
    async fn stock(&self, id: ProductId) -> Result<Stock, InventoryError>;

    /// Full product details, used when a product first enters the cart.
    async fn product(&self, id: ProductId) -> Result<Product, InventoryError>;
}

/// [`InventoryApi`] over HTTP. Cheap to clone; clones share the connection
/// pool.
#[derive(Clone)]
pub struct HttpInventoryClient {
    inner: Arc<HttpInventoryClientInner>,
}

struct HttpInventoryClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpInventoryClient {
    /// Create a client for the configured service.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL does not parse or the HTTP client fails
    /// to build.
    pub fn new(config: &InventoryConfig) -> Result<Self, InventoryError> {
        let mut base_url = Url::parse(&config.base_url)
            .map_err(|e| InventoryError::InvalidUrl(format!("{}: {e}", config.base_url)))?;

        // Url::join drops the last segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            inner: Arc::new(HttpInventoryClientInner { client, base_url }),
        })
    }

    /// The normalized base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, InventoryError> {
        self.inner
            .base_url
            .join(path)
            .map_err(|e| InventoryError::InvalidUrl(format!("{path}: {e}")))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, InventoryError> {
        let url = self.endpoint(path)?;
        debug!(url = %url, "Inventory request");

        let response = self.inner.client.get(url).send().await?;
        Self::handle_response(path, response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        path: &str,
        response: Response,
    ) -> Result<T, InventoryError> {
        let status = response.status();

        if !status.is_success() {
            warn!(status = status.as_u16(), path = %path, "Inventory request failed");
            return Err(InventoryError::Status {
                status: status.as_u16(),
                path: format!("/{path}"),
            });
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                InventoryError::Decode(e.to_string())
            } else {
                InventoryError::Http(e)
            }
        })
    }
}

#[async_trait]
impl InventoryApi for HttpInventoryClient {
    async fn stock(&self, id: ProductId) -> Result<Stock, InventoryError> {
        let stock: Stock = self.get(&format!("stock/{id}")).await?;
        if stock.id != id {
            return Err(InventoryError::MismatchedId {
                requested: id,
                returned: stock.id,
            });
        }
        Ok(stock)
    }

    async fn product(&self, id: ProductId) -> Result<Product, InventoryError> {
        let product: Product = self.get(&format!("products/{id}")).await?;
        if product.id != id {
            return Err(InventoryError::MismatchedId {
                requested: id,
                returned: product.id,
            });
        }
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use rocket_core::Money;
    use serde_json::{json, Value};

    async fn stock_handler(Path(id): Path<u32>) -> Result<Json<Value>, StatusCode> {
        match id {
            1 => Ok(Json(json!({ "id": 1, "amount": 3 }))),
            2 => Ok(Json(json!({ "id": 99, "amount": 3 }))),
            3 => Ok(Json(json!({ "id": 3, "quantity": "lots" }))),
            _ => Err(StatusCode::NOT_FOUND),
        }
    }

    async fn product_handler(Path(id): Path<u32>) -> Result<Json<Value>, StatusCode> {
        match id {
            1 => Ok(Json(json!({
                "id": 1,
                "title": "Tênis de Caminhada Leve Confortável",
                "price": 179.9,
                "image": "https://example.com/tenis1.jpg"
            }))),
            _ => Err(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }

    /// Serves a fake inventory API on an ephemeral port, optionally under a
    /// path prefix.
    async fn spawn_inventory(prefix: &str) -> String {
        let routes = Router::new()
            .route("/stock/{id}", get(stock_handler))
            .route("/products/{id}", get(product_handler));
        let app = if prefix.is_empty() {
            routes
        } else {
            Router::new().nest(prefix, routes)
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}{prefix}")
    }

    fn client(base_url: String) -> HttpInventoryClient {
        HttpInventoryClient::new(&InventoryConfig {
            base_url,
            timeout_secs: Some(5),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_stock() {
        let client = client(spawn_inventory("").await);

        let stock = client.stock(1).await.unwrap();
        assert_eq!(stock, Stock { id: 1, amount: 3 });
    }

    #[tokio::test]
    async fn test_fetch_product_with_legacy_field_names() {
        let client = client(spawn_inventory("").await);

        let product = client.product(1).await.unwrap();
        assert_eq!(product.name, "Tênis de Caminhada Leve Confortável");
        assert_eq!(product.price, Money::from_cents(17990));
        assert_eq!(product.image_url, "https://example.com/tenis1.jpg");
        assert_eq!(product.amount, 0);
    }

    #[tokio::test]
    async fn test_base_url_with_path_prefix() {
        let client = client(spawn_inventory("/api").await);
        assert!(client.base_url().path().ends_with("/api/"));

        assert_eq!(client.stock(1).await.unwrap().amount, 3);
    }

    #[tokio::test]
    async fn test_error_status() {
        let client = client(spawn_inventory("").await);

        match client.stock(42).await {
            Err(InventoryError::Status { status, path }) => {
                assert_eq!(status, 404);
                assert_eq!(path, "/stock/42");
            }
            other => panic!("expected status error, got {other:?}"),
        }
        assert!(matches!(
            client.product(7).await,
            Err(InventoryError::Status { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_unexpected_body() {
        let client = client(spawn_inventory("").await);

        assert!(matches!(client.stock(3).await, Err(InventoryError::Decode(_))));
        assert!(matches!(
            client.stock(2).await,
            Err(InventoryError::MismatchedId {
                requested: 2,
                returned: 99
            })
        ));
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        // Bind then drop so the port is closed.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client(format!("http://{addr}"));
        assert!(matches!(client.stock(1).await, Err(InventoryError::Http(_))));
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpInventoryClient::new(&InventoryConfig {
            base_url: "not a url".to_string(),
            timeout_secs: None,
        });
        assert!(matches!(result, Err(InventoryError::InvalidUrl(_))));
    }
}
