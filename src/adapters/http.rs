use crate::config::toml_config::UpstreamConfig;
use crate::domain::model::{Order, Product, User};
use crate::domain::ports::CatalogApi;
use crate::utils::error::{NotifyError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Typed access to the brewery catalog, order and user endpoints.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: Client,
    base_url: String,
    inventory_path: String,
    orders_path: String,
    users_path: String,
}

impl HttpCatalogClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| NotifyError::config("upstream", e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            inventory_path: config.inventory_path.clone(),
            orders_path: config.orders_path.clone(),
            users_path: config.users_path.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(&self, resource: &str, url: String) -> Result<T> {
        tracing::debug!(resource, %url, "Fetching from catalog API");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(resource, e))?;

        let status = response.status();
        tracing::debug!(resource, status = status.as_u16(), "Catalog API responded");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = upstream_message(&body)
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            tracing::warn!(resource, status = status.as_u16(), %message, "Catalog API request failed");
            return Err(NotifyError::upstream(resource, Some(status.as_u16()), message));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| transport_error(resource, e))?;

        serde_json::from_slice(&bytes).map_err(|e| NotifyError::DataShape {
            resource: resource.to_string(),
            message: e.to_string(),
        })
    }
}

fn transport_error(resource: &str, err: reqwest::Error) -> NotifyError {
    if err.is_timeout() {
        tracing::warn!(resource, "Catalog API request timed out");
        NotifyError::UpstreamTimeout {
            resource: resource.to_string(),
        }
    } else {
        NotifyError::upstream(resource, err.status().map(|s| s.as_u16()), err.to_string())
    }
}

/// Pulls `message` out of a JSON error body, falling back to the raw text.
fn upstream_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => value
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .or_else(|| Some(body.to_string())),
        Err(_) => Some(body.to_string()),
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn fetch_product(&self, product_id: u64) -> Result<Product> {
        let url = self.url(&format!("{}/{}", self.inventory_path, product_id));
        self.get_json("product", url).await
    }

    async fn fetch_orders(&self) -> Result<Vec<Order>> {
        let url = self.url(&self.orders_path);
        self.get_json("orders", url).await
    }

    async fn fetch_users(&self) -> Result<Vec<User>> {
        let url = self.url(&self.users_path);
        self.get_json("users", url).await
    }

    async fn fetch_user(&self, user_id: u64) -> Result<User> {
        let url = self.url(&format!("{}/{}", self.users_path, user_id));
        self.get_json("user", url).await
    }
}
