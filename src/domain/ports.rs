use crate::domain::model::{Envelope, Order, Product, User};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Read access to the catalog/order/user service.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn fetch_product(&self, product_id: u64) -> Result<Product>;
    async fn fetch_orders(&self) -> Result<Vec<Order>>;
    async fn fetch_users(&self) -> Result<Vec<User>>;
    async fn fetch_user(&self, user_id: u64) -> Result<User>;
}

/// Outbound mail channel. One call delivers one envelope.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, envelope: &Envelope) -> Result<()>;

    fn name(&self) -> &'static str;
}

pub trait ConfigProvider: Send + Sync {
    fn from_address(&self) -> &str;
    fn admin_address(&self) -> &str;
    fn send_timeout(&self) -> Duration;
}

#[async_trait]
impl Mailer for Box<dyn Mailer> {
    async fn send(&self, envelope: &Envelope) -> Result<()> {
        (**self).send(envelope).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
