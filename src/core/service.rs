use crate::core::dispatcher::Dispatcher;
use crate::core::{resolver, templates};
use crate::domain::model::{
    LowStockSummary, OrderStatus, OrderStatusSummary, Recipient, RecipientSet, SaleSummary,
};
use crate::domain::ports::{CatalogApi, ConfigProvider, Mailer};
use crate::utils::error::Result;

/// Sale, order-status and low-stock use cases. Upstream fetch failures abort
/// the request before anything is sent; delivery failures are reported in the summary.
pub struct NotificationService<C: CatalogApi, M: Mailer> {
    catalog: C,
    dispatcher: Dispatcher<M>,
    admin_address: String,
}

impl<C: CatalogApi, M: Mailer> NotificationService<C, M> {
    pub fn new<P: ConfigProvider>(catalog: C, mailer: M, config: &P) -> Self {
        Self {
            catalog,
            dispatcher: Dispatcher::new(mailer, config.from_address(), config.send_timeout()),
            admin_address: config.admin_address().to_string(),
        }
    }

    pub async fn notify_sale(&self, product_id: u64) -> Result<SaleSummary> {
        let product = self.catalog.fetch_product(product_id).await?;
        let orders = self.catalog.fetch_orders().await?;
        let users = self.catalog.fetch_users().await?;

        let recipients = resolver::resolve_sale_recipients(&product, &orders, &users);
        let message = templates::sale_alert(&product);
        let outcome = self
            .dispatcher
            .dispatch(&recipients, |_| message.clone())
            .await;

        let summary = SaleSummary {
            notified_count: outcome.succeeded(),
            product_name: product.name,
            outcome,
        };
        tracing::info!(product_id, "{}", summary.message());
        Ok(summary)
    }

    pub async fn notify_order_status(
        &self,
        user_id: u64,
        order_id: u64,
        status: OrderStatus,
    ) -> Result<OrderStatusSummary> {
        let user = self.catalog.fetch_user(user_id).await?;

        let recipients = RecipientSet::single(Recipient::KnownUser(user));
        let outcome = self
            .dispatcher
            .dispatch(&recipients, |_| templates::order_update(order_id, status))
            .await;

        let summary = OrderStatusSummary { user_id, outcome };
        tracing::info!(user_id, order_id, %status, "{}", summary.message());
        Ok(summary)
    }

    pub async fn notify_low_stock(&self, product_id: u64) -> Result<LowStockSummary> {
        let product = self.catalog.fetch_product(product_id).await?;

        let recipients = RecipientSet::single(Recipient::RawAddress(self.admin_address.clone()));
        let outcome = self
            .dispatcher
            .dispatch(&recipients, |_| templates::low_stock(&product))
            .await;

        let summary = LowStockSummary { product_id, outcome };
        tracing::info!(
            product_id,
            stock_quantity = product.stock_quantity,
            "{}",
            summary.message()
        );
        Ok(summary)
    }
}
