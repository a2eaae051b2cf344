use async_trait::async_trait;
use brew_notifier::domain::model::{Envelope, OrderStatus};
use brew_notifier::domain::ports::Mailer;
use brew_notifier::{HttpCatalogClient, NotificationService, NotifierConfig, NotifyError, Result};
use httpmock::prelude::*;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct RecordingMailer {
    sent: Arc<Mutex<Vec<Envelope>>>,
    rejected: HashSet<String>,
}

impl RecordingMailer {
    fn rejecting(address: &str) -> Self {
        Self {
            rejected: HashSet::from([address.to_string()]),
            ..Self::default()
        }
    }

    fn sent(&self) -> Vec<Envelope> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, envelope: &Envelope) -> Result<()> {
        if self.rejected.contains(&envelope.to) {
            return Err(NotifyError::Delivery {
                recipient: envelope.to.clone(),
                reason: "550 mailbox unavailable".to_string(),
            });
        }
        self.sent.lock().unwrap().push(envelope.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

fn config_for(server: &MockServer) -> NotifierConfig {
    let mut config = NotifierConfig::default();
    config.upstream.base_url = server.base_url();
    config.upstream.timeout_seconds = 2;
    config.mail.from_email = "sales@brewery.test".to_string();
    config.mail.admin_email = "stock@brewery.test".to_string();
    config
}

fn service_for(
    server: &MockServer,
    mailer: RecordingMailer,
) -> NotificationService<HttpCatalogClient, RecordingMailer> {
    let config = config_for(server);
    let catalog = HttpCatalogClient::new(&config.upstream).unwrap();
    NotificationService::new(catalog, mailer, &config)
}

fn mock_sale_catalog(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET).path("/api/inventory/7");
        then.status(200).json_body(serde_json::json!({
            "id": 7,
            "name": "IPA",
            "price": 9,
            "tasteProfile": {"bitterness": "high"}
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/order");
        then.status(200).json_body(serde_json::json!([
            {"id": 1, "user": "42", "items": [{"product": "IPA", "quantity": 2, "priceAtOrder": 9}]},
            {"id": 2, "user": "99", "items": [{"product": "Stout", "quantity": 1, "priceAtOrder": 7}]}
        ]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/auth");
        then.status(200).json_body(serde_json::json!([
            {"id": 42, "email": "a@x.com", "tasteProfile": {}},
            {"id": 99, "email": "b@x.com", "tasteProfile": {"bitterness": "high"}},
            {"id": 100, "email": "c@x.com"}
        ]));
    });
}

#[tokio::test]
async fn test_sale_notifies_buyers_and_taste_matches() {
    let server = MockServer::start();
    mock_sale_catalog(&server);
    let mailer = RecordingMailer::default();
    let service = service_for(&server, mailer.clone());

    let summary = service.notify_sale(7).await.unwrap();

    assert_eq!(summary.notified_count, 2);
    assert_eq!(summary.product_name, "IPA");
    assert_eq!(summary.outcome.attempted, 2);
    assert_eq!(
        summary.message(),
        "Sale notifications sent successfully to 2 users for IPA"
    );

    let mut recipients: Vec<String> = mailer.sent().into_iter().map(|e| e.to).collect();
    recipients.sort();
    assert_eq!(recipients, vec!["a@x.com", "b@x.com"]);

    let envelope = &mailer.sent()[0];
    assert_eq!(envelope.from, "sales@brewery.test");
    assert_eq!(envelope.subject, "Sale Alert! IPA is on sale!");
    assert!(envelope.text.contains("$9"));
}

#[tokio::test]
async fn test_sale_reports_failed_recipient_and_delivers_the_rest() {
    let server = MockServer::start();
    mock_sale_catalog(&server);
    let mailer = RecordingMailer::rejecting("a@x.com");
    let service = service_for(&server, mailer.clone());

    let summary = service.notify_sale(7).await.unwrap();

    assert_eq!(summary.outcome.attempted, 2);
    assert_eq!(summary.notified_count, 1);
    assert_eq!(summary.outcome.failures().len(), 1);
    assert_eq!(summary.outcome.failures()[0].0, "42");
    assert_eq!(mailer.sent().len(), 1);
    assert_eq!(mailer.sent()[0].to, "b@x.com");
}

#[tokio::test]
async fn test_sale_with_no_orders_or_users_sends_nothing() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/inventory/7");
        then.status(200)
            .json_body(serde_json::json!({"id": 7, "name": "IPA", "price": 9}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/order");
        then.status(200).json_body(serde_json::json!([]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/auth");
        then.status(200).json_body(serde_json::json!([]));
    });
    let mailer = RecordingMailer::default();
    let service = service_for(&server, mailer.clone());

    let summary = service.notify_sale(7).await.unwrap();

    assert_eq!(summary.notified_count, 0);
    assert_eq!(summary.outcome.attempted, 0);
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn test_sale_for_missing_product_surfaces_not_found() {
    let server = MockServer::start();
    let product_mock = server.mock(|when, then| {
        when.method(GET).path("/api/inventory/404");
        then.status(404)
            .json_body(serde_json::json!({"message": "Inventory item not found"}));
    });
    let orders_mock = server.mock(|when, then| {
        when.method(GET).path("/api/order");
        then.status(200).json_body(serde_json::json!([]));
    });
    let mailer = RecordingMailer::default();
    let service = service_for(&server, mailer.clone());

    let err = service.notify_sale(404).await.unwrap_err();

    product_mock.assert();
    orders_mock.assert_hits(0);
    assert_eq!(err.status_code(), 404);
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn test_sale_aborts_when_orders_fetch_fails() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/inventory/7");
        then.status(200)
            .json_body(serde_json::json!({"id": 7, "name": "IPA", "price": 9}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/order");
        then.status(500);
    });
    let mailer = RecordingMailer::default();
    let service = service_for(&server, mailer.clone());

    let err = service.notify_sale(7).await.unwrap_err();

    assert_eq!(err.status_code(), 500);
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn test_sale_rejects_order_without_items() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/inventory/7");
        then.status(200)
            .json_body(serde_json::json!({"id": 7, "name": "IPA", "price": 9}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/order");
        then.status(200)
            .json_body(serde_json::json!([{"id": 1, "user": "42"}]));
    });
    let mailer = RecordingMailer::default();
    let service = service_for(&server, mailer.clone());

    let err = service.notify_sale(7).await.unwrap_err();

    assert!(matches!(err, NotifyError::DataShape { .. }));
    assert_eq!(err.status_code(), 502);
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn test_order_status_sends_single_message() {
    let server = MockServer::start();
    let user_mock = server.mock(|when, then| {
        when.method(GET).path("/api/auth/5");
        then.status(200)
            .json_body(serde_json::json!({"id": 5, "email": "c@x.com", "tasteProfile": null}));
    });
    let mailer = RecordingMailer::default();
    let service = service_for(&server, mailer.clone());

    let summary = service
        .notify_order_status(5, 17, OrderStatus::Shipped)
        .await
        .unwrap();

    user_mock.assert();
    assert_eq!(summary.user_id, 5);
    assert_eq!(summary.outcome.succeeded(), 1);

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "c@x.com");
    assert!(sent[0].subject.contains("17"));
    assert!(sent[0].text.contains("17"));
    assert!(sent[0].text.contains("Shipped"));
}

#[tokio::test]
async fn test_low_stock_alerts_admin() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/inventory/3");
        then.status(200).json_body(serde_json::json!({
            "id": 3,
            "name": "Porter",
            "price": 6.5,
            "stockQuantity": 2
        }));
    });
    let mailer = RecordingMailer::default();
    let service = service_for(&server, mailer.clone());

    let summary = service.notify_low_stock(3).await.unwrap();

    assert_eq!(summary.product_id, 3);
    assert_eq!(summary.outcome.attempted, 1);

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "stock@brewery.test");
    assert!(sent[0].text.contains("Current stock quantity: 2"));
}
