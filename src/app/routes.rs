use crate::core::service::NotificationService;
use crate::domain::model::{LowStockSummary, OrderStatusSummary, SaleSummary};
use crate::domain::ports::{CatalogApi, Mailer};
use crate::utils::error::{NotifyError, Result};
use crate::utils::validation::{validate_order_status, validate_positive_id};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

type SharedService<C, M> = Arc<NotificationService<C, M>>;

#[derive(Debug, Deserialize)]
struct ProductRequest {
    #[serde(rename = "productId", alias = "product_id", default)]
    product_id: Value,
}

#[derive(Debug, Deserialize)]
struct OrderStatusRequest {
    #[serde(default)]
    user_id: Value,
    #[serde(default)]
    order_id: Value,
    #[serde(default)]
    status: Option<String>,
}

/// Success body: a human message plus the handler's summary fields.
#[derive(Debug, Serialize)]
struct NotificationResponse<T: Serialize> {
    message: String,
    #[serde(flatten)]
    summary: T,
}

/// Builds the HTTP surface around a notification service.
pub fn router<C, M>(service: NotificationService<C, M>) -> Router
where
    C: CatalogApi + 'static,
    M: Mailer + 'static,
{
    let shared_service = Arc::new(service);

    let notifications = Router::new()
        .route("/sale", post(sale::<C, M>))
        .route("/order-status", post(order_status::<C, M>))
        .route("/low-stock", post(low_stock::<C, M>));

    Router::new()
        .route("/healthcheck", get(healthcheck))
        .nest("/notifications", notifications)
        .with_state(shared_service)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn healthcheck() -> &'static str {
    "Notifications are alive and annoying people already!"
}

fn parse_body<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| NotifyError::validation("body", rejection.body_text()))
}

async fn sale<C: CatalogApi, M: Mailer>(
    State(service): State<SharedService<C, M>>,
    body: std::result::Result<Json<ProductRequest>, JsonRejection>,
) -> Result<Json<NotificationResponse<SaleSummary>>> {
    let request = parse_body(body)?;
    let product_id = validate_positive_id("productId", &request.product_id)?;

    let summary = service.notify_sale(product_id).await?;
    respond(summary.message(), summary)
}

async fn order_status<C: CatalogApi, M: Mailer>(
    State(service): State<SharedService<C, M>>,
    body: std::result::Result<Json<OrderStatusRequest>, JsonRejection>,
) -> Result<Json<NotificationResponse<OrderStatusSummary>>> {
    let request = parse_body(body)?;
    let user_id = validate_positive_id("user_id", &request.user_id)?;
    let order_id = validate_positive_id("order_id", &request.order_id)?;
    let status = request
        .status
        .as_deref()
        .ok_or_else(|| NotifyError::validation("status", "is required"))
        .and_then(|status| validate_order_status("status", status))?;

    let summary = service
        .notify_order_status(user_id, order_id, status)
        .await?;
    respond(summary.message(), summary)
}

async fn low_stock<C: CatalogApi, M: Mailer>(
    State(service): State<SharedService<C, M>>,
    body: std::result::Result<Json<ProductRequest>, JsonRejection>,
) -> Result<Json<NotificationResponse<LowStockSummary>>> {
    let request = parse_body(body)?;
    let product_id = validate_positive_id("productId", &request.product_id)?;

    let summary = service.notify_low_stock(product_id).await?;
    respond(summary.message(), summary)
}

fn respond<T: Serialize>(message: String, summary: T) -> Result<Json<NotificationResponse<T>>> {
    Ok(Json(NotificationResponse { message, summary }))
}
