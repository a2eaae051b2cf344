use crate::domain::model::{MessageContent, OrderStatus, Product};

pub const SALE_SUBJECT: &str = "Sale Alert! {{product_name}} is on sale!";
pub const SALE_TEXT: &str = "Dear customer, {{product_name}} is now on sale for ${{price}}. \
Based on your past purchases or taste preferences, we thought you'd like to know!";

pub const ORDER_UPDATE_SUBJECT: &str = "Your order #{{order_id}} is now {{status}}";
pub const ORDER_UPDATE_TEXT: &str =
    "Dear customer, the status of your order #{{order_id}} has changed to {{status}}.";

pub const LOW_STOCK_SUBJECT: &str = "Low stock: {{product_name}}";
pub const LOW_STOCK_TEXT: &str = "Inventory alert: {{product_name}} (product #{{product_id}}) \
is running low. Current stock quantity: {{quantity}}.";

/// Replaces each `{{key}}` with its value. Placeholders without a value are left untouched.
pub fn render(template: &str, values: &[(&str, String)]) -> String {
    values.iter().fold(template.to_string(), |text, (key, value)| {
        text.replace(&format!("{{{{{}}}}}", key), value)
    })
}

pub fn sale_alert(product: &Product) -> MessageContent {
    let values = [
        ("product_name", product.name.clone()),
        ("price", format_price(product.price)),
    ];
    MessageContent {
        subject: render(SALE_SUBJECT, &values),
        text: render(SALE_TEXT, &values),
    }
}

pub fn order_update(order_id: u64, status: OrderStatus) -> MessageContent {
    let values = [
        ("order_id", order_id.to_string()),
        ("status", status.to_string()),
    ];
    MessageContent {
        subject: render(ORDER_UPDATE_SUBJECT, &values),
        text: render(ORDER_UPDATE_TEXT, &values),
    }
}

pub fn low_stock(product: &Product) -> MessageContent {
    let values = [
        ("product_name", product.name.clone()),
        ("product_id", product.id.to_string()),
        ("quantity", product.stock_quantity.to_string()),
    ];
    MessageContent {
        subject: render(LOW_STOCK_SUBJECT, &values),
        text: render(LOW_STOCK_TEXT, &values),
    }
}

// Whole prices print without decimals, as the catalog shows them.
fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("{:.0}", price)
    } else {
        format!("{:.2}", price)
    }
}
