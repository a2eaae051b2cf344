use crate::core::matcher;
use crate::domain::model::{LineItem, Order, Product, Recipient, RecipientSet, User};
use std::collections::HashMap;

/// Builds the sale audience: users who bought the product, plus users whose
/// taste profile matches it. Each user appears once however many signals pick them.
pub fn resolve_sale_recipients(product: &Product, orders: &[Order], users: &[User]) -> RecipientSet {
    let users_by_key: HashMap<String, &User> = users.iter().map(|u| (u.key(), u)).collect();
    let mut recipients = RecipientSet::new();

    for order in orders {
        if !order.items.iter().any(|item| purchased(item, product)) {
            continue;
        }
        let recipient = match users_by_key.get(&order.user) {
            Some(user) => Recipient::KnownUser((*user).clone()),
            None => Recipient::RawAddress(order.user.clone()),
        };
        recipients.insert(recipient);
    }
    let buyers = recipients.len();

    for user in users {
        if matcher::matches(Some(&user.taste_profile), Some(&product.taste_profile)) {
            recipients.insert(Recipient::KnownUser(user.clone()));
        }
    }

    tracing::debug!(
        product = %product.name,
        buyers,
        total = recipients.len(),
        "Resolved sale recipients"
    );

    recipients
}

/// Line items that carry a product id join on it; older records only carry the name.
fn purchased(item: &LineItem, product: &Product) -> bool {
    match item.product_id {
        Some(id) => id == product.id,
        None => item.product == product.name,
    }
}
