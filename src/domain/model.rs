use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Sparse taste attributes shared by users and products. Every field is
/// optional; an absent field means "no opinion".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferenceProfile {
    pub primary_flavor: Option<String>,
    pub secondary_flavors: Option<Vec<String>>,
    pub sweetness: Option<String>,
    pub bitterness: Option<String>,
    pub mouthfeel: Option<String>,
    pub body: Option<String>,
    pub acidity: Option<f64>,
    pub aftertaste: Option<String>,
    pub aroma: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: f64,
    #[serde(default, deserialize_with = "profile_or_empty")]
    pub taste_profile: PreferenceProfile,
    #[serde(default)]
    pub stock_quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product: String,
    #[serde(default)]
    pub product_id: Option<u64>,
    pub quantity: u32,
    pub price_at_order: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: u64,
    #[serde(deserialize_with = "string_or_number")]
    pub user: String,
    pub items: Vec<LineItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub email: String,
    #[serde(default, deserialize_with = "profile_or_empty")]
    pub taste_profile: PreferenceProfile,
}

impl User {
    pub fn key(&self) -> String {
        self.id.to_string()
    }
}

fn profile_or_empty<'de, D>(deserializer: D) -> Result<PreferenceProfile, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<PreferenceProfile>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Key {
        Text(String),
        Number(u64),
    }

    Ok(match Key::deserialize(deserializer)? {
        Key::Text(text) => text,
        Key::Number(number) => number.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL_NAMES: [&'static str; 5] =
        ["Pending", "Processing", "Shipped", "Delivered", "Cancelled"];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" | "canceled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("unknown order status: {}", other)),
        }
    }
}

/// A notification target. Purchase-history keys that have no matching user
/// record are kept as raw addresses.
#[derive(Debug, Clone, PartialEq)]
pub enum Recipient {
    KnownUser(User),
    RawAddress(String),
}

impl Recipient {
    pub fn key(&self) -> String {
        match self {
            Recipient::KnownUser(user) => user.key(),
            Recipient::RawAddress(address) => address.clone(),
        }
    }

    pub fn address(&self) -> &str {
        match self {
            Recipient::KnownUser(user) => &user.email,
            Recipient::RawAddress(address) => address,
        }
    }
}

/// Recipients keyed by [`Recipient::key`]; a key is only ever inserted once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipientSet {
    recipients: BTreeMap<String, Recipient>,
}

impl RecipientSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(recipient: Recipient) -> Self {
        let mut set = Self::new();
        set.insert(recipient);
        set
    }

    /// Returns `false` when the key was already present; the first entry wins.
    pub fn insert(&mut self, recipient: Recipient) -> bool {
        let key = recipient.key();
        if self.recipients.contains_key(&key) {
            return false;
        }
        self.recipients.insert(key, recipient);
        true
    }

    pub fn contains(&self, key: &str) -> bool {
        self.recipients.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.recipients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.recipients.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipient> {
        self.recipients.values()
    }
}

/// Recipient-specific text produced by a template.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageContent {
    pub subject: String,
    pub text: String,
}

/// What the mail channel receives.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeliveryStatus {
    Delivered,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipientOutcome {
    pub recipient: String,
    pub address: String,
    #[serde(flatten)]
    pub status: DeliveryStatus,
}

impl RecipientOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self.status, DeliveryStatus::Delivered)
    }
}

/// One entry per recipient of the batch it was built from.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DispatchOutcome {
    pub attempted: usize,
    pub outcomes: Vec<RecipientOutcome>,
}

impl DispatchOutcome {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_delivered()).count()
    }

    pub fn failures(&self) -> Vec<(&str, &str)> {
        self.outcomes
            .iter()
            .filter_map(|o| match &o.status {
                DeliveryStatus::Failed { reason } => Some((o.recipient.as_str(), reason.as_str())),
                DeliveryStatus::Delivered => None,
            })
            .collect()
    }

    pub fn outcome_for(&self, recipient: &str) -> Option<&RecipientOutcome> {
        self.outcomes.iter().find(|o| o.recipient == recipient)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleSummary {
    pub notified_count: usize,
    pub product_name: String,
    pub outcome: DispatchOutcome,
}

impl SaleSummary {
    pub fn message(&self) -> String {
        format!(
            "Sale notifications sent successfully to {} users for {}",
            self.notified_count, self.product_name
        )
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusSummary {
    pub user_id: u64,
    pub outcome: DispatchOutcome,
}

impl OrderStatusSummary {
    pub fn message(&self) -> String {
        if self.outcome.succeeded() == self.outcome.attempted {
            format!("Order status notification sent to user {}", self.user_id)
        } else {
            format!("Order status notification to user {} failed", self.user_id)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockSummary {
    pub product_id: u64,
    pub outcome: DispatchOutcome,
}

impl LowStockSummary {
    pub fn message(&self) -> String {
        if self.outcome.succeeded() == self.outcome.attempted {
            format!("Low stock alert sent for product {}", self.product_id)
        } else {
            format!("Low stock alert for product {} failed", self.product_id)
        }
    }
}
