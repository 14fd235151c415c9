// ── Dashboard statistics ──
//
// Read-only aggregate served by `GET /stats`. Every field defaults to
// zero/empty so the dashboard renders before the first load settles.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatBundle {
    pub total_customers: u64,
    pub active_users: u64,
    pub vip_customers: u64,
    pub avg_customer_value: f64,
    pub order_stats: OrderStats,
    pub category_stats: CategoryStats,
    pub quick_stats: Vec<QuickStat>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderStats {
    pub pending: u64,
    pub processing: u64,
    pub delivered: u64,
    pub cancelled: u64,
}

impl OrderStats {
    pub fn total(&self) -> u64 {
        self.pending + self.processing + self.delivered + self.cancelled
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryStats {
    pub total_categories: u64,
    pub total_products: u64,
    pub largest_category: LargestCategory,
    pub average_per_category: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LargestCategory {
    pub name: String,
    pub product_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickStat {
    pub title: String,
    pub value: StatValue,
    pub change: String,
    pub change_type: ChangeType,
    pub icon: String,
}

/// Quick-stat values are either a count or a preformatted string ("$1.2k").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(f64),
    Text(String),
}

impl std::fmt::Display for StatValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChangeType {
    Increase,
    Warning,
    Neutral,
}
