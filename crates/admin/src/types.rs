//! Analytics report shapes served by `GET /analytics`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Revenue booked on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRevenue {
    /// Display label as the backend formats it (e.g. `"May 1"`).
    pub date: String,
    pub revenue: Decimal,
}

/// Sales figures for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopProduct {
    pub name: String,
    pub sales: u64,
    pub revenue: Decimal,
}

/// Order count for one status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStatusBucket {
    pub name: String,
    pub value: u64,
}

/// The analytics dashboard payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    /// Revenue trend, most recent days last.
    #[serde(default)]
    pub daily_revenue: Vec<DailyRevenue>,
    #[serde(default)]
    pub top_products: Vec<TopProduct>,
    /// Orders bucketed by status.
    #[serde(default)]
    pub order_status: Vec<OrderStatusBucket>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_report() {
        let json = r#"{
            "dailyRevenue": [{"date": "May 1", "revenue": 120.5}],
            "topProducts": [{"name": "Ring Light", "sales": 12, "revenue": 300.0}],
            "orderStatus": [{"name": "pending", "value": 3}]
        }"#;
        let report: AnalyticsReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.daily_revenue.len(), 1);
        assert_eq!(report.top_products.first().unwrap().sales, 12);
        assert_eq!(report.order_status.first().unwrap().value, 3);
    }

    #[test]
    fn test_missing_sections_default_empty() {
        let report: AnalyticsReport = serde_json::from_str("{}").unwrap();
        assert!(report.daily_revenue.is_empty());
        assert!(report.top_products.is_empty());
        assert!(report.order_status.is_empty());
    }
}
