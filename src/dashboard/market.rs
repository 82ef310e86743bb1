use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketStat {
    pub title: String,
    pub value: String,
    pub change: String,
    pub positive: bool,
}

impl MarketStat {
    fn new(title: &str, value: &str, change: &str, positive: bool) -> Self {
        Self {
            title: title.to_string(),
            value: value.to_string(),
            change: change.to_string(),
            positive,
        }
    }
}

// Static overview cards; none of these are fetched.
pub fn market_overview() -> Vec<MarketStat> {
    vec![
        MarketStat::new("Total Value Locked", "$12.4B", "+2.3%", true),
        MarketStat::new("24h Volume", "$1.8B", "+15.7%", true),
        MarketStat::new("Active Pairs", "8,432", "+156", true),
        MarketStat::new("Gas Price", "23 gwei", "-12%", false),
    ]
}
