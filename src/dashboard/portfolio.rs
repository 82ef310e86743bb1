use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub token: String,
    /// Share of the portfolio in percent.
    pub allocation: f64,
    pub amount: f64,
    pub value_usd: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub holdings: Vec<Holding>,
    pub change_24h: f64,
}

impl PortfolioSummary {
    pub fn total_value(&self) -> f64 {
        self.holdings.iter().map(|h| h.value_usd).sum()
    }

    pub fn total_allocation(&self) -> f64 {
        self.holdings.iter().map(|h| h.allocation).sum()
    }
}

fn holding(token: &str, allocation: f64, amount: f64, value_usd: f64) -> Holding {
    Holding {
        token: token.to_string(),
        allocation,
        amount,
        value_usd,
    }
}

/// Demo holdings shown once a wallet is connected.
pub fn sample_portfolio() -> PortfolioSummary {
    PortfolioSummary {
        holdings: vec![
            holding("ETH", 45.0, 2.5, 6142.0),
            holding("UNI", 25.0, 150.0, 1851.0),
            holding("LINK", 20.0, 89.0, 1684.0),
            holding("AAVE", 10.0, 8.0, 1254.0),
        ],
        change_24h: 5.7,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_portfolio_totals() {
        let portfolio = sample_portfolio();
        assert_eq!(portfolio.holdings.len(), 4);
        assert_eq!(portfolio.total_value(), 10931.0);
        assert_eq!(portfolio.total_allocation(), 100.0);
        assert_eq!(portfolio.change_24h, 5.7);
    }
}
