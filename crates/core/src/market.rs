//! Market and trade parameter types
//!
//! These back the in-process mock data feed and the trade-validation request
//! payload. There is no broker integration: quotes and positions exist only
//! to give the assistant realistic inputs to reason about.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a proposed trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeDirection {
    Long,
    Short,
}

impl fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeDirection::Long => write!(f, "long"),
            TradeDirection::Short => write!(f, "short"),
        }
    }
}

/// Side of an open position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSide {
    Long,
    Short,
}

/// A single quote tick for one symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub last: f64,
    /// Percent change since the session open
    pub change_percent: f64,
    pub bid: f64,
    pub ask: f64,
    pub volume: u64,
    pub timestamp: DateTime<Utc>,
}

impl Quote {
    /// Bid/ask spread in price units
    pub fn spread(&self) -> f64 {
        (self.ask - self.bid).max(0.0)
    }
}

/// An open position in the mock portfolio
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    pub side: PositionSide,
    pub quantity: f64,
    pub avg_price: f64,
    pub mark_price: f64,
    pub unrealized_pnl: f64,
}

/// Aggregate portfolio statistics for the analytics view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    pub equity: f64,
    pub day_pnl: f64,
    /// Fraction of closed trades that were winners, 0.0-1.0
    pub win_rate: f64,
    pub sharpe_ratio: f64,
    /// Largest peak-to-trough drawdown, as a negative fraction
    pub max_drawdown: f64,
}

/// Proposed trade parameters submitted for validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeParams {
    pub symbol: String,
    pub direction: TradeDirection,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit: Vec<f64>,
    pub quantity: f64,
}

impl TradeParams {
    /// Risk per unit at the proposed stop, always non-negative
    pub fn risk_per_unit(&self) -> f64 {
        match self.direction {
            TradeDirection::Long => (self.entry_price - self.stop_loss).max(0.0),
            TradeDirection::Short => (self.stop_loss - self.entry_price).max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_per_unit() {
        let long = TradeParams {
            symbol: "AAPL".to_string(),
            direction: TradeDirection::Long,
            entry_price: 100.0,
            stop_loss: 95.0,
            take_profit: vec![110.0],
            quantity: 10.0,
        };
        assert_eq!(long.risk_per_unit(), 5.0);

        let short = TradeParams {
            direction: TradeDirection::Short,
            stop_loss: 104.0,
            ..long.clone()
        };
        assert_eq!(short.risk_per_unit(), 4.0);
    }

    #[test]
    fn test_direction_serializes_lowercase() {
        let json = serde_json::to_string(&TradeDirection::Long).unwrap();
        assert_eq!(json, "\"long\"");
    }

    #[test]
    fn test_quote_spread_never_negative() {
        let quote = Quote {
            symbol: "SPY".to_string(),
            last: 520.0,
            change_percent: 0.2,
            bid: 520.05,
            ask: 519.95, // crossed book from a perturbed tick
            volume: 1_000,
            timestamp: Utc::now(),
        };
        assert_eq!(quote.spread(), 0.0);
    }
}
