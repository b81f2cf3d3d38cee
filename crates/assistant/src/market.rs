//! Mock market data feed
//!
//! Stands in for real market/broker data: a hard-coded symbol universe whose
//! quotes drift by a small random amount per tick, plus static positions and
//! portfolio metrics for the analytics views. Nothing here leaves the
//! process or survives it.

use chrono::Utc;
use rand::Rng;

use trading_copilot_config::MarketFeedConfig;
use trading_copilot_core::{PortfolioMetrics, Position, PositionSide, Quote};

/// Baseline prices for the well-known mock symbols
fn base_price(symbol: &str) -> f64 {
    match symbol {
        "SPY" => 445.67,
        "QQQ" => 378.92,
        "DIA" => 348.15,
        "IWM" => 198.44,
        "AAPL" => 187.25,
        "TSLA" => 242.15,
        "NVDA" => 875.20,
        "MSFT" => 412.88,
        "BTCUSD" => 43250.0,
        "ETHUSD" => 2284.5,
        _ => 100.0,
    }
}

/// In-process mock feed
pub struct MarketFeed {
    quotes: Vec<Quote>,
    positions: Vec<Position>,
    metrics: PortfolioMetrics,
    max_tick_drift: f64,
}

impl MarketFeed {
    pub fn new(config: &MarketFeedConfig) -> Self {
        let quotes = config
            .symbols
            .iter()
            .map(|symbol| {
                let last = base_price(symbol);
                Quote {
                    symbol: symbol.clone(),
                    last,
                    change_percent: 0.0,
                    bid: last * 0.9995,
                    ask: last * 1.0005,
                    volume: 0,
                    timestamp: Utc::now(),
                }
            })
            .collect();

        Self {
            quotes,
            positions: default_positions(),
            metrics: default_metrics(),
            max_tick_drift: config.max_tick_drift,
        }
    }

    /// Current quotes
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Quote for one symbol, if it is in the universe
    pub fn quote(&self, symbol: &str) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.symbol == symbol)
    }

    /// Open mock positions
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Portfolio analytics snapshot
    pub fn metrics(&self) -> &PortfolioMetrics {
        &self.metrics
    }

    /// Advance the feed one tick, perturbing every quote
    pub fn tick(&mut self) {
        let mut rng = rand::thread_rng();
        let now = Utc::now();

        for quote in &mut self.quotes {
            let drift = rng.gen_range(-self.max_tick_drift..=self.max_tick_drift);
            quote.last *= 1.0 + drift;
            quote.change_percent += drift * 100.0;
            quote.bid = quote.last * 0.9995;
            quote.ask = quote.last * 1.0005;
            quote.volume += rng.gen_range(100..5_000);
            quote.timestamp = now;
        }

        // Marks and PnL follow the perturbed quotes where the symbol overlaps
        for position in &mut self.positions {
            if let Some(quote) = self.quotes.iter().find(|q| q.symbol == position.symbol) {
                position.mark_price = quote.last;
                let per_unit = match position.side {
                    PositionSide::Long => position.mark_price - position.avg_price,
                    PositionSide::Short => position.avg_price - position.mark_price,
                };
                position.unrealized_pnl = per_unit * position.quantity;
            }
        }
    }

    /// Market payload embedded into trade-validation requests
    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "quotes": self.quotes,
            "as_of": Utc::now().to_rfc3339(),
        })
    }
}

fn default_positions() -> Vec<Position> {
    vec![
        Position {
            symbol: "AAPL".to_string(),
            side: PositionSide::Long,
            quantity: 100.0,
            avg_price: 187.25,
            mark_price: 187.25,
            unrealized_pnl: 0.0,
        },
        Position {
            symbol: "TSLA".to_string(),
            side: PositionSide::Short,
            quantity: 50.0,
            avg_price: 242.15,
            mark_price: 242.15,
            unrealized_pnl: 0.0,
        },
        Position {
            symbol: "NVDA".to_string(),
            side: PositionSide::Long,
            quantity: 20.0,
            avg_price: 875.20,
            mark_price: 875.20,
            unrealized_pnl: 0.0,
        },
    ]
}

fn default_metrics() -> PortfolioMetrics {
    PortfolioMetrics {
        equity: 125_430.50,
        day_pnl: 1_245.30,
        win_rate: 0.68,
        sharpe_ratio: 1.85,
        max_drawdown: -0.124,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed() -> MarketFeed {
        MarketFeed::new(&MarketFeedConfig::default())
    }

    #[test]
    fn test_universe_comes_from_config() {
        let config = MarketFeedConfig {
            symbols: vec!["SPY".to_string(), "XYZ".to_string()],
            ..MarketFeedConfig::default()
        };
        let feed = MarketFeed::new(&config);

        assert_eq!(feed.quotes().len(), 2);
        assert_eq!(feed.quote("SPY").unwrap().last, 445.67);
        // Unknown symbols get the generic baseline
        assert_eq!(feed.quote("XYZ").unwrap().last, 100.0);
        assert!(feed.quote("AAPL").is_none());
    }

    #[test]
    fn test_tick_stays_within_drift_bounds() {
        let mut feed = feed();
        let before: Vec<f64> = feed.quotes().iter().map(|q| q.last).collect();

        feed.tick();

        for (quote, old) in feed.quotes().iter().zip(before) {
            let drift = (quote.last - old).abs() / old;
            assert!(drift <= MarketFeedConfig::default().max_tick_drift + 1e-9);
            assert!(quote.bid < quote.ask);
        }
    }

    #[test]
    fn test_tick_marks_positions_to_market() {
        let mut feed = feed();
        feed.tick();

        let nvda = feed
            .positions()
            .iter()
            .find(|p| p.symbol == "NVDA")
            .unwrap();
        let quote = feed.quote("NVDA").unwrap();
        assert_eq!(nvda.mark_price, quote.last);

        let expected = (nvda.mark_price - nvda.avg_price) * nvda.quantity;
        assert!((nvda.unrealized_pnl - expected).abs() < 1e-9);
    }

    #[test]
    fn test_short_position_pnl_sign() {
        let mut feed = feed();
        feed.tick();

        let tsla = feed
            .positions()
            .iter()
            .find(|p| p.symbol == "TSLA")
            .unwrap();
        let quote = feed.quote("TSLA").unwrap();
        // Short profits when price falls below entry
        let expected = (tsla.avg_price - quote.last) * tsla.quantity;
        assert!((tsla.unrealized_pnl - expected).abs() < 1e-9);
    }

    #[test]
    fn test_snapshot_serializes_quotes() {
        let feed = feed();
        let snapshot = feed.snapshot();
        assert!(snapshot["quotes"].is_array());
        assert_eq!(
            snapshot["quotes"].as_array().unwrap().len(),
            feed.quotes().len()
        );
    }
}
