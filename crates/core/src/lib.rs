//! Core traits and types for the trading copilot
//!
//! This crate provides foundational types used across all other crates:
//! - Analysis result DTOs returned by the AI service (voice command, chart
//!   analysis, trade validation)
//! - Market and trade parameter types for the mock data feed
//! - Speech capability traits for pluggable recognition/synthesis engines
//! - Error types

pub mod analysis;
pub mod error;
pub mod market;
pub mod traits;

pub use analysis::{
    ChartAnalysisResult, ChartPattern, MarketAnalysis, SupportResistance, TradeRecommendation,
    TradeSetup, TradeValidationResult, VoiceCommandResult,
};
pub use error::{Error, Result};
pub use market::{
    PortfolioMetrics, Position, PositionSide, Quote, TradeDirection, TradeParams,
};
pub use traits::{
    Capability, RecognitionEngine, RecognitionOptions, SynthesisEngine, SynthesisOptions,
};
