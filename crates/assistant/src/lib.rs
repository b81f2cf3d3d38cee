//! Assistant facade for the trading copilot
//!
//! The [`TradingAssistant`] is the object a presentation layer constructs and
//! calls. It composes the request formatter and the chat transport, validates
//! caller input before anything leaves the process, and owns the connection
//! status derived from configuration. The mock market feed lives here too:
//! it supplies the dashboard's quotes, positions and portfolio metrics.

pub mod market;
pub mod service;
pub mod upload;

pub use market::MarketFeed;
pub use service::{ConnectionStatus, TradingAssistant};
pub use upload::validate_image_source;
