//! Black-Scholes-Merton option pricing and equity portfolio valuation.
//!
//! [`models::price`] and [`portfolio::summarize`] are pure and stateless: no
//! I/O, no logging, no shared mutable state. [`server`] is a thin axum
//! boundary that exposes both over JSON.

pub mod config;
pub mod errors;
pub mod models;
pub mod portfolio;
pub mod server;
pub mod state;

pub use errors::{EngineError, EngineResult};
pub use models::{price, Greeks, OptionContract, OptionType, PricingModel, PricingResult};
pub use portfolio::{summarize, PortfolioSummary, Position, PositionValuation};
