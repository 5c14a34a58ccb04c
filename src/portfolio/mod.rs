pub mod summary;

use crate::errors::{ensure_finite, EngineError, EngineResult};
use serde::{Deserialize, Serialize};

pub use summary::summarize;

/// One equity holding. Two lots of the same symbol are two positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    pub quantity: f64,
    /// Cost basis per unit
    pub avg_price: f64,
    /// Mark price per unit
    pub current_price: f64,
}

impl Position {
    pub fn new(symbol: impl Into<String>, quantity: f64, avg_price: f64, current_price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            quantity,
            avg_price,
            current_price,
        }
    }

    /// `index` is the position's slot in the request, used in error messages.
    pub fn validate(&self, index: usize) -> EngineResult<()> {
        if self.symbol.trim().is_empty() {
            return Err(EngineError::invalid("symbol", format!("position {index}: must not be empty")));
        }
        let qty = ensure_finite("quantity", self.quantity)?;
        if qty <= 0.0 {
            return Err(EngineError::invalid(
                "quantity",
                format!("position {index} ({}): must be > 0, got {qty}", self.symbol),
            ));
        }
        let avg = ensure_finite("avg_price", self.avg_price)?;
        if avg < 0.0 {
            return Err(EngineError::invalid(
                "avg_price",
                format!("position {index} ({}): must be >= 0, got {avg}", self.symbol),
            ));
        }
        let cur = ensure_finite("current_price", self.current_price)?;
        if cur < 0.0 {
            return Err(EngineError::invalid(
                "current_price",
                format!("position {index} ({}): must be >= 0, got {cur}", self.symbol),
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn market_value(&self) -> f64 {
        self.quantity * self.current_price
    }

    #[inline]
    pub fn cost_basis(&self) -> f64 {
        self.quantity * self.avg_price
    }
}

/// Per-position breakdown, in request order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionValuation {
    pub symbol: String,
    pub market_value: f64,
    pub cost_basis: f64,
    pub unrealized_pnl: f64,
}

impl From<&Position> for PositionValuation {
    fn from(p: &Position) -> Self {
        let market_value = p.market_value();
        let cost_basis = p.cost_basis();
        Self {
            symbol: p.symbol.clone(),
            market_value,
            cost_basis,
            unrealized_pnl: market_value - cost_basis,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub name: String,
    pub total_value: f64,
    pub total_cost: f64,
    pub unrealized_pnl: f64,
    /// Fraction of cost basis (0.05 = 5%). `None` when cost basis is zero.
    pub unrealized_pnl_pct: Option<f64>,
    pub positions: Vec<PositionValuation>,
}

impl PortfolioSummary {
    /// The P&L fraction, or `UndefinedRatio` when there is no cost basis to divide by.
    pub fn pnl_ratio(&self) -> EngineResult<f64> {
        self.unrealized_pnl_pct.ok_or_else(|| {
            EngineError::UndefinedRatio(format!(
                "portfolio {:?} has zero cost basis; unrealized pnl is {}",
                self.name, self.unrealized_pnl
            ))
        })
    }
}
