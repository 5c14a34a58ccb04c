//! Portfolio aggregation.
//! Pure function: validates every position up front, then one linear pass.

use crate::errors::{EngineError, EngineResult};
use crate::portfolio::{PortfolioSummary, Position, PositionValuation};

/// Aggregate market value, cost basis and unrealized P&L over `positions`.
///
/// `name` is a free-form label and is passed through untouched. Positions
/// sharing a symbol are summed independently, never merged.
pub fn summarize(name: &str, positions: &[Position]) -> EngineResult<PortfolioSummary> {
    if positions.is_empty() {
        return Err(EngineError::invalid("positions", "must contain at least one position"));
    }
    for (i, p) in positions.iter().enumerate() {
        p.validate(i)?;
    }

    let mut total_value = 0.0;
    let mut total_cost = 0.0;
    let mut breakdown = Vec::with_capacity(positions.len());
    for p in positions {
        let v = PositionValuation::from(p);
        total_value += v.market_value;
        total_cost += v.cost_basis;
        breakdown.push(v);
    }

    if !total_value.is_finite() || !total_cost.is_finite() {
        return Err(EngineError::invalid("positions", "aggregate value overflows f64"));
    }

    let unrealized_pnl = total_value - total_cost;
    // A subnormal cost basis divides through to inf; that is undefined too.
    let unrealized_pnl_pct = if total_cost > 0.0 {
        Some(unrealized_pnl / total_cost).filter(|pct| pct.is_finite())
    } else {
        None
    };

    Ok(PortfolioSummary {
        name: name.to_string(),
        total_value,
        total_cost,
        unrealized_pnl,
        unrealized_pnl_pct,
        positions: breakdown,
    })
}
