pub mod black_scholes;
pub mod normal;

use crate::errors::{ensure_finite, EngineError, EngineResult};
use black_scholes::BlackScholes;
use serde::{Deserialize, Serialize};

/// All pricing models implement this trait.
/// price() must be a pure function: deterministic output from inputs only.
/// Send + Sync required so one instance can serve concurrent requests.
pub trait PricingModel: Send + Sync {
    fn name(&self) -> &'static str;

    /// Validate the contract, then return its fair value and Greeks.
    fn price(&self, contract: &OptionContract) -> EngineResult<PricingResult>;
}

/// Price a European option under Black-Scholes-Merton.
pub fn price(contract: &OptionContract) -> EngineResult<PricingResult> {
    BlackScholes.price(contract)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Put => write!(f, "put"),
        }
    }
}

impl std::str::FromStr for OptionType {
    type Err = EngineError;

    /// Case-sensitive: only "call" and "put" are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "call" => Ok(Self::Call),
            "put" => Ok(Self::Put),
            other => Err(EngineError::invalid(
                "option_type",
                format!("expected \"call\" or \"put\", got {other:?}"),
            )),
        }
    }
}

/// European option contract parameters. Constructed per request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    /// S, spot price of the underlying
    pub underlying_price: f64,
    /// K
    pub strike: f64,
    /// T in years
    pub time_to_maturity: f64,
    /// r, continuously compounded, as a decimal
    pub risk_free_rate: f64,
    /// sigma, annualized, as a decimal
    pub volatility: f64,
    pub option_type: OptionType,
}

impl OptionContract {
    pub fn new(
        underlying_price: f64,
        strike: f64,
        time_to_maturity: f64,
        risk_free_rate: f64,
        volatility: f64,
        option_type: OptionType,
    ) -> Self {
        Self {
            underlying_price,
            strike,
            time_to_maturity,
            risk_free_rate,
            volatility,
            option_type,
        }
    }

    /// Per-field checks, run once before any pricing math.
    /// The rate may be any finite real, including negative.
    pub fn validate(&self) -> EngineResult<()> {
        let s = ensure_finite("underlying_price", self.underlying_price)?;
        if s <= 0.0 {
            return Err(EngineError::invalid("underlying_price", format!("must be > 0, got {s}")));
        }
        let k = ensure_finite("strike", self.strike)?;
        if k <= 0.0 {
            return Err(EngineError::invalid("strike", format!("must be > 0, got {k}")));
        }
        let t = ensure_finite("time_to_maturity", self.time_to_maturity)?;
        if t < 0.0 {
            return Err(EngineError::invalid("time_to_maturity", format!("must be >= 0, got {t}")));
        }
        ensure_finite("risk_free_rate", self.risk_free_rate)?;
        let sigma = ensure_finite("volatility", self.volatility)?;
        if sigma < 0.0 {
            return Err(EngineError::invalid("volatility", format!("must be >= 0, got {sigma}")));
        }
        Ok(())
    }

    /// Payoff if exercised now.
    #[inline]
    pub fn intrinsic_value(&self) -> f64 {
        match self.option_type {
            OptionType::Call => (self.underlying_price - self.strike).max(0.0),
            OptionType::Put => (self.strike - self.underlying_price).max(0.0),
        }
    }

    /// F = S * e^(rT)
    #[inline]
    pub fn forward_price(&self) -> f64 {
        self.underlying_price * (self.risk_free_rate * self.time_to_maturity).exp()
    }

    /// e^(-rT)
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.risk_free_rate * self.time_to_maturity).exp()
    }
}

/// Sensitivities in per-year, per-unit terms. Rescaling is the caller's job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub vega: f64,
    pub rho: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    pub price: f64,
    pub greeks: Greeks,
}
