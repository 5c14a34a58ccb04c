use crate::errors::{EngineError, EngineResult};
use crate::models::normal::{norm_cdf, norm_pdf};
use crate::models::{Greeks, OptionContract, OptionType, PricingModel, PricingResult};

/// Black-Scholes-Merton pricing for European calls and puts.
///
/// d1 = (ln(S/K) + (r + sigma^2/2)*T) / (sigma * sqrt(T))
/// d2 = d1 - sigma * sqrt(T)
///
/// Call = S*Phi(d1) - K*e^(-rT)*Phi(d2)
/// Put  = K*e^(-rT)*Phi(-d2) - S*Phi(-d1)
///
/// Stateless and allocation free; one instance can be shared across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlackScholes;

impl PricingModel for BlackScholes {
    #[inline]
    fn name(&self) -> &'static str {
        "Black-Scholes"
    }

    fn price(&self, contract: &OptionContract) -> EngineResult<PricingResult> {
        contract.validate()?;

        let result = if contract.time_to_maturity == 0.0 {
            at_expiry(contract)
        } else if contract.volatility == 0.0 {
            deterministic(contract)
        } else {
            analytic(contract)
        };
        representable(result)
    }
}

/// Valid inputs can still push e^(-rT) or sigma*sqrt(T) past f64 range.
/// Such a result is rejected rather than returned as inf/NaN.
fn representable(result: PricingResult) -> EngineResult<PricingResult> {
    let g = &result.greeks;
    let outputs = [
        ("price", result.price),
        ("delta", g.delta),
        ("gamma", g.gamma),
        ("theta", g.theta),
        ("vega", g.vega),
        ("rho", g.rho),
    ];
    if let Some((name, value)) = outputs.iter().find(|(_, v)| !v.is_finite()) {
        return Err(EngineError::invalid(
            "contract",
            format!("{name} evaluates to {value}, outside f64 range for these inputs"),
        ));
    }
    Ok(PricingResult {
        // Deep out of the money the subtraction can land a few ulps below zero.
        price: result.price.max(0.0),
        ..result
    })
}

/// 1 above the strike, 0 below, 0.5 exactly at the money.
#[inline]
fn moneyness_step(level: f64, strike: f64) -> f64 {
    if level > strike {
        1.0
    } else if level < strike {
        0.0
    } else {
        0.5
    }
}

/// T == 0: intrinsic value, step delta, every other Greek zero.
fn at_expiry(c: &OptionContract) -> PricingResult {
    let step = moneyness_step(c.underlying_price, c.strike);
    let delta = match c.option_type {
        OptionType::Call => step,
        OptionType::Put => step - 1.0,
    };
    PricingResult {
        price: c.intrinsic_value(),
        greeks: Greeks {
            delta,
            ..Greeks::default()
        },
    }
}

/// sigma -> 0, T > 0: the underlying grows at r, so the payoff is known today.
/// Phi(d1) and Phi(d2) both collapse to the step on F = S*e^(rT) against K.
fn deterministic(c: &OptionContract) -> PricingResult {
    let s = c.underlying_price;
    let k = c.strike;
    let t = c.time_to_maturity;
    let r = c.risk_free_rate;
    let df = c.discount_factor();
    let k_df = k * df;
    let n = moneyness_step(c.forward_price(), k);

    let (price, delta, theta, rho) = match c.option_type {
        OptionType::Call => ((s - k_df) * n, n, -r * k_df * n, k * t * df * n),
        OptionType::Put => (
            (k_df - s) * (1.0 - n),
            n - 1.0,
            r * k_df * (1.0 - n),
            -k * t * df * (1.0 - n),
        ),
    };

    PricingResult {
        price,
        greeks: Greeks {
            delta,
            gamma: 0.0,
            theta,
            vega: 0.0,
            rho,
        },
    }
}

/// General case, T > 0 and sigma > 0.
fn analytic(c: &OptionContract) -> PricingResult {
    let s = c.underlying_price;
    let k = c.strike;
    let t = c.time_to_maturity;
    let r = c.risk_free_rate;
    let sigma = c.volatility;

    let sqrt_t = t.sqrt();
    let sigma_sqrt_t = sigma * sqrt_t;
    // d1 split term by term so sigma^2 never overflows
    let d1 = (s / k).ln() / sigma_sqrt_t + (r / sigma) * sqrt_t + 0.5 * sigma_sqrt_t;
    if sigma_sqrt_t == 0.0 || d1.is_nan() {
        // sigma is positive but too small to resolve: use its limit
        return deterministic(c);
    }
    let d2 = d1 - sigma_sqrt_t;

    let df = c.discount_factor();
    let pdf_d1 = norm_pdf(d1);

    let gamma = pdf_d1 / (s * sigma_sqrt_t);
    let vega = s * pdf_d1 * sqrt_t;
    let time_decay = -(s * pdf_d1 * sigma) / (2.0 * sqrt_t);

    let (price, delta, theta, rho) = match c.option_type {
        OptionType::Call => {
            let n_d1 = norm_cdf(d1);
            let n_d2 = norm_cdf(d2);
            (
                s * n_d1 - k * df * n_d2,
                n_d1,
                time_decay - r * k * df * n_d2,
                k * t * df * n_d2,
            )
        }
        OptionType::Put => {
            let n_neg_d1 = norm_cdf(-d1);
            let n_neg_d2 = norm_cdf(-d2);
            (
                k * df * n_neg_d2 - s * n_neg_d1,
                norm_cdf(d1) - 1.0,
                time_decay + r * k * df * n_neg_d2,
                -k * t * df * n_neg_d2,
            )
        }
    };

    PricingResult {
        price,
        greeks: Greeks {
            delta,
            gamma,
            theta,
            vega,
            rho,
        },
    }
}
