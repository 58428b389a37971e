//! Aggregate figures reported after loading portfolio data

use chrono::NaiveDate;

use super::portfolio::Portfolio;

/// Positions closer to expiry than this are flagged
pub const EXPIRY_WARNING_DAYS: i64 = 7;

/// An open option close to expiry
#[derive(Debug, Clone, PartialEq)]
pub struct ExpiringPosition {
    pub ticker: String,
    /// `CC` or `CSP`
    pub kind: &'static str,
    pub strike: f64,
    pub expiry: NaiveDate,
    pub days_left: i64,
}

/// Portfolio totals
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortfolioSummary {
    pub updated_at: Option<NaiveDate>,
    pub cc_count: usize,
    pub csp_count: usize,
    pub idle_count: usize,
    pub closed_count: usize,
    pub wheel_count: usize,
    pub assigned_count: usize,
    pub open_premium: f64,
    pub csp_collateral: f64,
    pub realized_premium: f64,
    pub estimated_monthly_premium: f64,
    pub expiring_soon: Vec<ExpiringPosition>,
}

impl PortfolioSummary {
    /// Compute totals for a portfolio
    ///
    /// Expiry distances are measured from `updatedAt`; without it nothing is
    /// flagged.
    pub fn from_portfolio(portfolio: &Portfolio) -> Self {
        let open_premium = portfolio.cc_positions.iter().map(|p| p.premium).sum::<f64>()
            + portfolio.csp_positions.iter().map(|p| p.premium).sum::<f64>();

        let mut expiring_soon = Vec::new();
        if let Some(as_of) = portfolio.updated_at {
            let options = portfolio
                .cc_positions
                .iter()
                .map(|p| ("CC", &p.ticker, p.strike, p.expiry))
                .chain(
                    portfolio
                        .csp_positions
                        .iter()
                        .map(|p| ("CSP", &p.ticker, p.strike, p.expiry)),
                );

            for (kind, ticker, strike, expiry) in options {
                let Some(expiry) = expiry else { continue };
                let days_left = (expiry - as_of).num_days();
                if (0..=EXPIRY_WARNING_DAYS).contains(&days_left) {
                    expiring_soon.push(ExpiringPosition {
                        ticker: ticker.clone(),
                        kind,
                        strike,
                        expiry,
                        days_left,
                    });
                }
            }
            expiring_soon.sort_by(|a, b| a.expiry.cmp(&b.expiry).then(a.ticker.cmp(&b.ticker)));
        }

        Self {
            updated_at: portfolio.updated_at,
            cc_count: portfolio.cc_positions.len(),
            csp_count: portfolio.csp_positions.len(),
            idle_count: portfolio.idle_positions.len(),
            closed_count: portfolio.closed_trades.len(),
            wheel_count: portfolio.wheel_cycles.len(),
            assigned_count: portfolio.closed_trades.iter().filter(|t| t.assigned).count(),
            open_premium,
            csp_collateral: portfolio.csp_positions.iter().map(|p| p.collateral).sum(),
            realized_premium: portfolio.closed_trades.iter().map(|t| t.premium).sum(),
            estimated_monthly_premium: portfolio
                .opt_estimates
                .iter()
                .map(|e| e.monthly_premium)
                .sum(),
            expiring_soon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::portfolio::{ClosedTrade, CcPosition, CspPosition, OptEstimate};

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn sample() -> Portfolio {
        Portfolio {
            updated_at: date(2026, 2, 23),
            cc_positions: vec![
                CcPosition {
                    ticker: "PDD".into(),
                    strike: 108.0,
                    expiry: date(2026, 2, 27),
                    premium: 58.0,
                    ..Default::default()
                },
                CcPosition {
                    ticker: "CRCL".into(),
                    strike: 65.0,
                    expiry: date(2026, 6, 18),
                    premium: 720.0,
                    ..Default::default()
                },
            ],
            csp_positions: vec![CspPosition {
                ticker: "CRM".into(),
                strike: 170.0,
                expiry: date(2026, 2, 27),
                premium: 570.0,
                collateral: 17000.0,
                ..Default::default()
            }],
            closed_trades: vec![
                ClosedTrade {
                    ticker: "COIN".into(),
                    premium: 170.0,
                    assigned: true,
                    ..Default::default()
                },
                ClosedTrade {
                    ticker: "JD".into(),
                    premium: 21.25,
                    ..Default::default()
                },
            ],
            opt_estimates: vec![OptEstimate {
                ticker: "COIN".into(),
                monthly_premium: 800.0,
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_totals() {
        let summary = PortfolioSummary::from_portfolio(&sample());
        assert_eq!(summary.cc_count, 2);
        assert_eq!(summary.csp_count, 1);
        assert_eq!(summary.closed_count, 2);
        assert_eq!(summary.assigned_count, 1);
        assert_eq!(summary.open_premium, 1348.0);
        assert_eq!(summary.csp_collateral, 17000.0);
        assert_eq!(summary.realized_premium, 191.25);
        assert_eq!(summary.estimated_monthly_premium, 800.0);
    }

    #[test]
    fn test_expiring_soon() {
        let summary = PortfolioSummary::from_portfolio(&sample());
        let tickers: Vec<&str> = summary
            .expiring_soon
            .iter()
            .map(|p| p.ticker.as_str())
            .collect();
        assert_eq!(tickers, ["CRM", "PDD"]);
        assert_eq!(summary.expiring_soon[0].days_left, 4);
        assert_eq!(summary.expiring_soon[0].kind, "CSP");
    }

    #[test]
    fn test_no_reference_date() {
        let mut portfolio = sample();
        portfolio.updated_at = None;
        assert!(PortfolioSummary::from_portfolio(&portfolio)
            .expiring_soon
            .is_empty());
    }
}
