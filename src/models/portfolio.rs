//! Typed view of the portfolio payload
//!
//! Only used for reporting. The encrypted bytes always come from the
//! untouched JSON value, so fields this model does not know about survive.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{WheelboardError, WheelboardResult};
use crate::vault::PlaintextPayload;

/// An open covered call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CcPosition {
    pub ticker: String,
    pub strike: f64,
    pub expiry: Option<NaiveDate>,
    /// Premium collected for the contract, in dollars
    pub premium: f64,
    pub cost_per_share: f64,
    pub sell_date: Option<NaiveDate>,
    pub shares: u32,
}

/// An open cash-secured put
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CspPosition {
    pub ticker: String,
    pub strike: f64,
    pub expiry: Option<NaiveDate>,
    pub premium: f64,
    /// Cash set aside to cover assignment
    pub collateral: f64,
    pub sell_date: Option<NaiveDate>,
}

/// A finished option trade
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClosedTrade {
    pub ticker: String,
    #[serde(rename = "type")]
    pub trade_type: String,
    pub strike: f64,
    pub open_date: Option<NaiveDate>,
    pub close_date: Option<NaiveDate>,
    pub premium: f64,
    pub assigned: bool,
    pub note: String,
}

/// Shares held without an option written against them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdlePosition {
    pub ticker: String,
    pub shares: u32,
    pub cost: f64,
    #[serde(rename = "canCC")]
    pub can_cc: bool,
    pub note: String,
}

/// Where a ticker currently sits in the wheel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WheelPhase {
    Csp,
    Cc,
    CcExit,
    CcLocked,
    #[default]
    #[serde(other)]
    Other,
}

/// Wheel state for one ticker
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WheelCycle {
    pub ticker: String,
    pub phase: WheelPhase,
    pub detail: String,
    pub note: String,
}

/// Status class of a change log entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    Done,
    Active,
    Pending,
    #[default]
    #[serde(other)]
    Other,
}

/// Change log entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptChange {
    pub action: String,
    pub cls: ChangeStatus,
    pub detail: String,
}

/// Expected monthly premium for a ticker
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptEstimate {
    pub ticker: String,
    pub shares: u32,
    pub contracts: u32,
    pub monthly_premium: f64,
    pub cost: f64,
}

/// The whole dashboard data set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Portfolio {
    pub updated_at: Option<NaiveDate>,
    pub cash: Option<f64>,
    pub cc_positions: Vec<CcPosition>,
    pub csp_positions: Vec<CspPosition>,
    pub closed_trades: Vec<ClosedTrade>,
    pub idle_positions: Vec<IdlePosition>,
    pub wheel_cycles: Vec<WheelCycle>,
    pub opt_changes: Vec<OptChange>,
    pub opt_estimates: Vec<OptEstimate>,
}

impl Portfolio {
    /// Read the typed view out of a payload
    ///
    /// # Errors
    ///
    /// Returns a validation error if the payload is not an object or a known
    /// field has the wrong shape.
    pub fn from_payload(payload: &PlaintextPayload) -> WheelboardResult<Self> {
        if !payload.is_object() {
            return Err(WheelboardError::Validation(
                "portfolio data must be a JSON object".to_string(),
            ));
        }

        Portfolio::deserialize(payload)
            .map_err(|e| WheelboardError::Validation(format!("Unexpected portfolio data: {}", e)))
    }
}
