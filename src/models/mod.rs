//! Portfolio data models
//!
//! A lenient typed view of the dashboard payload plus derived totals.

pub mod portfolio;
pub mod summary;

pub use portfolio::{
    CcPosition, ChangeStatus, ClosedTrade, CspPosition, IdlePosition, OptChange, OptEstimate,
    Portfolio, WheelCycle, WheelPhase,
};
pub use summary::{ExpiringPosition, PortfolioSummary, EXPIRY_WARNING_DAYS};
