//! Portfolio summary display formatting

use crate::models::PortfolioSummary;

/// Format a dollar amount with thousands separators
pub fn format_dollars(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!(
        "{}${}.{:02}",
        if negative { "-" } else { "" },
        grouped,
        cents % 100
    )
}

/// Format the portfolio summary for terminal output
pub fn format_summary(summary: &PortfolioSummary) -> String {
    let mut output = String::new();

    let updated = summary
        .updated_at
        .map(|d| d.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    output.push_str(&format!("Portfolio as of {}\n", updated));
    output.push_str(&format!("{:-<40}\n", ""));

    let rows = [
        ("Covered calls", summary.cc_count.to_string()),
        ("Cash-secured puts", summary.csp_count.to_string()),
        ("Idle holdings", summary.idle_count.to_string()),
        ("Wheel cycles", summary.wheel_count.to_string()),
        (
            "Closed trades",
            format!("{} ({} assigned)", summary.closed_count, summary.assigned_count),
        ),
        ("Open premium", format_dollars(summary.open_premium)),
        ("CSP collateral", format_dollars(summary.csp_collateral)),
        ("Realized premium", format_dollars(summary.realized_premium)),
        (
            "Est. monthly premium",
            format_dollars(summary.estimated_monthly_premium),
        ),
    ];
    for (label, value) in rows {
        output.push_str(&format!("{:<22}{:>18}\n", label, value));
    }

    if !summary.expiring_soon.is_empty() {
        output.push('\n');
        output.push_str("Expiring soon:\n");
        for p in &summary.expiring_soon {
            output.push_str(&format!(
                "  {:<6} {:<4} ${:<8} {} ({}d)\n",
                p.ticker, p.kind, p.strike, p.expiry, p.days_left
            ));
        }
    }

    output
}
