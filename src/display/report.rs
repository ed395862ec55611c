//! Report formatting helpers

use crate::models::Money;
use crate::reports::{BudgetAlert, CategoryShare, MonthlyTotals};

const BAR_WIDTH: usize = 24;

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// A horizontal bar scaled against `max_value`
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Truncate to `max_chars` characters, marking the cut with "..."
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 3 {
        ".".repeat(max_chars)
    } else {
        let head: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", head)
    }
}

/// Monthly income/expense series, one line per month
pub fn format_series(series: &[MonthlyTotals], currency_symbol: &str) -> String {
    let max = series
        .iter()
        .flat_map(|m| [m.income_total, m.expense_total])
        .max()
        .unwrap_or_else(Money::zero)
        .cents() as f64;

    let mut output = format!(
        "{:<8} {:>12} {:>12} {:>12}  {}\n",
        "Month", "Income", "Expenses", "Net", "Spending"
    );
    output.push_str(&"─".repeat(74));
    output.push('\n');

    for month in series {
        output.push_str(&format!(
            "{:<8} {:>12} {:>12} {:>12}  {}\n",
            month.label,
            month.income_total.format_with_symbol(currency_symbol),
            month.expense_total.format_with_symbol(currency_symbol),
            month.net.format_with_symbol(currency_symbol),
            format_bar(month.expense_total.cents() as f64, max, BAR_WIDTH)
        ));
    }

    output
}

/// Category breakdown with each share of the total
pub fn format_breakdown(shares: &[CategoryShare], currency_symbol: &str) -> String {
    if shares.is_empty() {
        return "No transactions in this period.\n".to_string();
    }

    let total: Money = shares.iter().map(|s| s.value).sum();
    let mut output = String::new();

    for share in shares {
        let pct = share.value.cents() as f64 * 100.0 / total.cents() as f64;
        output.push_str(&format!(
            "{:<20} {:>12} {:>5}  {}  {}\n",
            truncate(&share.name, 20),
            share.value.format_with_symbol(currency_symbol),
            format_percentage(pct),
            format_bar(pct, 100.0, BAR_WIDTH),
            share.color
        ));
    }

    output.push_str(&"─".repeat(40));
    output.push('\n');
    output.push_str(&format!(
        "{:<20} {:>12}\n",
        "Total",
        total.format_with_symbol(currency_symbol)
    ));
    output
}

/// Budget alerts, or a reassuring line when there are none
pub fn format_alerts(alerts: &[BudgetAlert], currency_symbol: &str) -> String {
    if alerts.is_empty() {
        return "No budgets above 80% this month.\n".to_string();
    }

    alerts
        .iter()
        .map(|alert| {
            let marker = if alert.percentage > 100.0 { "!!" } else { "! " };
            format!(
                "{} {:<20} {} of {} ({:.0}% of budget)\n",
                marker,
                truncate(&alert.category, 20),
                alert.spent.format_with_symbol(currency_symbol),
                alert.budget.format_with_symbol(currency_symbol),
                alert.percentage
            )
        })
        .collect()
}
