//! Printable HTML report
//!
//! Formats a month's expenses into a standalone HTML page. The caller
//! supplies the expense list and total; nothing is aggregated here.

use std::io::Write;

use chrono::NaiveDate;

use crate::config::settings::is_valid_date_format;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{color_for, Category, Money, Month, Transaction};

const STYLE: &str = r#"
    body { font-family: Arial, sans-serif; margin: 20px; color: #333; }
    .header { text-align: center; margin-bottom: 30px; border-bottom: 2px solid #10B981; padding-bottom: 20px; }
    .summary { background: #f8f9fa; padding: 20px; border-radius: 8px; margin-bottom: 30px; }
    .transaction { display: flex; justify-content: space-between; padding: 10px 0; border-bottom: 1px solid #eee; }
    .total { font-weight: bold; font-size: 18px; color: #10B981; text-align: right; margin-top: 20px; padding-top: 20px; border-top: 2px solid #10B981; }
    .category { color: #666; font-size: 14px; }
    .amount { font-weight: bold; color: #EF4444; }
    .date { color: #888; font-size: 12px; }
"#;

/// Default file name for a month's report
pub fn report_filename(month: Month) -> String {
    format!("finance-report-{}.html", month)
}

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// A month's expense report
pub struct HtmlReport<'a> {
    expenses: &'a [Transaction],
    categories: &'a [Category],
    total: Money,
    month: Month,
    generated_on: NaiveDate,
    currency_symbol: &'a str,
    date_format: &'a str,
}

impl<'a> HtmlReport<'a> {
    pub fn new(expenses: &'a [Transaction], total: Money, month: Month, generated_on: NaiveDate) -> Self {
        Self {
            expenses,
            categories: &[],
            total,
            month,
            generated_on,
            currency_symbol: "$",
            date_format: "%Y-%m-%d",
        }
    }

    /// Categories used to color each expense's category label
    pub fn categories(mut self, categories: &'a [Category]) -> Self {
        self.categories = categories;
        self
    }

    pub fn currency_symbol(mut self, symbol: &'a str) -> Self {
        self.currency_symbol = symbol;
        self
    }

    /// strftime format for dates in the report
    ///
    /// A pattern chrono cannot render leaves the ISO default in place.
    pub fn date_format(mut self, format: &'a str) -> Self {
        if is_valid_date_format(format) {
            self.date_format = format;
        } else {
            tracing::warn!(format, "ignoring invalid date format");
        }
        self
    }

    fn money(&self, amount: Money) -> String {
        escape_html(&amount.format_with_symbol(self.currency_symbol))
    }

    fn date(&self, date: &str) -> String {
        match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            Ok(parsed) => escape_html(&parsed.format(self.date_format).to_string()),
            Err(_) => escape_html(date),
        }
    }

    /// Render the full document
    pub fn render(&self) -> String {
        let month_name = escape_html(&self.month.long_label());
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!(
            "<title>Financial Report - {}</title>\n<style>{}</style>\n</head>\n<body>\n",
            month_name, STYLE
        ));

        html.push_str(&format!(
            "<div class=\"header\">\n<h1>Financial Report</h1>\n<h2>{}</h2>\n<p>Generated on {}</p>\n</div>\n",
            month_name,
            escape_html(&self.generated_on.format(self.date_format).to_string())
        ));

        html.push_str(&format!(
            "<div class=\"summary\">\n<h3>Monthly Summary</h3>\n\
             <p><strong>Total Expenses:</strong> {}</p>\n\
             <p><strong>Number of Transactions:</strong> {}</p>\n</div>\n",
            self.money(self.total),
            self.expenses.len()
        ));

        html.push_str("<h3>Expense Details</h3>\n");
        for expense in self.expenses {
            html.push_str(&format!(
                "<div class=\"transaction\">\n<div>\n<div><strong>{}</strong></div>\n\
                 <div class=\"category\"><span style=\"color: {}\">&#9679;</span> {}</div>\n<div class=\"date\">{}</div>\n</div>\n\
                 <div class=\"amount\">{}</div>\n</div>\n",
                escape_html(&expense.description),
                escape_html(color_for(self.categories, &expense.category)),
                escape_html(&expense.category),
                self.date(&expense.date),
                self.money(expense.amount)
            ));
        }

        html.push_str(&format!(
            "<div class=\"total\">Grand Total: {}</div>\n</body>\n</html>\n",
            self.money(self.total)
        ));

        html
    }

    /// Write the document to `writer`
    pub fn write_to<W: Write>(&self, writer: &mut W) -> FinanceResult<()> {
        writer
            .write_all(self.render().as_bytes())
            .map_err(|e| FinanceError::Export(e.to_string()))
    }
}
