//! pt-BR display helpers shared by the text and markdown outputs.

use chrono::NaiveDate;

pub const NOT_INFORMED: &str = "Não informado";
pub const NO_SCORE: &str = "sem nota";

/// Formats an amount as Brazilian reais, e.g. `R$ 1.234,56`.
pub fn format_brl(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}R$ {grouped},{:02}", cents % 100)
}

pub fn format_optional_brl(amount: Option<f64>) -> String {
    amount.map(format_brl).unwrap_or_else(|| NOT_INFORMED.to_string())
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(score) => format!("{score:.2}"),
        None => NO_SCORE.to_string(),
    }
}

/// Text rendering of a gauge, `[######----]` for 3 on the 0 to 5 scale.
pub fn gauge_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
