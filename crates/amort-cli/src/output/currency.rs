use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;
use std::str::FromStr;

const THOUSANDS_SEPARATOR: char = '.';

/// Round to the nearest whole currency unit and group thousands with dots,
/// e.g. `2000000000` -> `2.000.000.000`.
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(THOUSANDS_SEPARATOR);
        }
        grouped.push(ch);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Percentage with a fixed number of decimals, e.g. `6.7` -> `6.70%`.
pub fn format_percent(rate: Decimal, decimals: u32) -> String {
    let rounded = rate.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}%", decimals as usize, rounded)
}

/// Render a JSON cell for human display. Decimal strings are treated as money
/// unless the key names a rate (two decimals) or a ratio (one decimal).
pub fn format_cell(key: &str, value: &Value) -> String {
    match value {
        Value::String(s) => match Decimal::from_str(s) {
            Ok(d) if is_rate_key(key) => format_percent(d, 2),
            Ok(d) if key.contains("ratio") => format_percent(d, 1),
            Ok(d) => format_money(d),
            Err(_) => s.clone(),
        },
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(|v| format_cell(key, v)).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

fn is_rate_key(key: &str) -> bool {
    key == "rate" || key.ends_with("_rate")
}
