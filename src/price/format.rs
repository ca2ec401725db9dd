//! en-US currency rendering

use super::Price;
use rust_decimal::RoundingStrategy;

/// Status text shown while no price is available
pub const PLACEHOLDER_TEXT: &str = "BTC $ ---";

/// Render a price as an en-US currency amount: `65000.5` -> `65,000.50`
pub fn format_usd(price: Price) -> String {
    let rounded = price
        .amount()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{:.2}", rounded);

    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
    format!("{}.{}", group_thousands(int_part), frac_part)
}

/// Status bar text for a successful poll
pub fn status_text(price: Price) -> String {
    format!("BTC $ {}", format_usd(price))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
