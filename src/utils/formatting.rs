//! Formatting utilities used for CLI and export outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Render an amount in currency units, e.g. `+30 €`, `-10`, `0`.
pub fn format_amount(amount: i64, symbol: &str, want_sign: bool) -> String {
    let sign = if amount > 0 && want_sign {
        "+"
    } else if amount < 0 {
        "-"
    } else {
        ""
    };

    if symbol.is_empty() {
        format!("{}{}", sign, amount.abs())
    } else {
        format!("{}{} {}", sign, amount.abs(), symbol)
    }
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
