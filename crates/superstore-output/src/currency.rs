//! Dollar formatting.

/// Format an amount with two decimals, e.g. `$425.00` or `-$12.50`.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount * 100.0).round() / 100.0;
    if cents < 0.0 {
        format!("-${:.2}", -cents)
    } else {
        // also maps -0.0 to "$0.00"
        format!("${:.2}", cents.abs())
    }
}

/// Format an amount rounded to whole dollars, e.g. `$316`.
pub fn format_whole_dollars(amount: f64) -> String {
    let dollars = amount.round();
    if dollars < 0.0 {
        format!("-${:.0}", -dollars)
    } else {
        format!("${:.0}", dollars.abs())
    }
}
