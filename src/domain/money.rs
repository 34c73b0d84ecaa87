//! Display-string money handling. Clients send totals as display strings
//! ("₵120.00", "$15", "1,200"); the gateway wants minor units (pesewas).

/// Parses a display amount into minor units (×100, rounded). Returns 0 for
/// anything unparseable, so callers treat non-positive as invalid.
pub fn parse_amount_minor(value: &str) -> i64 {
    let cleaned: String = value
        .chars()
        .filter(|c| !matches!(c, '₵' | '$' | ',') && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return 0;
    }
    let amount: f64 = cleaned.parse().unwrap_or(0.0);
    (amount * 100.0).round() as i64
}

/// Normalizes a display amount to the configured currency symbol with two
/// decimals. Already-symbolled values pass through, `$`-prefixed values get
/// their symbol swapped, bare numbers get the symbol prepended, and anything
/// non-numeric is returned as-is.
pub fn format_amount(symbol: &str, value: &str) -> String {
    let s = value.trim();
    if s.is_empty() {
        return String::new();
    }
    if s.starts_with(symbol) {
        return s.to_string();
    }
    if let Some(rest) = s.strip_prefix('$') {
        return format!("{}{}", symbol, rest.trim_start());
    }
    if s.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        let numeric: String = s
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
            .collect();
        let amount: f64 = numeric.parse().unwrap_or(0.0);
        return format!("{}{:.2}", symbol, amount);
    }
    s.to_string()
}

/// Renders minor units as a bare two-decimal display string.
pub fn minor_to_display(amount_minor: i64) -> String {
    format!("{:.2}", amount_minor as f64 / 100.0)
}
