// Currency display for balances (en-US conventions)

use rusty_money::iso;

/// Symbols used by en-US currency formatting. Codes not listed here are
/// displayed as the ISO code followed by a non-breaking space.
const EN_US_SYMBOLS: &[(&str, &str)] = &[
    ("USD", "$"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("JPY", "¥"),
    ("INR", "₹"),
    ("AUD", "A$"),
    ("CAD", "CA$"),
    ("NZD", "NZ$"),
    ("HKD", "HK$"),
    ("MXN", "MX$"),
    ("BRL", "R$"),
    ("TWD", "NT$"),
    ("CNY", "CN¥"),
    ("KRW", "₩"),
    ("ILS", "₪"),
    ("VND", "₫"),
    ("PHP", "₱"),
];

/// Format `amount` in `code` the way an en-US locale would.
///
/// A missing (or NaN) amount counts as zero. When `code` is not a known
/// ISO 4217 currency the result falls back to `$` with two decimals and no
/// digit grouping.
///
/// ```
/// use bank_console::currency::format_currency;
///
/// assert_eq!(format_currency(Some(1234.5), "USD"), "$1,234.50");
/// assert_eq!(format_currency(None, "USD"), "$0.00");
/// assert_eq!(format_currency(Some(10.0), "ZZZ"), "$10.00");
/// ```
pub fn format_currency(amount: Option<f64>, code: &str) -> String {
    let value = match amount {
        Some(v) if !v.is_nan() => v,
        _ => 0.0,
    };

    let normalized = code.trim().to_uppercase();
    match iso::find(&normalized) {
        Some(currency) => format_known(value, &normalized, currency.exponent as usize),
        None => format!("${:.2}", round_half_away(value, 2)),
    }
}

/// Display symbol for a recognized code
pub fn symbol_for(code: &str) -> String {
    EN_US_SYMBOLS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, s)| s.to_string())
        .unwrap_or_else(|| format!("{}\u{a0}", code))
}

fn format_known(value: f64, code: &str, fraction_digits: usize) -> String {
    if value.is_infinite() {
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{}{}∞", sign, symbol_for(code));
    }

    let fixed = format!(
        "{:.*}",
        fraction_digits,
        round_half_away(value.abs(), fraction_digits)
    );
    let (integer, fraction) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    // "-0.00" is not a thing in en-US output
    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    let mut out = format!("{}{}{}", sign, symbol_for(code), group_thousands(integer));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// `format!` rounds exact ties to even; display rounding goes away from zero
fn round_half_away(value: f64, fraction_digits: usize) -> f64 {
    let scale = 10f64.powi(fraction_digits as i32);
    (value * scale).round() / scale
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
