/// Format a number with thousands separators and a fixed number of decimals.
///
/// ```
/// use spend_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5, 1), "1,234.5");
/// assert_eq!(format_number(-9876.5, 2), "-9,876.50");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let fixed = format!("{:.prec$}", value.abs(), prec = decimals as usize);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::new();
    // "-0.00" is printed as "0.00".
    if value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Format a spending amount in dollars, e.g. `$1,234.50`.
///
/// ```
/// use spend_core::formatting::format_currency;
///
/// assert_eq!(format_currency(1234.5), "$1,234.50");
/// assert_eq!(format_currency(0.0), "$0.00");
/// ```
pub fn format_currency(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${}", format_number(amount.abs(), 2))
    } else {
        format!("${}", format_number(amount, 2))
    }
}

/// Short label for chart axes: `$950`, `$1.2k`, `$3.4M`.
pub fn format_axis_amount(amount: f64) -> String {
    let abs = amount.abs();
    let sign = if amount < 0.0 { "-" } else { "" };
    if abs >= 1_000_000.0 {
        format!("{sign}${:.1}M", abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{sign}${:.1}k", abs / 1_000.0)
    } else {
        format!("{sign}${:.0}", abs)
    }
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
